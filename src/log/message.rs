use super::Error;
use std::fmt::Display;

pub const VARIABLE_TOO_LONG: &str = "Variable name is too long";
pub const DIRECTIVE_TOO_LONG: &str = "Directive is too long";
pub const UNMATCHED_ENDFOR: &str = "Found 'endfor' with no matching 'for'";
pub const UNMATCHED_ELSE: &str = "Found 'else' with no matching 'if'";
pub const UNMATCHED_ENDIF: &str = "Found 'endif' with no matching 'if'";
pub const UNCLOSED_FOR: &str = "Unclosed 'for' loop at end of template";
pub const UNCLOSED_IF: &str = "Unclosed 'if' statement at end of template";
pub const INVALID_LOOP_TARGET: &str = "Variable for loop is not a valid array";
pub const GROW_OUTPUT: &str = "failed to grow output buffer";
pub const GROW_LOOP_STACK: &str = "failed to grow loop stack";
pub const GROW_CHECK_STACK: &str = "failed to grow conditional stack";
pub const UNSUPPORTED_VALUE: &str = "unsupported value";
pub const INVALID_SYNTAX: &str = "invalid syntax";

/// Return the reason text for a tag whose closing marker was never found.
pub fn unterminated_tag<T: Display>(begin: T) -> String {
    format!("Unterminated '{begin}' tag")
}

/// Return the reason text for a closing comment marker found outside of a comment.
pub fn unmatched_comment_close<T: Display>(end: T) -> String {
    format!("Unmatched comment closing tag '{end}'")
}

/// Return the reason text for a comment that is still open at the end of the template.
pub fn unterminated_comment<T: Display>(begin: T) -> String {
    format!("Unterminated HTML comment '{begin}'")
}

/// Return the reason text for a malformed "for" directive.
pub fn invalid_for<T: Display>(begin: T, end: T) -> String {
    format!("Invalid 'for' loop. Use: {begin} for item in items {end}")
}

/// Return the reason text for an "if" directive without a condition.
pub fn invalid_if<T: Display>(begin: T, end: T) -> String {
    format!("Invalid 'if' statement. Use: {begin} if condition {end}")
}

/// Return the reason text for a directive that is not recognized.
pub fn unknown_directive<T: Display>(text: T) -> String {
    format!("Unknown directive '{text}'")
}

/// Return the reason text for a variable that is absent from the store.
pub fn missing_variable<T: Display>(name: T) -> String {
    format!("Missing template variable for '{name}'")
}

/// Return an [`Error`] describing a missing template.
pub fn error_missing_template(name: &str) -> Error {
    Error::render(format!("template with name `{name}` not found in engine"))
        .with_help("add it with `.add_template`")
}

/// Return an [`Error`] describing a template name that is already taken.
pub fn error_duplicate_template(name: &str) -> Error {
    Error::render(format!(
        "template with name `{name}` already exists in engine"
    ))
    .with_help("overwrite it with `.add_template_must`")
}
