use crate::value::Array;
use std::collections::TryReserveError;

/// Capacity that a [`Stack`] reserves the first time it grows.
const INITIAL_CAPACITY: usize = 4;

/// A growable stack of frames.
///
/// Capacity doubles when a push does not fit, and a failed allocation is
/// returned to the caller instead of aborting.
#[derive(Debug)]
pub struct Stack<T> {
    frames: Vec<T>,
}

impl<T> Stack<T> {
    /// Create a new [`Stack`] with room for [`INITIAL_CAPACITY`] frames.
    pub fn new() -> Result<Self, TryReserveError> {
        let mut frames = Vec::new();
        frames.try_reserve_exact(INITIAL_CAPACITY)?;

        Ok(Self { frames })
    }

    /// Push a frame onto the [`Stack`].
    pub fn push(&mut self, frame: T) -> Result<(), TryReserveError> {
        if self.frames.len() == self.frames.capacity() {
            let additional = self.frames.capacity().max(INITIAL_CAPACITY);
            self.frames.try_reserve_exact(additional)?;
        }
        self.frames.push(frame);

        Ok(())
    }

    /// Remove the top frame, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.frames.pop()
    }

    /// Return the top frame, if any.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.frames.last()
    }

    /// Return the top frame mutably, if any.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.frames.last_mut()
    }

    /// Return the amount of frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate from the top frame down to the bottom frame.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &T> {
        self.frames.iter().rev()
    }
}

/// State of one active "for" loop.
#[derive(Debug)]
pub struct LoopFrame<'store> {
    /// The array being iterated.
    pub array: &'store Array,
    /// Zero based index of the current item.
    pub index: usize,
    /// Name of the loop variable.
    ///
    /// Owned, since the tag that declared it is left behind as soon as
    /// the body begins.
    pub name: String,
    /// Offset in the template where the loop body begins.
    pub start: usize,
}

impl<'store> LoopFrame<'store> {
    pub fn new(array: &'store Array, name: &str, start: usize) -> Self {
        Self {
            array,
            index: 0,
            name: name.to_string(),
            start,
        }
    }

    /// Return true if the index has moved past the last item.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.index >= self.array.len()
    }
}

/// State of one active "if" block.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CheckFrame {
    /// Result of the guard.
    pub guard: bool,
    /// True once the "else" tag has been reached.
    pub in_else: bool,
    /// Offset of the "if" tag.
    pub begin: usize,
}

impl CheckFrame {
    pub fn new(guard: bool, begin: usize) -> Self {
        Self {
            guard,
            in_else: false,
            begin,
        }
    }

    /// Return true if output must be withheld while this frame is on top.
    ///
    /// The taken arm is the "if" arm when the guard held, and the "else" arm
    /// otherwise.
    #[inline]
    pub fn is_skipping(&self) -> bool {
        self.guard == self.in_else
    }
}
