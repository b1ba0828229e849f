//! Checkpoints for speculative parsing.

/// A saved cursor position.
///
/// Obtained from `Parser::set_restore_point` and handed back to either
/// `Parser::restore` or `Parser::commit`, both of which consume it, so a
/// checkpoint can be resolved only once. Nested speculative parses each hold
/// their own value.
#[must_use = "a restore point must be restored or committed"]
#[derive(Debug, PartialEq, Eq)]
pub struct RestorePoint {
    pub(crate) index: usize,
}

impl RestorePoint {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// The token index the checkpoint was taken at.
    pub fn index(&self) -> usize {
        self.index
    }
}
