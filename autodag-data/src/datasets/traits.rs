use autodag_core::AutodagError;

/// Indexed access to training samples.
///
/// `Item` is whatever one sample is made of; for graph training it is the
/// list of leaf values of that sample (`Vec<Matrix>`).
pub trait Dataset {
    type Item;

    /// Returns sample `index`.
    ///
    /// # Errors
    /// `AutodagError::IndexOutOfBounds` when `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item, AutodagError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
