use crate::errors::CoreError;

/// A single string-valued slot that holds the whole portfolio document.
///
/// Read-modify-write with no transactions: the store reads the document,
/// changes it in memory and overwrites the slot. Implementations use
/// interior mutability so the store can hold them behind `&self`.
pub trait Persistence: Send + Sync {
    /// Current contents of the slot, or `None` if nothing was ever written.
    fn read(&self) -> Result<Option<String>, CoreError>;

    /// Replace the slot's contents wholesale.
    fn write(&self, document: &str) -> Result<(), CoreError>;

    /// Empty the slot so the next `read` returns `None`.
    fn clear(&self) -> Result<(), CoreError>;
}

impl<P: Persistence + ?Sized> Persistence for std::sync::Arc<P> {
    fn read(&self) -> Result<Option<String>, CoreError> {
        (**self).read()
    }

    fn write(&self, document: &str) -> Result<(), CoreError> {
        (**self).write(document)
    }

    fn clear(&self) -> Result<(), CoreError> {
        (**self).clear()
    }
}
