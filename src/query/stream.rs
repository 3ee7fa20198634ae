use super::builder::MenuQuery;
use crate::errors::Result;
use crate::logger::SENTENCE_TARGET;
use crate::transport::{StreamCallback, Transport};
use crate::types::Row;

impl<T: Transport> MenuQuery<T> {
    fn open(self, action: &str, callback: Option<StreamCallback>) -> Result<T::Stream> {
        let words = self.assemble(action)?.into_words();
        log::debug!(target: SENTENCE_TARGET, "stream {words:?}");
        log::info!("{}: opening stream", self.path());
        self.transport.stream(words, callback)
    }

    /// Subscribe to `path + action` (e.g. `/listen`, or `""` for the bare menu)
    /// without a callback; delivery is up to the transport's handle.
    ///
    /// # Errors
    /// Returns the transport's error if the subscription cannot be opened.
    pub fn stream(self, action: &str) -> Result<T::Stream> {
        self.open(action, None)
    }

    /// Subscribe and deliver every row (or the terminating error) to `callback`.
    ///
    /// # Errors
    /// Returns the transport's error if the subscription cannot be opened.
    pub fn stream_with<F>(self, action: &str, callback: F) -> Result<T::Stream>
    where
        F: FnMut(Result<Row>) + Send + 'static,
    {
        self.open(action, Some(Box::new(callback)))
    }

    /// Callback-only form: the bare menu path with no action.
    ///
    /// # Errors
    /// Returns the transport's error if the subscription cannot be opened.
    pub fn subscribe<F>(self, callback: F) -> Result<T::Stream>
    where
        F: FnMut(Result<Row>) + Send + 'static,
    {
        self.stream_with("", callback)
    }
}
