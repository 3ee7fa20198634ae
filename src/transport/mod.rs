//! Contract between the query compiler and whatever talks to the device.
//!
//! The compiler only produces sentences; a [`Transport`] sends them. One `write`
//! resolves once with every reply row, one `stream` keeps emitting rows until the
//! returned handle is stopped.

mod memory;

pub use memory::{MemoryStream, MemoryTransport, StreamState};

use crate::errors::Result;
use crate::types::Row;
use std::future::Future;

/// Receives each streamed row, or the error that ended the stream.
pub type StreamCallback = Box<dyn FnMut(Result<Row>) + Send + 'static>;

/// Control surface of a running subscription.
pub trait StreamControl: Send + Sync {
    fn pause(&self) -> impl Future<Output = Result<()>> + Send;
    fn resume(&self) -> impl Future<Output = Result<()>> + Send;
    fn stop(&self) -> impl Future<Output = Result<()>> + Send;
}

pub trait Transport: Send + Sync {
    type Stream: StreamControl;

    /// Send one sentence and collect the reply rows. A device trap resolves to
    /// `QueryError::Remote`.
    fn write(&self, sentence: Vec<String>) -> impl Future<Output = Result<Vec<Row>>> + Send;

    /// Open a subscription. Without a callback, delivery is transport-defined.
    ///
    /// # Errors
    /// Returns an error if the subscription cannot be opened.
    fn stream(&self, sentence: Vec<String>, callback: Option<StreamCallback>) -> Result<Self::Stream>;
}
