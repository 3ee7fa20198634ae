use super::{StreamCallback, StreamControl, Transport};
use crate::errors::{QueryError, Result};
use crate::types::Row;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::{Future, ready};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// In-process transport: replies come from a queue of canned responses and every
/// sentence is recorded. With an empty queue, `write` answers with zero rows.
#[derive(Default)]
pub struct MemoryTransport {
    responses: Mutex<VecDeque<Result<Vec<Row>>>>,
    stream_rows: Mutex<Vec<Row>>,
    written: Mutex<Vec<Vec<String>>>,
    streamed: Mutex<Vec<Vec<String>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.responses.lock().push_back(Ok(rows));
    }

    pub fn push_error(&self, err: QueryError) {
        self.responses.lock().push_back(Err(err));
    }

    /// Rows emitted by every stream opened after this call.
    pub fn set_stream_rows(&self, rows: Vec<Row>) {
        *self.stream_rows.lock() = rows;
    }

    /// Sentences passed to `write`, oldest first.
    pub fn written(&self) -> Vec<Vec<String>> {
        self.written.lock().clone()
    }

    pub fn streamed(&self) -> Vec<Vec<String>> {
        self.streamed.lock().clone()
    }
}

impl Transport for MemoryTransport {
    type Stream = MemoryStream;

    fn write(&self, sentence: Vec<String>) -> impl Future<Output = Result<Vec<Row>>> + Send {
        self.written.lock().push(sentence);
        let reply = self.responses.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()));
        ready(reply)
    }

    fn stream(&self, sentence: Vec<String>, callback: Option<StreamCallback>) -> Result<MemoryStream> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| QueryError::Transport(format!("stream needs a tokio runtime: {e}")))?;
        self.streamed.lock().push(sentence);
        let rows = self.stream_rows.lock().clone();
        Ok(MemoryStream::spawn(&runtime, rows, callback))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Running,
    Paused,
    Stopped,
}

/// Handle over a task that replays rows. Rows go to the callback when one was
/// given, otherwise they are queued for [`MemoryStream::recv`].
pub struct MemoryStream {
    state: watch::Sender<StreamState>,
    rows: mpsc::UnboundedReceiver<Row>,
    task: JoinHandle<()>,
}

impl MemoryStream {
    fn spawn(
        runtime: &tokio::runtime::Handle,
        rows: Vec<Row>,
        mut callback: Option<StreamCallback>,
    ) -> Self {
        let (state, mut state_rx) = watch::channel(StreamState::Running);
        let (row_tx, row_rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(async move {
            for row in rows {
                loop {
                    let current = *state_rx.borrow_and_update();
                    match current {
                        StreamState::Running => break,
                        StreamState::Stopped => return,
                        StreamState::Paused => {
                            if state_rx.changed().await.is_err() {
                                return;
                            }
                        }
                    }
                }
                match callback.as_mut() {
                    Some(cb) => cb(Ok(row)),
                    None => {
                        if row_tx.send(row).is_err() {
                            return;
                        }
                    }
                }
                tokio::task::yield_now().await;
            }
        });
        Self { state, rows: row_rx, task }
    }

    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    /// Next queued row; `None` once the replay finished or the stream was stopped.
    pub async fn recv(&mut self) -> Option<Row> {
        self.rows.recv().await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn transition(&self, next: StreamState) -> Result<()> {
        if self.state() == StreamState::Stopped {
            return Err(QueryError::StreamClosed);
        }
        self.state.send_replace(next);
        Ok(())
    }
}

impl StreamControl for MemoryStream {
    fn pause(&self) -> impl Future<Output = Result<()>> + Send {
        ready(self.transition(StreamState::Paused))
    }

    fn resume(&self) -> impl Future<Output = Result<()>> + Send {
        ready(self.transition(StreamState::Running))
    }

    fn stop(&self) -> impl Future<Output = Result<()>> + Send {
        if self.state.send_replace(StreamState::Stopped) != StreamState::Stopped {
            log::debug!("memory stream stopped");
        }
        ready(Ok(()))
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
