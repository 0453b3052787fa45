//! Pull-driven edge streams
//!
//! Each public engine operation hands back an [`EdgeStream`]: a bounded
//! channel fed by a spawned producer task. The consumer pulls edges one at a
//! time with [`EdgeStream::next`]; the small channel capacity means the
//! producer blocks on the directory round-trip for the next edge rather than
//! running ahead. Dropping the stream cancels the producer at its next send.

use tokio::sync::mpsc;
use tracing::warn;

use adgraph_directory::{DirectoryError, DirectoryResult, GroupMember};

/// Channel capacity for edge streams. Kept small so production stays
/// pull-driven and suspension points line up with consumer demand.
const EDGE_CHANNEL_CAPACITY: usize = 8;

/// A lazy sequence of membership edges.
///
/// Per-member failures are absorbed inside the producer and never appear
/// here; the only `Err` item an `EdgeStream` can carry is a fatal directory
/// failure, delivered last, after which the stream ends.
#[derive(Debug)]
pub struct EdgeStream {
    rx: mpsc::Receiver<DirectoryResult<GroupMember>>,
}

impl EdgeStream {
    /// Create a connected sink/stream pair.
    pub(crate) fn channel() -> (EdgeSink, EdgeStream) {
        let (tx, rx) = mpsc::channel(EDGE_CHANNEL_CAPACITY);
        (EdgeSink { tx }, EdgeStream { rx })
    }

    /// Pull the next edge, or `None` at end of sequence.
    pub async fn next(&mut self) -> Option<DirectoryResult<GroupMember>> {
        self.rx.recv().await
    }

    /// Drain the stream into a vector, surfacing a fatal error if one occurs.
    pub async fn try_collect(mut self) -> DirectoryResult<Vec<GroupMember>> {
        let mut edges = Vec::new();
        while let Some(item) = self.next().await {
            edges.push(item?);
        }
        Ok(edges)
    }
}

/// Producer-side handle used by spawned tasks to emit edges.
#[derive(Debug, Clone)]
pub(crate) struct EdgeSink {
    tx: mpsc::Sender<DirectoryResult<GroupMember>>,
}

impl EdgeSink {
    /// Emit one edge. Returns `false` when the consumer has dropped the
    /// stream, which tells the producer to stop working.
    pub(crate) async fn emit(&self, edge: GroupMember) -> bool {
        self.tx.send(Ok(edge)).await.is_ok()
    }

    /// Terminate the stream with a fatal error.
    pub(crate) async fn fail(&self, error: DirectoryError) {
        warn!(error = %error, code = error.error_code(), "Edge stream terminated by fatal directory error");
        let _ = self.tx.send(Err(error)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adgraph_directory::ObjectKind;

    #[tokio::test]
    async fn test_emit_and_collect() {
        let (sink, stream) = EdgeStream::channel();

        tokio::spawn(async move {
            sink.emit(GroupMember::new("A@X", "G@X", ObjectKind::User))
                .await;
            sink.emit(GroupMember::new("B@X", "G@X", ObjectKind::Computer))
                .await;
        });

        let edges = stream.try_collect().await.unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].account_name, "A@X");
    }

    #[tokio::test]
    async fn test_fatal_error_terminates() {
        let (sink, stream) = EdgeStream::channel();

        tokio::spawn(async move {
            sink.emit(GroupMember::new("A@X", "G@X", ObjectKind::User))
                .await;
            sink.fail(DirectoryError::connection_failed("gone")).await;
        });

        let err = stream.try_collect().await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_dropped_consumer_stops_producer() {
        let (sink, stream) = EdgeStream::channel();
        drop(stream);

        assert!(
            !sink
                .emit(GroupMember::new("A@X", "G@X", ObjectKind::User))
                .await
        );
    }

    #[tokio::test]
    async fn test_stream_ends_when_sink_dropped() {
        let (sink, mut stream) = EdgeStream::channel();
        drop(sink);
        assert!(stream.next().await.is_none());
    }
}
