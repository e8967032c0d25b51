use std::pin::Pin;

use futures::stream::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::models::GeneratedAsset;

/// Sink for batch progress. `progress` receives human-readable status lines;
/// `results_updated` receives the accumulated result sequence after every
/// completed item, enabling incremental display.
pub trait BatchObserver: Send + Sync {
    fn progress(&self, message: &str);

    fn results_updated(&self, results: &[GeneratedAsset]) {
        let _ = results;
    }
}

/// Adapter turning a plain closure into a progress-only observer.
pub struct FnObserver<F>(pub F);

impl<F> BatchObserver for FnObserver<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn progress(&self, message: &str) {
        (self.0)(message)
    }
}

pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn progress(&self, _message: &str) {}
}

/// Event emitted on the streaming variant of the observer.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress(String),
    ResultsUpdated(Vec<GeneratedAsset>),
}

pub type BatchEventStream = Pin<Box<dyn Stream<Item = BatchEvent> + Send>>;

/// Observer that forwards events into a stream, for callers that prefer
/// consuming progress as an async sequence rather than a callback.
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<BatchEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, BatchEventStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let stream = Box::pin(UnboundedReceiverStream::new(receiver));
        (ChannelObserver { sender }, stream)
    }
}

impl BatchObserver for ChannelObserver {
    fn progress(&self, message: &str) {
        let _ = self.sender.send(BatchEvent::Progress(message.to_string()));
    }

    fn results_updated(&self, results: &[GeneratedAsset]) {
        let _ = self
            .sender
            .send(BatchEvent::ResultsUpdated(results.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetContent;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn channel_observer_forwards_events_in_order() {
        let (observer, mut stream) = ChannelObserver::new();
        observer.progress("starting");
        observer.results_updated(&[GeneratedAsset::new(AssetContent::Remote {
            url: "https://files.example/v1".into(),
        })]);
        drop(observer);

        match stream.next().await {
            Some(BatchEvent::Progress(message)) => assert_eq!(message, "starting"),
            other => panic!("unexpected event: {:?}", other),
        }
        match stream.next().await {
            Some(BatchEvent::ResultsUpdated(results)) => assert_eq!(results.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn closures_are_observers() {
        let seen = std::sync::Mutex::new(Vec::new());
        let observer = FnObserver(|message: &str| seen.lock().unwrap().push(message.to_string()));
        observer.progress("one");
        observer.progress("two");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
