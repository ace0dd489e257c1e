use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use publisher::{Publishable, Publisher};

/// Pushes `next()` to every listener of `publisher` each `period`, until the task is
/// aborted or no listener is left.
pub(super) fn spawn_generator<T, F>(
    publisher: Publisher<T>,
    period: Duration,
    mut next: F,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    F: FnMut() -> T + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if publisher.is_empty() {
                break;
            }
            publisher.notify_listeners(Arc::new(next()));
        }
    })
}
