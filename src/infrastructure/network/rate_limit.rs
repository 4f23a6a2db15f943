use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Process-wide spacing gate for outbound requests.
///
/// Callers queue on the mutex; the lock is held across the wait, so the
/// elapsed-time check, the sleep and the timestamp update happen as one step
/// and concurrent callers are released strictly one spacing apart.
#[derive(Debug)]
pub struct RateGate {
    min_spacing: Duration,
    last_release: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_release: Mutex::new(None),
        }
    }

    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Wait until at least `min_spacing` has passed since the previous
    /// release, then mark now as the latest release.
    pub async fn acquire(&self) {
        let mut last = self.last_release.lock().await;

        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_spacing {
                let wait = self.min_spacing - elapsed;
                debug!("Rate gate: waiting {}ms before next request", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}
