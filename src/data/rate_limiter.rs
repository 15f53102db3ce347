use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Per-minute request-weight budget shared by every fetch against one
/// exchange. Binance resets its weight counter on the wall-clock minute, so
/// the limiter tracks the minute index rather than a sliding window.
#[derive(Clone)]
pub struct GlobalRateLimiter {
    inner: Arc<Mutex<InnerLimiter>>,
}

struct InnerLimiter {
    used_weight: u32,
    // The specific minute we are counting for (minutes since epoch)
    current_minute_idx: u64,
    limit: u32,
}

impl GlobalRateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InnerLimiter {
                used_weight: 0,
                current_minute_idx: Self::get_current_minute_idx(),
                limit,
            })),
        }
    }

    /// Acquires permission to spend `cost` weight, sleeping into the next
    /// minute when the budget is saturated.
    pub async fn acquire(&self, cost: u32, context: &str) {
        loop {
            let (wait_duration, stats) = {
                let mut guard = self.inner.lock().await;
                let now_idx = Self::get_current_minute_idx();

                // 1. New wall-clock minute resets the budget
                if now_idx > guard.current_minute_idx {
                    guard.used_weight = 0;
                    guard.current_minute_idx = now_idx;
                }

                // 2. Capacity check
                if guard.used_weight + cost <= guard.limit {
                    guard.used_weight += cost;
                    return;
                }

                // 3. Wait until the next :00 (plus a small buffer to land
                // inside the new minute)
                let now_secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or(Duration::ZERO)
                    .as_secs();
                let wait_secs = 60 - (now_secs % 60);
                let wait = Duration::from_secs(wait_secs) + Duration::from_millis(100);

                (wait, (guard.used_weight, guard.limit))
            };

            log::warn!(
                "Rate limit saturated for [{}]. Used: {}/{}. Waiting {:.1}s (until :00)...",
                context,
                stats.0,
                stats.1,
                wait_duration.as_secs_f64()
            );

            tokio::time::sleep(wait_duration).await;
        }
    }

    fn get_current_minute_idx() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs()
            / 60
    }
}
