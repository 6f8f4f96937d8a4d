use std::time::{Duration, Instant};

/// Fixed minimum interval between the starts of consecutive requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts one paced step.
    ///
    /// # Example
    /// ```
    /// let pacer = barmc::Pacer::from_millis(50);
    /// let now = std::time::Instant::now();
    /// {
    ///     // Do not use `let _ = ..` here because it immediately drops the guard.
    ///     let _guard = pacer.start();
    ///     assert!(now.elapsed() < std::time::Duration::from_millis(20));
    /// }
    /// assert!(now.elapsed() >= std::time::Duration::from_millis(50));
    /// ```
    pub fn start(&self) -> PaceGuard {
        PaceGuard {
            target_time: (!self.interval.is_zero()).then(|| Instant::now() + self.interval),
        }
    }
}

/// Sleeps on drop until the pacer's interval has elapsed.
#[must_use = "the guard paces nothing if it is dropped immediately"]
#[derive(Debug)]
pub struct PaceGuard {
    target_time: Option<Instant>,
}

impl Drop for PaceGuard {
    fn drop(&mut self) {
        if let Some(target_time) = self.target_time {
            let now = Instant::now();
            if now < target_time {
                std::thread::sleep(target_time - now);
            }
        }
    }
}
