//! Minimum-interval gate between calls to the external scoring service.

use tokio::time::{sleep_until, Duration, Instant};

/// Enforces a minimum gap between consecutive scoring calls. The orchestrator
/// arms the gate after each call and waits on it before the next one; cached
/// results skip both sides, so only real calls are paced.
#[derive(Debug, Default)]
pub struct Pacer {
    next_ready: Option<Instant>,
}

impl Pacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits out whatever remains of the armed interval. Returns immediately
    /// if the gate was never armed or the interval has already elapsed.
    pub async fn wait_ready(&self) {
        if let Some(at) = self.next_ready {
            sleep_until(at).await;
        }
    }

    /// Arms the gate: the next `wait_ready` will not return before `gap` has
    /// elapsed from now.
    pub fn arm(&mut self, gap: Duration) {
        self.next_ready = Some(Instant::now() + gap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_unarmed_gate_does_not_wait() {
        let pacer = Pacer::new();
        let started = Instant::now();
        pacer.wait_ready().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_gate_waits_full_interval() {
        let mut pacer = Pacer::new();
        let started = Instant::now();
        pacer.arm(Duration::from_millis(1500));
        pacer.wait_ready().await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_interval_does_not_wait_again() {
        let mut pacer = Pacer::new();
        pacer.arm(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(200)).await;

        let started = Instant::now();
        pacer.wait_ready().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
