//! Debounce with supersession.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A scheduled unit of work. Only the most recently issued ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generation counter with a quiet period.
///
/// Every [`issue`](Self::issue) supersedes the tickets before it. A ticket
/// that survives [`settle`](Self::settle) had no successor during the quiet
/// period. The same counter tags responses, so a response whose ticket is no
/// longer current can be dropped.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Start a new generation.
    pub fn issue(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { generation }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Latest issued generation, 0 before the first issue.
    pub fn latest(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Wait out the quiet period, then report whether the ticket is still
    /// current.
    pub async fn settle(&self, ticket: &Ticket) -> bool {
        if !self.quiet.is_zero() {
            tokio::time::sleep(self.quiet).await;
        }
        self.is_current(ticket)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::from_millis(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_supersedes() {
        let debouncer = Debouncer::from_millis(300);
        let first = debouncer.issue();
        let second = debouncer.issue();

        assert!(!debouncer.is_current(&first));
        assert!(debouncer.is_current(&second));
        assert_eq!(debouncer.latest(), 2);
        assert_eq!(second.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_ticket_settles() {
        let debouncer = Debouncer::from_millis(300);

        let first = debouncer.issue();
        let early = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle(&first).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.issue();

        assert!(!early.await.unwrap());
        assert!(debouncer.settle(&second).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_quiet_period() {
        let debouncer = Debouncer::from_millis(300);
        let start = tokio::time::Instant::now();
        let ticket = debouncer.issue();
        assert!(debouncer.settle(&ticket).await);
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
