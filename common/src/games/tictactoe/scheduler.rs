use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Deferred delivery of the computer's move.
///
/// When a scheduled timer elapses, the owner of the session passes its
/// handle to `GameSession::on_timer_elapsed`. A cancelled timer must never
/// be delivered.
pub trait MoveScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);
}

/// Runs each timer as a tokio task and sends its handle on `fired_tx` when it elapses.
/// Must be used from within a tokio runtime.
pub struct TokioMoveScheduler {
    fired_tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioMoveScheduler {
    pub fn new(fired_tx: mpsc::UnboundedSender<TimerHandle>) -> Self {
        Self {
            fired_tx,
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        (Self::new(fired_tx), fired_rx)
    }

    pub fn active_timers(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl MoveScheduler for TokioMoveScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;

        let fired_tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if fired_tx.send(handle).is_err() {
                log!("Timer {} fired after its receiver was dropped", handle.id());
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioMoveScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Virtual-clock scheduler: timers fire only when `advance` moves time past them.
#[derive(Debug, Default)]
pub struct ManualMoveScheduler {
    now: Duration,
    pending: Vec<(TimerHandle, Duration)>,
    next_id: u64,
}

impl ManualMoveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the handles that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(TimerHandle, Duration)> = Vec::new();
        self.pending.retain(|(handle, deadline)| {
            if *deadline <= now {
                due.push((*handle, *deadline));
                false
            } else {
                true
            }
        });

        due.sort_by_key(|(handle, deadline)| (*deadline, handle.id()));
        due.into_iter().map(|(handle, _)| handle).collect()
    }
}

impl MoveScheduler for ManualMoveScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(pending, _)| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_fires_after_delay() {
        let mut scheduler = ManualMoveScheduler::new();
        let handle = scheduler.schedule_after(Duration::from_secs(1));

        assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![handle]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_manual_cancelled_timer_never_fires() {
        let mut scheduler = ManualMoveScheduler::new();
        let handle = scheduler.schedule_after(Duration::from_secs(1));
        scheduler.cancel(handle);

        assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_manual_timers_fire_in_deadline_order() {
        let mut scheduler = ManualMoveScheduler::new();
        let late = scheduler.schedule_after(Duration::from_secs(2));
        let early = scheduler.schedule_after(Duration::from_secs(1));

        assert_eq!(scheduler.advance(Duration::from_secs(3)), vec![early, late]);
    }

    #[tokio::test]
    async fn test_tokio_timer_delivers_handle() {
        let (mut scheduler, mut fired_rx) = TokioMoveScheduler::channel();
        let handle = scheduler.schedule_after(Duration::from_millis(10));

        let fired = tokio::time::timeout(Duration::from_secs(2), fired_rx.recv())
            .await
            .unwrap();
        assert_eq!(fired, Some(handle));
    }

    #[tokio::test]
    async fn test_tokio_cancelled_timer_is_not_delivered() {
        let (mut scheduler, mut fired_rx) = TokioMoveScheduler::channel();
        let handle = scheduler.schedule_after(Duration::from_millis(20));
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(fired_rx.try_recv().is_err());
        assert_eq!(scheduler.active_timers(), 0);
    }
}
