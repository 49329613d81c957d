//! Supervisor lifecycle logging.
//!
//! The agent hosts its ticker inside a taskvisor supervisor; this subscriber turns the
//! supervisor's events into `tracing` records so restarts and shutdowns show up next to
//! the ticker's own logs.

use async_trait::async_trait;
use taskvisor::{Event, EventKind, Subscribe};
use tracing::{debug, error, info, trace, warn};

const QUEUE_CAPACITY: usize = 256;

/// Logs taskvisor events at a severity matching their meaning.
#[derive(Debug, Default, Clone, Copy)]
pub struct SupervisorEvents;

#[async_trait]
impl Subscribe for SupervisorEvents {
    async fn on_event(&self, event: &Event) {
        log_event(event);
    }

    fn name(&self) -> &'static str {
        "tugbot-events"
    }

    fn queue_capacity(&self) -> usize {
        QUEUE_CAPACITY
    }
}

fn log_event(e: &Event) {
    let task = e.task.as_deref().unwrap_or("-");
    let reason = e.reason.as_deref().unwrap_or("-");
    let attempt = e.attempt.unwrap_or(0);

    match e.kind {
        EventKind::TaskStarting => info!(task, attempt, "supervised task starting"),
        EventKind::TaskStopped => debug!(task, "supervised task stopped"),
        EventKind::TaskFailed => error!(task, attempt, reason, "supervised task failed"),
        EventKind::TimeoutHit => warn!(task, "supervised task timed out"),
        EventKind::BackoffScheduled => debug!(
            task,
            attempt,
            delay_ms = e.delay_ms.unwrap_or(0),
            "supervised task restart scheduled"
        ),
        EventKind::ActorExhausted => info!(task, reason, "supervised task will not restart"),
        EventKind::ActorDead => error!(task, reason, "supervised task died"),
        EventKind::ShutdownRequested => info!("shutdown requested"),
        EventKind::AllStoppedWithinGrace => info!("all tasks stopped within grace period"),
        EventKind::GraceExceeded => warn!("grace period exceeded; some tasks did not stop"),
        EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
            error!(task, reason, "event subscriber misbehaved")
        }
        _ => trace!(task, "supervisor event"),
    }
}
