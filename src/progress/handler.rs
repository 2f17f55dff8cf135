//! Progress handler trait and events

use crate::outcome::{OutcomeKind, Tally};
use std::time::Duration;

/// Events emitted while the harness walks the (service, language) grid
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Services were discovered and the run is about to start
    RunStarted { services: usize, languages: usize },

    /// One pair was assembled, executed and classified
    PairFinished {
        index: usize,
        total: usize,
        service: String,
        language: &'static str,
        kind: OutcomeKind,
        duration: Duration,
    },

    /// Every pair has an outcome
    RunFinished { tally: Tally, total_time: Duration },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

impl<H: ProgressHandler + ?Sized> ProgressHandler for Vec<Box<H>> {
    fn on_progress(&self, event: &ProgressEvent) {
        for handler in self {
            handler.on_progress(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_progress(&ProgressEvent::RunStarted {
            services: 1,
            languages: 6,
        });
    }

    #[test]
    fn test_fan_out() {
        let count = Arc::new(AtomicUsize::new(0));
        let handlers: Vec<Box<dyn ProgressHandler>> = vec![
            Box::new(CountingHandler {
                count: count.clone(),
            }),
            Box::new(CountingHandler {
                count: count.clone(),
            }),
        ];

        handlers.on_progress(&ProgressEvent::RunStarted {
            services: 2,
            languages: 6,
        });
        handlers.on_progress(&ProgressEvent::RunFinished {
            tally: Tally::default(),
            total_time: Duration::from_secs(1),
        });

        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::RunStarted {
            services: 3,
            languages: 6,
        };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("RunStarted"));
        assert!(debug_str.contains("services: 3"));
    }
}
