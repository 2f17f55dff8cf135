//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use crate::outcome::OutcomeKind;
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::RunStarted {
                services,
                languages,
            } => {
                info!(services, languages, "Starting sample run");
            }
            ProgressEvent::PairFinished {
                index,
                total,
                service,
                language,
                kind,
                duration,
            } => {
                let progress = format!("{}/{}", index, total);
                if *kind == OutcomeKind::Failure {
                    warn!(
                        service = %service,
                        language,
                        progress,
                        duration_ms = duration.as_millis(),
                        "Sample program failed"
                    );
                } else {
                    debug!(
                        service = %service,
                        language,
                        progress,
                        kind = %kind,
                        duration_ms = duration.as_millis(),
                        "Pair finished"
                    );
                }
            }
            ProgressEvent::RunFinished { tally, total_time } => {
                info!(
                    success = tally.success,
                    failure = tally.failure,
                    missing = tally.missing,
                    total_time_ms = total_time.as_millis(),
                    "Sample run complete"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Tally;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::RunStarted {
                services: 2,
                languages: 6,
            },
            ProgressEvent::PairFinished {
                index: 1,
                total: 12,
                service: "storage".to_string(),
                language: "Python",
                kind: OutcomeKind::Success,
                duration: Duration::from_millis(40),
            },
            ProgressEvent::PairFinished {
                index: 2,
                total: 12,
                service: "storage".to_string(),
                language: "Ruby",
                kind: OutcomeKind::Failure,
                duration: Duration::from_millis(40),
            },
            ProgressEvent::RunFinished {
                tally: Tally::default(),
                total_time: Duration::from_secs(5),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
