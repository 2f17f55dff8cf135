//! Live progress lines on standard output or standard error

use super::{ProgressEvent, ProgressHandler};
use std::io::{self, Write};
use std::sync::Mutex;

/// Prints one line per finished pair, e.g. `[3/12] storage Python: success`
pub struct ConsoleHandler {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleHandler {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Progress on stderr, for runs whose stdout carries a machine-readable summary
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn format_line(event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::PairFinished {
                index,
                total,
                service,
                language,
                kind,
                ..
            } => Some(format!(
                "[{}/{}] {} {}: {}",
                index, total, service, language, kind
            )),
            _ => None,
        }
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        let Some(line) = Self::format_line(event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            // Progress is best effort; a closed stdout must not stop the run
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{OutcomeKind, Tally};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prints_pair_lines_only() {
        let buf = SharedBuf::default();
        let handler = ConsoleHandler::new(Box::new(buf.clone()));

        handler.on_progress(&ProgressEvent::RunStarted {
            services: 1,
            languages: 2,
        });
        handler.on_progress(&ProgressEvent::PairFinished {
            index: 1,
            total: 2,
            service: "storage".to_string(),
            language: "C#",
            kind: OutcomeKind::Missing,
            duration: Duration::ZERO,
        });
        handler.on_progress(&ProgressEvent::PairFinished {
            index: 2,
            total: 2,
            service: "storage".to_string(),
            language: "Python",
            kind: OutcomeKind::Success,
            duration: Duration::ZERO,
        });
        handler.on_progress(&ProgressEvent::RunFinished {
            tally: Tally::default(),
            total_time: Duration::ZERO,
        });

        let printed = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            printed,
            "[1/2] storage C#: missing\n[2/2] storage Python: success\n"
        );
    }
}
