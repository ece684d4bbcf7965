//! # Progress Reporting
//!
//! Start/end/line events around each benchmark task. Purely observational;
//! nothing in the core consumes a reporter's output.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use tracing::{info, warn};

/// Observational sink for benchmark task events
pub trait ProgressReporter {
    /// A task began
    fn start(&self, task: &str);

    /// A task finished
    fn end(&self, task: &str);

    /// Free-form progress line
    fn write_line(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn start(&self, task: &str) {
        (**self).start(task);
    }

    fn end(&self, task: &str) {
        (**self).end(task);
    }

    fn write_line(&self, message: &str) {
        (**self).write_line(message);
    }
}

/// Reporter that logs task events and elapsed wall-clock time through
/// `tracing`
#[derive(Default)]
pub struct LogReporter {
    started: Mutex<HashMap<String, Instant>>,
}

impl LogReporter {
    /// Create a reporter with no tasks in flight
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogReporter {
    fn start(&self, task: &str) {
        if let Ok(mut started) = self.started.lock() {
            started.insert(task.to_string(), Instant::now());
        }
        info!("{task}...");
    }

    fn end(&self, task: &str) {
        let begun = self
            .started
            .lock()
            .ok()
            .and_then(|mut started| started.remove(task));

        match begun {
            Some(at) => info!("{task} done in {:.3}s", at.elapsed().as_secs_f64()),
            None => info!("{task} done"),
        }
    }

    fn write_line(&self, message: &str) {
        warn!("{message}");
    }
}
