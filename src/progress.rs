// src/progress.rs
use std::time::Instant;

use tracing::{debug, info};

/// Counts work items and reports progress in tenths through `tracing`
#[derive(Debug, Clone)]
pub struct Progress {
    label: String,
    total: usize,
    done: usize,
    last_reported: usize,
    started: Instant,
}

impl Progress {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Progress {
            label: label.into(),
            total,
            done: 0,
            last_reported: 0,
            started: Instant::now(),
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Completed tenths, 0 through 10
    pub fn tenths(&self) -> usize {
        if self.total == 0 {
            return 10;
        }
        (self.done.min(self.total) * 10) / self.total
    }

    pub fn inc(&mut self) {
        self.done += 1;
        let tenths = self.tenths();
        if tenths > self.last_reported {
            self.last_reported = tenths;
            debug!(
                label = %self.label,
                done = self.done,
                total = self.total,
                "{}% complete",
                tenths * 10
            );
        }
    }

    pub fn finish(&self) {
        let elapsed = self.started.elapsed().as_secs_f64();
        info!(
            label = %self.label,
            done = self.done,
            total = self.total,
            "{} complete, total processing time: {:.3} sec",
            self.label,
            elapsed
        );
    }
}
