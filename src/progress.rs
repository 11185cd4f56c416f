//! Merge progress reporting.
//!
//! A side channel only: sinks observe `(current, total)` counters and never
//! affect the merge outcome.

use std::io::Write;

/// Receiver for per-record merge progress.
pub trait ProgressSink {
    /// Called once per merged record with the running count and the
    /// pre-counted total over the reference tree.
    fn record(&mut self, current: usize, total: usize);
}

/// Sink that discards all progress. Default for library callers and tests.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn record(&mut self, _current: usize, _total: usize) {}
}

/// Fixed-width console progress bar, redrawn in place on stderr.
#[derive(Debug)]
pub struct ConsoleProgress {
    width: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        ConsoleProgress { width: 70 }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        ConsoleProgress::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn record(&mut self, current: usize, total: usize) {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        let _ = write!(out, "{}\r", render_bar(self.width, current, total));
        if current >= total {
            let _ = writeln!(out);
        }
        let _ = out.flush();
    }
}

/// Render a `[===>  ] NN %` bar of the given width.
fn render_bar(width: usize, current: usize, total: usize) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        current as f64 / total as f64
    };
    let filled = (width as f64 * fraction) as usize;
    let mut bar = String::with_capacity(width + 8);
    bar.push('[');
    for i in 0..width {
        if i < filled {
            bar.push('=');
        } else if i == filled {
            bar.push('>');
        } else {
            bar.push(' ');
        }
    }
    bar.push_str(&format!("] {} %", (fraction * 100.0) as usize));
    bar
}
