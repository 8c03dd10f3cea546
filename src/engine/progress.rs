//! Progress events reported to the caller.

use std::fmt;

/// Kind of a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Process,
    Warning,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Process => "process",
            ProgressStatus::Warning => "warning",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub message: String,
}

/// Delivers events to the caller's callback and mirrors them to the log.
pub(crate) struct Progress<F> {
    callback: F,
}

impl<F: FnMut(&ProgressEvent)> Progress<F> {
    pub(crate) fn new(callback: F) -> Self {
        Self { callback }
    }

    pub(crate) fn process(&mut self, message: String) {
        log::info!("{}", message);
        (self.callback)(&ProgressEvent {
            status: ProgressStatus::Process,
            message,
        });
    }

    pub(crate) fn warning(&mut self, message: String) {
        log::warn!("{}", message);
        (self.callback)(&ProgressEvent {
            status: ProgressStatus::Warning,
            message,
        });
    }

    /// Report a row/container count mismatch, if any.
    ///
    /// `rows` and `containers` are plural nouns naming both sides.
    pub(crate) fn mismatch(&mut self, row_count: usize, rows: &str, container_count: usize, containers: &str) {
        let processed = row_count.min(container_count);
        if row_count > container_count {
            self.warning(format!(
                "Number of {rows} ({row_count}) is larger than that of {containers} ({container_count}). \
                 {processed} {rows} were processed into {processed} {containers}; the remaining {} {rows} were skipped.",
                row_count - processed
            ));
        } else if container_count > row_count {
            self.warning(format!(
                "Number of {containers} ({container_count}) is larger than that of {rows} ({row_count}). \
                 {processed} {rows} were processed into {processed} {containers}; the remaining {} {containers} were left unchanged.",
                container_count - processed
            ));
        }
    }
}
