//! Progress reporting for long-running transport operations
//!
//! Cancellation is advisory: transports poll `is_cancelled` between units
//! of work and abort cleanly when it flips.

pub trait ProgressMonitor {
    fn begin_task(&mut self, title: &str, total_work: usize);

    fn update(&mut self, completed: usize);

    fn end_task(&mut self);

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Discards all progress; used whenever a caller passes no monitor.
#[derive(Debug, Default)]
pub struct NullProgressMonitor;

impl ProgressMonitor for NullProgressMonitor {
    fn begin_task(&mut self, _title: &str, _total_work: usize) {}

    fn update(&mut self, _completed: usize) {}

    fn end_task(&mut self) {}
}
