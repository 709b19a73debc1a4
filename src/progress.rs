/// Pixels processed between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Receives completion percentages from long-running pixel loops.
///
/// Called synchronously on the caller's thread, from inside the loop. Any
/// `FnMut(u8)` closure is a `Progress`; pass [`NoProgress`] to opt out.
pub trait Progress {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> Progress for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// A [`Progress`] that ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Drives a [`Progress`] at a bounded cadence over `total` pixels.
///
/// Reports 0 on [`start`](Self::start), `floor(100 * done / total)` every
/// [`PROGRESS_INTERVAL`] pixels, and 100 on [`finish`](Self::finish).
pub(crate) struct ProgressTicker<'a> {
    sink: &'a mut dyn Progress,
    total: u64,
}

impl<'a> ProgressTicker<'a> {
    pub(crate) fn start(sink: &'a mut dyn Progress, total: u64) -> Self {
        sink.report(0);
        Self { sink, total }
    }

    #[inline]
    pub(crate) fn tick(&mut self, done: u64) {
        if done % PROGRESS_INTERVAL == 0 && self.total > 0 {
            self.sink.report((done * 100 / self.total) as u8);
        }
    }

    pub(crate) fn finish(self) {
        self.sink.report(100);
    }
}
