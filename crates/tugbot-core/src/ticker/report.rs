use std::fmt;

/// Summary of one discovery-and-launch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Containers returned by the runtime.
    pub listed: usize,
    /// Candidates for which a launch was attempted.
    pub candidates: usize,
    pub launched: usize,
    pub failed: usize,
    /// The list call failed and the tick was skipped.
    pub list_failed: bool,
    /// Cancellation was observed before the tick finished.
    pub interrupted: bool,
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TickReport(listed={}, candidates={}, launched={}, failed={})",
            self.listed, self.candidates, self.launched, self.failed
        )
    }
}
