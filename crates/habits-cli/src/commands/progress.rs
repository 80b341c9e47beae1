//! Progress command handler

use anyhow::Result;

use habits_core::{Period, ProgressSummary, Tracker};

use crate::output::Output;

/// Show today's completion and a trailing window
///
/// `days` overrides the window length of `period`.
pub fn show(tracker: &Tracker, period: Period, days: Option<u16>, output: &Output) -> Result<()> {
    let summary = match days {
        Some(days) => {
            ProgressSummary::for_days(tracker.ledger(), usize::from(days), tracker.today(), period)
        }
        None => tracker.summary(period),
    };

    output.print_summary(&summary);
    Ok(())
}
