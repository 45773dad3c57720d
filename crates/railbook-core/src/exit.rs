//! Process exit status for a finished run.

use railbook_protocols::BookingError;

use crate::run_state::RunOutcome;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Completed, but some tickets or notifications failed.
pub const EXIT_PARTIAL: i32 = 2;

/// Exit status for a run result.
///
/// A completed run exits 0 even when per-passenger steps failed, unless
/// `fail_on_partial` is set.
pub fn exit_status(result: &Result<RunOutcome, BookingError>, fail_on_partial: bool) -> i32 {
    match result {
        Ok(outcome) if fail_on_partial && outcome.is_partial() => EXIT_PARTIAL,
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}
