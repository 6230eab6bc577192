// src/exit.rs
//! Process exit codes for the `cleaver` binary.
//!
//! Provides a stable contract for scripts and CI.

use crate::types::OverallStatus;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CleaverExit {
    /// Pass completed and nothing failed. Warnings still exit 0.
    Success = 0,
    /// Generic error (IO, config, history file).
    Error = 1,
    /// At least one check failed.
    CheckFailed = 6,
}

impl CleaverExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_status(status: OverallStatus) -> Self {
        match status {
            OverallStatus::Fail => Self::CheckFailed,
            OverallStatus::Pass | OverallStatus::Warning => Self::Success,
        }
    }
}

impl Termination for CleaverExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_code() {
        assert_eq!(CleaverExit::from_status(OverallStatus::Pass).code(), 0);
        assert_eq!(CleaverExit::from_status(OverallStatus::Warning).code(), 0);
        assert_eq!(CleaverExit::from_status(OverallStatus::Fail).code(), 6);
    }
}
