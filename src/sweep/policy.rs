//! Threshold gate in front of the removal call.

use crate::error::ImmichError;

/// What to do with one library's offline set. Decided before any
/// state-changing call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupDecision {
    /// Nothing is offline.
    NoAction,
    /// Too many assets are offline for removal to be safe.
    Blocked,
    /// Few enough offline assets to clean up.
    Proceed,
}

/// Decides whether a library's offline assets should be removed.
///
/// The threshold is a safety brake: when a storage mount drops, the server
/// flags the entire library offline, and removing everything would destroy
/// valid records. A count at or above the threshold is blocked, so the
/// comparison is inclusive. Only `0 < count < threshold` proceeds.
pub fn evaluate(count: usize, threshold: usize) -> CleanupDecision {
    if count == 0 {
        CleanupDecision::NoAction
    } else if count >= threshold {
        CleanupDecision::Blocked
    } else {
        CleanupDecision::Proceed
    }
}

/// Terminal state of one library's cleanup.
#[derive(Debug)]
pub enum CleanupOutcome {
    /// Nothing offline, nothing done.
    NoAction,
    /// Removal withheld by the safety threshold.
    Blocked { count: usize, threshold: usize },
    /// The server accepted the removal call.
    Succeeded { removed: usize },
    /// The removal call failed. Other libraries in the same run are still
    /// processed.
    Failed { count: usize, error: ImmichError },
}

impl CleanupOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CleanupOutcome::Failed { .. })
    }

    /// True when a removal call was actually issued for this library.
    pub fn attempted_removal(&self) -> bool {
        matches!(
            self,
            CleanupOutcome::Succeeded { .. } | CleanupOutcome::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offline_is_no_action() {
        assert_eq!(evaluate(0, 50), CleanupDecision::NoAction);
    }

    #[test]
    fn test_count_below_threshold_proceeds() {
        assert_eq!(evaluate(1, 50), CleanupDecision::Proceed);
        assert_eq!(evaluate(49, 50), CleanupDecision::Proceed);
    }

    #[test]
    fn test_count_at_threshold_is_blocked() {
        assert_eq!(evaluate(50, 50), CleanupDecision::Blocked);
    }

    #[test]
    fn test_count_above_threshold_is_blocked() {
        assert_eq!(evaluate(51, 50), CleanupDecision::Blocked);
        assert_eq!(evaluate(5000, 50), CleanupDecision::Blocked);
    }

    #[test]
    fn test_zero_count_wins_over_zero_threshold() {
        // An empty offline set is never worth reporting as blocked, even
        // with a threshold that blocks everything.
        assert_eq!(evaluate(0, 0), CleanupDecision::NoAction);
        assert_eq!(evaluate(1, 0), CleanupDecision::Blocked);
    }
}
