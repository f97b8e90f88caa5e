//! Run reporting.
//!
//! All user-facing output for a sweep goes through here as structured log
//! events, so the decision logic stays free of presentation concerns.

use tracing::{error, info, warn};

use super::classifier::OfflineGroup;
use super::policy::CleanupOutcome;

/// Logs one library's offline assets and what was done about them.
pub fn emit_library(group: &OfflineGroup<'_>, outcome: &CleanupOutcome) {
    let library = group.library;

    info!(
        library = %library.name,
        library_id = %library.id,
        offline = group.count(),
        "Offline assets in library"
    );
    for asset in &group.offline {
        info!(asset_id = %asset.id, path = %asset.display_path(), "Offline asset");
    }

    match outcome {
        CleanupOutcome::NoAction => {
            info!(library = %library.name, "No offline assets, skipping cleanup");
        }
        CleanupOutcome::Blocked { count, threshold } => {
            warn!(
                library = %library.name,
                offline = count,
                threshold,
                "Offline count at or above threshold, skipping cleanup. Check that the \
                 external storage is mounted before removing anything manually"
            );
        }
        CleanupOutcome::Succeeded { removed } => {
            info!(library = %library.name, removed, "Removal request accepted");
        }
        CleanupOutcome::Failed { count, error } => {
            error!(
                library = %library.name,
                offline = count,
                error = %error,
                "Removal request failed"
            );
        }
    }
}

/// Per-library outcome, owned so it outlives the run's snapshot.
#[derive(Debug)]
pub struct LibraryOutcome {
    pub library_id: String,
    pub library_name: String,
    pub outcome: CleanupOutcome,
}

/// Everything a completed sweep decided and did, in library order.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub outcomes: Vec<LibraryOutcome>,
}

impl SweepReport {
    /// Libraries for which a removal call was actually issued.
    pub fn attempted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|record| record.outcome.attempted_removal())
            .count()
    }

    /// Libraries whose removal call failed.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|record| record.outcome.is_failure())
            .count()
    }

    /// Logs run totals after the last library is processed.
    pub fn emit_summary(&self) {
        let mut offline_total = 0usize;
        let mut removed_total = 0usize;
        let mut blocked = 0usize;

        for record in &self.outcomes {
            match &record.outcome {
                CleanupOutcome::NoAction => {}
                CleanupOutcome::Blocked { count, .. } => {
                    offline_total += count;
                    blocked += 1;
                }
                CleanupOutcome::Succeeded { removed } => {
                    offline_total += removed;
                    removed_total += removed;
                }
                CleanupOutcome::Failed { count, .. } => {
                    offline_total += count;
                }
            }
        }

        let failed = self.failed();
        if failed > 0 {
            warn!(
                libraries = self.outcomes.len(),
                offline = offline_total,
                removed = removed_total,
                blocked,
                failed,
                "Sweep finished with failures"
            );
        } else {
            info!(
                libraries = self.outcomes.len(),
                offline = offline_total,
                removed = removed_total,
                blocked,
                "Sweep finished"
            );
        }
    }
}
