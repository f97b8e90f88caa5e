//! The sweep workflow: fetch the inventory, classify offline assets per
//! external library, and remove them where the safety threshold allows.

pub mod classifier;
pub mod policy;
pub mod report;

use tracing::{debug, info};

use crate::error::SweepError;
use crate::immich::ImmichClient;
use classifier::{OfflineGroup, classify};
use policy::{CleanupDecision, CleanupOutcome};
use report::{LibraryOutcome, SweepReport};

/// Runs one full sweep against the server.
///
/// The whole inventory is fetched up front; classification and every
/// per-library decision work from that single snapshot. Libraries are
/// processed one at a time, each removal call finishing before the next
/// library is considered, and a failed removal for one library does not stop
/// the rest.
pub async fn run(client: &ImmichClient, threshold: usize) -> Result<SweepReport, SweepError> {
    let libraries = client.fetch_libraries().await?;
    let assets = client.fetch_assets().await?;

    info!(
        libraries = libraries.len(),
        assets = assets.len(),
        threshold,
        "Inventory snapshot complete"
    );

    for library in libraries.iter().filter(|library| !library.is_external()) {
        debug!(
            library = %library.name,
            kind = %library.library_type,
            "Skipping non-external library"
        );
    }

    let groups = classify(&libraries, &assets);

    let mut sweep_report = SweepReport::default();
    for group in &groups {
        let outcome = apply_cleanup(client, group, threshold).await;

        report::emit_library(group, &outcome);
        sweep_report.outcomes.push(LibraryOutcome {
            library_id: group.library.id.clone(),
            library_name: group.library.name.clone(),
            outcome,
        });
    }

    sweep_report.emit_summary();
    Ok(sweep_report)
}

/// Evaluates one library's offline count against the threshold and, when
/// allowed, issues its removal call. At most one removal call per library per
/// run, and only for libraries in the current snapshot.
async fn apply_cleanup(
    client: &ImmichClient,
    group: &OfflineGroup<'_>,
    threshold: usize,
) -> CleanupOutcome {
    let count = group.count();
    match policy::evaluate(count, threshold) {
        CleanupDecision::NoAction => CleanupOutcome::NoAction,
        CleanupDecision::Blocked => CleanupOutcome::Blocked { count, threshold },
        CleanupDecision::Proceed => match client.remove_offline_assets(&group.library.id).await {
            Ok(()) => CleanupOutcome::Succeeded { removed: count },
            Err(error) => CleanupOutcome::Failed { count, error },
        },
    }
}
