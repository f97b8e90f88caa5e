//! Groups offline assets under their owning external libraries.

use std::collections::HashMap;

use crate::immich::types::{Asset, Library};

/// The offline assets attributed to one external library.
///
/// Groups exist even when `offline` is empty, so downstream reporting can
/// name every external library it looked at.
#[derive(Debug, Clone)]
pub struct OfflineGroup<'a> {
    pub library: &'a Library,
    pub offline: Vec<&'a Asset>,
}

impl OfflineGroup<'_> {
    pub fn count(&self) -> usize {
        self.offline.len()
    }
}

/// Pure classification over the fetched snapshot.
///
/// Only external libraries become groups; internal libraries cannot have
/// filesystem-offline assets and are ignored. An asset joins a group when it
/// is flagged offline and its library id matches the group's library. Assets
/// with no library id, or an id matching no fetched library, belong to no
/// group and never influence any count.
///
/// Group order follows library order; assets within a group follow inventory
/// order. Both inputs are read-only, so classifying the same snapshot twice
/// gives identical groups.
pub fn classify<'a>(libraries: &'a [Library], assets: &'a [Asset]) -> Vec<OfflineGroup<'a>> {
    let mut groups: Vec<OfflineGroup<'a>> = libraries
        .iter()
        .filter(|library| library.is_external())
        .map(|library| OfflineGroup {
            library,
            offline: Vec::new(),
        })
        .collect();

    let index: HashMap<&str, usize> = groups
        .iter()
        .enumerate()
        .map(|(position, group)| (group.library.id.as_str(), position))
        .collect();

    for asset in assets {
        if !asset.is_offline {
            continue;
        }
        let Some(library_id) = asset.library_id.as_deref() else {
            continue;
        };
        if let Some(&position) = index.get(library_id) {
            groups[position].offline.push(asset);
        }
    }

    groups
}
