// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Tally Binder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Named measurement buckets, one per cell or per material.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, MaterialHandle, Partition};

/// Quantity requested from the transport engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Score {
    Flux,
    Heating,
}

impl Score {
    pub fn as_str(self) -> &'static str {
        match self {
            Score::Flux => "flux",
            Score::Heating => "heating",
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyFilter {
    /// Cell ids.
    Cells(Vec<u32>),
    Materials(Vec<MaterialHandle>),
}

impl TallyFilter {
    /// Whether scores in `cell` land in this bucket.
    pub fn covers(&self, cell: &Cell) -> bool {
        match self {
            TallyFilter::Cells(ids) => ids.contains(&cell.id),
            TallyFilter::Materials(handles) => cell
                .fill
                .material()
                .is_some_and(|m| handles.contains(m)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyBinding {
    /// Stable key, `"{score}_{bucket}"`.
    pub name: String,
    pub score: Score,
    pub filter: TallyFilter,
}

/// One binding per cell, voids included.
pub fn cell_tallies(partition: &Partition, score: Score) -> Vec<TallyBinding> {
    partition
        .cells()
        .iter()
        .map(|cell| TallyBinding {
            name: format!("{score}_{}", cell.name),
            score,
            filter: TallyFilter::Cells(vec![cell.id]),
        })
        .collect()
}

/// One binding per distinct material.
pub fn material_tallies(partition: &Partition, score: Score) -> Vec<TallyBinding> {
    partition
        .materials()
        .into_iter()
        .map(|m| TallyBinding {
            name: format!("{score}_{m}"),
            score,
            filter: TallyFilter::Materials(vec![m.clone()]),
        })
        .collect()
}
