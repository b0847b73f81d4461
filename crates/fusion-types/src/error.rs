// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;
use thiserror::Error;

use crate::grid::Point3;

/// Kind of partition invariant violation found at a sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Point inside the bounded domain matched no region.
    Gap,
    /// Point matched two or more regions.
    Overlap,
    /// Point beyond an open boundary matched a region.
    Leak,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Gap => write!(f, "GAP"),
            ViolationKind::Overlap => write!(f, "OVERLAP"),
            ViolationKind::Leak => write!(f, "LEAK"),
        }
    }
}

/// A single offending sample point, with the regions it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionViolation {
    pub kind: ViolationKind,
    pub point: Point3,
    pub matched: Vec<String>,
}

impl fmt::Display for PartitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({:.6}, {:.6}, {:.6})",
            self.kind, self.point.x, self.point.y, self.point.z
        )?;
        if !self.matched.is_empty() {
            write!(f, " matched [{}]", self.matched.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Region '{0}' has no material binding")]
    UnmappedRegion(String),

    #[error("Partition invariant violated: {0}")]
    PartitionViolation(PartitionViolation),

    #[error("Transport engine failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FusionError {
    /// True for errors raised while checking user configuration, as opposed to
    /// invariant failures or external collaborators.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FusionError::ConfigError(_) | FusionError::UnmappedRegion(_)
        )
    }
}

pub type FusionResult<T> = Result<T, FusionError>;
