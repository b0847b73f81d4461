// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Region Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The eight named regions of the blanket / vessel stack.
//!
//! Cross-section (r → right, z ↑), `r1..r4` radial and `z0..z5` axial:
//!
//! ```text
//!  z5 ┌──────────────────────────┬────┐
//!     │       blanket upper      │    │
//!  z4 ├──────────────────────────┤    │
//!     │       vessel upper       │    │
//!  z3 ├───────┬─────────┬────────┤ v  │
//!     │ inner │ blanket │ outer  │ e  │
//!     │ void  │ cylinder│ void   │ s  │
//!  z2 ├───────┴─────────┴────────┤ s  │
//!     │       blanket lower      │ e  │
//!  z1 ├──────────────────────────┤ l  │
//!     │       vessel lower       │    │
//!  z0 └──────────────────────────┴────┘
//!     0      r1        r2       r3   r4
//! ```

use std::fmt;

use fusion_types::config::LayerSpec;
use fusion_types::error::FusionResult;
use fusion_types::grid::Point3;
use serde::{Deserialize, Serialize};

use crate::region::{HalfSpace, Region};
use crate::surface::{SurfaceId, SurfaceStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegionName {
    InnerVoid,
    OuterVoid,
    VesselLower,
    VesselUpper,
    VesselCylinder,
    BlanketCylinder,
    BlanketUpper,
    BlanketLower,
}

/// Broad role of a region, used by the fixed material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionRole {
    Void,
    Vessel,
    Blanket,
}

impl RegionName {
    /// Catalog order.
    pub const ALL: [RegionName; 8] = [
        RegionName::InnerVoid,
        RegionName::OuterVoid,
        RegionName::VesselLower,
        RegionName::VesselUpper,
        RegionName::VesselCylinder,
        RegionName::BlanketCylinder,
        RegionName::BlanketUpper,
        RegionName::BlanketLower,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegionName::InnerVoid => "inner_void",
            RegionName::OuterVoid => "outer_void",
            RegionName::VesselLower => "vessel_cell_lower",
            RegionName::VesselUpper => "vessel_cell_upper",
            RegionName::VesselCylinder => "vessel_cell_cylinder",
            RegionName::BlanketCylinder => "blanket_cell_cylinder",
            RegionName::BlanketUpper => "blanket_cell_upper",
            RegionName::BlanketLower => "blanket_cell_lower",
        }
    }

    pub fn role(self) -> RegionRole {
        match self {
            RegionName::InnerVoid | RegionName::OuterVoid => RegionRole::Void,
            RegionName::VesselLower | RegionName::VesselUpper | RegionName::VesselCylinder => {
                RegionRole::Vessel
            }
            RegionName::BlanketCylinder | RegionName::BlanketUpper | RegionName::BlanketLower => {
                RegionRole::Blanket
            }
        }
    }

    /// Region definition as a conjunction of signed surfaces.
    pub fn region(self) -> Region {
        use SurfaceId::*;
        match self {
            RegionName::InnerVoid => Region::intersection([
                HalfSpace::below(UpperVesselBottom),
                HalfSpace::above(LowerBlanketTop),
                HalfSpace::inside(InnerBlanketCylinder),
            ]),
            RegionName::OuterVoid => Region::intersection([
                HalfSpace::below(UpperVesselBottom),
                HalfSpace::above(LowerBlanketTop),
                HalfSpace::inside(InnerVesselCylinder),
                HalfSpace::outside(OuterBlanketCylinder),
            ]),
            RegionName::VesselLower => Region::intersection([
                HalfSpace::below(SurfaceId::LOWER_VESSEL_TOP),
                HalfSpace::above(LowerVesselBottom),
                HalfSpace::inside(InnerVesselCylinder),
            ]),
            RegionName::VesselUpper => Region::intersection([
                HalfSpace::below(UpperVesselTop),
                HalfSpace::above(UpperVesselBottom),
                HalfSpace::inside(InnerVesselCylinder),
            ]),
            RegionName::VesselCylinder => Region::intersection([
                HalfSpace::below(UpperBlanketTop),
                HalfSpace::above(LowerVesselBottom),
                HalfSpace::inside(OuterVesselCylinder),
                HalfSpace::outside(InnerVesselCylinder),
            ]),
            RegionName::BlanketCylinder => Region::intersection([
                HalfSpace::below(UpperVesselBottom),
                HalfSpace::above(LowerBlanketTop),
                HalfSpace::outside(InnerBlanketCylinder),
                HalfSpace::inside(OuterBlanketCylinder),
            ]),
            RegionName::BlanketUpper => Region::intersection([
                HalfSpace::inside(InnerVesselCylinder),
                HalfSpace::below(UpperBlanketTop),
                HalfSpace::above(SurfaceId::UPPER_BLANKET_BOTTOM),
            ]),
            RegionName::BlanketLower => Region::intersection([
                HalfSpace::inside(InnerVesselCylinder),
                HalfSpace::below(LowerBlanketTop),
                HalfSpace::above(LowerBlanketBottom),
            ]),
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered regions together with the surfaces they reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCatalog {
    stack: SurfaceStack,
    entries: Vec<(RegionName, Region)>,
}

impl RegionCatalog {
    pub fn build(layers: &LayerSpec) -> FusionResult<Self> {
        let stack = SurfaceStack::from_layers(layers)?;
        Ok(Self::from_stack(stack))
    }

    pub fn from_stack(stack: SurfaceStack) -> Self {
        let entries: Vec<(RegionName, Region)> =
            RegionName::ALL.iter().map(|&n| (n, n.region())).collect();
        for (name, region) in &entries {
            log::trace!("region {name}: {region}");
        }
        RegionCatalog { stack, entries }
    }

    /// Assemble from explicit entries. Used to feed the validator with
    /// hand-built (possibly broken) catalogs.
    pub fn from_entries(stack: SurfaceStack, entries: Vec<(RegionName, Region)>) -> Self {
        RegionCatalog { stack, entries }
    }

    pub fn stack(&self) -> &SurfaceStack {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionName, &Region)> {
        self.entries.iter().map(|(n, r)| (*n, r))
    }

    pub fn get(&self, name: RegionName) -> Option<&Region> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, r)| r)
    }

    /// Every region containing `p`. A valid partition yields at most one.
    pub fn locate(&self, p: &Point3) -> Vec<RegionName> {
        self.entries
            .iter()
            .filter(|(_, r)| r.contains(&self.stack, p))
            .map(|(n, _)| *n)
            .collect()
    }

    /// Region volume [cm³].
    pub fn volume(&self, name: RegionName) -> Option<f64> {
        self.get(name).map(|r| r.bounds(&self.stack).volume())
    }
}
