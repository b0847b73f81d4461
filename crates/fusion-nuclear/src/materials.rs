// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Material compositions behind the opaque handles of the partition.
//!
//! The geometry only carries [`MaterialHandle`]s; a [`MaterialProvider`]
//! turns them into element fractions and densities before a run.

use std::collections::BTreeMap;

use fusion_core::cell::{MaterialHandle, Partition};
use fusion_types::error::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};

/// Reduced-activation steel density [g/cm³].
const STEEL_DENSITY_G_CM3: f64 = 7.96;

/// Steel composition, atom percent.
const STEEL_ATOM_PERCENT: [(&str, f64); 5] = [
    ("Fe", 89.0),
    ("Cr", 9.1),
    ("Mo", 1.0),
    ("Mn", 0.5),
    ("Si", 0.4),
];

/// Liquid lithium density near 400 °C [g/cm³].
const LITHIUM_DENSITY_G_CM3: f64 = 0.467_211_85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementFraction {
    pub symbol: String,
    /// Relative atom fraction; need not be normalized.
    pub atom_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub name: String,
    pub elements: Vec<ElementFraction>,
    pub density_g_cm3: f64,
}

impl MaterialSpec {
    pub fn new(name: impl Into<String>, density_g_cm3: f64) -> Self {
        MaterialSpec {
            name: name.into(),
            elements: Vec::new(),
            density_g_cm3,
        }
    }

    pub fn with_element(mut self, symbol: impl Into<String>, atom_fraction: f64) -> Self {
        self.elements.push(ElementFraction {
            symbol: symbol.into(),
            atom_fraction,
        });
        self
    }

    pub fn validate(&self) -> FusionResult<()> {
        if !(self.density_g_cm3.is_finite() && self.density_g_cm3 > 0.0) {
            return Err(FusionError::ConfigError(format!(
                "material '{}' density must be > 0, got {}",
                self.name, self.density_g_cm3
            )));
        }
        if self.elements.is_empty() {
            return Err(FusionError::ConfigError(format!(
                "material '{}' has no elements",
                self.name
            )));
        }
        if let Some(e) = self
            .elements
            .iter()
            .find(|e| !(e.atom_fraction.is_finite() && e.atom_fraction > 0.0))
        {
            return Err(FusionError::ConfigError(format!(
                "material '{}' element {} has fraction {}",
                self.name, e.symbol, e.atom_fraction
            )));
        }
        Ok(())
    }

    /// Atom fractions scaled to sum to one.
    pub fn normalized_fractions(&self) -> Vec<(&str, f64)> {
        let total: f64 = self.elements.iter().map(|e| e.atom_fraction).sum();
        self.elements
            .iter()
            .map(|e| (e.symbol.as_str(), e.atom_fraction / total))
            .collect()
    }
}

/// Fe-Cr steel used for every vessel component.
pub fn steel_vessel(name: impl Into<String>) -> MaterialSpec {
    STEEL_ATOM_PERCENT
        .iter()
        .fold(MaterialSpec::new(name, STEEL_DENSITY_G_CM3), |m, &(el, pct)| {
            m.with_element(el, pct)
        })
}

/// Natural lithium breeder.
pub fn lithium_blanket(name: impl Into<String>) -> MaterialSpec {
    MaterialSpec::new(name, LITHIUM_DENSITY_G_CM3).with_element("Li", 1.0)
}

/// Resolves handles to compositions.
pub trait MaterialProvider {
    fn resolve(&self, handle: &MaterialHandle) -> FusionResult<MaterialSpec>;
}

#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    specs: BTreeMap<String, MaterialSpec>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steel and lithium under every name used by the shared and
    /// per-component material tables.
    pub fn reference() -> Self {
        let mut lib = MaterialLibrary::new();
        for name in ["vacuum_vessel", "vessel", "lower_vessel", "upper_vessel"] {
            lib.insert(steel_vessel(name));
        }
        for name in ["blanket", "upper_blanket", "lower_blanket"] {
            lib.insert(lithium_blanket(name));
        }
        lib
    }

    pub fn insert(&mut self, spec: MaterialSpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl MaterialProvider for MaterialLibrary {
    fn resolve(&self, handle: &MaterialHandle) -> FusionResult<MaterialSpec> {
        let spec = self
            .specs
            .get(handle.name())
            .cloned()
            .ok_or_else(|| FusionError::ConfigError(format!("unknown material '{handle}'")))?;
        spec.validate()?;
        Ok(spec)
    }
}

/// Resolve every material used by the partition, in first-use order.
pub fn resolve_all<P: MaterialProvider + ?Sized>(
    partition: &Partition,
    provider: &P,
) -> FusionResult<Vec<MaterialSpec>> {
    partition
        .materials()
        .into_iter()
        .map(|m| provider.resolve(m))
        .collect()
}
