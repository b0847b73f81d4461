// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::DT_NEUTRON_ENERGY_EV;
use crate::error::{FusionError, FusionResult};

/// Top-level blanket model configuration.
/// Maps 1:1 to the `configs/*.json` schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlanketConfig {
    pub name: String,
    pub layers: LayerSpec,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub settings: RunSettings,
}

/// Layer thicknesses of the cylindrical blanket / vacuum vessel stack [cm].
///
/// Radially: inner void, blanket, gap, vessel wall.
/// Axially: lower vessel, lower blanket, blanket band, upper vessel, upper blanket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub inner_blanket_radius: f64,
    pub blanket_thickness: f64,
    pub blanket_height: f64,
    pub lower_blanket_thickness: f64,
    pub upper_blanket_thickness: f64,
    pub blanket_vv_gap: f64,
    pub upper_vv_thickness: f64,
    pub vv_thickness: f64,
    pub lower_vv_thickness: f64,
}

impl Default for LayerSpec {
    fn default() -> Self {
        LayerSpec {
            inner_blanket_radius: 100.0,
            blanket_thickness: 70.0,
            blanket_height: 500.0,
            lower_blanket_thickness: 50.0,
            upper_blanket_thickness: 40.0,
            blanket_vv_gap: 20.0,
            upper_vv_thickness: 10.0,
            vv_thickness: 10.0,
            lower_vv_thickness: 10.0,
        }
    }
}

impl LayerSpec {
    /// Named view of every field, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("inner_blanket_radius", self.inner_blanket_radius),
            ("blanket_thickness", self.blanket_thickness),
            ("blanket_height", self.blanket_height),
            ("lower_blanket_thickness", self.lower_blanket_thickness),
            ("upper_blanket_thickness", self.upper_blanket_thickness),
            ("blanket_vv_gap", self.blanket_vv_gap),
            ("upper_vv_thickness", self.upper_vv_thickness),
            ("vv_thickness", self.vv_thickness),
            ("lower_vv_thickness", self.lower_vv_thickness),
        ]
    }

    /// Every length must be finite and strictly positive.
    /// Zero-thickness layers are rejected rather than producing empty cells.
    pub fn validate(&self) -> FusionResult<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(FusionError::ConfigError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if value <= 0.0 {
                return Err(FusionError::ConfigError(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Point source placement and spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Position along the blanket band, 0 = bottom, 1 = top.
    #[serde(default = "default_fractional_height")]
    pub fractional_height: f64,
    /// Mono-energetic emission energy [eV].
    #[serde(default = "default_energy_ev")]
    pub energy_ev: f64,
}

fn default_fractional_height() -> f64 {
    0.5
}
fn default_energy_ev() -> f64 {
    DT_NEUTRON_ENERGY_EV
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            fractional_height: default_fractional_height(),
            energy_ev: default_energy_ev(),
        }
    }
}

/// Fixed-source run parameters handed to the transport engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default = "default_batches")]
    pub batches: usize,
    #[serde(default = "default_particles")]
    pub particles: usize,
    #[serde(default)]
    pub inactive: usize,
    #[serde(default = "default_photon_transport")]
    pub photon_transport: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_batches() -> usize {
    10
}
fn default_particles() -> usize {
    1000
}
fn default_photon_transport() -> bool {
    true
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            batches: default_batches(),
            particles: default_particles(),
            inactive: 0,
            photon_transport: default_photon_transport(),
            seed: None,
        }
    }
}

impl RunSettings {
    pub fn validate(&self) -> FusionResult<()> {
        if self.batches == 0 {
            return Err(FusionError::ConfigError("batches must be >= 1".into()));
        }
        if self.particles == 0 {
            return Err(FusionError::ConfigError("particles must be >= 1".into()));
        }
        if self.inactive >= self.batches {
            return Err(FusionError::ConfigError(format!(
                "inactive batches ({}) must be fewer than batches ({})",
                self.inactive, self.batches
            )));
        }
        Ok(())
    }

    /// Total source particles over active batches.
    pub fn active_histories(&self) -> usize {
        self.batches.saturating_sub(self.inactive) * self.particles
    }
}

impl BlanketConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check every section. Source fraction range is checked at placement.
    pub fn validate(&self) -> FusionResult<()> {
        self.layers.validate()?;
        self.settings.validate()?;
        if !(self.source.energy_ev.is_finite() && self.source.energy_ev > 0.0) {
            return Err(FusionError::ConfigError(format!(
                "source energy must be > 0 eV, got {}",
                self.source.energy_ev
            )));
        }
        Ok(())
    }
}
