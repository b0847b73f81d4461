// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Transport Model Assembly
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Everything a transport engine needs for one fixed-source run.
//!
//! [`assemble`] goes config → validated partition → resolved materials →
//! source → tallies. Each stage fails fast; nothing partial is returned.

use fusion_core::cell::{MaterialTable, Partition};
use fusion_core::source::SourceBand;
use fusion_core::tally::{cell_tallies, material_tallies, Score, TallyBinding};
use fusion_types::config::{BlanketConfig, LayerSpec, RunSettings, SourceConfig};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::materials::{resolve_all, MaterialProvider, MaterialSpec};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngularDistribution {
    Isotropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnergyDistribution {
    /// Single line [eV].
    Discrete { energy_ev: f64 },
}

/// Point source with angle and energy distributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    pub position: Point3,
    pub angle: AngularDistribution,
    pub energy: EnergyDistribution,
}

impl SourceDefinition {
    pub fn from_config(layers: &LayerSpec, config: &SourceConfig) -> FusionResult<Self> {
        if !(config.energy_ev.is_finite() && config.energy_ev > 0.0) {
            return Err(FusionError::ConfigError(format!(
                "source energy must be > 0 eV, got {}",
                config.energy_ev
            )));
        }
        let position = SourceBand::from_layers(layers)?.point_at(config.fractional_height)?;
        Ok(SourceDefinition {
            position,
            angle: AngularDistribution::Isotropic,
            energy: EnergyDistribution::Discrete {
                energy_ev: config.energy_ev,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyMode {
    PerCell,
    PerMaterial,
}

/// Which buckets and scores to request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyPlan {
    pub mode: TallyMode,
    pub scores: Vec<Score>,
}

impl Default for TallyPlan {
    fn default() -> Self {
        TallyPlan {
            mode: TallyMode::PerCell,
            scores: vec![Score::Flux],
        }
    }
}

impl TallyPlan {
    pub fn bindings(&self, partition: &Partition) -> Vec<TallyBinding> {
        self.scores
            .iter()
            .flat_map(|&score| match self.mode {
                TallyMode::PerCell => cell_tallies(partition, score),
                TallyMode::PerMaterial => material_tallies(partition, score),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportModel {
    pub name: String,
    pub partition: Partition,
    /// First-use order of the partition's materials.
    pub materials: Vec<MaterialSpec>,
    pub source: SourceDefinition,
    pub settings: RunSettings,
    pub tallies: Vec<TallyBinding>,
}

impl TransportModel {
    pub fn material(&self, name: &str) -> Option<&MaterialSpec> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn tally(&self, name: &str) -> Option<&TallyBinding> {
        self.tallies.iter().find(|t| t.name == name)
    }
}

/// Build one run from a blanket configuration.
pub fn assemble<P: MaterialProvider + ?Sized>(
    config: &BlanketConfig,
    table: &MaterialTable,
    provider: &P,
    plan: &TallyPlan,
) -> FusionResult<TransportModel> {
    config.validate()?;
    if plan.scores.is_empty() {
        return Err(FusionError::ConfigError("tally plan has no scores".into()));
    }

    let partition = Partition::from_layers(&config.layers, table)?;
    let materials = resolve_all(&partition, provider)?;
    let source = SourceDefinition::from_config(&config.layers, &config.source)?;
    let tallies = plan.bindings(&partition);

    log::info!(
        "assembled '{}': {} cells, {} materials, source z = {:.3} cm, {} tallies",
        config.name,
        partition.cells().len(),
        materials.len(),
        source.position.z,
        tallies.len()
    );

    Ok(TransportModel {
        name: config.name.clone(),
        partition,
        materials,
        source,
        settings: config.settings,
        tallies,
    })
}

/// Assemble a parameter sweep in parallel. Results keep input order.
pub fn assemble_batch<P: MaterialProvider + Sync + ?Sized>(
    configs: &[BlanketConfig],
    table: &MaterialTable,
    provider: &P,
    plan: &TallyPlan,
) -> Vec<FusionResult<TransportModel>> {
    configs
        .par_iter()
        .map(|config| assemble(config, table, provider, plan))
        .collect()
}
