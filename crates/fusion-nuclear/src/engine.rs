// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Transport Engine Seam
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Boundary to an external Monte Carlo transport code.
//!
//! The crate never transports particles itself. An engine receives a
//! fully assembled [`TransportModel`] and returns one value per tally.

use fusion_types::error::{FusionError, FusionResult};

use crate::model::TransportModel;
use crate::results::TallyResults;

pub trait TransportEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn run(&self, model: &TransportModel) -> Result<TallyResults, Self::Error>;
}

/// Run `model` on `engine`. Engine failures surface as
/// [`FusionError::Transport`] with the engine's error as source.
pub fn run_simulation<E: TransportEngine + ?Sized>(
    engine: &E,
    model: &TransportModel,
) -> FusionResult<TallyResults> {
    log::info!(
        "running '{}': {} batches x {} particles",
        model.name,
        model.settings.batches,
        model.settings.particles
    );
    let results = engine
        .run(model)
        .map_err(|e| FusionError::Transport(Box::new(e)))?;

    for binding in &model.tallies {
        if results.get(&binding.name).is_none() {
            log::warn!("engine returned no value for tally '{}'", binding.name);
        }
    }
    Ok(results)
}
