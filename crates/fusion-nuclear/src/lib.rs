// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Fusion Nuclear
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neutronics-facing side of the blanket partition.
//!
//! Materials, transport model assembly, the engine boundary and tally
//! results. Particle transport itself is delegated to a [`TransportEngine`].

pub mod engine;
pub mod materials;
pub mod model;
pub mod results;

pub use engine::{run_simulation, TransportEngine};
pub use materials::{MaterialLibrary, MaterialProvider, MaterialSpec};
pub use model::{assemble, assemble_batch, SourceDefinition, TallyPlan, TransportModel};
pub use results::{TallyResults, TallyValue};
