// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// D-T fusion neutron source energy (eV). Mono-energetic line.
pub const DT_NEUTRON_ENERGY_EV: f64 = 14.0e6;

/// Default offset between the outermost component and the graveyard shell (cm).
pub const DEFAULT_GRAVEYARD_OFFSET_CM: f64 = 10.0;

/// Mesh sizes (cm) swept when exporting tessellated geometry.
pub const REFERENCE_MESH_SIZES_CM: [f64; 4] = [100.0, 10.0, 1.0, 0.1];

/// Sampled validation extends past each open boundary by this fraction of
/// the domain extent.
pub const VALIDATION_MARGIN_FRACTION: f64 = 0.05;

/// Lower bound on the sampled validation margin (cm).
pub const VALIDATION_MARGIN_MIN_CM: f64 = 1.0;
