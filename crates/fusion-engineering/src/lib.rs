// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Fusion Engineering
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Engineering views of a bound partition.
//!
//! - `properties`: volume, centroid and bounding box per cell
//! - `tessellate`: closed triangle solids and OBJ export

pub mod properties;
pub mod tessellate;
