// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Source Placement
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! On-axis point source inside the blanket band.
//!
//! z = z_min + f · (z_max − z_min), with z_min = lower_blanket_top and
//! z_max = upper_vessel_bottom.

use fusion_types::config::LayerSpec;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;

use crate::surface::{SurfaceId, SurfaceStack};

/// Axial extent of the blanket band [cm].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceBand {
    pub z_min: f64,
    pub z_max: f64,
}

impl SourceBand {
    pub fn from_stack(stack: &SurfaceStack) -> Self {
        SourceBand {
            z_min: stack.coordinate(SurfaceId::LowerBlanketTop),
            z_max: stack.coordinate(SurfaceId::UpperVesselBottom),
        }
    }

    pub fn from_layers(layers: &LayerSpec) -> FusionResult<Self> {
        Ok(Self::from_stack(&SurfaceStack::from_layers(layers)?))
    }

    /// Absolute height for a fraction in [0, 1].
    pub fn height_at(&self, fraction: f64) -> FusionResult<f64> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(FusionError::ConfigError(format!(
                "source fractional height must be in [0, 1], got {fraction}"
            )));
        }
        Ok(self.z_min + fraction * (self.z_max - self.z_min))
    }

    pub fn point_at(&self, fraction: f64) -> FusionResult<Point3> {
        self.height_at(fraction).map(Point3::on_axis)
    }
}

/// Emission point on the central axis.
pub fn place_source(layers: &LayerSpec, fraction: f64) -> FusionResult<Point3> {
    SourceBand::from_layers(layers)?.point_at(fraction)
}
