// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Primitive Surfaces
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coaxial Z-cylinders and horizontal Z-planes of the blanket stack.
//!
//! Radial chain (inner → outer):
//!   inner blanket, outer blanket, inner vessel, outer vessel (vacuum).
//! Axial chain (bottom → top):
//!   lower vessel bottom (vacuum), lower blanket bottom, lower blanket top,
//!   upper vessel bottom, upper vessel top, upper blanket top (vacuum).

use fusion_types::config::LayerSpec;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stable identity of every boundary in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceId {
    InnerBlanketCylinder,
    OuterBlanketCylinder,
    InnerVesselCylinder,
    OuterVesselCylinder,
    LowerVesselBottom,
    LowerBlanketBottom,
    LowerBlanketTop,
    UpperVesselBottom,
    UpperVesselTop,
    UpperBlanketTop,
}

impl SurfaceId {
    /// The lower vessel ends where the lower blanket begins.
    pub const LOWER_VESSEL_TOP: SurfaceId = SurfaceId::LowerBlanketBottom;
    /// The upper blanket sits directly on the upper vessel.
    pub const UPPER_BLANKET_BOTTOM: SurfaceId = SurfaceId::UpperVesselTop;

    pub const RADIAL: [SurfaceId; 4] = [
        SurfaceId::InnerBlanketCylinder,
        SurfaceId::OuterBlanketCylinder,
        SurfaceId::InnerVesselCylinder,
        SurfaceId::OuterVesselCylinder,
    ];

    pub const AXIAL: [SurfaceId; 6] = [
        SurfaceId::LowerVesselBottom,
        SurfaceId::LowerBlanketBottom,
        SurfaceId::LowerBlanketTop,
        SurfaceId::UpperVesselBottom,
        SurfaceId::UpperVesselTop,
        SurfaceId::UpperBlanketTop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceId::InnerBlanketCylinder => "inner_blanket_cylinder",
            SurfaceId::OuterBlanketCylinder => "outer_blanket_cylinder",
            SurfaceId::InnerVesselCylinder => "inner_vessel_cylinder",
            SurfaceId::OuterVesselCylinder => "outer_vessel_cylinder",
            SurfaceId::LowerVesselBottom => "lower_vessel_bottom",
            SurfaceId::LowerBlanketBottom => "lower_blanket_bottom",
            SurfaceId::LowerBlanketTop => "lower_blanket_top",
            SurfaceId::UpperVesselBottom => "upper_vessel_bottom",
            SurfaceId::UpperVesselTop => "upper_vessel_top",
            SurfaceId::UpperBlanketTop => "upper_blanket_top",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// x² + y² = r², coaxial with Z.
    Cylinder { radius: f64 },
    /// z = h.
    Plane { height: f64 },
}

/// What happens to a particle crossing the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Transmission,
    /// Open edge of the universe: crossing particles are terminated.
    Vacuum,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub boundary: Boundary,
}

impl Surface {
    /// Signed surface function: negative inside a cylinder / below a plane.
    pub fn evaluate(&self, p: &Point3) -> f64 {
        match self.kind {
            SurfaceKind::Cylinder { radius } => p.radius_squared() - radius * radius,
            SurfaceKind::Plane { height } => p.z - height,
        }
    }

    /// Radius for cylinders, height for planes.
    pub fn coordinate(&self) -> f64 {
        match self.kind {
            SurfaceKind::Cylinder { radius } => radius,
            SurfaceKind::Plane { height } => height,
        }
    }

    pub fn is_open(&self) -> bool {
        self.boundary == Boundary::Vacuum
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }
}

/// All ten surfaces derived from one [`LayerSpec`], indexed by [`SurfaceId`].
///
/// Serialized as its two coordinate chains; deserializing re-derives the
/// surfaces and rejects chains that are not strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StackCoordinates", into = "StackCoordinates")]
pub struct SurfaceStack {
    surfaces: [Surface; 10],
}

/// Wire form of a [`SurfaceStack`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackCoordinates {
    /// Inner → outer [cm].
    pub radii: [f64; 4],
    /// Bottom → top [cm].
    pub heights: [f64; 6],
}

impl TryFrom<StackCoordinates> for SurfaceStack {
    type Error = FusionError;

    fn try_from(c: StackCoordinates) -> FusionResult<Self> {
        SurfaceStack::from_coordinates(c.radii, c.heights)
    }
}

impl From<SurfaceStack> for StackCoordinates {
    fn from(stack: SurfaceStack) -> Self {
        StackCoordinates {
            radii: stack.radii(),
            heights: stack.heights(),
        }
    }
}

impl SurfaceStack {
    /// Derive every boundary from the layer thicknesses.
    ///
    /// Fails with `ConfigError` if any chain is not strictly increasing.
    pub fn from_layers(layers: &LayerSpec) -> FusionResult<Self> {
        layers.validate()?;

        let r_inner_blanket = layers.inner_blanket_radius;
        let r_outer_blanket = r_inner_blanket + layers.blanket_thickness;
        let r_inner_vessel = r_outer_blanket + layers.blanket_vv_gap;
        let r_outer_vessel = r_inner_vessel + layers.vv_thickness;

        let z_lower_vessel_bottom = 0.0;
        let z_lower_blanket_bottom = z_lower_vessel_bottom + layers.lower_vv_thickness;
        let z_lower_blanket_top = z_lower_blanket_bottom + layers.lower_blanket_thickness;
        let z_upper_vessel_bottom = z_lower_blanket_top + layers.blanket_height;
        let z_upper_vessel_top = z_upper_vessel_bottom + layers.upper_vv_thickness;
        let z_upper_blanket_top = z_upper_vessel_top + layers.upper_blanket_thickness;

        Self::from_coordinates(
            [r_inner_blanket, r_outer_blanket, r_inner_vessel, r_outer_vessel],
            [
                z_lower_vessel_bottom,
                z_lower_blanket_bottom,
                z_lower_blanket_top,
                z_upper_vessel_bottom,
                z_upper_vessel_top,
                z_upper_blanket_top,
            ],
        )
    }

    /// Build from absolute radii and heights, in [`SurfaceId::RADIAL`] and
    /// [`SurfaceId::AXIAL`] order.
    pub fn from_coordinates(radii: [f64; 4], heights: [f64; 6]) -> FusionResult<Self> {
        if let Some(bad) = radii.iter().chain(heights.iter()).find(|v| !v.is_finite()) {
            return Err(FusionError::ConfigError(format!(
                "surface coordinate must be finite, got {bad}"
            )));
        }
        if radii[0] <= 0.0 {
            return Err(FusionError::ConfigError(format!(
                "inner_blanket_cylinder radius must be > 0, got {}",
                radii[0]
            )));
        }
        check_increasing(&SurfaceId::RADIAL, &radii)?;
        check_increasing(&SurfaceId::AXIAL, &heights)?;

        let cylinder = |id: SurfaceId, boundary: Boundary| Surface {
            id,
            kind: SurfaceKind::Cylinder {
                radius: radii[id.index()],
            },
            boundary,
        };
        let plane = |id: SurfaceId, boundary: Boundary| Surface {
            id,
            kind: SurfaceKind::Plane {
                height: heights[id.index() - SurfaceId::RADIAL.len()],
            },
            boundary,
        };

        use Boundary::{Transmission, Vacuum};
        let surfaces = [
            cylinder(SurfaceId::InnerBlanketCylinder, Transmission),
            cylinder(SurfaceId::OuterBlanketCylinder, Transmission),
            cylinder(SurfaceId::InnerVesselCylinder, Transmission),
            cylinder(SurfaceId::OuterVesselCylinder, Vacuum),
            plane(SurfaceId::LowerVesselBottom, Vacuum),
            plane(SurfaceId::LowerBlanketBottom, Transmission),
            plane(SurfaceId::LowerBlanketTop, Transmission),
            plane(SurfaceId::UpperVesselBottom, Transmission),
            plane(SurfaceId::UpperVesselTop, Transmission),
            plane(SurfaceId::UpperBlanketTop, Vacuum),
        ];

        log::debug!("surface stack: radii {radii:?}, heights {heights:?}");

        Ok(SurfaceStack { surfaces })
    }

    pub fn get(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.index()]
    }

    pub fn coordinate(&self, id: SurfaceId) -> f64 {
        self.get(id).coordinate()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    /// Cylinder radii, inner → outer.
    pub fn radii(&self) -> [f64; 4] {
        SurfaceId::RADIAL.map(|id| self.coordinate(id))
    }

    /// Plane heights, bottom → top.
    pub fn heights(&self) -> [f64; 6] {
        SurfaceId::AXIAL.map(|id| self.coordinate(id))
    }

    pub fn outer_radius(&self) -> f64 {
        self.coordinate(SurfaceId::OuterVesselCylinder)
    }

    pub fn bottom(&self) -> f64 {
        self.coordinate(SurfaceId::LowerVesselBottom)
    }

    pub fn top(&self) -> f64 {
        self.coordinate(SurfaceId::UpperBlanketTop)
    }

    /// Surfaces flagged as open (vacuum) boundaries.
    pub fn open_boundaries(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter().filter(|s| s.is_open())
    }

    /// True if `p` lies inside the terminating boundaries, using the same
    /// half-open convention as region membership.
    pub fn in_domain(&self, p: &Point3) -> bool {
        self.get(SurfaceId::OuterVesselCylinder).evaluate(p) < 0.0
            && self.get(SurfaceId::LowerVesselBottom).evaluate(p) >= 0.0
            && self.get(SurfaceId::UpperBlanketTop).evaluate(p) < 0.0
    }
}

fn check_increasing(ids: &[SurfaceId], values: &[f64]) -> FusionResult<()> {
    for i in 1..values.len() {
        if values[i].partial_cmp(&values[i - 1]) != Some(Ordering::Greater) {
            return Err(FusionError::ConfigError(format!(
                "{} ({}) must exceed {} ({})",
                ids[i].as_str(),
                values[i],
                ids[i - 1].as_str(),
                values[i - 1]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_radii_and_heights() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        assert_eq!(stack.radii(), [100.0, 170.0, 190.0, 200.0]);
        assert_eq!(stack.heights(), [0.0, 10.0, 60.0, 560.0, 570.0, 610.0]);
    }

    #[test]
    fn test_open_boundaries_are_outermost() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        let open: Vec<SurfaceId> = stack.open_boundaries().map(|s| s.id).collect();
        assert_eq!(
            open,
            vec![
                SurfaceId::OuterVesselCylinder,
                SurfaceId::LowerVesselBottom,
                SurfaceId::UpperBlanketTop
            ]
        );
    }

    #[test]
    fn test_shared_boundary_aliases() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        assert_eq!(stack.coordinate(SurfaceId::LOWER_VESSEL_TOP), 10.0);
        assert_eq!(stack.coordinate(SurfaceId::UPPER_BLANKET_BOTTOM), 570.0);
    }

    #[test]
    fn test_signed_evaluation() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        let cyl = stack.get(SurfaceId::InnerBlanketCylinder);
        assert!(cyl.evaluate(&Point3::new(50.0, 0.0, 0.0)) < 0.0);
        assert!(cyl.evaluate(&Point3::new(0.0, 150.0, 0.0)) > 0.0);
        assert_eq!(cyl.evaluate(&Point3::new(100.0, 0.0, 7.0)), 0.0);

        let plane = stack.get(SurfaceId::LowerBlanketTop);
        assert!(plane.evaluate(&Point3::on_axis(59.0)) < 0.0);
        assert!(plane.evaluate(&Point3::on_axis(61.0)) > 0.0);
    }

    #[test]
    fn test_domain_is_half_open() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        assert!(stack.in_domain(&Point3::on_axis(0.0)));
        assert!(!stack.in_domain(&Point3::on_axis(610.0)));
        assert!(!stack.in_domain(&Point3::new(200.0, 0.0, 300.0)));
        assert!(stack.in_domain(&Point3::new(199.999, 0.0, 300.0)));
        assert!(!stack.in_domain(&Point3::on_axis(-1e-9)));
    }

    #[test]
    fn test_serialized_form_is_coordinate_chains() {
        let stack = SurfaceStack::from_layers(&LayerSpec::default()).unwrap();
        let json = serde_json::to_value(&stack).unwrap();
        assert_eq!(json["radii"], serde_json::json!([100.0, 170.0, 190.0, 200.0]));
        let back: SurfaceStack = serde_json::from_value(json).unwrap();
        assert_eq!(back, stack);
    }

    #[test]
    fn test_deserialize_rejects_unordered_chain() {
        let json = r#"{"radii": [100.0, 190.0, 170.0, 200.0],
                       "heights": [0.0, 10.0, 60.0, 560.0, 570.0, 610.0]}"#;
        let err = serde_json::from_str::<SurfaceStack>(json).unwrap_err();
        assert!(err.to_string().contains("outer_blanket_cylinder"), "{err}");

        let json = r#"{"radii": [0.0, 170.0, 190.0, 200.0],
                       "heights": [0.0, 10.0, 60.0, 560.0, 570.0, 610.0]}"#;
        assert!(serde_json::from_str::<SurfaceStack>(json).is_err());
    }

    #[test]
    fn test_non_increasing_chain_rejected() {
        let layers = LayerSpec {
            lower_blanket_thickness: -5.0,
            ..LayerSpec::default()
        };
        let err = SurfaceStack::from_layers(&layers).unwrap_err();
        assert!(matches!(err, FusionError::ConfigError(_)));
    }

    #[test]
    fn test_absorbed_thickness_rejected() {
        // Positive inputs whose sum rounds back to the previous boundary.
        let layers = LayerSpec {
            inner_blanket_radius: 1.0e20,
            blanket_thickness: 1.0,
            ..LayerSpec::default()
        };
        let err = SurfaceStack::from_layers(&layers).unwrap_err();
        assert!(err.to_string().contains("outer_blanket_cylinder"));
    }

    #[test]
    fn test_infinite_layer_rejected() {
        let layers = LayerSpec {
            blanket_height: f64::INFINITY,
            ..LayerSpec::default()
        };
        assert!(SurfaceStack::from_layers(&layers).is_err());
    }

    #[test]
    fn test_chain_check_names_offending_pair() {
        let err = check_increasing(&SurfaceId::AXIAL[..2], &[0.0, 0.0]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("lower_blanket_bottom"));
        assert!(msg.contains("lower_vessel_bottom"));
    }
}
