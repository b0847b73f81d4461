// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Partition Validator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Checks that a region catalog partitions its bounded domain.
//!
//! Two strategies:
//! - [`validate_symbolic`]: the surface coordinates split the (r, z) half-plane
//!   into half-open blocks on which every half-space test is constant, so one
//!   representative per block decides the whole block. Exact.
//! - [`validate_sampled`]: dense Cartesian lattice plus points lying exactly
//!   on every surface. Advisory, for debugging hand-built catalogs.

use fusion_types::constants::{VALIDATION_MARGIN_FRACTION, VALIDATION_MARGIN_MIN_CM};
use fusion_types::error::{FusionError, FusionResult, PartitionViolation, ViolationKind};
use fusion_types::grid::{Point3, SampleLattice};

use crate::catalog::RegionCatalog;
use crate::surface::{SurfaceKind, SurfaceStack};

/// Violations kept in a report; the rest are only counted.
const MAX_REPORTED_VIOLATIONS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionReport {
    /// Points tested.
    pub samples: usize,
    /// Total violations found.
    pub violation_count: usize,
    /// First violations, in test order.
    pub violations: Vec<PartitionViolation>,
}

impl PartitionReport {
    fn new() -> Self {
        PartitionReport {
            samples: 0,
            violation_count: 0,
            violations: Vec::new(),
        }
    }

    fn record(&mut self, violation: Option<PartitionViolation>) {
        self.samples += 1;
        if let Some(v) = violation {
            self.violation_count += 1;
            if self.violations.len() < MAX_REPORTED_VIOLATIONS {
                self.violations.push(v);
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violation_count == 0
    }

    /// Reported violations of one kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// First violation as an error.
    pub fn into_result(mut self) -> FusionResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(FusionError::PartitionViolation(self.violations.swap_remove(0)))
        }
    }
}

/// Classify a single point against the catalog.
pub fn check_point(catalog: &RegionCatalog, p: &Point3) -> Option<PartitionViolation> {
    let matched = catalog.locate(p);
    let kind = match (catalog.stack().in_domain(p), matched.len()) {
        (_, n) if n >= 2 => ViolationKind::Overlap,
        (true, 0) => ViolationKind::Gap,
        (false, 1) => ViolationKind::Leak,
        _ => return None,
    };
    Some(PartitionViolation {
        kind,
        point: *p,
        matched: matched.iter().map(|n| n.as_str().to_string()).collect(),
    })
}

/// Exact block-wise validation.
pub fn validate_symbolic(catalog: &RegionCatalog) -> PartitionReport {
    let stack = catalog.stack();
    let margin = default_margin(stack);

    let mut r_breaks = vec![0.0];
    r_breaks.extend(sorted_coordinates(stack, true));
    r_breaks.push(stack.outer_radius() + margin);

    let mut z_breaks = vec![stack.bottom() - margin];
    z_breaks.extend(sorted_coordinates(stack, false));
    z_breaks.push(stack.top() + margin);

    let mut report = PartitionReport::new();
    for rw in r_breaks.windows(2) {
        for zw in z_breaks.windows(2) {
            // Block interior and its closed lower corner.
            let mid = Point3::new(0.5 * (rw[0] + rw[1]), 0.0, 0.5 * (zw[0] + zw[1]));
            let corner = Point3::new(rw[0], 0.0, zw[0]);
            report.record(check_point(catalog, &mid));
            report.record(check_point(catalog, &corner));
        }
    }

    log::debug!(
        "symbolic partition check: {} blocks, {} violations",
        report.samples / 2,
        report.violation_count
    );
    report
}

/// Lattice resolution for [`validate_sampled`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Points along x and along y.
    pub nxy: usize,
    /// Points along z.
    pub nz: usize,
    /// Distance sampled past each open boundary [cm]; derived from the domain
    /// extent when `None`.
    pub margin: Option<f64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            nxy: 41,
            nz: 61,
            margin: None,
        }
    }
}

/// Dense deterministic sampling of the domain and its surroundings.
pub fn validate_sampled(catalog: &RegionCatalog, config: &SamplingConfig) -> PartitionReport {
    let stack = catalog.stack();
    let margin = config.margin.unwrap_or_else(|| default_margin(stack));
    let lattice = SampleLattice::new(
        config.nxy,
        config.nz,
        stack.outer_radius() + margin,
        stack.bottom() - margin,
        stack.top() + margin,
    );

    let mut report = PartitionReport::new();
    for p in lattice.points() {
        report.record(check_point(catalog, &p));
    }

    // Points exactly on every surface exercise the half-open convention.
    let radii = sorted_coordinates(stack, true);
    let heights = sorted_coordinates(stack, false);
    for &r in std::iter::once(&0.0).chain(radii.iter()) {
        for &z in lattice.z.iter().chain(heights.iter()) {
            report.record(check_point(catalog, &Point3::new(r, 0.0, z)));
        }
    }
    for &z in &heights {
        for &x in lattice.x.iter() {
            report.record(check_point(catalog, &Point3::new(x, 0.0, z)));
        }
    }

    if report.is_valid() {
        log::debug!("sampled partition check: {} points clean", report.samples);
    } else {
        log::warn!(
            "sampled partition check: {} of {} points violate the partition",
            report.violation_count,
            report.samples
        );
    }
    report
}

fn default_margin(stack: &SurfaceStack) -> f64 {
    let extent = stack.outer_radius().max(stack.top() - stack.bottom());
    (VALIDATION_MARGIN_FRACTION * extent).max(VALIDATION_MARGIN_MIN_CM)
}

/// Distinct cylinder radii (`radial = true`) or plane heights, ascending.
fn sorted_coordinates(stack: &SurfaceStack, radial: bool) -> Vec<f64> {
    let mut values: Vec<f64> = stack
        .iter()
        .filter_map(|s| match (s.kind, radial) {
            (SurfaceKind::Cylinder { radius }, true) => Some(radius),
            (SurfaceKind::Plane { height }, false) => Some(height),
            _ => None,
        })
        .collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionName;
    use crate::region::{HalfSpace, Region};
    use crate::surface::SurfaceId;
    use fusion_types::config::LayerSpec;

    fn catalog() -> RegionCatalog {
        RegionCatalog::build(&LayerSpec::default()).unwrap()
    }

    /// Reference catalog with one region replaced.
    fn with_replaced(name: RegionName, region: Region) -> RegionCatalog {
        let c = catalog();
        let entries = c
            .iter()
            .map(|(n, r)| (n, if n == name { region.clone() } else { r.clone() }))
            .collect();
        RegionCatalog::from_entries(c.stack().clone(), entries)
    }

    #[test]
    fn test_reference_catalog_is_a_partition() {
        let c = catalog();
        let exact = validate_symbolic(&c);
        assert!(exact.is_valid(), "{:?}", exact.violations);
        // 5 radial blocks x 7 axial blocks, two points each.
        assert_eq!(exact.samples, 70);

        let sampled = validate_sampled(&c, &SamplingConfig::default());
        assert!(sampled.is_valid(), "{:?}", sampled.violations);
        assert!(sampled.samples > 41 * 41 * 61);
    }

    #[test]
    fn test_missing_region_reports_gap() {
        let c = catalog();
        let entries = c
            .iter()
            .filter(|(n, _)| *n != RegionName::OuterVoid)
            .map(|(n, r)| (n, r.clone()))
            .collect();
        let broken = RegionCatalog::from_entries(c.stack().clone(), entries);

        let report = validate_symbolic(&broken);
        assert!(!report.is_valid());
        assert!(report.count(ViolationKind::Gap) > 0);
        let gap = &report.violations[0];
        let r = gap.point.radius();
        assert!((170.0..190.0).contains(&r), "gap reported at r = {r}");
        assert!((60.0..560.0).contains(&gap.point.z));
    }

    #[test]
    fn test_widened_region_reports_overlap() {
        // Inner void reaching out to the vessel swallows the blanket annulus.
        let widened = Region::intersection([
            HalfSpace::below(SurfaceId::UpperVesselBottom),
            HalfSpace::above(SurfaceId::LowerBlanketTop),
            HalfSpace::inside(SurfaceId::InnerVesselCylinder),
        ]);
        let broken = with_replaced(RegionName::InnerVoid, widened);
        let report = validate_symbolic(&broken);
        assert!(report.count(ViolationKind::Overlap) > 0);
        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("OVERLAP"));
    }

    #[test]
    fn test_unbounded_region_reports_leak() {
        // Vessel wall without its outer cylinder extends past the open boundary.
        let open_vessel = Region::intersection([
            HalfSpace::below(SurfaceId::UpperBlanketTop),
            HalfSpace::above(SurfaceId::LowerVesselBottom),
            HalfSpace::outside(SurfaceId::InnerVesselCylinder),
        ]);
        let broken = with_replaced(RegionName::VesselCylinder, open_vessel);
        let report = validate_symbolic(&broken);
        assert_eq!(report.violation_count, report.count(ViolationKind::Leak));
        assert!(report.violation_count > 0);
        assert!(report.violations[0].point.radius() >= 200.0);

        let sampled = validate_sampled(&broken, &SamplingConfig::default());
        assert!(!sampled.is_valid());
    }

    #[test]
    fn test_wrong_bounding_plane_detected() {
        // Lower vessel capped by lower_blanket_top instead of its own top
        // claims the whole lower blanket as well.
        let capped_too_high = Region::intersection([
            HalfSpace::above(SurfaceId::LowerVesselBottom),
            HalfSpace::inside(SurfaceId::InnerVesselCylinder),
        ])
        .and(HalfSpace::above(SurfaceId::LowerBlanketTop).flipped());
        let broken = with_replaced(RegionName::VesselLower, capped_too_high);
        let report = validate_symbolic(&broken);
        assert!(report.count(ViolationKind::Overlap) > 0);
        assert!(report
            .violations
            .iter()
            .all(|v| v.matched.contains(&"blanket_cell_lower".to_string())));
    }

    #[test]
    fn test_check_point_clean_outside() {
        let c = catalog();
        assert!(check_point(&c, &Point3::new(250.0, 0.0, 300.0)).is_none());
        assert!(check_point(&c, &Point3::on_axis(700.0)).is_none());
    }

    #[test]
    fn test_report_caps_stored_violations() {
        let c = catalog();
        let empty = RegionCatalog::from_entries(c.stack().clone(), Vec::new());
        let report = validate_sampled(&empty, &SamplingConfig::default());
        assert!(report.violation_count > MAX_REPORTED_VIOLATIONS);
        assert_eq!(report.violations.len(), MAX_REPORTED_VIOLATIONS);
        assert_eq!(report.count(ViolationKind::Gap), MAX_REPORTED_VIOLATIONS);
    }
}
