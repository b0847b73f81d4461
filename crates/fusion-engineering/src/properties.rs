// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Cell Properties
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-cell volume, centroid and bounding box.
//!
//! Analytic values come from each region's annular extent. A seeded Monte
//! Carlo estimate through region membership cross-checks them against the actual
//! half-space membership.

use fusion_core::catalog::RegionName;
use fusion_core::cell::{MaterialHandle, Partition};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box [cm].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub fn volume(&self) -> f64 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y) * (self.max.z - self.min.z)
    }

    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProperties {
    pub name: RegionName,
    /// `None` for void cells.
    pub material: Option<MaterialHandle>,
    /// [cm³]
    pub volume: f64,
    pub centroid: Point3,
    pub bbox: BoundingBox,
}

/// Exact properties for every cell, in cell order.
pub fn cell_properties(partition: &Partition) -> Vec<CellProperties> {
    partition
        .cells()
        .iter()
        .map(|cell| {
            let b = cell.region.bounds(partition.stack());
            CellProperties {
                name: cell.name,
                material: cell.fill.material().cloned(),
                volume: b.volume(),
                centroid: b.centroid(),
                bbox: BoundingBox {
                    min: Point3::new(-b.r_max, -b.r_max, b.z_min),
                    max: Point3::new(b.r_max, b.r_max, b.z_max),
                },
            }
        })
        .collect()
}

/// Summed cell volume per material, first-use order.
pub fn material_volumes(partition: &Partition) -> Vec<(MaterialHandle, f64)> {
    let props = cell_properties(partition);
    partition
        .materials()
        .into_iter()
        .map(|m| {
            let v = props
                .iter()
                .filter(|p| p.material.as_ref() == Some(m))
                .map(|p| p.volume)
                .sum::<f64>();
            (m.clone(), v)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub name: RegionName,
    pub estimate: f64,
    /// One-sigma binomial error [cm³].
    pub std_err: f64,
    pub analytic: f64,
}

impl VolumeEstimate {
    /// |estimate − analytic| in units of `std_err`.
    pub fn deviation_sigma(&self) -> f64 {
        if self.std_err == 0.0 {
            return if self.estimate == self.analytic {
                0.0
            } else {
                f64::INFINITY
            };
        }
        (self.estimate - self.analytic).abs() / self.std_err
    }
}

/// Hit-or-miss volume estimate over the bounding box of the whole stack.
pub fn estimate_volumes(
    partition: &Partition,
    samples: usize,
    seed: u64,
) -> FusionResult<Vec<VolumeEstimate>> {
    if samples == 0 {
        return Err(FusionError::ConfigError(
            "volume estimate needs at least one sample".into(),
        ));
    }
    let stack = partition.stack();
    let r = stack.outer_radius();
    let (z0, z1) = (stack.bottom(), stack.top());
    let box_volume = (2.0 * r) * (2.0 * r) * (z1 - z0);

    let cells = partition.cells();
    let mut hits = vec![0usize; cells.len()];
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..samples {
        let p = Point3::new(
            rng.gen_range(-r..r),
            rng.gen_range(-r..r),
            rng.gen_range(z0..z1),
        );
        if let Some(i) = cells.iter().position(|c| c.region.contains(stack, &p)) {
            hits[i] += 1;
        }
    }

    let n = samples as f64;
    let estimates = cells
        .iter()
        .zip(hits)
        .map(|(cell, h)| {
            let frac = h as f64 / n;
            VolumeEstimate {
                name: cell.name,
                estimate: box_volume * frac,
                std_err: box_volume * (frac * (1.0 - frac) / n).sqrt(),
                analytic: cell.region.bounds(stack).volume(),
            }
        })
        .collect();

    log::debug!("volume estimate: {samples} samples, seed {seed}");
    Ok(estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_core::cell::MaterialTable;
    use fusion_types::config::LayerSpec;
    use std::f64::consts::PI;

    fn reference() -> Partition {
        Partition::from_layers(&LayerSpec::default(), &MaterialTable::per_component()).unwrap()
    }

    #[test]
    fn test_reference_properties() {
        let props = cell_properties(&reference());
        assert_eq!(props.len(), 8);

        let inner = &props[0];
        assert_eq!(inner.name, RegionName::InnerVoid);
        assert!(inner.material.is_none());
        assert!((inner.volume - PI * 100.0 * 100.0 * 500.0).abs() < 1e-6);
        assert_eq!(inner.centroid, Point3::on_axis(310.0));
        assert_eq!(inner.bbox.min, Point3::new(-100.0, -100.0, 60.0));

        let lower = props
            .iter()
            .find(|p| p.name == RegionName::VesselLower)
            .unwrap();
        assert_eq!(lower.material, Some(MaterialHandle::new("lower_vessel")));
        assert!((lower.volume - PI * 190.0 * 190.0 * 10.0).abs() < 1e-6);
        assert_eq!(lower.centroid, Point3::on_axis(5.0));
    }

    #[test]
    fn test_volumes_tile_bounding_cylinder() {
        let total: f64 = cell_properties(&reference()).iter().map(|p| p.volume).sum();
        let domain = PI * 200.0 * 200.0 * 610.0;
        assert!((total - domain).abs() < 1e-9 * domain);
    }

    #[test]
    fn test_material_volumes_shared_table() {
        let table = MaterialTable::shared(MaterialHandle::new("steel"), MaterialHandle::new("li"));
        let p = Partition::from_layers(&LayerSpec::default(), &table).unwrap();
        let vols = material_volumes(&p);
        assert_eq!(vols.len(), 2);
        let voids: f64 = cell_properties(&p)
            .iter()
            .filter(|c| c.material.is_none())
            .map(|c| c.volume)
            .sum();
        let domain = PI * 200.0 * 200.0 * 610.0;
        assert!((vols[0].1 + vols[1].1 + voids - domain).abs() < 1e-9 * domain);
    }

    #[test]
    fn test_monte_carlo_agrees_with_analytic() {
        let estimates = estimate_volumes(&reference(), 200_000, 7).unwrap();
        for e in &estimates {
            assert!(e.estimate > 0.0, "{:?}", e.name);
            assert!(e.deviation_sigma() < 5.0, "{:?}: {:?}", e.name, e);
        }
    }

    #[test]
    fn test_monte_carlo_is_reproducible() {
        let p = reference();
        let a = estimate_volumes(&p, 5_000, 42).unwrap();
        let b = estimate_volumes(&p, 5_000, 42).unwrap();
        assert_eq!(a, b);
        assert!(estimate_volumes(&p, 0, 42).is_err());
    }

    #[test]
    fn test_estimates_follow_cell_order() {
        let p = reference();
        let estimates = estimate_volumes(&p, 20_000, 3).unwrap();
        assert_eq!(estimates.len(), p.cells().len());
        for (e, cell) in estimates.iter().zip(p.cells()) {
            assert_eq!(e.name, cell.name);
            assert_eq!(e.analytic, cell.region.bounds(p.stack()).volume());
        }
        // A reloaded partition keeps the same ordering.
        let json = serde_json::to_string(&p).unwrap();
        let reloaded: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(estimate_volumes(&reloaded, 20_000, 3).unwrap(), estimates);
    }

    #[test]
    fn test_bbox_contains_centroid() {
        for props in cell_properties(&reference()) {
            assert!(props.bbox.contains(&props.centroid), "{:?}", props.name);
            assert!(props.bbox.volume() >= props.volume);
        }
    }
}
