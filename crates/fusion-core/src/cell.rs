// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Cell Binder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Region → material binding and the validated [`Partition`].

use std::collections::BTreeMap;
use std::fmt;

use fusion_types::config::LayerSpec;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;
use serde::{Deserialize, Serialize};

use crate::catalog::{RegionCatalog, RegionName, RegionRole};
use crate::region::{Region, RegionBounds};
use crate::surface::SurfaceStack;
use crate::validate::validate_symbolic;

/// Opaque material identity; resolved to a composition downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(String);

impl MaterialHandle {
    pub fn new(name: impl Into<String>) -> Self {
        MaterialHandle(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fill {
    Material(MaterialHandle),
    Void,
}

impl Fill {
    pub fn material(&self) -> Option<&MaterialHandle> {
        match self {
            Fill::Material(m) => Some(m),
            Fill::Void => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Fill::Void)
    }
}

/// Region → fill table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    fills: BTreeMap<RegionName, Fill>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed table: one handle for every vessel sub-region, one for every
    /// blanket sub-region, voids left empty.
    pub fn shared(vessel: MaterialHandle, blanket: MaterialHandle) -> Self {
        let mut table = MaterialTable::new();
        for name in RegionName::ALL {
            let fill = match name.role() {
                RegionRole::Void => Fill::Void,
                RegionRole::Vessel => Fill::Material(vessel.clone()),
                RegionRole::Blanket => Fill::Material(blanket.clone()),
            };
            table = table.assign(name, fill);
        }
        table
    }

    /// One handle per solid component, named after the component.
    /// Matches the material tags of the tessellated geometry.
    pub fn per_component() -> Self {
        let tag = |s: &str| Fill::Material(MaterialHandle::new(s));
        MaterialTable::new()
            .assign(RegionName::InnerVoid, Fill::Void)
            .assign(RegionName::OuterVoid, Fill::Void)
            .assign(RegionName::BlanketCylinder, tag("blanket"))
            .assign(RegionName::VesselCylinder, tag("vessel"))
            .assign(RegionName::BlanketUpper, tag("upper_blanket"))
            .assign(RegionName::BlanketLower, tag("lower_blanket"))
            .assign(RegionName::VesselLower, tag("lower_vessel"))
            .assign(RegionName::VesselUpper, tag("upper_vessel"))
    }

    pub fn assign(mut self, region: RegionName, fill: Fill) -> Self {
        self.fills.insert(region, fill);
        self
    }

    pub fn fill(&self, region: RegionName) -> Option<&Fill> {
        self.fills.get(&region)
    }
}

/// A region bound to its fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// 1-based, catalog order.
    pub id: u32,
    pub name: RegionName,
    pub region: Region,
    pub fill: Fill,
}

/// Validated, fully bound geometry.
///
/// Only obtainable through [`Partition::bind`] or by deserializing, which
/// re-runs the same checks. Holding one means the partition invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundCells", into = "BoundCells")]
pub struct Partition {
    stack: SurfaceStack,
    cells: Vec<Cell>,
}

/// Wire form of a [`Partition`], unchecked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundCells {
    pub stack: SurfaceStack,
    pub cells: Vec<Cell>,
}

impl From<Partition> for BoundCells {
    fn from(p: Partition) -> Self {
        BoundCells {
            stack: p.stack,
            cells: p.cells,
        }
    }
}

impl TryFrom<BoundCells> for Partition {
    type Error = FusionError;

    /// Ids must run 1..=n in order and names must be unique; the regions
    /// must then pass the symbolic partition check.
    fn try_from(bound: BoundCells) -> FusionResult<Self> {
        for (i, cell) in bound.cells.iter().enumerate() {
            if cell.id as usize != i + 1 {
                return Err(FusionError::ConfigError(format!(
                    "cell '{}' has id {}, expected {}",
                    cell.name,
                    cell.id,
                    i + 1
                )));
            }
            if bound.cells[..i].iter().any(|c| c.name == cell.name) {
                return Err(FusionError::ConfigError(format!(
                    "cell '{}' appears twice",
                    cell.name
                )));
            }
        }
        let catalog = RegionCatalog::from_entries(
            bound.stack.clone(),
            bound
                .cells
                .iter()
                .map(|c| (c.name, c.region.clone()))
                .collect(),
        );
        validate_symbolic(&catalog).into_result()?;
        Ok(Partition {
            stack: bound.stack,
            cells: bound.cells,
        })
    }
}

impl Partition {
    /// Bind every cataloged region and check the partition invariant.
    pub fn bind(catalog: &RegionCatalog, table: &MaterialTable) -> FusionResult<Self> {
        let mut cells = Vec::with_capacity(catalog.len());
        for (i, (name, region)) in catalog.iter().enumerate() {
            let fill = table
                .fill(name)
                .cloned()
                .ok_or_else(|| FusionError::UnmappedRegion(name.as_str().to_string()))?;
            cells.push(Cell {
                id: i as u32 + 1,
                name,
                region: region.clone(),
                fill,
            });
        }

        validate_symbolic(catalog).into_result()?;

        log::info!(
            "bound partition: {} cells, {} materials",
            cells.len(),
            distinct_materials(&cells).len()
        );

        Ok(Partition {
            stack: catalog.stack().clone(),
            cells,
        })
    }

    /// Catalog, bind and validate in one step.
    pub fn from_layers(layers: &LayerSpec, table: &MaterialTable) -> FusionResult<Self> {
        let catalog = RegionCatalog::build(layers)?;
        Self::bind(&catalog, table)
    }

    pub fn stack(&self) -> &SurfaceStack {
        &self.stack
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, name: RegionName) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }

    pub fn cell_by_id(&self, id: u32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// The unique cell containing `p`, or `None` outside the domain.
    pub fn find_cell(&self, p: &Point3) -> Option<&Cell> {
        self.cells.iter().find(|c| c.region.contains(&self.stack, p))
    }

    pub fn bounds(&self, name: RegionName) -> Option<RegionBounds> {
        self.cell(name).map(|c| c.region.bounds(&self.stack))
    }

    /// Distinct materials, in first-use order.
    pub fn materials(&self) -> Vec<&MaterialHandle> {
        distinct_materials(&self.cells)
    }

    /// Cells filled with `material`.
    pub fn cells_with(&self, material: &MaterialHandle) -> impl Iterator<Item = &Cell> {
        let material = material.clone();
        self.cells
            .iter()
            .filter(move |c| c.fill.material() == Some(&material))
    }
}

fn distinct_materials(cells: &[Cell]) -> Vec<&MaterialHandle> {
    let mut seen: Vec<&MaterialHandle> = Vec::new();
    for m in cells.iter().filter_map(|c| c.fill.material()) {
        if !seen.contains(&m) {
            seen.push(m);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_types::error::ViolationKind;

    fn shared_table() -> MaterialTable {
        MaterialTable::shared(
            MaterialHandle::new("vacuum_vessel"),
            MaterialHandle::new("blanket"),
        )
    }

    #[test]
    fn test_reference_partition_binds_eight_cells() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();
        assert_eq!(partition.cells().len(), 8);
        let ids: Vec<u32> = partition.cells().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<u32>>());
        for cell in partition.cells() {
            let v = cell.region.bounds(partition.stack()).volume();
            assert!(v > 0.0, "{} has volume {v}", cell.name);
        }
    }

    #[test]
    fn test_shared_table_roles() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();
        let names: Vec<&str> = partition.materials().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["vacuum_vessel", "blanket"]);
        assert!(partition.cell(RegionName::InnerVoid).unwrap().fill.is_void());
        assert_eq!(
            partition
                .cells_with(&MaterialHandle::new("vacuum_vessel"))
                .count(),
            3
        );
        assert_eq!(partition.cells_with(&MaterialHandle::new("blanket")).count(), 3);
    }

    #[test]
    fn test_per_component_table_has_six_materials() {
        let partition =
            Partition::from_layers(&LayerSpec::default(), &MaterialTable::per_component()).unwrap();
        assert_eq!(partition.materials().len(), 6);
    }

    #[test]
    fn test_unmapped_region_is_fatal() {
        let table = MaterialTable::new()
            .assign(RegionName::InnerVoid, Fill::Void)
            .assign(RegionName::OuterVoid, Fill::Void);
        let err = Partition::from_layers(&LayerSpec::default(), &table).unwrap_err();
        match err {
            FusionError::UnmappedRegion(name) => assert_eq!(name, "vessel_cell_lower"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_broken_catalog_refused() {
        let catalog = RegionCatalog::build(&LayerSpec::default()).unwrap();
        let entries = catalog
            .iter()
            .filter(|(n, _)| *n != RegionName::VesselUpper)
            .map(|(n, r)| (n, r.clone()))
            .collect();
        let broken = RegionCatalog::from_entries(catalog.stack().clone(), entries);
        match Partition::bind(&broken, &shared_table()).unwrap_err() {
            FusionError::PartitionViolation(v) => {
                assert_eq!(v.kind, ViolationKind::Gap);
                assert!((560.0..570.0).contains(&v.point.z));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_find_cell() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();
        let cell = partition.find_cell(&Point3::new(0.0, 150.0, 300.0)).unwrap();
        assert_eq!(cell.name, RegionName::BlanketCylinder);
        assert!(partition.find_cell(&Point3::new(0.0, 0.0, 1000.0)).is_none());
        assert_eq!(partition.cell_by_id(cell.id).unwrap().name, cell.name);
    }

    fn tampered(partition: &Partition, edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut json = serde_json::to_value(partition).unwrap();
        edit(&mut json);
        json.to_string()
    }

    #[test]
    fn test_json_roundtrip_keeps_partition() {
        let partition =
            Partition::from_layers(&LayerSpec::default(), &MaterialTable::per_component()).unwrap();
        let json = serde_json::to_string(&partition).unwrap();
        let back: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, partition);
    }

    #[test]
    fn test_deserialize_rejects_removed_cell() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();
        // vessel_cell_upper is the fourth cell; dropping it leaves a gap.
        let json = tampered(&partition, |v| {
            let cells = v["cells"].as_array_mut().unwrap();
            cells.remove(3);
            for (i, c) in cells.iter_mut().enumerate() {
                c["id"] = serde_json::json!(i + 1);
            }
        });
        let err = serde_json::from_str::<Partition>(&json).unwrap_err();
        assert!(err.to_string().contains("GAP"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_bad_ids_and_duplicates() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();

        let zero_id = tampered(&partition, |v| v["cells"][0]["id"] = serde_json::json!(0));
        assert!(serde_json::from_str::<Partition>(&zero_id).is_err());

        let duplicate = tampered(&partition, |v| {
            v["cells"][1]["name"] = v["cells"][0]["name"].clone();
        });
        let err = serde_json::from_str::<Partition>(&duplicate).unwrap_err();
        assert!(err.to_string().contains("appears twice"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_widened_region() {
        let partition = Partition::from_layers(&LayerSpec::default(), &shared_table()).unwrap();
        // Inner void bounded by the vessel cylinder overlaps the blanket.
        let json = tampered(&partition, |v| {
            let hs = v["cells"][0]["region"]["halfspaces"].as_array_mut().unwrap();
            for h in hs.iter_mut() {
                if h["surface"] == serde_json::json!("InnerBlanketCylinder") {
                    h["surface"] = serde_json::json!("InnerVesselCylinder");
                }
            }
        });
        let err = serde_json::from_str::<Partition>(&json).unwrap_err();
        assert!(err.to_string().contains("OVERLAP"), "{err}");
    }

    #[test]
    fn test_partition_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Partition>();
    }
}
