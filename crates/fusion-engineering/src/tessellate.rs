// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Tessellation and OBJ Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Triangle surfaces for the material cells of a partition.
//!
//! Every material cell is an annular prism, so each one becomes a closed,
//! outward-oriented polygonal solid. Each solid is split at every stack
//! coordinate it spans, so neighbouring solids share vertex rings along
//! their common faces. Void cells are skipped; the optional graveyard is a
//! hollow cylinder surrounding the whole stack.
//!
//! Export is Wavefront OBJ with one `mat:<name>` group per solid, the tag
//! convention DAGMC-style pipelines read.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fusion_core::cell::Partition;
use fusion_core::surface::SurfaceStack;
use fusion_types::constants::DEFAULT_GRAVEYARD_OFFSET_CM;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::grid::Point3;

/// Coarsest allowed angular resolution.
pub const MIN_SEGMENTS: usize = 8;

/// Finest allowed angular resolution.
pub const MAX_SEGMENTS: usize = 4096;

pub const GRAVEYARD_TAG: &str = "graveyard";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Polygon sides per circle.
    pub angular_segments: usize,
    /// Gap and thickness of the graveyard shell [cm]; `None` omits it.
    pub graveyard_offset: Option<f64>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            angular_segments: 64,
            graveyard_offset: Some(DEFAULT_GRAVEYARD_OFFSET_CM),
        }
    }
}

impl MeshOptions {
    /// Segments so the outer circle's chords are at most `mesh_size` long.
    pub fn from_mesh_size(stack: &SurfaceStack, mesh_size: f64) -> FusionResult<Self> {
        if !(mesh_size.is_finite() && mesh_size > 0.0) {
            return Err(FusionError::ConfigError(format!(
                "mesh size must be > 0, got {mesh_size}"
            )));
        }
        let circumference = 2.0 * PI * stack.outer_radius();
        let segments = (circumference / mesh_size).ceil() as usize;
        Ok(MeshOptions {
            angular_segments: segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
            ..MeshOptions::default()
        })
    }

    fn validate(&self) -> FusionResult<()> {
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&self.angular_segments) {
            return Err(FusionError::ConfigError(format!(
                "angular segments must be in [{MIN_SEGMENTS}, {MAX_SEGMENTS}], got {}",
                self.angular_segments
            )));
        }
        if let Some(offset) = self.graveyard_offset {
            if !(offset.is_finite() && offset > 0.0) {
                return Err(FusionError::ConfigError(format!(
                    "graveyard offset must be > 0, got {offset}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3>,
    /// Counter-clockwise seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Signed enclosed volume; positive when outward-oriented.
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize]);
                a.x * (b.y * c.z - b.z * c.y) - a.y * (b.x * c.z - b.z * c.x)
                    + a.z * (b.x * c.y - b.y * c.x)
            })
            .sum::<f64>()
            / 6.0
    }

    /// Every directed edge is matched by exactly one reverse edge.
    pub fn is_closed(&self) -> bool {
        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for t in &self.triangles {
            for k in 0..3 {
                *edges.entry((t[k], t[(k + 1) % 3])).or_insert(0) += 1;
            }
        }
        edges
            .iter()
            .all(|(&(a, b), &n)| n == 1 && edges.get(&(b, a)) == Some(&1))
    }

    fn append(&mut self, other: TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.triangles
            .extend(other.triangles.into_iter().map(|t| t.map(|i| i + base)));
    }

    fn flip(&mut self) {
        for t in &mut self.triangles {
            t.swap(1, 2);
        }
    }
}

/// A solid with its material tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedMesh {
    pub name: String,
    pub material: String,
    pub mesh: TriangleMesh,
}

fn ring(radius: f64, z: f64, n: usize) -> impl Iterator<Item = Point3> {
    (0..n).map(move |k| Point3::from_cylindrical(radius, 2.0 * PI * k as f64 / n as f64, z))
}

/// Closed polygonal prism over `r_min <= r <= r_max`, `z_min <= z <= z_max`.
///
/// `r_min == 0` gives a solid cylinder with centered caps.
pub fn annular_prism(r_min: f64, r_max: f64, z_min: f64, z_max: f64, n: usize) -> TriangleMesh {
    conformal_prism(&[r_min, r_max], &[z_min, z_max], n)
}

/// Vertex rings of a prism, created once per (radius, height) pair.
struct Rings<'a> {
    mesh: TriangleMesh,
    starts: HashMap<(usize, usize), u32>,
    radii: &'a [f64],
    heights: &'a [f64],
    n: usize,
}

impl Rings<'_> {
    /// Index of the first vertex of ring `(ri, hi)`. A zero radius is a
    /// single axis vertex.
    fn at(&mut self, ri: usize, hi: usize) -> u32 {
        if let Some(&start) = self.starts.get(&(ri, hi)) {
            return start;
        }
        let start = self.mesh.vertices.len() as u32;
        let (r, z) = (self.radii[ri], self.heights[hi]);
        if r > 0.0 {
            self.mesh.vertices.extend(ring(r, z, self.n));
        } else {
            self.mesh.vertices.push(Point3::on_axis(z));
        }
        self.starts.insert((ri, hi), start);
        start
    }
}

/// Closed polygonal prism with a vertex ring at every entry of `radii`
/// and `heights`, both strictly increasing with at least two entries.
///
/// Walls are split at every height and caps at every radius. Two solids
/// built from the same break coordinates therefore triangulate a common
/// face identically, with opposite orientation, and carry no T-junctions.
/// A leading radius of 0 gives a solid cylinder with centered caps.
pub fn conformal_prism(radii: &[f64], heights: &[f64], n: usize) -> TriangleMesh {
    debug_assert!(radii.len() >= 2 && heights.len() >= 2);
    let mut rings = Rings {
        mesh: TriangleMesh::default(),
        starts: HashMap::new(),
        radii,
        heights,
        n,
    };
    let nu = n as u32;
    let next = |k: u32| (k + 1) % nu;
    let (outer, top) = (radii.len() - 1, heights.len() - 1);
    let hollow = radii[0] > 0.0;

    for h in 0..top {
        let (a, b) = (rings.at(outer, h), rings.at(outer, h + 1));
        for k in 0..nu {
            let j = next(k);
            rings.mesh.triangles.push([a + k, a + j, b + j]);
            rings.mesh.triangles.push([a + k, b + j, b + k]);
        }
        if hollow {
            let (a, b) = (rings.at(0, h), rings.at(0, h + 1));
            for k in 0..nu {
                let j = next(k);
                rings.mesh.triangles.push([a + k, b + j, a + j]);
                rings.mesh.triangles.push([a + k, b + k, b + j]);
            }
        }
    }

    for r in 0..outer {
        let (ib, ob) = (rings.at(r, 0), rings.at(r + 1, 0));
        let (it, ot) = (rings.at(r, top), rings.at(r + 1, top));
        for k in 0..nu {
            let j = next(k);
            if radii[r] > 0.0 {
                rings.mesh.triangles.push([it + k, ot + k, ot + j]);
                rings.mesh.triangles.push([it + k, ot + j, it + j]);
                rings.mesh.triangles.push([ib + k, ob + j, ob + k]);
                rings.mesh.triangles.push([ib + k, ib + j, ob + j]);
            } else {
                rings.mesh.triangles.push([it, ot + k, ot + j]);
                rings.mesh.triangles.push([ib, ob + j, ob + k]);
            }
        }
    }
    rings.mesh
}

/// `lo`, every coordinate strictly between `lo` and `hi`, then `hi`.
fn breaks(lo: f64, hi: f64, coordinates: &[f64]) -> Vec<f64> {
    std::iter::once(lo)
        .chain(coordinates.iter().copied().filter(|&c| c > lo && c < hi))
        .chain(std::iter::once(hi))
        .collect()
}

/// Hollow cylinder enclosing `[0, radius] x [z_min, z_max]` with a gap and
/// wall thickness of `offset`.
pub fn graveyard_shell(radius: f64, z_min: f64, z_max: f64, offset: f64, n: usize) -> TriangleMesh {
    let mut shell = annular_prism(
        0.0,
        radius + 2.0 * offset,
        z_min - 2.0 * offset,
        z_max + 2.0 * offset,
        n,
    );
    let mut cavity = annular_prism(0.0, radius + offset, z_min - offset, z_max + offset, n);
    cavity.flip();
    shell.append(cavity);
    shell
}

/// One closed solid per material cell, plus the graveyard when requested.
pub fn tessellate(partition: &Partition, options: &MeshOptions) -> FusionResult<Vec<TaggedMesh>> {
    options.validate()?;
    let n = options.angular_segments;
    let stack = partition.stack();

    let mut meshes: Vec<TaggedMesh> = partition
        .cells()
        .iter()
        .filter_map(|cell| {
            let material = cell.fill.material()?;
            let b = cell.region.bounds(stack);
            let radii = breaks(b.r_min, b.r_max, &stack.radii());
            let heights = breaks(b.z_min, b.z_max, &stack.heights());
            Some(TaggedMesh {
                name: cell.name.as_str().to_string(),
                material: material.name().to_string(),
                mesh: conformal_prism(&radii, &heights, n),
            })
        })
        .collect();

    if let Some(offset) = options.graveyard_offset {
        meshes.push(TaggedMesh {
            name: GRAVEYARD_TAG.to_string(),
            material: GRAVEYARD_TAG.to_string(),
            mesh: graveyard_shell(stack.outer_radius(), stack.bottom(), stack.top(), offset, n),
        });
    }

    log::debug!(
        "tessellated {} solids at {} segments, {} triangles",
        meshes.len(),
        n,
        meshes.iter().map(|m| m.mesh.triangles.len()).sum::<usize>()
    );
    Ok(meshes)
}

/// Wavefront OBJ with a `mat:<material>` group per solid. Indices are
/// global and 1-based.
pub fn write_obj<W: Write>(meshes: &[TaggedMesh], mut out: W) -> FusionResult<()> {
    let mut base = 1usize;
    for m in meshes {
        writeln!(out, "o {}", m.name)?;
        writeln!(out, "g mat:{}", m.material)?;
        writeln!(out, "usemtl mat:{}", m.material)?;
        for v in &m.mesh.vertices {
            writeln!(out, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        for t in &m.mesh.triangles {
            let [a, b, c] = t.map(|i| i as usize + base);
            writeln!(out, "f {a} {b} {c}")?;
        }
        base += m.mesh.vertices.len();
    }
    out.flush()?;
    Ok(())
}

pub fn write_obj_file(meshes: &[TaggedMesh], path: impl AsRef<Path>) -> FusionResult<()> {
    let file = File::create(path)?;
    write_obj(meshes, BufWriter::new(file))
}
