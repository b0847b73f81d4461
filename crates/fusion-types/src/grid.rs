// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Points and Sampling Lattice
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Cartesian point [cm]. The Z axis is the symmetry axis of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub const fn origin() -> Self {
        Point3::new(0.0, 0.0, 0.0)
    }

    /// Point on the central axis at height `z`.
    pub const fn on_axis(z: f64) -> Self {
        Point3::new(0.0, 0.0, z)
    }

    /// (R, φ, Z) → (x, y, z).
    pub fn from_cylindrical(r: f64, phi: f64, z: f64) -> Self {
        Point3::new(r * phi.cos(), r * phi.sin(), z)
    }

    /// Squared distance from the Z axis.
    pub fn radius_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance from the Z axis.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Regular 3D lattice of sample points.
///
/// X and Y span `[-half_width, half_width]`, Z spans `[z_min, z_max]`,
/// all endpoints included (linspace convention).
#[derive(Debug, Clone)]
pub struct SampleLattice {
    pub nxy: usize,
    pub nz: usize,
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
    pub dxy: f64,
    pub dz: f64,
}

impl SampleLattice {
    pub fn new(nxy: usize, nz: usize, half_width: f64, z_min: f64, z_max: f64) -> Self {
        let x = Array1::linspace(-half_width, half_width, nxy);
        let y = x.clone();
        let z = Array1::linspace(z_min, z_max, nz);
        let dxy = if nxy > 1 { x[1] - x[0] } else { 2.0 * half_width };
        let dz = if nz > 1 { z[1] - z[0] } else { z_max - z_min };

        SampleLattice {
            nxy,
            nz,
            x,
            y,
            z,
            dxy,
            dz,
        }
    }

    /// Total number of lattice points.
    pub fn len(&self) -> usize {
        self.nxy * self.nxy * self.nz
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate points in z-major, then y, then x order.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.z.iter().flat_map(move |&z| {
            self.y
                .iter()
                .flat_map(move |&y| self.x.iter().map(move |&x| Point3::new(x, y, z)))
        })
    }
}
