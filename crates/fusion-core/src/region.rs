// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Region Algebra
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Signed half-spaces and their intersections.
//!
//! Membership is half-open: the negative side is `f(p) < 0`, the positive
//! side is `f(p) >= 0`. Two regions separated by a shared surface therefore
//! never both claim a point lying exactly on it.

use std::f64::consts::PI;
use std::fmt;

use fusion_types::grid::Point3;
use serde::{Deserialize, Serialize};

use crate::surface::{SurfaceId, SurfaceKind, SurfaceStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Inside a cylinder, below a plane.
    Negative,
    /// Outside a cylinder, on or above a plane.
    Positive,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::Negative => Side::Positive,
            Side::Positive => Side::Negative,
        }
    }

    /// Does a surface-function value fall on this side?
    pub fn contains(self, value: f64) -> bool {
        match self {
            Side::Negative => value < 0.0,
            Side::Positive => value >= 0.0,
        }
    }
}

/// One side of one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfSpace {
    pub surface: SurfaceId,
    pub side: Side,
}

impl HalfSpace {
    pub const fn new(surface: SurfaceId, side: Side) -> Self {
        HalfSpace { surface, side }
    }

    pub const fn inside(surface: SurfaceId) -> Self {
        HalfSpace::new(surface, Side::Negative)
    }

    pub const fn outside(surface: SurfaceId) -> Self {
        HalfSpace::new(surface, Side::Positive)
    }

    pub const fn below(surface: SurfaceId) -> Self {
        HalfSpace::new(surface, Side::Negative)
    }

    pub const fn above(surface: SurfaceId) -> Self {
        HalfSpace::new(surface, Side::Positive)
    }

    /// The complementary half-space of the same surface.
    pub fn flipped(self) -> Self {
        HalfSpace::new(self.surface, self.side.flip())
    }

    pub fn contains(&self, stack: &SurfaceStack, p: &Point3) -> bool {
        self.side.contains(stack.get(self.surface).evaluate(p))
    }
}

impl fmt::Display for HalfSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.side {
            Side::Negative => '-',
            Side::Positive => '+',
        };
        write!(f, "{sign}{}", self.surface.as_str())
    }
}

/// Conjunction of half-spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    halfspaces: Vec<HalfSpace>,
}

impl Region {
    pub fn intersection<I>(halfspaces: I) -> Self
    where
        I: IntoIterator<Item = HalfSpace>,
    {
        Region {
            halfspaces: halfspaces.into_iter().collect(),
        }
    }

    /// Restrict the region by one more half-space.
    pub fn and(mut self, halfspace: HalfSpace) -> Self {
        self.halfspaces.push(halfspace);
        self
    }

    pub fn halfspaces(&self) -> &[HalfSpace] {
        &self.halfspaces
    }

    /// Surfaces referenced by this region, in declaration order.
    pub fn surfaces(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.halfspaces.iter().map(|h| h.surface)
    }

    pub fn contains(&self, stack: &SurfaceStack, p: &Point3) -> bool {
        self.halfspaces.iter().all(|h| h.contains(stack, p))
    }

    /// Annular (r, z) extent of the region.
    ///
    /// Every region here is an intersection of coaxial cylinders and
    /// horizontal planes, so its extent is exactly an annulus in r times an
    /// interval in z.
    pub fn bounds(&self, stack: &SurfaceStack) -> RegionBounds {
        let mut b = RegionBounds {
            r_min: 0.0,
            r_max: f64::INFINITY,
            z_min: f64::NEG_INFINITY,
            z_max: f64::INFINITY,
        };
        for h in &self.halfspaces {
            match (stack.get(h.surface).kind, h.side) {
                (SurfaceKind::Cylinder { radius }, Side::Negative) => b.r_max = b.r_max.min(radius),
                (SurfaceKind::Cylinder { radius }, Side::Positive) => b.r_min = b.r_min.max(radius),
                (SurfaceKind::Plane { height }, Side::Negative) => b.z_max = b.z_max.min(height),
                (SurfaceKind::Plane { height }, Side::Positive) => b.z_min = b.z_min.max(height),
            }
        }
        b
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, h) in self.halfspaces.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{h}")?;
        }
        Ok(())
    }
}

/// Half-open annular box `r_min <= r < r_max`, `z_min <= z < z_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub r_min: f64,
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl RegionBounds {
    pub fn is_empty(&self) -> bool {
        self.r_min >= self.r_max || self.z_min >= self.z_max
    }

    pub fn is_bounded(&self) -> bool {
        self.r_max.is_finite() && self.z_min.is_finite() && self.z_max.is_finite()
    }

    /// Exact volume [cm³]; infinite for unbounded, zero for empty regions.
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        if !self.is_bounded() {
            return f64::INFINITY;
        }
        PI * (self.r_max * self.r_max - self.r_min * self.r_min) * (self.z_max - self.z_min)
    }

    /// Centroid of a solid of revolution about Z: on the axis at mid-height.
    pub fn centroid(&self) -> Point3 {
        Point3::on_axis(0.5 * (self.z_min + self.z_max))
    }

    pub fn height(&self) -> f64 {
        self.z_max - self.z_min
    }
}
