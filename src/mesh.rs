//! The surface mesh: one [`Facet`] per triangle of the shape.

use crate::geom::{self, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absorbed flux bundle for one facet, W/m^2, owned by the external flux
/// collaborator and only ever read by the thermal solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flux {
    /// Direct solar flux.
    pub sun: f64,
    /// Singly- and multiply-scattered sunlight from other facets.
    pub scat: f64,
    /// Thermal re-radiation received from other facets.
    pub rad: f64,
}

/// One facet visible from another, with its Lambertian view factor and the
/// unit direction from the observer's center to this facet's center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisibleFace {
    /// Index of the visible facet in the owning [`Shape`](crate::shape::Shape)'s facet array.
    pub id: usize,
    /// Lambertian point-to-area view factor.
    pub f: f64,
    /// Unit vector from the observer's center to this facet's center.
    pub d_hat: Vec3,
}

/// One triangular facet of the polyhedral shape.
///
/// Vertex positions and the derived geometric quantities (center, normal,
/// area) are fixed at construction. `visible_faces`, `flux`, and `tz` are
/// mutated in place by the visibility pass, the external flux collaborator,
/// and the thermal solver respectively.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// First triangle vertex.
    pub a: Vec3,
    /// Second triangle vertex.
    pub b: Vec3,
    /// Third triangle vertex.
    pub c: Vec3,
    center: Vec3,
    normal: Vec3,
    area: f64,
    /// Other facets visible from this one (on the outward half-space,
    /// front-facing, not occluded).
    pub visible_faces: Vec<VisibleFace>,
    /// Current absorbed flux bundle.
    pub flux: Flux,
    /// Depth-resolved temperature column, Kelvin, length `n_depth`.
    pub tz: Vec<f64>,
    /// Photon-recoil accumulator; not used by the core.
    pub df: Option<Vec3>,
}

impl Facet {
    /// Build a facet from three vertex positions, caching center, normal,
    /// and area. `visible_faces` starts empty, `flux` starts zeroed, and
    /// `tz` starts empty until [`Facet::seed_tz`] sizes it.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Facet {
            a,
            b,
            c,
            center: geom::triangle_center(a, b, c),
            normal: geom::triangle_normal(a, b, c),
            area: geom::triangle_area(a, b, c),
            visible_faces: Vec::new(),
            flux: Flux::default(),
            tz: Vec::new(),
            df: None,
        }
    }

    /// Centroid `(a + b + c) / 3`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Outward unit normal `normalize((b - a) x (c - b))`.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Triangle area, `|(b - a) x (c - b)| / 2`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Size and seed the temperature column to a uniform initial temperature.
    pub fn seed_tz(&mut self, n_depth: usize, t0: f64) {
        self.tz = vec![t0; n_depth];
    }

    /// True iff this facet's local horizon is empty -- no other facet is
    /// visible from it.
    pub fn is_above_horizon(&self) -> bool {
        self.visible_faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn construction_caches_geometry() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        let f = Facet::new(a, b, c);

        assert_relative_eq!(f.area(), 0.5, max_relative = 1e-12);
        assert_relative_eq!(f.center().x, 1.0 / 3.0, max_relative = 1e-12);
        assert!(f.is_above_horizon());
        assert_eq!(f.flux, Flux::default());
        assert!(f.tz.is_empty());
    }

    #[test]
    fn seed_tz_fills_uniform_column() {
        let mut f = Facet::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        f.seed_tz(5, 200.0);
        assert_eq!(f.tz.len(), 5);
        assert!(f.tz.iter().all(|&t| t == 200.0));
    }
}
