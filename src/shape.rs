//! The polyhedral [`Shape`]: node/face arrays, facets, and bulk scalars.

use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::geom::Vec3;
use crate::mesh::Facet;
use crate::solver;
use crate::thermal::ThermalParams;
use crate::visibility;

/// A symmetric 3x3 tensor, used for the shape's moment-of-inertia tensor.
///
/// Stored as the six independent components rather than all nine, since the
/// tensor is always symmetric by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertia {
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

impl Index<(usize, usize)> for Inertia {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        match (i.min(j), i.max(j)) {
            (0, 0) => &self.xx,
            (1, 1) => &self.yy,
            (2, 2) => &self.zz,
            (0, 1) => &self.xy,
            (0, 2) => &self.xz,
            (1, 2) => &self.yz,
            _ => panic!("inertia tensor index out of range: ({i}, {j})"),
        }
    }
}

/// Options controlling [`Shape::build`].
#[derive(Debug, Clone, Copy)]
pub struct ShapeOptions {
    /// Whether to run the O(N^2)-O(N^3) visibility pass at construction time.
    pub find_visible_faces: bool,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            find_visible_faces: true,
        }
    }
}

/// The polyhedral shape: nodes, indexed faces, derived facets, and bulk
/// scalars (area, volume, center-of-figure, inertia tensor).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    /// Vertex positions, length `num_node`.
    pub nodes: Vec<Vec3>,
    /// Triangle vertex-index triples, length `num_face`.
    pub faces: Vec<(u32, u32, u32)>,
    /// Per-triangle facet records, same length and order as `faces`.
    pub facets: Vec<Facet>,
    /// Total surface area, m^2.
    pub area: f64,
    /// Enclosed volume, m^3 (signed tetrahedron sum; correct for a closed,
    /// consistently-wound surface regardless of whether the origin lies
    /// inside or outside it).
    pub volume: f64,
    /// Center of figure (volume centroid).
    pub cof: Vec3,
    /// Moment-of-inertia tensor about the coordinate origin, assuming unit
    /// density. Apply the parallel-axis theorem against `cof` for the
    /// central tensor.
    pub inertia: Inertia,
    /// Scratch temperature column reused across facets by [`Shape::step_thermal`],
    /// resized to `n_depth` on first use. Not meaningful between calls.
    #[cfg_attr(feature = "serde", serde(skip))]
    tz_next: Vec<f64>,
}

impl Shape {
    /// Build a shape from raw node and face arrays.
    ///
    /// Validates that `nodes` and `faces` are non-empty and that every face
    /// index is in bounds, then materializes the facet array, optionally
    /// runs the visibility pass, and computes `area`, `volume`, `cof`, and
    /// `inertia`.
    pub fn build(
        nodes: Vec<Vec3>,
        faces: Vec<(u32, u32, u32)>,
        options: ShapeOptions,
    ) -> Result<Shape, ShapeError> {
        if nodes.is_empty() {
            return Err(ShapeError::EmptyNodes);
        }
        if faces.is_empty() {
            return Err(ShapeError::EmptyFaces);
        }
        for (face_idx, &(i, j, k)) in faces.iter().enumerate() {
            for index in [i, j, k] {
                if index as usize >= nodes.len() {
                    return Err(ShapeError::NodeIndexOutOfRange {
                        face: face_idx,
                        index,
                        num_node: nodes.len(),
                    });
                }
            }
        }

        let mut facets: Vec<Facet> = faces
            .iter()
            .map(|&(i, j, k)| {
                Facet::new(
                    nodes[i as usize],
                    nodes[j as usize],
                    nodes[k as usize],
                )
            })
            .collect();

        if options.find_visible_faces {
            visibility::find_visible_faces(&mut facets);
        }

        let area: f64 = facets.iter().map(Facet::area).sum();

        let mut volume = 0.0;
        let mut cof_accum = Vec3::ZERO;
        let mut inertia = Inertia::default();
        for facet in &facets {
            let (a, b, c) = (facet.a, facet.b, facet.c);
            let v = a.cross(b).dot(c) / 6.0;
            let tet_centroid = (a + b + c) / 4.0;
            volume += v;
            cof_accum += v * tet_centroid;
            accumulate_tetrahedron_inertia(&mut inertia, v, a, b, c);
        }
        let cof = if volume.abs() > f64::EPSILON {
            cof_accum / volume
        } else {
            Vec3::ZERO
        };

        Ok(Shape {
            nodes,
            faces,
            facets,
            area,
            volume,
            cof,
            inertia,
            tz_next: Vec::new(),
        })
    }

    /// Number of nodes.
    pub fn num_node(&self) -> usize {
        self.nodes.len()
    }

    /// Number of faces (== number of facets).
    pub fn num_face(&self) -> usize {
        self.faces.len()
    }

    /// Seed every facet's temperature column to a uniform initial
    /// temperature, sized to `n_depth`.
    pub fn seed_all_tz(&mut self, n_depth: usize, t0: f64) {
        for facet in &mut self.facets {
            facet.seed_tz(n_depth, t0);
        }
    }

    /// Advance every facet's temperature column by one non-dimensional time
    /// step, reusing the shape's own scratch column across facets.
    ///
    /// Each facet's absorbed flux is derived from its current `flux` bundle
    /// via [`ThermalParams::absorbed_flux`]; the caller is responsible for
    /// having refreshed those fluxes since the previous step.
    pub fn step_thermal(&mut self, params: &ThermalParams) {
        for facet in &mut self.facets {
            let flux = params.absorbed_flux(&facet.flux);
            solver::step(facet, &mut self.tz_next, params, flux);
        }
    }
}

/// Accumulate the second-moment contribution of the origin-apex tetrahedron
/// `(0, a, b, c)` (signed volume `v`) into `inertia`'s running total.
///
/// Uses the standard closed-form polyhedral second-moment integral for a
/// tetrahedron (Tonon 2005; Eberly, "Polyhedral Mass Properties"), then
/// converts second moments `M` to the inertia tensor via
/// `I = trace(M) * Id - M`. See SPEC_FULL.md section 4.3 for the derivation.
fn accumulate_tetrahedron_inertia(inertia: &mut Inertia, v: f64, a: Vec3, b: Vec3, c: Vec3) {
    let mxx = v / 10.0
        * (a.x * a.x + b.x * b.x + c.x * c.x + a.x * b.x + a.x * c.x + b.x * c.x);
    let myy = v / 10.0
        * (a.y * a.y + b.y * b.y + c.y * c.y + a.y * b.y + a.y * c.y + b.y * c.y);
    let mzz = v / 10.0
        * (a.z * a.z + b.z * b.z + c.z * c.z + a.z * b.z + a.z * c.z + b.z * c.z);
    let mxy = v / 20.0
        * (2.0 * a.x * a.y + 2.0 * b.x * b.y + 2.0 * c.x * c.y
            + a.x * b.y + a.y * b.x
            + a.x * c.y + a.y * c.x
            + b.x * c.y + b.y * c.x);
    let mxz = v / 20.0
        * (2.0 * a.x * a.z + 2.0 * b.x * b.z + 2.0 * c.x * c.z
            + a.x * b.z + a.z * b.x
            + a.x * c.z + a.z * c.x
            + b.x * c.z + b.z * c.x);
    let myz = v / 20.0
        * (2.0 * a.y * a.z + 2.0 * b.y * b.z + 2.0 * c.y * c.z
            + a.y * b.z + a.z * b.y
            + a.y * c.z + a.z * c.y
            + b.y * c.z + b.z * c.y);

    inertia.xx += myy + mzz;
    inertia.yy += mxx + mzz;
    inertia.zz += mxx + myy;
    inertia.xy += -mxy;
    inertia.xz += -mxz;
    inertia.yz += -myz;
}

/// Reference unit cube (side 1, spanning `[0, 1]^3`) with consistent outward
/// winding, decomposed into 12 triangles (two per face). Used by tests and
/// available to downstream crates for smoke-testing their own pipelines.
pub fn unit_cube() -> (Vec<Vec3>, Vec<(u32, u32, u32)>) {
    let nodes = vec![
        Vec3::new(0.0, 0.0, 0.0), // 0
        Vec3::new(1.0, 0.0, 0.0), // 1
        Vec3::new(1.0, 1.0, 0.0), // 2
        Vec3::new(0.0, 1.0, 0.0), // 3
        Vec3::new(0.0, 0.0, 1.0), // 4
        Vec3::new(1.0, 0.0, 1.0), // 5
        Vec3::new(1.0, 1.0, 1.0), // 6
        Vec3::new(0.0, 1.0, 1.0), // 7
    ];
    let faces = vec![
        // -z (bottom), normal (0,0,-1)
        (0, 3, 2),
        (0, 2, 1),
        // +z (top), normal (0,0,1)
        (4, 5, 6),
        (4, 6, 7),
        // -y, normal (0,-1,0)
        (0, 1, 5),
        (0, 5, 4),
        // +y, normal (0,1,0)
        (3, 7, 6),
        (3, 6, 2),
        // -x, normal (-1,0,0)
        (0, 4, 7),
        (0, 7, 3),
        // +x, normal (1,0,0)
        (1, 2, 6),
        (1, 6, 5),
    ];
    (nodes, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_cube_totals() {
        let (nodes, faces) = unit_cube();
        let shape = Shape::build(nodes, faces, ShapeOptions::default()).unwrap();

        assert_relative_eq!(shape.area, 6.0, max_relative = 1e-9);
        assert_relative_eq!(shape.volume, 1.0, max_relative = 1e-9);
        assert_relative_eq!(shape.cof.x, 0.5, max_relative = 1e-9);
        assert_relative_eq!(shape.cof.y, 0.5, max_relative = 1e-9);
        assert_relative_eq!(shape.cof.z, 0.5, max_relative = 1e-9);
    }

    #[test]
    fn unit_cube_has_no_mutual_visibility() {
        let (nodes, faces) = unit_cube();
        let shape = Shape::build(nodes, faces, ShapeOptions::default()).unwrap();
        for facet in &shape.facets {
            assert!(facet.is_above_horizon());
            assert!(facet.visible_faces.is_empty());
        }
    }

    #[test]
    fn inertia_tensor_is_symmetric_and_diagonal_for_centered_cube() {
        // A cube centered at the origin with side 1 has I_xx = I_yy = I_zz
        // = m/6 for unit density (m = volume = 1), off-diagonal 0.
        let (nodes, faces) = unit_cube();
        let centered: Vec<Vec3> = nodes.iter().map(|n| *n - Vec3::splat(0.5)).collect();
        let shape = Shape::build(centered, faces, ShapeOptions::default()).unwrap();

        assert_relative_eq!(shape.inertia.xx, 1.0 / 6.0, max_relative = 1e-9);
        assert_relative_eq!(shape.inertia.yy, 1.0 / 6.0, max_relative = 1e-9);
        assert_relative_eq!(shape.inertia.zz, 1.0 / 6.0, max_relative = 1e-9);
        assert_relative_eq!(shape.inertia.xy, 0.0, epsilon = 1e-9);
        assert_relative_eq!(shape.inertia.xz, 0.0, epsilon = 1e-9);
        assert_relative_eq!(shape.inertia.yz, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_out_of_range_face_index() {
        let (nodes, mut faces) = unit_cube();
        faces.push((0, 1, 99));
        let err = Shape::build(nodes, faces, ShapeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ShapeError::NodeIndexOutOfRange {
                face: 12,
                index: 99,
                num_node: 8,
            }
        );
    }

    #[test]
    fn rejects_empty_nodes_and_faces() {
        assert_eq!(
            Shape::build(vec![], vec![(0, 0, 0)], ShapeOptions::default()).unwrap_err(),
            ShapeError::EmptyNodes
        );
        let (nodes, _) = unit_cube();
        assert_eq!(
            Shape::build(nodes, vec![], ShapeOptions::default()).unwrap_err(),
            ShapeError::EmptyFaces
        );
    }
}
