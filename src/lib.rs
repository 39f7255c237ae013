//! # Asterotherm -- thermophysical modeling for small-body nuclei
//!
//! A polyhedral shape-model thermophysical engine for irregularly shaped
//! asteroid and comet nuclei: surface geometry, inter-facet radiative view
//! factors with self-occlusion, and a one-dimensional subsurface heat
//! conduction solver with a nonlinear radiative surface boundary.
//!
//! ## Quick start
//!
//! ```rust
//! use asterotherm::prelude::*;
//! use asterotherm::shape::unit_cube;
//!
//! // Build a shape from an indexed triangular mesh.
//! let (nodes, faces) = unit_cube();
//! let shape = Shape::build(nodes, faces, ShapeOptions::default()).unwrap();
//! assert!((shape.area - 6.0).abs() < 1e-9);
//!
//! // Derive non-dimensional thermal parameters from physical inputs.
//! let params = ThermalParams::new(
//!     0.1, 0.0, 2.0, 1500.0, 800.0, 0.9, 21600.0, 10.0, 0.0, 21600.0, 0.01, 1.0,
//! );
//! ```
//!
//! ## Architecture
//!
//! The crate is organized bottom-up, leaves first:
//!
//! - [`geom`] -- vector/triangle primitives: center, normal, area, orientation
//!   predicates, ray/triangle intersection, solid angle.
//! - [`mesh`] -- the [`Facet`](mesh::Facet) record: geometry, visibility list,
//!   flux bundle, depth-resolved temperature column.
//! - [`shape`] -- the [`Shape`](shape::Shape) aggregate: nodes, faces, facets,
//!   area, volume, center of figure, inertia tensor.
//! - [`visibility`] -- per-facet mutual visibility and Lambertian view factors,
//!   with self-occlusion by raycasting.
//! - [`thermal`] -- [`ThermalParams`](thermal::ThermalParams): physical inputs,
//!   non-dimensionalization, and the FTCS stability coefficient.
//! - [`solver`] -- the one-dimensional explicit heat conduction step, with a
//!   Newton-iterated radiative surface boundary.
//! - [`planck`] -- blackbody spectral radiance, provided for instruments
//!   external to the conduction core.
//! - [`error`] -- structured, non-panicking validation errors from
//!   [`Shape::build`](shape::Shape::build).
//! - [`constants`] -- physical constants in SI units.

pub mod constants;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod planck;
pub mod shape;
pub mod solver;
pub mod thermal;
pub mod visibility;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::error::ShapeError;
    pub use crate::geom::Vec3;
    pub use crate::mesh::{Facet, Flux, VisibleFace};
    pub use crate::shape::{Inertia, Shape, ShapeOptions};
    pub use crate::solver::step as heat_step;
    pub use crate::thermal::ThermalParams;
}
