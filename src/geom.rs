//! Geometric primitives shared by the shape, visibility, and solver modules.
//!
//! - Triangle center, normal, area.
//! - The `is_above`/`is_below`/`is_face` plane-side predicates used to prune
//!   the visibility candidate set.
//! - Moller-Trumbore ray/triangle intersection.
//! - Vector angle and the solid angle of a triangle from a viewpoint
//!   (L'Huilier's theorem).

/// Double-precision 3-vector. A type alias rather than a hand-rolled struct,
/// since the crate already depends on `glam` for vector algebra.
pub type Vec3 = glam::DVec3;

pub const EPSILON: f64 = 1e-12;

/// Centroid of a triangle.
pub fn triangle_center(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a + b + c) / 3.0
}

/// Outward-pointing unit normal of a triangle, following vertex winding
/// `n_hat = normalize((b - a) x (c - b))`.
///
/// Not flipped to point "outward" by any global check -- outwardness is a
/// property of the winding the caller supplies.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - b).normalize()
}

/// Area of a triangle, `|(b - a) x (c - b)| / 2`.
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    (b - a).cross(c - b).length() / 2.0
}

/// True iff `d` lies on the side of the plane through `a, b, c` that the
/// normal `(b - a) x (c - b)` points toward, i.e. `det[a-d; b-d; c-d] < 0`.
///
/// A point exactly on the plane returns `false` from both `is_above` and
/// `is_below`.
pub fn is_above(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> bool {
    orientation(a, b, c, d) < 0.0
}

/// Strict opposite of [`is_above`]: `det[a-d; b-d; c-d] > 0`.
pub fn is_below(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> bool {
    orientation(a, b, c, d) > 0.0
}

fn orientation(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> f64 {
    (a - d).dot((b - d).cross(c - d))
}

/// True iff `tar_center`'s front side (given its normal `tar_normal`) faces
/// `obs_center`, i.e. `(tar_center - obs_center) . tar_normal < 0`.
pub fn is_face(obs_center: Vec3, tar_center: Vec3, tar_normal: Vec3) -> bool {
    (tar_center - obs_center).dot(tar_normal) < 0.0
}

/// Moller-Trumbore ray/triangle intersection.
///
/// Returns the ray parameter `t` such that the intersection point is
/// `origin + t * dir`, or `None` if the ray misses the triangle, is parallel
/// to its plane, or would hit it behind the origin (`t <= 0`).
///
/// `dir` need not be unit length; `t` is only ever sign-tested or used as a
/// distance proxy via the direction's own magnitude, never compared across
/// rays with different magnitudes.
pub fn raycast(a: Vec3, b: Vec3, c: Vec3, origin: Vec3, dir: Vec3) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let p_vec = dir.cross(e2);
    let det = e1.dot(p_vec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let t_vec = origin - a;
    let u = t_vec.dot(p_vec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q_vec = t_vec.cross(e1);
    let v = dir.dot(q_vec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q_vec) * inv_det;
    if t > 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Angle between two vectors, `acos(normalize(v1) . normalize(v2))`.
///
/// Callers must ensure both inputs are nonzero. The dot product is clamped to
/// `[-1, 1]` first to absorb floating-point overshoot near parallel vectors.
pub fn angle_between(v1: Vec3, v2: Vec3) -> f64 {
    v1.normalize().dot(v2.normalize()).clamp(-1.0, 1.0).acos()
}

/// Solid angle subtended by triangle `a, b, c` as seen from `obs`, via
/// L'Huilier's theorem.
pub fn solid_angle(a: Vec3, b: Vec3, c: Vec3, obs: Vec3) -> f64 {
    let a1 = a - obs;
    let b1 = b - obs;
    let c1 = c - obs;

    let side_a = angle_between(b1, c1);
    let side_b = angle_between(c1, a1);
    let side_c = angle_between(a1, b1);

    let s = (side_a + side_b + side_c) / 2.0;
    let product = (s / 2.0).tan()
        * ((s - side_a) / 2.0).tan()
        * ((s - side_b) / 2.0).tan()
        * ((s - side_c) / 2.0).tan();
    4.0 * product.max(0.0).sqrt().atan()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec() -> impl Strategy<Value = Vec3> {
        (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn raycast_never_produces_nan(
            a in finite_vec(), b in finite_vec(), c in finite_vec(),
            origin in finite_vec(), dir in finite_vec(),
        ) {
            if let Some(t) = raycast(a, b, c, origin, dir) {
                prop_assert!(t.is_finite());
            }
        }
    }
}
