//! Mutual visibility and Lambertian view factors between facets.
//!
//! Three passes per observer facet:
//!
//! - **Step A, candidates.** Keep `tar` iff `obs`'s center sits on the
//!   outward side of `tar`'s plane and `tar`'s center in turn sits in front
//!   of `obs`. Cheap O(n) filter per observer.
//! - **Step B, occlusion.** For every ordered pair of candidates, cast a ray
//!   from `obs`'s center toward the nearer one; a hit on the farther
//!   candidate's triangle marks it occluded. Removals are recorded in a
//!   side buffer and applied after the full pairwise sweep, rather than
//!   mutating the candidate set mid-iteration.
//! - **Step C, view factors.** Each surviving candidate gets the Lambertian
//!   point-to-area factor `cos(obs) * cos(tar) / (pi * d^2) * area(tar)` and
//!   the unit direction from `obs`'s center to its own.

use crate::geom::{self, Vec3};
use crate::mesh::{Facet, VisibleFace};

/// Populate `facets[i].visible_faces` for every facet, in place.
///
/// O(n^2) candidate gathering followed by O(n^3) worst-case occlusion
/// testing; expected to dominate the cost of building a [`Shape`](crate::shape::Shape)
/// for any mesh of practical size.
pub fn find_visible_faces(facets: &mut [Facet]) {
    let n = facets.len();
    let mut per_facet_visible: Vec<Vec<VisibleFace>> = vec![Vec::new(); n];

    for obs_id in 0..n {
        let obs_center = facets[obs_id].center();
        let obs_normal = facets[obs_id].normal();

        // Step A: candidate set.
        let candidates: Vec<usize> = (0..n)
            .filter(|&tar_id| {
                if tar_id == obs_id {
                    return false;
                }
                let (a, b, c) = (facets[tar_id].a, facets[tar_id].b, facets[tar_id].c);
                geom::is_above(a, b, c, obs_center)
                    && geom::is_face(obs_center, facets[tar_id].center(), facets[tar_id].normal())
            })
            .collect();

        // Step B: two-pass occlusion pruning.
        let mut removed = vec![false; candidates.len()];
        for (ci, &i) in candidates.iter().enumerate() {
            for (cj, &j) in candidates.iter().enumerate() {
                if i == j {
                    continue;
                }
                let ray_dir = facets[i].center() - obs_center;
                let (a, b, c) = (facets[j].a, facets[j].b, facets[j].c);
                if let Some(t) = geom::raycast(a, b, c, obs_center, ray_dir) {
                    if t < 1.0 - geom::EPSILON {
                        // j lies strictly between obs and i: i is occluded.
                        removed[ci] = true;
                    } else if (t - 1.0).abs() <= geom::EPSILON {
                        // j sits at i's own distance: not a genuine occluder.
                    } else {
                        removed[cj] = true;
                    }
                }
            }
        }

        // Step C: view factors for survivors.
        for (ci, &tar_id) in candidates.iter().enumerate() {
            if removed[ci] {
                continue;
            }
            let tar_center = facets[tar_id].center();
            let tar_normal = facets[tar_id].normal();

            let d = tar_center - obs_center;
            let distance_sq = d.length_squared();
            if distance_sq < geom::EPSILON {
                continue;
            }
            let distance = distance_sq.sqrt();
            let d_hat = d / distance;

            let cos_obs = obs_normal.dot(d_hat);
            let cos_tar = tar_normal.dot(-d_hat);
            if cos_obs <= 0.0 || cos_tar <= 0.0 {
                continue;
            }

            let f = cos_obs * cos_tar / (std::f64::consts::PI * distance_sq)
                * facets[tar_id].area();

            per_facet_visible[obs_id].push(VisibleFace {
                id: tar_id,
                f,
                d_hat,
            });
        }
    }

    for (facet, visible) in facets.iter_mut().zip(per_facet_visible.into_iter()) {
        facet.visible_faces = visible;
    }
}

/// True iff `obs` faces the sun and no facet already known to be visible
/// from `obs` blocks the ray toward it.
///
/// The sun sits effectively at infinity, so only a facet already on `obs`'s
/// own horizon (`obs.visible_faces`) can possibly cast a shadow across it;
/// there is no need to test against the full facet array.
pub fn is_illuminated(obs_id: usize, sun_dir: Vec3, facets: &[Facet]) -> bool {
    let obs = &facets[obs_id];
    if obs.normal().dot(sun_dir) < 0.0 {
        return false;
    }
    let obs_center = obs.center();
    !obs.visible_faces.iter().any(|visible| {
        let blocker = &facets[visible.id];
        matches!(
            geom::raycast(blocker.a, blocker.b, blocker.c, obs_center, sun_dir),
            Some(_)
        )
    })
}
