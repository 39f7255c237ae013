//! Thermal parameters: physical inputs, non-dimensionalization, and the
//! derived coefficients the heat solver steps with.

use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::Flux;

/// Immutable bundle of physical constants and non-dimensional step sizes
/// for the heat solver.
///
/// Constructed once per simulation from physical (SI) inputs; every
/// downstream field is either copied verbatim or derived at construction
/// time, so the solver never re-derives anything per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermalParams {
    /// Bond albedo, dimensionless in `[0, 1]`.
    pub a_bond: f64,
    /// Thermal (re-radiation) albedo, dimensionless in `[0, 1]`.
    pub a_th: f64,
    /// Thermal conductivity, W m^-1 K^-1.
    pub k: f64,
    /// Bulk density, kg m^-3.
    pub rho: f64,
    /// Specific heat capacity, J kg^-1 K^-1.
    pub cp: f64,
    /// Surface emissivity, dimensionless in `[0, 1]`.
    pub emissivity: f64,
    /// Rotation period, s.
    pub period: f64,
    /// Diurnal skin depth, m: `sqrt(4*pi*period*k / (rho*cp))`.
    pub skin_depth: f64,
    /// Thermal inertia, J m^-2 K^-1 s^-1/2: `sqrt(k*rho*cp)`.
    pub thermal_inertia: f64,
    /// Time step, non-dimensional (fraction of `period`).
    pub dt: f64,
    /// Start time, non-dimensional (fraction of `period`).
    pub t_begin: f64,
    /// End time, non-dimensional (fraction of `period`).
    pub t_end: f64,
    /// Number of time steps spanning `[t_begin, t_end]` at spacing `dt`.
    pub n_steps: usize,
    /// Depth step, non-dimensional (fraction of `skin_depth`).
    pub dz: f64,
    /// Maximum depth, non-dimensional (fraction of `skin_depth`).
    pub z_max: f64,
    /// Number of depth nodes spanning `[0, z_max]` at spacing `dz`.
    pub n_depth: usize,
    /// FTCS stability coefficient `(1 / (4*pi)) * (dt / dz^2)`.
    pub lambda: f64,
}

impl ThermalParams {
    /// Derive a `ThermalParams` from physical inputs.
    ///
    /// `dt_phys`, `t_begin_phys`, `t_end_phys` are seconds; `dz_phys` and
    /// `z_max_phys` are meters. Logs a warning (does not fail) if the
    /// resulting `lambda >= 0.5`, since the explicit FTCS scheme used by
    /// [`crate::solver`] is only conditionally stable below that threshold.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a_bond: f64,
        a_th: f64,
        k: f64,
        rho: f64,
        cp: f64,
        emissivity: f64,
        period: f64,
        dt_phys: f64,
        t_begin_phys: f64,
        t_end_phys: f64,
        dz_phys: f64,
        z_max_phys: f64,
    ) -> Self {
        let skin_depth = (4.0 * std::f64::consts::PI * period * k / (rho * cp)).sqrt();
        let thermal_inertia = (k * rho * cp).sqrt();

        let dt = dt_phys / period;
        let t_begin = t_begin_phys / period;
        let t_end = t_end_phys / period;
        let n_steps = (((t_end - t_begin) / dt).round() as i64 + 1).max(1) as usize;

        let dz = dz_phys / skin_depth;
        let z_max = z_max_phys / skin_depth;
        let n_depth = ((z_max / dz).round() as i64 + 1).max(2) as usize;

        let lambda = (1.0 / (4.0 * std::f64::consts::PI)) * (dt / (dz * dz));
        if lambda >= 0.5 {
            warn!(
                "thermal parameters give lambda = {lambda:.4} >= 0.5; the explicit FTCS \
                 surface solver is only conditionally stable below 0.5"
            );
        }

        ThermalParams {
            a_bond,
            a_th,
            k,
            rho,
            cp,
            emissivity,
            period,
            skin_depth,
            thermal_inertia,
            dt,
            t_begin,
            t_end,
            n_steps,
            dz,
            z_max,
            n_depth,
            lambda,
        }
    }

    /// Net absorbed flux, W/m^2, combining direct sunlight, scattered
    /// sunlight, and re-radiation under the bond and thermal albedos.
    pub fn absorbed_flux(&self, flux: &Flux) -> f64 {
        (1.0 - self.a_bond) * (flux.sun + flux.scat) + (1.0 - self.a_th) * flux.rad
    }
}
