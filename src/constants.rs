//! Physical constants used by the radiative and thermal model, SI units throughout.

/// Stefan-Boltzmann constant, W m^-2 K^-4.
pub const SIGMA_SB: f64 = 5.670374419e-8;

/// Planck constant, J*s.
pub const PLANCK_H: f64 = 6.626_070_15e-34;

/// Boltzmann constant, J/K.
pub const BOLTZMANN_K: f64 = 1.380649e-23;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
