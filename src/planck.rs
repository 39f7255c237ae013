//! Blackbody spectral radiance and wavelength/frequency conversions.
//!
//! Not used by the conduction core itself -- provided for instruments and
//! drivers that want to relate a facet's temperature to a spectral band.

use crate::constants::{BOLTZMANN_K, PLANCK_H, SPEED_OF_LIGHT};

/// Planck spectral radiance, W m^-2 sr^-1 m^-1, at wavelength `lambda`
/// (meters) and `temperature` (Kelvin).
pub fn planck_intensity(lambda: f64, temperature: f64) -> f64 {
    let numerator = 2.0 * PLANCK_H * SPEED_OF_LIGHT.powi(2);
    let exponent = PLANCK_H * SPEED_OF_LIGHT / (lambda * BOLTZMANN_K * temperature);
    if exponent > 100.0 {
        return 0.0;
    }
    numerator / lambda.powi(5) / (exponent.exp() - 1.0)
}

/// Convert a frequency (Hz) to the corresponding wavelength (m).
pub fn nu_to_lambda(nu: f64) -> f64 {
    SPEED_OF_LIGHT / nu
}

/// Convert a wavelength (m) to the corresponding frequency (Hz).
pub fn lambda_to_nu(lambda: f64) -> f64 {
    SPEED_OF_LIGHT / lambda
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_is_exact_to_floating_point() {
        let lambda = 5.5e-7;
        let round_tripped = nu_to_lambda(lambda_to_nu(lambda));
        assert_relative_eq!(round_tripped, lambda, max_relative = 1e-15);
    }

    #[test]
    fn intensity_is_positive_and_finite_for_visible_light_at_solar_temperature() {
        let i = planck_intensity(5.5e-7, 5778.0);
        assert!(i.is_finite());
        assert!(i > 0.0);
    }

    #[test]
    fn intensity_peaks_move_to_shorter_wavelengths_as_temperature_rises() {
        // Wien's law, qualitatively: the curve at a fixed short wavelength
        // should rise as the star gets hotter, well below its own peak.
        let lambda = 2.0e-7;
        let cool = planck_intensity(lambda, 3000.0);
        let hot = planck_intensity(lambda, 10000.0);
        assert!(hot > cool);
    }
}
