use aeon_core::{AeonError, Result, T_CMB_TODAY, T_NOW};
use serde::{Deserialize, Serialize};

/// Toy expansion history: scale factor a(t) normalised to 1 at the present age.
///
/// The raw curve mixes a t^(1/2) radiation-like term, a t^(2/3) matter-like
/// term and an exponential late-time acceleration term. Its coefficients are
/// chosen for a plausible-looking plot, not fitted to data.
///
/// The normalisation constant is computed once here; the value is `Copy` and
/// passed by reference to every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactorModel {
    t_now: f64,
    a_raw_now: f64,
}

impl ScaleFactorModel {
    /// Model normalised at today (13.8 Gyr)
    pub fn new() -> Self {
        Self {
            t_now: T_NOW,
            a_raw_now: a_raw(T_NOW),
        }
    }

    /// Model normalised at another epoch
    pub fn with_present_age(t_now: f64) -> Result<Self> {
        if !(t_now.is_finite() && t_now > 0.0) {
            return Err(AeonError::configuration(format!(
                "present age must be finite and positive, got {t_now}"
            )));
        }
        Ok(Self {
            t_now,
            a_raw_now: a_raw(t_now),
        })
    }

    /// Age at which a(t) == 1
    pub fn t_now(&self) -> f64 {
        self.t_now
    }

    /// Unnormalised scale factor
    pub fn raw(&self, age_gyr: f64) -> f64 {
        a_raw(age_gyr)
    }

    /// Normalised scale factor a(t); negative ages are treated as the Big Bang
    pub fn a_of_t(&self, age_gyr: f64) -> f64 {
        a_raw(age_gyr) / self.a_raw_now
    }

    /// Redshift of light emitted at `age_gyr`
    pub fn redshift_at(&self, age_gyr: f64) -> Result<f64> {
        z_of_a(self.a_of_t(age_gyr))
    }

    /// Radiation temperature at `age_gyr` (Kelvin)
    pub fn temperature_at(&self, age_gyr: f64) -> Result<f64> {
        temperature_of_a(self.a_of_t(age_gyr))
    }
}

impl Default for ScaleFactorModel {
    fn default() -> Self {
        Self::new()
    }
}

fn a_raw(age_gyr: f64) -> f64 {
    let t = age_gyr.max(0.0);
    1e-5 * (t.powf(0.5) + 0.01 * t.powf(2.0 / 3.0) + 1e-4 * (0.09 * t).exp())
}

fn check_scale_factor(a: f64) -> Result<()> {
    if a.is_nan() || a <= 0.0 {
        return Err(AeonError::domain(format!(
            "scale factor must be positive, got {a}"
        )));
    }
    Ok(())
}

/// Redshift z = 1/a - 1
pub fn z_of_a(a: f64) -> Result<f64> {
    check_scale_factor(a)?;
    Ok(1.0 / a - 1.0)
}

/// Radiation temperature T = T_cmb / a (Kelvin)
pub fn temperature_of_a(a: f64) -> Result<f64> {
    check_scale_factor(a)?;
    Ok(T_CMB_TODAY / a)
}
