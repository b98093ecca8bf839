//! Power unit conversions
//!
//! Signals store linear power in mW; configuration is written in dBm.

/// Boltzmann constant in J/K
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Reference temperature for thermal noise in K
pub const T0_KELVIN: f64 = 290.0;

/// dBm to milliwatts.
#[inline]
pub fn dbm_to_mw(dbm: f64) -> f64 {
    10.0_f64.powf(dbm / 10.0)
}

/// Milliwatts to dBm. Zero power maps to negative infinity.
#[inline]
pub fn mw_to_dbm(mw: f64) -> f64 {
    10.0 * mw.log10()
}

/// Power ratio in dB to linear.
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Linear power ratio to dB.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// Thermal noise power kTB in mW for the given bandwidth.
pub fn thermal_noise_mw(bandwidth_hz: f64) -> f64 {
    BOLTZMANN * T0_KELVIN * bandwidth_hz * 1e3
}
