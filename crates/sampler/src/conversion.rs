//! Raw ADC to physical unit conversion for the node's on-board sensors

/// Full-scale count of the 12-bit ADC
pub const ADC_FULL_SCALE: f64 = 4096.0;

/// Photodiode reference voltage (V)
const LIGHT_REFERENCE_V: f64 = 1.5;
/// Photodiode load resistor (Ω)
const LIGHT_LOAD_OHMS: f64 = 100_000.0;

/// Photosynthetic light sensor reading in lux
pub fn light_lux(raw: u16) -> f64 {
    let voltage = LIGHT_REFERENCE_V * f64::from(raw) / ADC_FULL_SCALE;
    let current = voltage / LIGHT_LOAD_OHMS;
    0.625 * 1e6 * current * 1000.0
}

/// SHT11 temperature reading in degrees Celsius
pub fn temperature_celsius(raw: u16) -> f64 {
    0.04 * f64::from(raw) - 39.6
}
