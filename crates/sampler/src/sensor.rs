//! Sensor Collaborators

use crate::conversion;
use crate::SamplerError;
use std::collections::VecDeque;

/// Source of unit-converted samples, read once per tick
pub trait Sensor {
    /// Sensor name for logs
    fn name(&self) -> &str;

    /// Read the current value
    fn read(&mut self) -> Result<f64, SamplerError>;
}

/// Source of raw ADC counts
pub trait AdcSource {
    fn sample(&mut self) -> Result<u16, SamplerError>;
}

/// Sensor converting raw ADC counts to physical units
pub struct AdcSensor<S> {
    name: String,
    source: S,
    convert: fn(u16) -> f64,
}

impl<S: AdcSource> AdcSensor<S> {
    /// Create a sensor with an explicit conversion
    pub fn new(name: &str, source: S, convert: fn(u16) -> f64) -> Self {
        Self {
            name: name.to_string(),
            source,
            convert,
        }
    }

    /// Photosynthetic light sensor in lux
    pub fn light(source: S) -> Self {
        Self::new("light", source, conversion::light_lux)
    }

    /// SHT11 temperature sensor in °C
    pub fn temperature(source: S) -> Self {
        Self::new("temperature", source, conversion::temperature_celsius)
    }
}

impl<S: AdcSource> Sensor for AdcSensor<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<f64, SamplerError> {
        let raw = self.source.sample()?;
        Ok((self.convert)(raw))
    }
}

/// Deterministic ADC generator cycling through calm, moderate and volatile phases
#[derive(Debug, Clone)]
pub struct SyntheticAdc {
    tick: u64,
    baseline: f64,
    /// Swing amplitude (counts) for each phase
    amplitudes: [f64; 3],
    /// Ticks spent in each phase
    phase_len: u64,
}

impl SyntheticAdc {
    /// Offsets of a four-step sawtooth, zero-mean
    const PATTERN: [f64; 4] = [-1.5, -0.5, 0.5, 1.5];
    const MAX_COUNT: f64 = 4095.0;

    pub fn new(baseline: u16, amplitudes: [u16; 3], phase_len: u64) -> Self {
        Self {
            tick: 0,
            baseline: f64::from(baseline),
            amplitudes: amplitudes.map(f64::from),
            phase_len: phase_len.max(1),
        }
    }

    /// Counts whose lux deviation lands in each activity tier in turn
    pub fn light() -> Self {
        Self::new(2000, [20, 800, 1300], 24)
    }

    /// Room temperature with a small swing (~22 °C)
    pub fn temperature() -> Self {
        Self::new(1540, [3, 8, 15], 24)
    }
}

impl AdcSource for SyntheticAdc {
    fn sample(&mut self) -> Result<u16, SamplerError> {
        let phase = ((self.tick / self.phase_len) % 3) as usize;
        let offset = Self::PATTERN[(self.tick % 4) as usize] * self.amplitudes[phase];
        self.tick += 1;

        let count = (self.baseline + offset).round().clamp(0.0, Self::MAX_COUNT);
        Ok(count as u16)
    }
}

/// Replays a fixed sequence of values, failing once exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    name: String,
    values: VecDeque<f64>,
}

impl ScriptedSensor {
    pub fn new(name: &str, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.to_string(),
            values: values.into_iter().collect(),
        }
    }

    /// Values not yet read
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Sensor for ScriptedSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<f64, SamplerError> {
        self.values.pop_front().ok_or_else(|| SamplerError::Sensor {
            sensor: self.name.clone(),
            reason: "script exhausted".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use window_stats::{standard_deviation, ActivityThresholds, ActivityTier};

    fn phase_deviation(adc: &SyntheticAdc, phase: usize) -> f64 {
        let mut sensor = AdcSensor::light(adc.clone());
        let skip = phase * 24;
        for _ in 0..skip {
            sensor.read().unwrap();
        }
        let values: Vec<f64> = (0..12).map(|_| sensor.read().unwrap()).collect();
        standard_deviation(&values)
    }

    #[test]
    fn test_synthetic_light_walks_through_tiers() {
        let adc = SyntheticAdc::light();
        let thresholds = ActivityThresholds::default();

        assert_eq!(thresholds.classify(phase_deviation(&adc, 0)), ActivityTier::Low);
        assert_eq!(thresholds.classify(phase_deviation(&adc, 1)), ActivityTier::Medium);
        assert_eq!(thresholds.classify(phase_deviation(&adc, 2)), ActivityTier::High);
    }

    #[test]
    fn test_synthetic_counts_stay_in_range() {
        let mut adc = SyntheticAdc::new(4000, [500, 500, 500], 4);
        for _ in 0..32 {
            assert!(adc.sample().unwrap() <= 4095);
        }
    }

    #[test]
    fn test_temperature_sensor_converts() {
        let mut sensor = AdcSensor::temperature(SyntheticAdc::new(1540, [0, 0, 0], 1));
        assert_eq!(sensor.name(), "temperature");
        assert!((sensor.read().unwrap() - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_scripted_sensor_exhausts() {
        let mut sensor = ScriptedSensor::new("light", [1.0, 2.0]);
        assert_eq!(sensor.read().unwrap(), 1.0);
        assert_eq!(sensor.remaining(), 1);
        assert_eq!(sensor.read().unwrap(), 2.0);
        assert!(matches!(sensor.read(), Err(SamplerError::Sensor { .. })));
    }
}
