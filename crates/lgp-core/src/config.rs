//! Configuration types for a world.

use crate::error::{Error, Result};
use crate::types::{MAX_REGISTERS, MIN_PROGRAM_LENGTH_FLOOR};
use serde::{Deserialize, Serialize};

/// Evolution parameters for a single population.
///
/// Built with defaults, adjusted freely by the caller, then checked once when the
/// world is initialized. Nothing can change it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of programs in the population (even, non-zero)
    pub population_size: usize,
    /// Registers each program may read and write
    pub num_registers: usize,
    /// Length of the input vector programs can read
    pub num_inputs: usize,
    /// Shortest allowed program
    pub min_program_length: usize,
    /// Longest allowed program
    pub max_program_length: usize,
    /// Probability of mutating each bred child (0.0 to 1.0)
    pub mutate_rate: f32,
    /// Probability of breeding by crossover rather than cloning (0.0 to 1.0)
    pub crossover_rate: f32,
    /// Fraction of crossovers that use the homologous operator (0.0 to 1.0)
    pub homologous_rate: f32,
    /// Lower fitness is better when set
    pub minimize_fitness: bool,
    /// Strip introns at initialization and every `optimize_interval` steps
    pub auto_optimize: bool,
    /// Steps between whole-population intron passes
    pub optimize_interval: u64,
    /// Random seed for reproducibility; entropy when absent
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            num_registers: 2,
            num_inputs: 0,
            min_program_length: 3,
            max_program_length: 20,
            mutate_rate: 0.15,
            crossover_rate: 0.85,
            homologous_rate: 0.5,
            minimize_fitness: false,
            auto_optimize: true,
            optimize_interval: 300_000,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every configuration contract.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Validation(
                "population_size must be greater than 0".to_string(),
            ));
        }

        if self.population_size % 2 != 0 {
            return Err(Error::Validation(format!(
                "population_size must be an even number, got {}",
                self.population_size
            )));
        }

        if self.num_registers == 0 {
            return Err(Error::Validation(
                "num_registers must be at least 1".to_string(),
            ));
        }

        if self.num_registers > MAX_REGISTERS {
            return Err(Error::Validation(format!(
                "num_registers ({}) is greater than the maximum of {}",
                self.num_registers, MAX_REGISTERS
            )));
        }

        if self.num_inputs > self.num_registers {
            return Err(Error::Validation(format!(
                "num_inputs ({}) cannot be greater than num_registers ({})",
                self.num_inputs, self.num_registers
            )));
        }

        if self.min_program_length < MIN_PROGRAM_LENGTH_FLOOR {
            return Err(Error::Validation(format!(
                "min_program_length must be {} or greater, got {}",
                MIN_PROGRAM_LENGTH_FLOOR, self.min_program_length
            )));
        }

        if self.max_program_length < self.min_program_length {
            return Err(Error::Validation(format!(
                "max_program_length ({}) cannot be less than min_program_length ({})",
                self.max_program_length, self.min_program_length
            )));
        }

        check_rate("mutate_rate", self.mutate_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("homologous_rate", self.homologous_rate)?;

        if self.optimize_interval == 0 {
            return Err(Error::Validation(
                "optimize_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_rate(name: &str, rate: f32) -> Result<()> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(Error::Validation(format!(
            "{} must be within [0, 1], got {}",
            name, rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: WorldConfig, needle: &str) {
        match config.validate() {
            Err(Error::Validation(msg)) => assert!(
                msg.contains(needle),
                "message {:?} does not mention {:?}",
                msg,
                needle
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.population_size, 10_000);
        assert_eq!(config.min_program_length, 3);
        assert_eq!(config.optimize_interval, 300_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_odd_population_rejected() {
        let config = WorldConfig {
            population_size: 11,
            ..Default::default()
        };
        assert_invalid(config, "even");

        let config = WorldConfig {
            population_size: 0,
            ..Default::default()
        };
        assert_invalid(config, "greater than 0");
    }

    #[test]
    fn test_register_limits() {
        let config = WorldConfig {
            num_registers: MAX_REGISTERS + 1,
            ..Default::default()
        };
        assert_invalid(config, "num_registers");

        let config = WorldConfig {
            num_registers: 2,
            num_inputs: 3,
            ..Default::default()
        };
        assert_invalid(config, "num_inputs");
    }

    #[test]
    fn test_length_limits() {
        let config = WorldConfig {
            min_program_length: 2,
            ..Default::default()
        };
        assert_invalid(config, "min_program_length");

        let config = WorldConfig {
            min_program_length: 10,
            max_program_length: 9,
            ..Default::default()
        };
        assert_invalid(config, "max_program_length");

        let config = WorldConfig {
            min_program_length: 3,
            max_program_length: 3,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rates_must_be_probabilities() {
        let config = WorldConfig {
            mutate_rate: 1.5,
            ..Default::default()
        };
        assert_invalid(config, "mutate_rate");

        let config = WorldConfig {
            crossover_rate: -0.1,
            ..Default::default()
        };
        assert_invalid(config, "crossover_rate");

        let config = WorldConfig {
            homologous_rate: f32::NAN,
            ..Default::default()
        };
        assert_invalid(config, "homologous_rate");
    }

    #[test]
    fn test_config_from_json() {
        let config = WorldConfig::from_json(
            r#"{ "population_size": 64, "num_inputs": 1, "minimize_fitness": true, "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.population_size, 64);
        assert_eq!(config.num_inputs, 1);
        assert!(config.minimize_fitness);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_program_length, 20);

        assert!(matches!(
            WorldConfig::from_json("{ not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = WorldConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: WorldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
