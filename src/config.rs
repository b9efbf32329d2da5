//! Tunable constants for the objects that have physical capacities.
//!
//! Every config has sensible defaults, can be deserialized from JSON with
//! missing fields falling back to those defaults, and is validated before an
//! object accepts it.
//!
//! ```rust
//! use objectsim::config::CoffeeMakerConfig;
//!
//! let config = CoffeeMakerConfig::from_json(r#"{ "water_capacity_liters": 3.5 }"#).unwrap();
//! assert_eq!(config.water_capacity_liters, 3.5);
//! assert_eq!(config.bean_capacity_grams, 500);
//! ```

use crate::error::{Error, Result};
use crate::objects::coffee_maker::CupSize;
use crate::validation::{self, ensure, positive};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn parse<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
}

// =============================================================================
// Car
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Full tank, in percent.
    pub tank_capacity: f64,
    /// Distance units covered per unit of fuel.
    pub efficiency: f64,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            tank_capacity: 100.0,
            efficiency: 1.0,
        }
    }
}

impl CarConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = parse(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validation::collect(vec![
            positive("tank capacity", self.tank_capacity),
            positive("efficiency", self.efficiency),
        ])
    }
}

// =============================================================================
// Coffee maker
// =============================================================================

/// Water and beans consumed by one cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupSpec {
    pub water_ml: u32,
    pub beans_grams: u32,
}

impl CupSpec {
    pub fn water_liters(&self) -> f64 {
        f64::from(self.water_ml) / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CupTable {
    pub small: CupSpec,
    pub medium: CupSpec,
    pub large: CupSpec,
}

impl Default for CupTable {
    fn default() -> Self {
        Self {
            small: CupSpec {
                water_ml: 120,
                beans_grams: 8,
            },
            medium: CupSpec {
                water_ml: 180,
                beans_grams: 12,
            },
            large: CupSpec {
                water_ml: 240,
                beans_grams: 16,
            },
        }
    }
}

impl CupTable {
    pub fn get(&self, size: CupSize) -> CupSpec {
        match size {
            CupSize::Small => self.small,
            CupSize::Medium => self.medium,
            CupSize::Large => self.large,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoffeeMakerConfig {
    pub water_capacity_liters: f64,
    pub bean_capacity_grams: u32,
    pub cup_sizes: CupTable,
}

impl Default for CoffeeMakerConfig {
    fn default() -> Self {
        Self {
            water_capacity_liters: 2.0,
            bean_capacity_grams: 500,
            cup_sizes: CupTable::default(),
        }
    }
}

impl CoffeeMakerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = parse(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Capacities must be positive and every cup must need some of both
    /// resources while still fitting in a full machine.
    pub fn validate(&self) -> Result<()> {
        let mut checks = vec![
            positive("water capacity", self.water_capacity_liters),
            ensure(self.bean_capacity_grams > 0, "bean capacity", "must be positive"),
        ];
        for size in CupSize::ALL {
            let cup = self.cup_sizes.get(size);
            checks.push(ensure(
                cup.water_ml > 0 && cup.water_liters() <= self.water_capacity_liters,
                "cup water",
                &format!("{size} cup needs {}ml, outside tank range", cup.water_ml),
            ));
            checks.push(ensure(
                cup.beans_grams > 0 && cup.beans_grams <= self.bean_capacity_grams,
                "cup beans",
                &format!("{size} cup needs {}g, outside storage range", cup.beans_grams),
            ));
        }
        validation::collect(checks)
    }
}
