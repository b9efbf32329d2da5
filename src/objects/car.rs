//! Car with an engine and a fuel tank.
//!
//! Fuel is tracked in percent of a full tank. Driving burns
//! `distance / efficiency` units of fuel; a trip longer than the tank allows
//! runs the tank dry, stops the engine and reports how far the car got.

use crate::config::CarConfig;
use crate::core::{Guard, GuardedObject, StateHistory, StateTransition};
use crate::error::{Error, Resource, Result};
use crate::state_enum;
use crate::validation::{self, not_blank, within};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

state_enum! {
    pub enum EngineStatus {
        Off,
        On,
    }
}

/// How a [`Car::drive`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DriveOutcome {
    /// Full distance covered.
    Completed { distance: f64, fuel_remaining: f64 },
    /// Tank ran dry after `distance_driven`; the engine is now off.
    OutOfFuel {
        requested: f64,
        distance_driven: f64,
    },
}

impl DriveOutcome {
    pub fn distance_driven(&self) -> f64 {
        match self {
            Self::Completed { distance, .. } => *distance,
            Self::OutOfFuel {
                distance_driven, ..
            } => *distance_driven,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl fmt::Display for DriveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed {
                distance,
                fuel_remaining,
            } => write!(
                f,
                "Drove {distance} units. Remaining fuel: {fuel_remaining:.1}%"
            ),
            Self::OutOfFuel {
                distance_driven, ..
            } => write!(
                f,
                "Ran out of fuel after driving {distance_driven:.1} units. Engine stopped. Fuel level: 0.0%"
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Car {
    make: String,
    model: String,
    year: u16,
    color: String,
    config: CarConfig,
    fuel_level: f64,
    engine: EngineStatus,
    history: StateHistory<EngineStatus>,
}

impl Car {
    /// Full tank, engine off, default [`CarConfig`].
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        color: impl Into<String>,
    ) -> Result<Self> {
        let make = make.into();
        let model = model.into();
        let color = color.into();

        validation::collect(vec![
            not_blank("make", &make),
            not_blank("model", &model),
            not_blank("color", &color),
        ])?;

        let config = CarConfig::default();
        Ok(Self {
            make,
            model,
            year,
            color,
            fuel_level: config.tank_capacity,
            config,
            engine: EngineStatus::Off,
            history: StateHistory::new(),
        })
    }

    /// Swap in a different tank/efficiency. The tank starts full.
    pub fn with_config(mut self, config: CarConfig) -> Result<Self> {
        config.validate()?;
        self.fuel_level = config.tank_capacity;
        self.config = config;
        Ok(self)
    }

    pub fn with_fuel_level(mut self, fuel_level: f64) -> Result<Self> {
        validation::collect(vec![within(
            "fuel level",
            fuel_level,
            0.0,
            self.config.tank_capacity,
        )])?;
        self.fuel_level = fuel_level;
        Ok(self)
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn config(&self) -> &CarConfig {
        &self.config
    }

    pub fn fuel_level(&self) -> f64 {
        self.fuel_level
    }

    pub fn is_engine_on(&self) -> bool {
        self.engine == EngineStatus::On
    }

    /// Distance the current fuel can cover.
    pub fn range(&self) -> f64 {
        self.fuel_level * self.config.efficiency
    }

    /// "{year} {make} {model} ({color})"
    pub fn details(&self) -> String {
        format!("{} {} {} ({})", self.year, self.make, self.model, self.color)
    }

    /// Turn the engine on. An empty tank refuses to start.
    pub fn start_engine(&mut self) -> Result<()> {
        Guard::only("start engine", EngineStatus::Off).require(&self.engine)?;
        if self.fuel_level <= 0.0 {
            tracing::warn!(car = %self.details(), "cannot start with an empty tank");
            return Err(Error::InsufficientResource {
                resource: Resource::Fuel,
                requested: f64::MIN_POSITIVE,
                available: 0.0,
            });
        }

        self.set_engine(EngineStatus::On, "start engine");
        Ok(())
    }

    pub fn stop_engine(&mut self) -> Result<()> {
        Guard::only("stop engine", EngineStatus::On).require(&self.engine)?;
        self.set_engine(EngineStatus::Off, "stop engine");
        Ok(())
    }

    /// Drive `distance` units.
    ///
    /// When the tank cannot cover the whole trip the car drives as far as
    /// the fuel allows, the tank ends at exactly zero and the engine stops.
    pub fn drive(&mut self, distance: f64) -> Result<DriveOutcome> {
        Guard::only("drive", EngineStatus::On).require(&self.engine)?;
        let distance = validation::positive_amount("distance", distance)?;

        if distance > self.range() {
            let distance_driven = self.range();
            self.fuel_level = 0.0;
            self.set_engine(EngineStatus::Off, "ran out of fuel");
            tracing::warn!(car = %self.details(), requested = distance, distance_driven, "ran out of fuel");
            return Ok(DriveOutcome::OutOfFuel {
                requested: distance,
                distance_driven,
            });
        }

        let fuel_needed = distance / self.config.efficiency;
        self.fuel_level = (self.fuel_level - fuel_needed).max(0.0);
        debug!(car = %self.details(), distance, fuel = self.fuel_level, "drove");
        Ok(DriveOutcome::Completed {
            distance,
            fuel_remaining: self.fuel_level,
        })
    }

    /// Add fuel, capped at a full tank. Returns the new fuel level.
    pub fn refuel(&mut self, amount: f64) -> Result<f64> {
        let amount = validation::positive_amount("fuel amount", amount)?;

        self.fuel_level = (self.fuel_level + amount).min(self.config.tank_capacity);
        debug!(car = %self.details(), amount, fuel = self.fuel_level, "refueled");
        Ok(self.fuel_level)
    }

    fn set_engine(&mut self, to: EngineStatus, operation: &str) {
        self.history = self
            .history
            .record(StateTransition::now(self.engine, to, operation));
        self.engine = to;
    }
}

impl GuardedObject for Car {
    type Status = EngineStatus;

    fn status(&self) -> &EngineStatus {
        &self.engine
    }

    fn history(&self) -> &StateHistory<EngineStatus> {
        &self.history
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = if self.is_engine_on() { "On" } else { "Off" };
        writeln!(f, "{}", self.details())?;
        writeln!(f, "Fuel Level: {:.1}%", self.fuel_level)?;
        write!(f, "Engine: {engine}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camry() -> Car {
        Car::new("Toyota", "Camry", 2023, "Blue").unwrap()
    }

    #[test]
    fn new_car_has_full_tank_and_engine_off() {
        let car = camry();
        assert_eq!(car.fuel_level(), 100.0);
        assert!(!car.is_engine_on());
        assert_eq!(car.details(), "2023 Toyota Camry (Blue)");
    }

    #[test]
    fn driving_requires_a_running_engine() {
        let mut car = camry();

        assert!(matches!(car.drive(10.0), Err(Error::IllegalState { .. })));
        assert_eq!(car.fuel_level(), 100.0);
    }

    #[test]
    fn drive_burns_fuel_by_efficiency() {
        let mut car = camry()
            .with_config(CarConfig {
                tank_capacity: 50.0,
                efficiency: 4.0,
            })
            .unwrap();
        car.start_engine().unwrap();

        let outcome = car.drive(40.0).unwrap();
        assert_eq!(
            outcome,
            DriveOutcome::Completed {
                distance: 40.0,
                fuel_remaining: 40.0
            }
        );
        assert_eq!(car.range(), 160.0);
    }

    #[test]
    fn overlong_trip_caps_distance_and_empties_tank() {
        let mut car = camry().with_fuel_level(20.0).unwrap();
        car.start_engine().unwrap();

        let outcome = car.drive(30.0).unwrap();
        assert_eq!(outcome.distance_driven(), 20.0);
        assert!(!outcome.is_complete());
        assert_eq!(car.fuel_level(), 0.0);
        assert!(!car.is_engine_on());
        assert_eq!(
            outcome.to_string(),
            "Ran out of fuel after driving 20.0 units. Engine stopped. Fuel level: 0.0%"
        );
    }

    #[test]
    fn trip_of_exactly_the_range_completes() {
        let mut car = camry()
            .with_config(CarConfig {
                tank_capacity: 50.0,
                efficiency: 3.0,
            })
            .unwrap()
            .with_fuel_level(0.1)
            .unwrap();
        car.start_engine().unwrap();

        let range = car.range();
        let outcome = car.drive(range).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.distance_driven(), range);
        assert!(car.is_engine_on());
        assert!(car.fuel_level() < 1e-9);
        assert_eq!(car.history().len(), 1);
    }

    #[test]
    fn empty_tank_refuses_to_start() {
        let mut car = camry().with_fuel_level(0.0).unwrap();

        assert!(matches!(
            car.start_engine(),
            Err(Error::InsufficientResource {
                resource: Resource::Fuel,
                ..
            })
        ));
        assert!(!car.is_engine_on());
    }

    #[test]
    fn redundant_engine_toggles_are_rejected() {
        let mut car = camry();

        assert!(car.stop_engine().is_err());
        car.start_engine().unwrap();
        assert!(car.start_engine().is_err());
        car.stop_engine().unwrap();

        assert_eq!(
            car.history().get_path(),
            vec![&EngineStatus::Off, &EngineStatus::On, &EngineStatus::Off]
        );
    }

    #[test]
    fn refuel_clamps_at_capacity() {
        let mut car = camry().with_fuel_level(90.0).unwrap();

        assert_eq!(car.refuel(25.0), Ok(100.0));
        assert!(car.refuel(0.0).is_err());
        assert!(car.refuel(-5.0).is_err());
    }

    #[test]
    fn invalid_distance_is_rejected() {
        let mut car = camry();
        car.start_engine().unwrap();

        assert!(matches!(
            car.drive(0.0),
            Err(Error::Validation { field: "distance", .. })
        ));
        assert!(car.drive(f64::NAN).is_err());
        assert_eq!(car.fuel_level(), 100.0);
    }

    #[test]
    fn fuel_level_outside_tank_is_rejected() {
        assert!(camry().with_fuel_level(100.5).is_err());
        assert!(camry().with_fuel_level(-1.0).is_err());
    }

    #[test]
    fn display_shows_fuel_and_engine() {
        let mut car = camry();
        car.start_engine().unwrap();
        car.drive(25.0).unwrap();

        assert_eq!(
            car.to_string(),
            "2023 Toyota Camry (Blue)\nFuel Level: 75.0%\nEngine: On"
        );
    }
}
