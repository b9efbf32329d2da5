//! Coffee maker with a water tank, a bean hopper and a selectable cup size.

use crate::config::{CoffeeMakerConfig, CupSpec};
use crate::core::{Guard, GuardedObject, StateHistory, StateTransition};
use crate::error::{Error, Resource, Result};
use crate::state_enum;
use crate::validation::{self, not_blank, within};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

state_enum! {
    pub enum PowerStatus {
        Off,
        On,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CupSize {
    Small,
    Medium,
    Large,
}

impl CupSize {
    pub const ALL: [CupSize; 3] = [CupSize::Small, CupSize::Medium, CupSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for CupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CupSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(Error::validation(
                "cup size",
                format!("unknown size '{other}', expected small, medium or large"),
            )),
        }
    }
}

/// What a successful [`CoffeeMaker::brew`] consumed and left behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewReceipt {
    pub size: CupSize,
    pub water_used: f64,
    pub beans_used: u32,
    pub water_remaining: f64,
    pub beans_remaining: u32,
}

impl fmt::Display for BrewReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully brewed {} coffee! Water: {:.2}L, Beans: {}g remaining",
            self.size, self.water_remaining, self.beans_remaining
        )
    }
}

/// Result of topping up a resource. Whatever does not fit is `overflow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Refill<T> {
    pub added: T,
    pub overflow: T,
    pub level: T,
}

impl<T: PartialOrd + Default> Refill<T> {
    pub fn overflowed(&self) -> bool {
        self.overflow > T::default()
    }
}

/// Serializable snapshot of a coffee maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeMakerStatus {
    pub brand: String,
    pub is_on: bool,
    pub water_level: f64,
    pub coffee_beans: u32,
    pub cup_size: CupSize,
    pub can_brew: bool,
}

#[derive(Debug, Clone)]
pub struct CoffeeMaker {
    brand: String,
    config: CoffeeMakerConfig,
    water_level: f64,
    coffee_beans: u32,
    cup_size: CupSize,
    power: PowerStatus,
    history: StateHistory<PowerStatus>,
}

fn while_on(operation: &'static str) -> Guard<PowerStatus> {
    Guard::only(operation, PowerStatus::On)
}

impl CoffeeMaker {
    /// 1.0 L of water, 100 g of beans, medium cups, powered off.
    pub fn new(brand: impl Into<String>) -> Result<Self> {
        let brand = brand.into();
        validation::collect(vec![not_blank("brand", &brand)])?;

        Ok(Self {
            brand,
            config: CoffeeMakerConfig::default(),
            water_level: 1.0,
            coffee_beans: 100,
            cup_size: CupSize::Medium,
            power: PowerStatus::Off,
            history: StateHistory::new(),
        })
    }

    /// Replace the capacities and cup table. Current levels must still fit.
    pub fn with_config(mut self, config: CoffeeMakerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        self.check_levels(self.water_level, self.coffee_beans)?;
        Ok(self)
    }

    pub fn with_levels(mut self, water_liters: f64, beans_grams: u32) -> Result<Self> {
        self.check_levels(water_liters, beans_grams)?;
        self.water_level = water_liters;
        self.coffee_beans = beans_grams;
        Ok(self)
    }

    pub fn with_cup_size(mut self, size: CupSize) -> Self {
        self.cup_size = size;
        self
    }

    fn check_levels(&self, water_liters: f64, beans_grams: u32) -> Result<()> {
        validation::collect(vec![
            within(
                "water level",
                water_liters,
                0.0,
                self.config.water_capacity_liters,
            ),
            within(
                "coffee beans",
                f64::from(beans_grams),
                0.0,
                f64::from(self.config.bean_capacity_grams),
            ),
        ])
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn config(&self) -> &CoffeeMakerConfig {
        &self.config
    }

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn coffee_beans(&self) -> u32 {
        self.coffee_beans
    }

    pub fn cup_size(&self) -> CupSize {
        self.cup_size
    }

    pub fn is_on(&self) -> bool {
        self.power == PowerStatus::On
    }

    pub fn turn_on(&mut self) -> Result<()> {
        Guard::only("turn on", PowerStatus::Off).require(&self.power)?;
        self.set_power(PowerStatus::On, "turn on");
        Ok(())
    }

    pub fn turn_off(&mut self) -> Result<()> {
        while_on("turn off").require(&self.power)?;
        self.set_power(PowerStatus::Off, "turn off");
        Ok(())
    }

    pub fn set_cup_size(&mut self, size: CupSize) {
        self.cup_size = size;
    }

    fn requirement(&self) -> CupSpec {
        self.config.cup_sizes.get(self.cup_size)
    }

    /// Powered on with enough water and beans for the selected size.
    pub fn can_brew(&self) -> bool {
        let cup = self.requirement();
        self.is_on()
            && self.water_level >= cup.water_liters()
            && self.coffee_beans >= cup.beans_grams
    }

    /// Brew one cup of the selected size.
    ///
    /// Water and beans are both checked before either is touched.
    pub fn brew(&mut self) -> Result<BrewReceipt> {
        while_on("brew").require(&self.power)?;

        let cup = self.requirement();
        let water_needed = cup.water_liters();
        if self.water_level < water_needed {
            tracing::warn!(brand = %self.brand, need = water_needed, have = self.water_level, "not enough water");
            return Err(Error::InsufficientResource {
                resource: Resource::Water,
                requested: water_needed,
                available: self.water_level,
            });
        }
        if self.coffee_beans < cup.beans_grams {
            tracing::warn!(brand = %self.brand, need = cup.beans_grams, have = self.coffee_beans, "not enough beans");
            return Err(Error::InsufficientResource {
                resource: Resource::Beans,
                requested: f64::from(cup.beans_grams),
                available: f64::from(self.coffee_beans),
            });
        }

        self.water_level = (self.water_level - water_needed).max(0.0);
        self.coffee_beans -= cup.beans_grams;
        debug!(brand = %self.brand, size = %self.cup_size, water = self.water_level, beans = self.coffee_beans, "brewed");

        Ok(BrewReceipt {
            size: self.cup_size,
            water_used: water_needed,
            beans_used: cup.beans_grams,
            water_remaining: self.water_level,
            beans_remaining: self.coffee_beans,
        })
    }

    /// Pour water into the tank. Anything past capacity spills.
    pub fn refill_water(&mut self, liters: f64) -> Result<Refill<f64>> {
        while_on("refill water").require(&self.power)?;
        let liters = validation::positive_amount("water amount", liters)?;

        let room = self.config.water_capacity_liters - self.water_level;
        let added = liters.min(room);
        self.water_level = (self.water_level + added).min(self.config.water_capacity_liters);
        debug!(brand = %self.brand, added, level = self.water_level, "water refilled");

        Ok(Refill {
            added,
            overflow: liters - added,
            level: self.water_level,
        })
    }

    /// Pour beans into the hopper. Anything past capacity spills.
    pub fn add_beans(&mut self, grams: u32) -> Result<Refill<u32>> {
        while_on("add beans").require(&self.power)?;
        if grams == 0 {
            return Err(Error::validation("bean amount", "must be positive"));
        }

        let room = self.config.bean_capacity_grams - self.coffee_beans;
        let added = grams.min(room);
        self.coffee_beans += added;
        debug!(brand = %self.brand, added, level = self.coffee_beans, "beans added");

        Ok(Refill {
            added,
            overflow: grams - added,
            level: self.coffee_beans,
        })
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> CoffeeMakerStatus {
        CoffeeMakerStatus {
            brand: self.brand.clone(),
            is_on: self.is_on(),
            water_level: self.water_level,
            coffee_beans: self.coffee_beans,
            cup_size: self.cup_size,
            can_brew: self.can_brew(),
        }
    }

    fn set_power(&mut self, to: PowerStatus, operation: &str) {
        self.history = self
            .history
            .record(StateTransition::now(self.power, to, operation));
        self.power = to;
    }
}

impl GuardedObject for CoffeeMaker {
    type Status = PowerStatus;

    fn status(&self) -> &PowerStatus {
        &self.power
    }

    fn history(&self) -> &StateHistory<PowerStatus> {
        &self.history
    }
}

impl fmt::Display for CoffeeMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let power = if self.is_on() { "ON" } else { "OFF" };
        let ready = if self.can_brew() { "Ready" } else { "Not Ready" };
        write!(
            f,
            "{} Coffee Maker - {} - Water: {:.2}L - Beans: {}g - Cup: {} - {}",
            self.brand, power, self.water_level, self.coffee_beans, self.cup_size, ready
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keurig() -> CoffeeMaker {
        CoffeeMaker::new("Keurig")
            .unwrap()
            .with_levels(1.5, 150)
            .unwrap()
    }

    #[test]
    fn brewing_while_off_is_rejected() {
        let mut maker = keurig();

        assert!(matches!(maker.brew(), Err(Error::IllegalState { .. })));
        assert_eq!(maker.water_level(), 1.5);
        assert_eq!(maker.coffee_beans(), 150);
    }

    #[test]
    fn brew_consumes_water_and_beans_for_the_size() {
        let mut maker = keurig();
        maker.turn_on().unwrap();

        let receipt = maker.brew().unwrap();
        assert_eq!(receipt.size, CupSize::Medium);
        assert_eq!(receipt.beans_used, 12);
        assert!((maker.water_level() - 1.32).abs() < 1e-9);
        assert_eq!(maker.coffee_beans(), 138);

        maker.set_cup_size(CupSize::Large);
        maker.brew().unwrap();
        assert!((maker.water_level() - 1.08).abs() < 1e-9);
        assert_eq!(maker.coffee_beans(), 122);
    }

    #[test]
    fn short_beans_leave_water_untouched() {
        let mut maker = CoffeeMaker::new("Moka")
            .unwrap()
            .with_levels(1.0, 5)
            .unwrap();
        maker.turn_on().unwrap();

        let err = maker.brew().unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientResource {
                resource: Resource::Beans,
                ..
            }
        ));
        assert_eq!(err.shortfall(), Some(7.0));
        assert_eq!(maker.water_level(), 1.0);
        assert_eq!(maker.coffee_beans(), 5);
    }

    #[test]
    fn short_water_leaves_beans_untouched() {
        let mut maker = CoffeeMaker::new("Moka")
            .unwrap()
            .with_levels(0.1, 200)
            .unwrap()
            .with_cup_size(CupSize::Small);
        maker.turn_on().unwrap();

        assert!(matches!(
            maker.brew(),
            Err(Error::InsufficientResource {
                resource: Resource::Water,
                ..
            })
        ));
        assert_eq!(maker.water_level(), 0.1);
        assert_eq!(maker.coffee_beans(), 200);
        assert!(!maker.can_brew());
    }

    #[test]
    fn refills_report_overflow() {
        let mut maker = keurig();
        maker.turn_on().unwrap();

        let water = maker.refill_water(1.0).unwrap();
        assert!((water.added - 0.5).abs() < 1e-9);
        assert!((water.overflow - 0.5).abs() < 1e-9);
        assert_eq!(water.level, 2.0);
        assert!(water.overflowed());

        let beans = maker.add_beans(100).unwrap();
        assert_eq!(beans, Refill { added: 100, overflow: 0, level: 250 });
        assert!(!beans.overflowed());

        let beans = maker.add_beans(300).unwrap();
        assert_eq!(beans, Refill { added: 250, overflow: 50, level: 500 });
    }

    #[test]
    fn powered_off_machine_blocks_resource_changes() {
        let mut maker = keurig();
        maker.turn_on().unwrap();
        maker.turn_off().unwrap();

        assert!(maker.refill_water(0.5).is_err());
        assert!(maker.add_beans(10).is_err());
        assert!(maker.brew().is_err());
        assert_eq!(maker.water_level(), 1.5);
        assert_eq!(maker.coffee_beans(), 150);

        maker.turn_on().unwrap();
        assert!(maker.refill_water(0.5).is_ok());
    }

    #[test]
    fn non_positive_refills_are_rejected() {
        let mut maker = keurig();
        maker.turn_on().unwrap();

        assert!(maker.refill_water(0.0).is_err());
        assert!(maker.refill_water(-1.0).is_err());
        assert!(maker.add_beans(0).is_err());
    }

    #[test]
    fn redundant_power_toggles_are_rejected() {
        let mut maker = keurig();

        assert!(maker.turn_off().is_err());
        maker.turn_on().unwrap();
        assert!(maker.turn_on().is_err());
        assert_eq!(maker.history().len(), 1);
    }

    #[test]
    fn cup_size_parses_case_insensitively() {
        assert_eq!("Large".parse::<CupSize>(), Ok(CupSize::Large));
        assert_eq!(" small ".parse::<CupSize>(), Ok(CupSize::Small));
        assert!("venti".parse::<CupSize>().is_err());
    }

    #[test]
    fn levels_must_fit_capacity() {
        assert!(CoffeeMaker::new("X").unwrap().with_levels(2.5, 10).is_err());
        assert!(CoffeeMaker::new("X").unwrap().with_levels(1.0, 501).is_err());
        assert!(CoffeeMaker::new("").is_err());
    }

    #[test]
    fn status_snapshot_serializes_with_camel_case_keys() {
        let mut maker = keurig();
        maker.turn_on().unwrap();

        let json = serde_json::to_value(maker.snapshot()).unwrap();
        assert_eq!(json["brand"], "Keurig");
        assert_eq!(json["isOn"], true);
        assert_eq!(json["cupSize"], "medium");
        assert_eq!(json["canBrew"], true);
    }

    #[test]
    fn display_summarizes_state() {
        let maker = keurig();
        assert_eq!(
            maker.to_string(),
            "Keurig Coffee Maker - OFF - Water: 1.50L - Beans: 150g - Cup: medium - Not Ready"
        );
    }
}
