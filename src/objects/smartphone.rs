//! PIN-locked smartphone with a battery.
//!
//! Wrong PINs are rejected without any lockout or back-off; callers can keep
//! guessing indefinitely.

use crate::core::{Guard, GuardedObject, StateHistory, StateTransition};
use crate::error::{Error, Resource, Result};
use crate::state_enum;
use crate::validation::{self, ensure, not_blank};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

state_enum! {
    pub enum LockStatus {
        Locked,
        Unlocked,
    }
}

pub const MAX_BATTERY: u8 = 100;

/// Coarse battery bucket shown next to the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryStatus {
    Excellent,
    Good,
    Low,
    Critical,
    VeryLow,
}

impl BatteryStatus {
    pub fn from_level(level: u8) -> Self {
        match level {
            81..=u8::MAX => Self::Excellent,
            51..=80 => Self::Good,
            21..=50 => Self::Low,
            11..=20 => Self::Critical,
            _ => Self::VeryLow,
        }
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Low => "Low",
            Self::Critical => "Critical",
            Self::VeryLow => "Very Low",
        };
        f.write_str(label)
    }
}

fn is_valid_pin(pin: &str) -> bool {
    (4..=8).contains(&pin.len()) && pin.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone)]
pub struct Smartphone {
    brand: String,
    model: String,
    storage_gb: u32,
    battery_level: u8,
    pin: String,
    lock: LockStatus,
    history: StateHistory<LockStatus>,
}

impl Smartphone {
    /// Fully charged and locked.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        storage_gb: u32,
        pin: impl Into<String>,
    ) -> Result<Self> {
        let brand = brand.into();
        let model = model.into();
        let pin = pin.into();

        validation::collect(vec![
            not_blank("brand", &brand),
            not_blank("model", &model),
            ensure(storage_gb > 0, "storage capacity", "must be positive"),
            ensure(is_valid_pin(&pin), "pin", "must be 4 to 8 digits"),
        ])?;

        Ok(Self {
            brand,
            model,
            storage_gb,
            battery_level: MAX_BATTERY,
            pin,
            lock: LockStatus::Locked,
            history: StateHistory::new(),
        })
    }

    pub fn with_battery(mut self, level: u8) -> Result<Self> {
        if level > MAX_BATTERY {
            return Err(Error::validation(
                "battery level",
                format!("must be at most {MAX_BATTERY}, got {level}"),
            ));
        }
        self.battery_level = level;
        Ok(self)
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn storage_gb(&self) -> u32 {
        self.storage_gb
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn is_locked(&self) -> bool {
        self.lock == LockStatus::Locked
    }

    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::from_level(self.battery_level)
    }

    /// "Brand: …, Model: …, Storage: nGB"
    pub fn specs(&self) -> String {
        format!(
            "Brand: {}, Model: {}, Storage: {}GB",
            self.brand, self.model, self.storage_gb
        )
    }

    pub fn unlock(&mut self, pin: &str) -> Result<()> {
        Guard::only("unlock", LockStatus::Locked).require(&self.lock)?;
        if pin != self.pin {
            tracing::warn!(device = %self.model, "unlock attempt with wrong PIN");
            return Err(Error::Authentication);
        }

        self.set_lock(LockStatus::Unlocked, "unlock");
        Ok(())
    }

    pub fn lock(&mut self) -> Result<()> {
        Guard::only("lock", LockStatus::Unlocked).require(&self.lock)?;
        self.set_lock(LockStatus::Locked, "lock");
        Ok(())
    }

    /// Charge by `percent` points, capped at 100. Returns the new level.
    pub fn charge(&mut self, percent: u8) -> Result<u8> {
        Guard::only("charge", LockStatus::Unlocked).require(&self.lock)?;
        if percent == 0 {
            return Err(Error::validation("charge amount", "must be positive"));
        }

        self.battery_level = self.battery_level.saturating_add(percent).min(MAX_BATTERY);
        debug!(device = %self.model, percent, level = self.battery_level, "charged");
        Ok(self.battery_level)
    }

    /// Drain `percent` points by using the phone. Returns the new level.
    pub fn use_battery(&mut self, percent: u8) -> Result<u8> {
        Guard::only("use", LockStatus::Unlocked).require(&self.lock)?;
        if percent == 0 {
            return Err(Error::validation("usage amount", "must be positive"));
        }
        if percent > self.battery_level {
            tracing::warn!(device = %self.model, percent, level = self.battery_level, "battery too low");
            return Err(Error::InsufficientResource {
                resource: Resource::Battery,
                requested: f64::from(percent),
                available: f64::from(self.battery_level),
            });
        }

        self.battery_level -= percent;
        debug!(device = %self.model, percent, level = self.battery_level, "battery used");
        Ok(self.battery_level)
    }

    fn set_lock(&mut self, to: LockStatus, operation: &str) {
        self.history = self
            .history
            .record(StateTransition::now(self.lock, to, operation));
        self.lock = to;
    }
}

// The PIN stays out of debug output.
impl fmt::Debug for Smartphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Smartphone")
            .field("brand", &self.brand)
            .field("model", &self.model)
            .field("storage_gb", &self.storage_gb)
            .field("battery_level", &self.battery_level)
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}

impl GuardedObject for Smartphone {
    type Status = LockStatus;

    fn status(&self) -> &LockStatus {
        &self.lock
    }

    fn history(&self) -> &StateHistory<LockStatus> {
        &self.history
    }
}

impl fmt::Display for Smartphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = if self.is_locked() { "Locked" } else { "Unlocked" };
        write!(
            f,
            "{} {} ({}GB) - Battery: {}% ({}) - {}",
            self.brand,
            self.model,
            self.storage_gb,
            self.battery_level,
            self.battery_status(),
            lock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iphone() -> Smartphone {
        Smartphone::new("Apple", "iPhone 14", 256, "1234")
            .unwrap()
            .with_battery(85)
            .unwrap()
    }

    #[test]
    fn new_phone_starts_locked() {
        let phone = iphone();
        assert!(phone.is_locked());
        assert_eq!(phone.specs(), "Brand: Apple, Model: iPhone 14, Storage: 256GB");
    }

    #[test]
    fn wrong_pin_never_locks_out() {
        let mut phone = iphone();

        for _ in 0..3 {
            assert_eq!(phone.unlock("0000"), Err(Error::Authentication));
            assert!(phone.is_locked());
        }
        assert_eq!(phone.unlock("1234"), Ok(()));
        assert!(!phone.is_locked());
        assert_eq!(phone.history().len(), 1);
    }

    #[test]
    fn locked_phone_blocks_usage_and_charging() {
        let mut phone = iphone();

        assert!(matches!(phone.use_battery(10), Err(Error::IllegalState { .. })));
        assert!(matches!(phone.charge(10), Err(Error::IllegalState { .. })));
        assert_eq!(phone.battery_level(), 85);
    }

    #[test]
    fn usage_and_charging_stay_in_bounds() {
        let mut phone = iphone();
        phone.unlock("1234").unwrap();

        assert_eq!(phone.use_battery(25), Ok(60));
        assert_eq!(phone.charge(40), Ok(100));
        assert_eq!(phone.charge(255), Ok(100));

        let err = phone.use_battery(101).unwrap_err();
        assert_eq!(err.shortfall(), Some(1.0));
        assert_eq!(phone.battery_level(), 100);
        assert!(phone.use_battery(0).is_err());
        assert!(phone.charge(0).is_err());
    }

    #[test]
    fn redundant_lock_changes_are_rejected() {
        let mut phone = iphone();

        assert!(phone.lock().is_err());
        phone.unlock("1234").unwrap();
        assert!(matches!(phone.unlock("1234"), Err(Error::IllegalState { .. })));
        phone.lock().unwrap();
        assert!(phone.is_locked());
    }

    #[test]
    fn battery_status_buckets() {
        assert_eq!(BatteryStatus::from_level(100), BatteryStatus::Excellent);
        assert_eq!(BatteryStatus::from_level(81), BatteryStatus::Excellent);
        assert_eq!(BatteryStatus::from_level(80), BatteryStatus::Good);
        assert_eq!(BatteryStatus::from_level(50), BatteryStatus::Low);
        assert_eq!(BatteryStatus::from_level(20), BatteryStatus::Critical);
        assert_eq!(BatteryStatus::from_level(10), BatteryStatus::VeryLow);
        assert_eq!(BatteryStatus::from_level(0).to_string(), "Very Low");
    }

    #[test]
    fn construction_validates_pin_and_battery() {
        assert!(Smartphone::new("Apple", "iPhone", 128, "12a4").is_err());
        assert!(Smartphone::new("Apple", "iPhone", 128, "123").is_err());
        assert!(Smartphone::new("Apple", "iPhone", 0, "1234").is_err());
        assert!(iphone().with_battery(101).is_err());
    }

    #[test]
    fn debug_output_hides_pin() {
        let debug = format!("{:?}", iphone());
        assert!(!debug.contains("1234"));
    }

    #[test]
    fn display_summarizes_state() {
        assert_eq!(
            iphone().to_string(),
            "Apple iPhone 14 (256GB) - Battery: 85% (Excellent) - Locked"
        );
    }
}
