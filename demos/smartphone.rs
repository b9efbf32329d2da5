//! Smartphone
//!
//! Tries a wrong PIN, unlocks with the right one, drains and charges the
//! battery, then locks the phone again.
//!
//! Run with: cargo run --example smartphone

use objectsim::objects::Smartphone;
use objectsim::GuardedObject;
use tracing_subscriber::EnvFilter;

fn main() -> objectsim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut phone = Smartphone::new("Apple", "iPhone 14", 256, "1234")?.with_battery(85)?;

    println!("Initial phone state:");
    println!("{}", phone.describe());
    println!("Specs: {}", phone.specs());
    println!("\nPhone locked: {}", phone.is_locked());

    println!("\nTrying to use the phone while locked...");
    if let Err(err) = phone.use_battery(5) {
        println!("Usage refused: {err}");
    }

    println!("\nTrying to unlock with wrong PIN...");
    let result = phone.unlock("0000");
    println!("Unlock successful: {}", result.is_ok());

    println!("\nUnlocking with correct PIN...");
    let result = phone.unlock("1234");
    println!("Unlock successful: {}", result.is_ok());
    println!("{}", phone.describe());

    println!("\nUsing phone (battery drain)...");
    let level = phone.use_battery(25)?;
    println!("Battery after usage: {level}%");
    println!("{}", phone.describe());

    println!("\nCharging phone...");
    let level = phone.charge(40)?;
    println!("Battery after charging: {level}%");
    println!("{}", phone.describe());

    println!("\nLocking phone...");
    phone.lock()?;
    println!("{}", phone.describe());

    Ok(())
}
