//! Car
//!
//! Starts the engine, drives a couple of legs, refuels, and then attempts a
//! trip longer than the tank allows.
//!
//! Run with: cargo run --example car

use objectsim::objects::Car;
use objectsim::GuardedObject;
use tracing_subscriber::EnvFilter;

fn main() -> objectsim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut car = Car::new("Toyota", "Camry", 2023, "Blue")?;

    println!("=== Car Details ===");
    println!("{}", car.details());
    println!("Fuel Level: {}%", car.fuel_level());
    println!(
        "Engine Status: {}",
        if car.is_engine_on() { "On" } else { "Off" }
    );

    println!("\n=== Driving Without Starting ===");
    if let Err(err) = car.drive(5.0) {
        println!("Cannot drive: {err}");
    }

    println!("\n=== Starting Engine ===");
    car.start_engine()?;
    println!("Engine started successfully.");

    println!("\n=== Driving ===");
    println!("{}", car.drive(25.0)?);
    println!("{}", car.drive(30.0)?);

    println!("\n=== Refueling ===");
    let level = car.refuel(20.0)?;
    println!("Refueled. Current fuel level: {level:.1}%");

    println!("\n=== Long Trip ===");
    println!("{}", car.drive(100.0)?);

    println!("\n=== Final Status ===");
    println!("{}", car.describe());
    println!("Engine changes recorded: {}", car.history().len());

    Ok(())
}
