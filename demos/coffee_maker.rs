//! Coffee Maker
//!
//! Brews a few cups of different sizes, refills water and beans, and prints
//! the serializable status snapshot along the way.
//!
//! Run with: cargo run --example coffee_maker

use objectsim::objects::{CoffeeMaker, CupSize};
use objectsim::GuardedObject;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut coffee_maker = CoffeeMaker::new("Keurig")?
        .with_levels(1.5, 150)?
        .with_cup_size(CupSize::Medium);

    println!("Initial coffee maker state:");
    println!("{}", coffee_maker.describe());
    let status = serde_json::to_string_pretty(&coffee_maker.snapshot())?;
    println!("Status: {status}");

    println!("\nTrying to brew while coffee maker is off...");
    if let Err(err) = coffee_maker.brew() {
        println!("Brew result: {err}");
    }

    println!("\nTurning on coffee maker...");
    coffee_maker.turn_on()?;
    println!("{}", coffee_maker.describe());

    println!("\nBrewing medium coffee...");
    println!("Brew result: {}", coffee_maker.brew()?);
    println!("{}", coffee_maker.describe());

    println!("\nChanging to large cup size...");
    coffee_maker.set_cup_size("large".parse()?);
    println!("Brew result: {}", coffee_maker.brew()?);
    println!("{}", coffee_maker.describe());

    println!("\nRefilling water...");
    let refill = coffee_maker.refill_water(0.5)?;
    println!(
        "Refill result: added {:.2}L ({:.2}L overflow), level {:.2}L",
        refill.added, refill.overflow, refill.level
    );

    println!("\nAdding more coffee beans...");
    let refill = coffee_maker.add_beans(100)?;
    println!(
        "Add beans result: added {}g ({}g overflow), level {}g",
        refill.added, refill.overflow, refill.level
    );
    println!("{}", coffee_maker.describe());

    println!("\nBrewing multiple cups...");
    for cup in 1..=3 {
        match coffee_maker.brew() {
            Ok(receipt) => println!("Cup {cup}: {receipt}"),
            Err(err) => {
                println!("Cup {cup}: {err}");
                break;
            }
        }
    }

    println!("\nFinal state: {}", coffee_maker.describe());

    Ok(())
}
