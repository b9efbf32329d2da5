//! Bank Account
//!
//! Opens an account, moves some money around, credits interest, closes the
//! account and shows that a closed account refuses further deposits.
//!
//! Run with: cargo run --example bank_account

use objectsim::money::Money;
use objectsim::objects::BankAccount;
use objectsim::GuardedObject;
use tracing_subscriber::EnvFilter;

fn main() -> objectsim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut account = BankAccount::new("ACC001", "John Doe", Money::from_major(1000), 0.02)?;

    println!("Initial Account Information:");
    println!("{}", account.describe());
    println!();

    let balance = account.deposit(Money::from_major(500))?;
    println!("Deposited {}. New balance: {}", Money::from_major(500), balance);
    let balance = account.withdraw(Money::from_major(200))?;
    println!("Withdrew {}. New balance: {}", Money::from_major(200), balance);
    println!("Current balance: {}", account.balance());
    println!();

    let interest = account.calculate_interest()?;
    println!(
        "Interest calculated: {}. New balance: {}",
        interest,
        account.balance()
    );
    println!();

    match account.withdraw(Money::from_major(5000)) {
        Ok(balance) => println!("Withdrew $5000.00. New balance: {balance}"),
        Err(err) => println!("Withdrawal refused: {err}"),
    }

    account.close_account()?;
    println!("Account {} has been closed.", account.account_number());

    if let Err(err) = account.deposit(Money::from_major(100)) {
        println!("Deposit refused: {err}");
    }
    println!();
    println!("{}", account.describe());

    Ok(())
}
