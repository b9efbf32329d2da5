//! Library Book
//!
//! Checks a book out, tries to check it out again, returns it and updates
//! the page count for a new edition.
//!
//! Run with: cargo run --example book

use objectsim::objects::Book;
use objectsim::GuardedObject;
use tracing_subscriber::EnvFilter;

fn main() -> objectsim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut book = Book::new(
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        "978-0-7432-7356-5",
        180,
    )?;

    println!("Initial book state:");
    println!("{}", book.describe());
    println!("Summary: {}", book.summary());
    println!("Available: {}", book.is_available());

    println!("\nChecking out the book...");
    let result = book.check_out();
    println!("Checkout successful: {}", result.is_ok());
    println!("Available: {}", book.is_available());
    println!("{}", book.describe());

    println!("\nTrying to check out again...");
    match book.check_out() {
        Ok(_) => println!("Checkout successful: true"),
        Err(err) => println!("Checkout successful: false ({err})"),
    }

    println!("\nReturning the book...");
    let result = book.return_book();
    println!("Return successful: {}", result.is_ok());
    println!("Available: {}", book.is_available());
    println!("{}", book.describe());

    println!("\nUpdating page count...");
    book.set_page_count(200)?;
    println!("New page count: {}", book.page_count());
    println!("{}", book.describe());

    Ok(())
}
