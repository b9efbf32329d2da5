//! Library book that can be checked out and returned.

use crate::core::{Guard, GuardedObject, StateHistory, StateTransition};
use crate::error::{Error, Result};
use crate::state_enum;
use crate::validation::{self, ensure, not_blank};
use std::fmt;
use tracing::debug;

state_enum! {
    /// `CheckedOut` means no copy is left on the shelf.
    pub enum BookStatus {
        Available,
        CheckedOut,
    }
}

#[derive(Debug, Clone)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
    page_count: u32,
    total_copies: u32,
    copies_available: u32,
    status: BookStatus,
    history: StateHistory<BookStatus>,
}

impl Book {
    /// A single available copy.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        page_count: u32,
    ) -> Result<Self> {
        let title = title.into();
        let author = author.into();
        let isbn = isbn.into();

        validation::collect(vec![
            not_blank("title", &title),
            not_blank("author", &author),
            not_blank("isbn", &isbn),
            ensure(page_count > 0, "page count", "must be positive"),
        ])?;

        Ok(Self {
            title,
            author,
            isbn,
            page_count,
            total_copies: 1,
            copies_available: 1,
            status: BookStatus::Available,
            history: StateHistory::new(),
        })
    }

    /// Stock `copies` copies instead of one, all on the shelf.
    pub fn with_copies(mut self, copies: u32) -> Result<Self> {
        if copies == 0 {
            return Err(Error::validation("copies", "must be positive"));
        }
        self.total_copies = copies;
        self.copies_available = copies;
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    pub fn copies_available(&self) -> u32 {
        self.copies_available
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// "Title: …, Author: …, ISBN: …"
    pub fn summary(&self) -> String {
        format!(
            "Title: {}, Author: {}, ISBN: {}",
            self.title, self.author, self.isbn
        )
    }

    /// Lend one copy. Returns how many copies are still on the shelf.
    pub fn check_out(&mut self) -> Result<u32> {
        Guard::only("check out", BookStatus::Available).require(&self.status)?;

        self.copies_available -= 1;
        if self.copies_available == 0 {
            self.set_status(BookStatus::CheckedOut, "check out");
        }
        debug!(isbn = %self.isbn, remaining = self.copies_available, "book checked out");
        Ok(self.copies_available)
    }

    /// Take one copy back. Returns how many copies are on the shelf.
    pub fn return_book(&mut self) -> Result<u32> {
        if self.copies_available == self.total_copies {
            tracing::warn!(isbn = %self.isbn, "return without an outstanding loan");
            return Err(Error::IllegalState {
                operation: "return",
                state: "all copies are on the shelf".to_string(),
            });
        }

        self.copies_available += 1;
        if self.status == BookStatus::CheckedOut {
            self.set_status(BookStatus::Available, "return");
        }
        debug!(isbn = %self.isbn, available = self.copies_available, "book returned");
        Ok(self.copies_available)
    }

    /// Change the page count, e.g. for a new edition.
    pub fn set_page_count(&mut self, page_count: u32) -> Result<()> {
        if page_count == 0 {
            return Err(Error::validation("page count", "must be positive"));
        }
        self.page_count = page_count;
        Ok(())
    }

    fn set_status(&mut self, to: BookStatus, operation: &str) {
        self.history = self
            .history
            .record(StateTransition::now(self.status, to, operation));
        self.status = to;
    }
}

impl GuardedObject for Book {
    type Status = BookStatus;

    fn status(&self) -> &BookStatus {
        &self.status
    }

    fn history(&self) -> &StateHistory<BookStatus> {
        &self.history
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_available() {
            "Available"
        } else {
            "Checked Out"
        };
        write!(
            f,
            "{} by {} ({}) - {} pages - {}",
            self.title, self.author, self.isbn, self.page_count, status
        )
    }
}
