//! Bank account with deposits, withdrawals, interest and closure.

use crate::core::{Guard, GuardedObject, StateHistory, StateTransition};
use crate::error::{Error, Resource, Result};
use crate::money::Money;
use crate::state_enum;
use crate::validation::{self, ensure, not_blank, within};
use std::fmt;
use tracing::debug;

state_enum! {
    pub enum AccountStatus {
        Active,
        Closed,
    }
    final: [Closed]
}

fn while_active(operation: &'static str) -> Guard<AccountStatus> {
    Guard::only(operation, AccountStatus::Active)
}

fn overflow(field: &'static str) -> Error {
    Error::validation(field, "would overflow the balance")
}

fn positive_money(field: &'static str, amount: Money) -> Result<Money> {
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(Error::validation(
            field,
            format!("must be positive, got {amount}"),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct BankAccount {
    account_number: String,
    holder: String,
    balance: Money,
    interest_rate: f64,
    overdraft_limit: Money,
    status: AccountStatus,
    history: StateHistory<AccountStatus>,
}

impl BankAccount {
    /// Open an active account.
    ///
    /// `interest_rate` is a fraction applied per [`calculate_interest`]
    /// call, e.g. `0.02` for 2%.
    ///
    /// [`calculate_interest`]: Self::calculate_interest
    pub fn new(
        account_number: impl Into<String>,
        holder: impl Into<String>,
        initial_balance: Money,
        interest_rate: f64,
    ) -> Result<Self> {
        let account_number = account_number.into();
        let holder = holder.into();

        validation::collect(vec![
            not_blank("account number", &account_number),
            not_blank("account holder", &holder),
            ensure(
                !initial_balance.is_negative(),
                "initial balance",
                "must not be negative",
            ),
            within("interest rate", interest_rate, 0.0, 1.0),
        ])?;

        Ok(Self {
            account_number,
            holder,
            balance: initial_balance,
            interest_rate,
            overdraft_limit: Money::zero(),
            status: AccountStatus::Active,
            history: StateHistory::new(),
        })
    }

    /// Allow the balance to go down to `-limit`.
    pub fn with_overdraft_limit(mut self, limit: Money) -> Result<Self> {
        if limit.is_negative() {
            return Err(Error::validation("overdraft limit", "must not be negative"));
        }
        self.overdraft_limit = limit;
        Ok(self)
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn overdraft_limit(&self) -> Money {
        self.overdraft_limit
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Funds that can still be withdrawn, overdraft included.
    pub fn available(&self) -> Money {
        self.balance.saturating_add(self.overdraft_limit)
    }

    /// Add money to the balance. Returns the new balance.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        while_active("deposit").require(&self.status)?;
        positive_money("deposit amount", amount)?;

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| overflow("deposit amount"))?;
        debug!(account = %self.account_number, %amount, balance = %self.balance, "deposit accepted");
        Ok(self.balance)
    }

    /// Take money out of the balance. Returns the new balance.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money> {
        while_active("withdraw").require(&self.status)?;
        positive_money("withdrawal amount", amount)?;

        let available = self.available();
        if amount > available {
            tracing::warn!(account = %self.account_number, %amount, %available, "insufficient funds");
            return Err(Error::InsufficientResource {
                resource: Resource::Funds,
                requested: amount.as_major_f64(),
                available: available.as_major_f64(),
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| overflow("withdrawal amount"))?;
        debug!(account = %self.account_number, %amount, balance = %self.balance, "withdrawal accepted");
        Ok(self.balance)
    }

    /// Credit one period of interest. Returns the interest added.
    ///
    /// An overdrawn account earns nothing.
    pub fn calculate_interest(&mut self) -> Result<Money> {
        while_active("calculate interest").require(&self.status)?;

        let interest = if self.balance.is_positive() {
            self.balance.scale(self.interest_rate)
        } else {
            Money::zero()
        };
        self.balance = self
            .balance
            .checked_add(interest)
            .ok_or_else(|| overflow("interest"))?;
        debug!(account = %self.account_number, %interest, balance = %self.balance, "interest credited");
        Ok(interest)
    }

    /// Close the account for good.
    pub fn close_account(&mut self) -> Result<()> {
        while_active("close account").require(&self.status)?;

        self.history = self.history.record(StateTransition::now(
            self.status,
            AccountStatus::Closed,
            "close account",
        ));
        self.status = AccountStatus::Closed;
        debug!(account = %self.account_number, "account closed");
        Ok(())
    }
}

impl GuardedObject for BankAccount {
    type Status = AccountStatus;

    fn status(&self) -> &AccountStatus {
        &self.status
    }

    fn history(&self) -> &StateHistory<AccountStatus> {
        &self.history
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.status {
            AccountStatus::Active => "Active",
            AccountStatus::Closed => "Closed",
        };
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Account Holder: {}", self.holder)?;
        writeln!(f, "Balance: {}", self.balance)?;
        writeln!(f, "Interest Rate: {:.2}%", self.interest_rate * 100.0)?;
        write!(f, "Status: {status}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    fn account() -> BankAccount {
        BankAccount::new("ACC001", "John Doe", Money::from_major(1000), 0.02).unwrap()
    }

    #[test]
    fn deposit_and_withdraw_update_balance() {
        let mut acct = account();

        assert_eq!(acct.deposit(Money::from_major(500)), Ok(Money::from_major(1500)));
        assert_eq!(acct.withdraw(Money::from_major(200)), Ok(Money::from_major(1300)));
        assert_eq!(acct.balance(), Money::from_major(1300));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut acct = account();

        assert!(matches!(
            acct.deposit(Money::zero()),
            Err(Error::Validation { field: "deposit amount", .. })
        ));
        assert!(matches!(
            acct.withdraw(Money::from_cents(-1)),
            Err(Error::Validation { field: "withdrawal amount", .. })
        ));
        assert_eq!(acct.balance(), Money::from_major(1000));
    }

    #[test]
    fn overdrawing_reports_shortfall_and_keeps_balance() {
        let mut acct = account();

        let err = acct.withdraw(Money::from_major(1250)).unwrap_err();
        assert_eq!(err.shortfall(), Some(250.0));
        assert_eq!(acct.balance(), Money::from_major(1000));
    }

    #[test]
    fn overdraft_limit_extends_available_funds() {
        let mut acct = account()
            .with_overdraft_limit(Money::from_major(100))
            .unwrap();

        assert_eq!(acct.withdraw(Money::from_major(1100)), Ok(Money::from_major(-100)));
        assert!(acct.withdraw(Money::from_cents(1)).is_err());
        assert!(account().with_overdraft_limit(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn deposit_overflowing_balance_is_rejected() {
        let mut acct = account();

        let err = acct.deposit(Money::from_cents(i64::MAX)).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "deposit amount", .. }));
        assert_eq!(acct.balance(), Money::from_major(1000));
    }

    #[test]
    fn huge_overdraft_limit_does_not_overflow_available_funds() {
        let mut acct = account()
            .with_overdraft_limit(Money::from_cents(i64::MAX))
            .unwrap();

        assert_eq!(acct.available(), Money::from_cents(i64::MAX));
        assert_eq!(
            acct.withdraw(Money::from_major(1500)),
            Ok(Money::from_major(-500))
        );
        assert!(matches!(
            acct.withdraw(Money::from_cents(i64::MAX)),
            Err(Error::InsufficientResource { .. })
        ));
        assert_eq!(acct.balance(), Money::from_major(-500));
    }

    #[test]
    fn interest_is_rounded_to_cents() {
        let mut acct = account();
        acct.deposit(Money::from_major(500)).unwrap();
        acct.withdraw(Money::from_major(200)).unwrap();

        assert_eq!(acct.calculate_interest(), Ok(Money::from_major(26)));
        assert_eq!(acct.balance(), Money::from_major(1326));
    }

    #[test]
    fn overdrawn_accounts_earn_no_interest() {
        let mut acct = account()
            .with_overdraft_limit(Money::from_major(50))
            .unwrap();
        acct.withdraw(Money::from_major(1020)).unwrap();

        assert_eq!(acct.calculate_interest(), Ok(Money::zero()));
        assert_eq!(acct.balance(), Money::from_major(-20));
    }

    #[test]
    fn closed_account_blocks_every_transaction() {
        let mut acct = account();
        acct.close_account().unwrap();

        assert!(!acct.is_active());
        assert!(acct.status().is_final());
        for result in [
            acct.deposit(Money::from_major(100)).map(|_| ()),
            acct.withdraw(Money::from_major(100)).map(|_| ()),
            acct.calculate_interest().map(|_| ()),
            acct.close_account(),
        ] {
            assert!(matches!(result, Err(Error::IllegalState { .. })));
        }
        assert_eq!(acct.balance(), Money::from_major(1000));
        assert_eq!(acct.history().len(), 1);
    }

    #[test]
    fn construction_reports_every_bad_parameter() {
        let result = BankAccount::new(" ", "", Money::from_cents(-5), 1.5);
        match result {
            Err(Error::InvalidParameters(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected invalid parameters, got {other:?}"),
        }
    }

    #[test]
    fn describe_lists_all_fields() {
        let acct = account();
        assert_eq!(
            acct.describe(),
            "Account Number: ACC001\nAccount Holder: John Doe\nBalance: $1000.00\nInterest Rate: 2.00%\nStatus: Active"
        );
    }
}
