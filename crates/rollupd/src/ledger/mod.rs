//! In-memory application state and its deterministic transition functions.
//!
//! The [`Ledger`] owns every piece of mutable state: the payroll account, the
//! auction house, the uppercase counter projection, and the ether wallet. It
//! is mutated only through [`Ledger::apply`] (command lines) and
//! [`Ledger::deposit`] (portal deposits), both called from the dispatcher for
//! advance requests. Inspect requests only read through the accessors.
//!
//! Commands validate their arguments and preconditions before touching state,
//! so a returned [`DomainError`] always leaves the ledger exactly as it was.
//! Collections are ordered maps, which makes the serialized state of two
//! replicas fed the same requests byte-identical.

mod auction;
mod counter;
mod errors;
mod payroll;
mod wallet;

use std::fmt;

use serde::Serialize;

use crate::address::Address;

pub use self::auction::{Auction, AuctionHouse, Bid};
pub use self::counter::UpperCounter;
pub use self::errors::{DomainError, Entity};
pub use self::payroll::{Employee, INITIAL_COMPANY_BALANCE, Payroll};
pub use self::wallet::Wallet;

/// Request facts a command may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Account that submitted the request.
    pub sender: Address,
    /// Block timestamp of the request, in seconds.
    pub timestamp: u64,
}

/// Commands understood by [`Ledger::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `addFunds:<amount>`
    AddFunds,
    /// `salary:<employeeId>`
    Salary,
    /// `start:<itemId>:<startingBid>:<durationSecs>`
    Start,
    /// `bid:<itemId>:<bidder>:<amount>`
    Bid,
    /// `end:<itemId>`
    End,
    /// `upper:<sentence>`
    Upper,
    /// `withdraw:<amountWei>`
    Withdraw,
}

impl Command {
    /// Every command, in documentation order.
    pub const ALL: [Self; 7] = [
        Self::AddFunds,
        Self::Salary,
        Self::Start,
        Self::Bid,
        Self::End,
        Self::Upper,
        Self::Withdraw,
    ];

    /// Looks a command up by its exact wire name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownCommand`] for any other name, including
    /// names that differ only by case.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == name)
            .ok_or_else(|| DomainError::unknown_command(name))
    }

    /// Wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddFunds => "addFunds",
            Self::Salary => "salary",
            Self::Start => "start",
            Self::Bid => "bid",
            Self::End => "end",
            Self::Upper => "upper",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Ether leaving the application through a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    /// Account receiving the ether.
    pub receiver: Address,
    /// Amount in wei.
    pub amount: u128,
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Human-readable summary, published as a notice.
    pub notice: String,
    /// Withdrawal to publish as a voucher, if the command moved funds out.
    pub withdrawal: Option<Withdrawal>,
}

impl Transition {
    fn notice(notice: String) -> Self {
        Self {
            notice,
            withdrawal: None,
        }
    }
}

/// Whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    payroll: Payroll,
    auctions: AuctionHouse,
    counter: UpperCounter,
    wallet: Wallet,
}

impl Ledger {
    /// Builds the initial state every replica starts from.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one command line that has already been split on `:`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the command is unknown, an argument is
    /// missing or malformed, or a business rule forbids the transition. The
    /// ledger is unchanged in every error case.
    pub fn apply(
        &mut self,
        command: &str,
        args: &[&str],
        context: &Context,
    ) -> Result<Transition, DomainError> {
        let command = Command::parse(command)?;
        let mut args = Args::new(args);
        let notice = match command {
            Command::AddFunds => {
                let amount = args.amount("amount")?;
                args.finish()?;
                self.payroll.add_funds(amount)?
            }
            Command::Salary => {
                let employee = args.required("employee id")?;
                args.finish()?;
                self.payroll.distribute_salary(employee)?
            }
            Command::Start => {
                let item = args.required("item id")?;
                let starting_bid = args.amount("starting bid")?;
                let duration = args.amount("duration")?;
                args.finish()?;
                self.auctions
                    .start(item, starting_bid, duration, context.timestamp)?
            }
            Command::Bid => {
                let item = args.required("item id")?;
                let bidder = args.required("bidder")?;
                let amount = args.amount("bid amount")?;
                args.finish()?;
                self.auctions.bid(item, bidder, amount, context.timestamp)?
            }
            Command::End => {
                let item = args.required("item id")?;
                args.finish()?;
                self.auctions.end(item, context.timestamp)?
            }
            Command::Upper => {
                let sentence = args.rest("sentence")?;
                self.counter.upper(&sentence, context.sender)?
            }
            Command::Withdraw => {
                let amount = args.amount("withdrawal amount")?;
                args.finish()?;
                return self.wallet.withdraw(context.sender, amount);
            }
        };
        Ok(Transition::notice(notice))
    }

    /// Credits an ether deposit relayed by the portal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the credited balance would
    /// overflow.
    pub fn deposit(&mut self, depositor: Address, amount: u128) -> Result<String, DomainError> {
        self.wallet.deposit(depositor, amount)
    }

    /// Payroll account and roster.
    #[must_use]
    pub fn payroll(&self) -> &Payroll {
        &self.payroll
    }

    /// Live auctions.
    #[must_use]
    pub fn auctions(&self) -> &AuctionHouse {
        &self.auctions
    }

    /// Uppercase counter projection.
    #[must_use]
    pub fn counter(&self) -> &UpperCounter {
        &self.counter
    }

    /// Ether balances.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }
}

/// Positional argument cursor for one command.
struct Args<'a> {
    values: &'a [&'a str],
    position: usize,
}

impl<'a> Args<'a> {
    fn new(values: &'a [&'a str]) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let value = self.values.get(self.position).copied();
        self.position += 1;
        value
    }

    fn required(&mut self, name: &'static str) -> Result<&'a str, DomainError> {
        self.next()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(DomainError::MissingArgument { name })
    }

    fn amount<T: Amount>(&mut self, field: &'static str) -> Result<T, DomainError> {
        parse_amount(field, self.required(field)?)
    }

    /// Joins every remaining argument back together, restoring the `:`
    /// delimiters the splitter removed.
    fn rest(&mut self, name: &'static str) -> Result<String, DomainError> {
        let remaining = self.values.get(self.position..).unwrap_or_default();
        self.position = self.values.len();
        let joined = remaining.join(":");
        if joined.is_empty() {
            return Err(DomainError::MissingArgument { name });
        }
        Ok(joined)
    }

    fn finish(mut self) -> Result<(), DomainError> {
        match self.next() {
            Some(value) => Err(DomainError::UnexpectedArgument {
                value: value.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Unsigned integer types accepted as amounts.
trait Amount: Sized + std::str::FromStr + PartialEq {
    const ZERO: Self;
}

impl Amount for u64 {
    const ZERO: Self = 0;
}

impl Amount for u128 {
    const ZERO: Self = 0;
}

/// Parses a strictly positive decimal integer: digits only, no sign, no
/// fraction, no exponent.
fn parse_amount<T: Amount>(field: &'static str, raw: &str) -> Result<T, DomainError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(DomainError::invalid_amount(field, raw));
    }
    match raw.parse::<T>() {
        Ok(value) if value != T::ZERO => Ok(value),
        _ => Err(DomainError::invalid_amount(field, raw)),
    }
}
