//! Business-rule failures raised by ledger commands.
//!
//! Each variant's display text is what the operator sees in the diagnostic
//! report attached to a rejected request.

use std::fmt;

use thiserror::Error;

/// Entity kinds that a lookup can fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A payroll employee.
    Employee,
    /// A live auction.
    Auction,
}

impl fmt::Display for Entity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Employee => "Employee",
            Self::Auction => "Auction",
        };
        formatter.write_str(label)
    }
}

/// Typed failure of a ledger command. State is untouched whenever one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound { entity: Entity },

    /// The debited account cannot cover the amount.
    #[error("insufficient funds: balance {balance} cannot cover {requested}")]
    InsufficientFunds { balance: u128, requested: u128 },

    /// A numeric argument was not a positive integer in range.
    #[error("invalid amount for {field}: '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    /// The auction stopped accepting bids.
    #[error("auction {item} has expired")]
    AuctionExpired { item: String },

    /// The auction is still running.
    #[error("auction {item} cannot end before {end_time}")]
    AuctionNotYetEndable { item: String, end_time: u64 },

    /// The bid does not beat the current highest bid.
    #[error("bid too low: {amount} does not exceed current highest bid {highest}")]
    BidTooLow { amount: u64, highest: u64 },

    /// An auction with the same item id is already live.
    #[error("auction {item} already exists")]
    AuctionExists { item: String },

    /// The command name is not one the ledger understands.
    #[error("unknown command: '{command}'")]
    UnknownCommand { command: String },

    /// A required positional argument was absent or empty.
    #[error("missing argument: {name}")]
    MissingArgument { name: &'static str },

    /// More positional arguments were supplied than the command takes.
    #[error("unexpected argument: '{value}'")]
    UnexpectedArgument { value: String },

    /// The sentence given to `upper` is a number rather than text.
    #[error("sentence is not text: '{sentence}'")]
    InvalidText { sentence: String },
}

impl DomainError {
    /// Creates an invalid amount error.
    pub fn invalid_amount(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field,
            value: value.into(),
        }
    }

    /// Creates an insufficient funds error.
    pub fn insufficient_funds(balance: impl Into<u128>, requested: impl Into<u128>) -> Self {
        Self::InsufficientFunds {
            balance: balance.into(),
            requested: requested.into(),
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }
}
