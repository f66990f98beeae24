//! Request dispatch onto the application ledger.
//!
//! The sequencer hands the runtime one request at a time. This module parses
//! the request envelope, decodes its payload, routes it to the ledger, and
//! collects the resulting outputs together with a verdict.
//!
//! ## Advance requests
//!
//! Payloads are hex-encoded UTF-8 command lines:
//!
//! ```text
//! addFunds:1000
//! bid:item1:alice:150
//! ```
//!
//! A successful command yields a notice (preceded by a voucher when funds
//! leave the application) and an `accept` verdict. Any decode or domain error
//! yields a single report carrying the error text and a `reject` verdict.
//! Inputs relayed by the ether portal are decoded as deposits instead.
//!
//! ## Inspect requests
//!
//! Payloads are route strings (`List`, `total`, `balance/<address>`,
//! `company`, `auctions`). The answer is always one report; inspect requests
//! never carry a verdict and never change state.

mod errors;
mod inspect;
mod request;
mod response;
mod router;

pub use self::errors::DispatchError;
pub use self::inspect::{InspectRoute, ROUTE_NOT_IMPLEMENTED};
pub use self::request::{AdvanceRequest, InspectRequest, Metadata, RequestKind, RollupRequest};
pub use self::response::{DispatchOutcome, Output, OutputKind, Verdict};
pub use self::router::{COMMAND_DELIMITER, Contracts, Dispatcher};
