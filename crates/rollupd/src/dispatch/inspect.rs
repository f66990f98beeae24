//! Read-only inspect routes.

use serde_json::{Value, json};

use crate::address::Address;
use crate::codec;
use crate::ledger::Ledger;

use super::errors::DispatchError;

/// Answer for routes nobody serves.
pub const ROUTE_NOT_IMPLEMENTED: &str = "route not implemented";

const BALANCE_PREFIX: &str = "balance/";

/// Parsed inspect route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectRoute {
    /// `List`: senders that used `upper`.
    Users,
    /// `total`: number of accepted `upper` commands.
    Total,
    /// `balance/<address>`: wallet balance in wei.
    Balance(Address),
    /// `company`: payroll account and roster.
    Company,
    /// `auctions`: live auctions.
    Auctions,
    /// Anything else.
    Unknown(String),
}

impl InspectRoute {
    /// Parses a decoded route string. Route names are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidRoute`] when a `balance/` route carries
    /// something other than an address.
    pub fn parse(route: &str) -> Result<Self, DispatchError> {
        let route = route.trim();
        if let Some(owner) = route.strip_prefix(BALANCE_PREFIX) {
            return owner.parse().map(Self::Balance).map_err(|error| {
                DispatchError::invalid_route(format!("{owner:?} is not an address: {error}"))
            });
        }
        Ok(match route {
            "List" => Self::Users,
            "total" => Self::Total,
            "company" => Self::Company,
            "auctions" => Self::Auctions,
            other => Self::Unknown(other.to_owned()),
        })
    }

    /// Renders the answer for this route against the current state.
    #[must_use]
    pub fn answer(&self, ledger: &Ledger) -> Vec<u8> {
        match self {
            Self::Users => codec::encode_json(&json!({ "user": ledger.counter().users() })),
            Self::Total => codec::encode_json(&json!({ "toUpperTotal": ledger.counter().total() })),
            Self::Balance(owner) => ledger.wallet().balance_of(owner).to_string().into_bytes(),
            Self::Company => codec::encode_json(&company(ledger)),
            Self::Auctions => {
                let auctions: Vec<_> = ledger.auctions().iter().collect();
                codec::encode_json(&json!(auctions))
            }
            Self::Unknown(_) => codec::encode_text(ROUTE_NOT_IMPLEMENTED),
        }
    }
}

fn company(ledger: &Ledger) -> Value {
    let employees: Vec<Value> = ledger
        .payroll()
        .employees()
        .iter()
        .map(|(id, employee)| {
            json!({
                "id": id,
                "name": employee.name,
                "salary": employee.salary,
                "paid": employee.paid,
            })
        })
        .collect();
    json!({
        "balance": ledger.payroll().balance(),
        "employees": employees,
    })
}
