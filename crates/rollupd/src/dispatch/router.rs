//! Routing of sequencer requests onto the ledger.
//!
//! Advance requests sent by the ether portal are deposits. Any other advance
//! payload is either a JSON withdrawal call such as
//! `{"method":"ether_withdraw","amount":"2000"}` or a UTF-8 command line of
//! the form `command:arg1:arg2...`. Inspect payloads are route strings
//! answered from the current state.

use serde_json::Value;
use tracing::{debug, warn};

use crate::address::Address;
use crate::codec::{self, portal};
use crate::ledger::{Command, Context, Ledger};

use super::errors::DispatchError;
use super::inspect::InspectRoute;
use super::request::{AdvanceRequest, InspectRequest, RollupRequest};
use super::response::{DispatchOutcome, Output};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Separator between a command and its arguments.
pub const COMMAND_DELIMITER: char = ':';

/// `method` value of a JSON withdrawal call.
pub const ETHER_WITHDRAW_METHOD: &str = "ether_withdraw";

/// On-chain contracts the dispatcher needs to recognise or address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contracts {
    /// Portal whose inputs are ether deposits.
    pub ether_portal: Address,
    /// Application contract that executes withdrawal vouchers.
    pub dapp: Address,
}

/// Owns the ledger and turns each request into a verdict and outputs.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ledger: Ledger,
    contracts: Contracts,
}

impl Dispatcher {
    /// Creates a dispatcher over a fresh ledger.
    #[must_use]
    pub fn new(contracts: Contracts) -> Self {
        Self {
            ledger: Ledger::new(),
            contracts,
        }
    }

    /// Current application state.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Handles one request. Never fails: every error becomes a report.
    pub fn dispatch(&mut self, request: &RollupRequest) -> DispatchOutcome {
        match request {
            RollupRequest::Advance(advance) => self.advance(advance),
            RollupRequest::Inspect(inspect) => self.inspect(inspect),
        }
    }

    fn advance(&mut self, request: &AdvanceRequest) -> DispatchOutcome {
        match self.try_advance(request) {
            Ok(outputs) => {
                debug!(
                    target: DISPATCH_TARGET,
                    input_index = request.metadata.input_index,
                    outputs = outputs.len(),
                    "advance request accepted"
                );
                DispatchOutcome::accepted(outputs)
            }
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    input_index = request.metadata.input_index,
                    sender = %request.metadata.msg_sender,
                    %error,
                    "advance request rejected"
                );
                DispatchOutcome::rejected(&error)
            }
        }
    }

    fn try_advance(&mut self, request: &AdvanceRequest) -> Result<Vec<Output>, DispatchError> {
        let payload = codec::decode_hex(&request.payload)?;
        let sender = request.metadata.msg_sender;

        if sender == self.contracts.ether_portal {
            let deposit = portal::decode_ether_deposit(&payload)?;
            let notice = self.ledger.deposit(deposit.depositor, deposit.amount)?;
            return Ok(vec![Output::notice(codec::encode_text(&notice))]);
        }

        let context = Context {
            sender,
            timestamp: request.metadata.timestamp,
        };
        let transition = if let Some(amount) = json_withdrawal(&payload) {
            let amount = amount?;
            self.ledger
                .apply(Command::Withdraw.as_str(), &[amount.as_str()], &context)?
        } else {
            let line = codec::decode_text(&payload)?;
            let mut parts = line.trim().split(COMMAND_DELIMITER);
            let command = parts.next().unwrap_or_default();
            let args: Vec<&str> = parts.collect();
            self.ledger.apply(command, &args, &context)?
        };

        let mut outputs = Vec::with_capacity(2);
        if let Some(withdrawal) = transition.withdrawal {
            outputs.push(Output::Voucher {
                destination: self.contracts.dapp,
                payload: portal::encode_ether_withdrawal(&withdrawal.receiver, withdrawal.amount),
            });
        }
        outputs.push(Output::notice(codec::encode_text(&transition.notice)));
        Ok(outputs)
    }

    fn inspect(&self, request: &InspectRequest) -> DispatchOutcome {
        let answer = codec::decode_hex(&request.payload)
            .and_then(|bytes| codec::decode_text(&bytes))
            .map_err(DispatchError::from)
            .and_then(|route| InspectRoute::parse(&route));
        let body = match answer {
            Ok(route) => {
                debug!(target: DISPATCH_TARGET, ?route, "answering inspect request");
                route.answer(&self.ledger)
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "inspect request not understood");
                error.to_string().into_bytes()
            }
        };
        DispatchOutcome::informational(vec![Output::report(body)])
    }
}

/// Extracts the amount of a JSON `ether_withdraw` call.
///
/// Returns `None` when the payload is not such a call, so it is read as a
/// command line instead. Amounts may be decimal strings or JSON integers.
fn json_withdrawal(payload: &[u8]) -> Option<Result<String, DispatchError>> {
    let value = codec::decode_json(payload).ok()?;
    if value.get("method").and_then(Value::as_str) != Some(ETHER_WITHDRAW_METHOD) {
        return None;
    }
    let amount = match value.get("amount") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) if number.is_u64() => Ok(number.to_string()),
        Some(_) => Err(DispatchError::malformed(
            "ether_withdraw amount must be a decimal string or an unsigned integer",
        )),
        None => Err(DispatchError::malformed("ether_withdraw requires an amount")),
    };
    Some(amount)
}
