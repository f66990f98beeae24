//! Ether balances credited by portal deposits and debited by withdrawals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::address::Address;

use super::errors::DomainError;
use super::{Transition, Withdrawal};

/// Per-account ether balances in wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Wallet {
    balances: BTreeMap<Address, u128>,
}

impl Wallet {
    /// Balance held for `owner`; zero for unknown accounts.
    #[must_use]
    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub(super) fn deposit(&mut self, depositor: Address, amount: u128) -> Result<String, DomainError> {
        let balance = self
            .balance_of(&depositor)
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_amount("deposit", amount.to_string()))?;
        self.balances.insert(depositor, balance);
        Ok(format!(
            "Deposited {amount} wei to {depositor}. New balance: {balance}"
        ))
    }

    pub(super) fn withdraw(&mut self, owner: Address, amount: u128) -> Result<Transition, DomainError> {
        let current = self.balance_of(&owner);
        let balance = current
            .checked_sub(amount)
            .ok_or_else(|| DomainError::insufficient_funds(current, amount))?;
        self.balances.insert(owner, balance);
        Ok(Transition {
            notice: format!("Withdrew {amount} wei for {owner}. Remaining balance: {balance}"),
            withdrawal: Some(Withdrawal {
                receiver: owner,
                amount,
            }),
        })
    }
}
