//! Packed layouts exchanged with the ether portal and the application
//! contract.
//!
//! A deposit input is `depositor (20 bytes) ‖ amount (32 bytes, big endian)`
//! optionally followed by opaque execution-layer data. A withdrawal voucher
//! calls `withdrawEther(address,uint256)` on the application contract, so its
//! payload is the ABI selector followed by two 32-byte words.

use crate::address::{ADDRESS_LEN, Address};

use super::DecodeError;

/// Selector of `withdrawEther(address,uint256)`.
pub const WITHDRAW_ETHER_SELECTOR: [u8; 4] = [0x52, 0x2f, 0x68, 0x15];

const WORD_LEN: usize = 32;
const DEPOSIT_HEADER_LEN: usize = ADDRESS_LEN + WORD_LEN;

/// Ether deposit relayed by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtherDeposit {
    /// Account credited with the deposit.
    pub depositor: Address,
    /// Amount in wei.
    pub amount: u128,
}

/// Decodes a portal deposit payload.
///
/// # Errors
///
/// Returns [`DecodeError::Deposit`] when the payload is shorter than the fixed
/// header or the amount does not fit in 128 bits.
pub fn decode_ether_deposit(payload: &[u8]) -> Result<EtherDeposit, DecodeError> {
    if payload.len() < DEPOSIT_HEADER_LEN {
        return Err(DecodeError::deposit(format!(
            "expected at least {DEPOSIT_HEADER_LEN} bytes, got {}",
            payload.len()
        )));
    }
    let (depositor, rest) = payload.split_at(ADDRESS_LEN);
    let depositor = Address::from_slice(depositor)
        .map_err(|error| DecodeError::deposit(error.to_string()))?;
    let (word, _exec_layer_data) = rest.split_at(WORD_LEN);
    let amount = word_to_u128(word)?;
    Ok(EtherDeposit { depositor, amount })
}

/// Encodes the voucher payload that withdraws `amount` wei to `receiver`.
#[must_use]
pub fn encode_ether_withdrawal(receiver: &Address, amount: u128) -> Vec<u8> {
    let mut payload = Vec::with_capacity(WITHDRAW_ETHER_SELECTOR.len() + 2 * WORD_LEN);
    payload.extend_from_slice(&WITHDRAW_ETHER_SELECTOR);
    payload.extend_from_slice(&[0_u8; WORD_LEN - ADDRESS_LEN]);
    payload.extend_from_slice(receiver.as_bytes());
    payload.extend_from_slice(&[0_u8; WORD_LEN - 16]);
    payload.extend_from_slice(&amount.to_be_bytes());
    payload
}

fn word_to_u128(word: &[u8]) -> Result<u128, DecodeError> {
    let (high, low) = word.split_at(WORD_LEN - 16);
    if high.iter().any(|byte| *byte != 0) {
        return Err(DecodeError::deposit("amount exceeds 128 bits"));
    }
    let low: [u8; 16] = low
        .try_into()
        .map_err(|_| DecodeError::deposit("amount word truncated"))?;
    Ok(u128::from_be_bytes(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depositor() -> Address {
        Address::new([0x11; ADDRESS_LEN])
    }

    fn deposit_payload(amount: u128, extra: &[u8]) -> Vec<u8> {
        let mut payload = depositor().as_bytes().to_vec();
        payload.extend_from_slice(&[0_u8; 16]);
        payload.extend_from_slice(&amount.to_be_bytes());
        payload.extend_from_slice(extra);
        payload
    }

    #[test]
    fn decodes_deposit_and_ignores_exec_layer_data() {
        let deposit =
            decode_ether_deposit(&deposit_payload(1_000_000, b"memo")).expect("decode deposit");
        assert_eq!(deposit.depositor, depositor());
        assert_eq!(deposit.amount, 1_000_000);
    }

    #[test]
    fn rejects_short_deposit() {
        let result = decode_ether_deposit(&[0_u8; 40]);
        assert!(matches!(result, Err(DecodeError::Deposit { .. })));
    }

    #[test]
    fn rejects_amount_beyond_u128() {
        let mut payload = deposit_payload(0, &[]);
        payload[ADDRESS_LEN] = 1;
        let result = decode_ether_deposit(&payload);
        assert!(matches!(result, Err(DecodeError::Deposit { .. })));
    }

    #[test]
    fn withdrawal_payload_is_abi_encoded() {
        let payload = encode_ether_withdrawal(&depositor(), 258);
        assert_eq!(payload.len(), 4 + 64);
        assert_eq!(&payload[..4], &WITHDRAW_ETHER_SELECTOR);
        assert!(payload[4..16].iter().all(|byte| *byte == 0));
        assert_eq!(&payload[16..36], depositor().as_bytes());
        assert_eq!(&payload[66..], &[1, 2]);
    }
}
