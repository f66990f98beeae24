//! Timed English auctions keyed by item id.
//!
//! A bid must strictly exceed the current highest bid, so `highest_bid` never
//! decreases during an auction's lifetime. Bids are accepted while the request
//! timestamp is before `end_time`; ending is allowed from `end_time` onwards.

use std::collections::BTreeMap;

use serde::Serialize;

use super::errors::{DomainError, Entity};

/// One accepted bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bid {
    /// Bidder name as given in the command.
    pub bidder: String,
    /// Bid amount.
    pub amount: u64,
    /// Request timestamp at which the bid arrived.
    pub time: u64,
}

/// Live auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Auction {
    /// Unique item id.
    pub item_id: String,
    /// Minimum the first bid must exceed.
    pub starting_bid: u64,
    /// Current highest bid; equals `starting_bid` until someone bids.
    pub highest_bid: u64,
    /// Holder of the highest bid, if any.
    pub highest_bidder: Option<String>,
    /// First timestamp at which bids are refused.
    pub end_time: u64,
    /// Accepted bids in arrival order.
    pub bids: Vec<Bid>,
}

/// Set of live auctions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuctionHouse {
    live: BTreeMap<String, Auction>,
}

impl AuctionHouse {
    /// Looks up a live auction.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&Auction> {
        self.live.get(item_id)
    }

    /// Live auctions ordered by item id.
    pub fn iter(&self) -> impl Iterator<Item = &Auction> {
        self.live.values()
    }

    pub(super) fn start(
        &mut self,
        item_id: &str,
        starting_bid: u64,
        duration: u64,
        now: u64,
    ) -> Result<String, DomainError> {
        if self.live.contains_key(item_id) {
            return Err(DomainError::AuctionExists {
                item: item_id.to_owned(),
            });
        }
        let end_time = now
            .checked_add(duration)
            .ok_or_else(|| DomainError::invalid_amount("duration", duration.to_string()))?;
        self.live.insert(
            item_id.to_owned(),
            Auction {
                item_id: item_id.to_owned(),
                starting_bid,
                highest_bid: starting_bid,
                highest_bidder: None,
                end_time,
                bids: Vec::new(),
            },
        );
        Ok(format!(
            "Auction for {item_id} started with starting bid {starting_bid}, ending at {end_time}"
        ))
    }

    pub(super) fn bid(
        &mut self,
        item_id: &str,
        bidder: &str,
        amount: u64,
        now: u64,
    ) -> Result<String, DomainError> {
        let auction = self.live.get_mut(item_id).ok_or(DomainError::NotFound {
            entity: Entity::Auction,
        })?;
        if now >= auction.end_time {
            return Err(DomainError::AuctionExpired {
                item: item_id.to_owned(),
            });
        }
        if amount <= auction.highest_bid {
            return Err(DomainError::BidTooLow {
                amount,
                highest: auction.highest_bid,
            });
        }
        auction.highest_bid = amount;
        auction.highest_bidder = Some(bidder.to_owned());
        auction.bids.push(Bid {
            bidder: bidder.to_owned(),
            amount,
            time: now,
        });
        Ok(format!(
            "Bid of {amount} placed on {item_id} by {bidder}. Current highest bid is {amount}"
        ))
    }

    pub(super) fn end(&mut self, item_id: &str, now: u64) -> Result<String, DomainError> {
        let auction = self.live.get(item_id).ok_or(DomainError::NotFound {
            entity: Entity::Auction,
        })?;
        if now < auction.end_time {
            return Err(DomainError::AuctionNotYetEndable {
                item: item_id.to_owned(),
                end_time: auction.end_time,
            });
        }
        let Some(auction) = self.live.remove(item_id) else {
            return Err(DomainError::NotFound {
                entity: Entity::Auction,
            });
        };
        Ok(match auction.highest_bidder {
            Some(winner) => format!(
                "Auction for {item_id} ended. Winner: {winner} with bid {}",
                auction.highest_bid
            ),
            None => format!("Auction for {item_id} ended with no bids"),
        })
    }
}
