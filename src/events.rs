// 11.0: every state change produces an event. used for audit trails and for
// notifying external systems. the EventPayload enum lists all event types.

use crate::math::{self, U256};
use crate::types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Lifecycle events
    CurveActivated(CurveActivatedEvent),
    CurveShutDown(CurveShutDownEvent),
    OwnershipTransferred(OwnershipTransferredEvent),

    // Trade events
    Minted(MintedEvent),
    Redeemed(RedeemedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveActivatedEvent {
    pub initializer: AccountId,
    #[serde(with = "math::u256_dec")]
    pub pre_mint_supply: U256,
    #[serde(with = "math::u256_dec")]
    pub collateral_deposited: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveShutDownEvent {
    pub by: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: AccountId,
    pub new_owner: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintedEvent {
    pub payer: AccountId,
    pub recipient: AccountId,
    #[serde(with = "math::u256_dec")]
    pub amount: U256,
    #[serde(with = "math::u256_dec")]
    pub collateral_spent: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemedEvent {
    pub account: AccountId,
    #[serde(with = "math::u256_dec")]
    pub amount: U256,
    #[serde(with = "math::u256_dec")]
    pub collateral_returned: U256,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

/// Sink that keeps everything it is handed, in order.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
