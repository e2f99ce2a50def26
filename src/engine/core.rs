// 8.0 engine/core.rs: main engine. holds the curve state, both ledger handles, the
// audit log and the host-driven clock.

use super::config::EngineConfig;
use super::results::EngineError;
use crate::curve::BondingCurve;
use crate::events::{Event, EventEmitter, EventId, EventPayload};
use crate::ledger::{BalanceLedger, CollateralLedger};
use crate::math::U256;
use crate::state::{CurveState, Lifecycle};
use crate::types::{AccountId, Timestamp};
use tracing::{debug, info, warn};

/** 8.1: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine<B, C> {
    pub(super) config: EngineConfig,
    pub(super) curve: BondingCurve,
    pub(super) state: CurveState,
    // the curve's own identity on both ledgers: reserve holder and minter
    pub(super) identity: AccountId,
    pub(super) bonded: B,
    pub(super) collateral: C,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl<B: BalanceLedger, C: CollateralLedger> Engine<B, C> {
    /// Fails if the curve config is invalid (zero divisor, bad squarings).
    pub fn new(
        config: EngineConfig,
        identity: AccountId,
        owner: AccountId,
        bonded: B,
        collateral: C,
    ) -> Result<Self, EngineError> {
        let curve = BondingCurve::new(&config.curve)?;
        Ok(Self {
            config,
            curve,
            state: CurveState::new(owner),
            identity,
            bonded,
            collateral,
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        })
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn curve(&self) -> &BondingCurve {
        &self.curve
    }

    pub fn state(&self) -> &CurveState {
        &self.state
    }

    pub fn identity(&self) -> AccountId {
        self.identity
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn owner(&self) -> AccountId {
        self.state.owner
    }

    pub fn circulating_supply(&self) -> U256 {
        self.state.circulating_supply
    }

    /// Collateral currently held by the curve.
    pub fn reserve(&self) -> U256 {
        self.collateral.balance_of(self.identity)
    }

    pub fn bonded_ledger(&self) -> &B {
        &self.bonded
    }

    // host-side setup only: funding accounts, approvals, minter grants
    pub fn bonded_ledger_mut(&mut self) -> &mut B {
        &mut self.bonded
    }

    pub fn collateral_ledger(&self) -> &C {
        &self.collateral
    }

    pub fn collateral_ledger_mut(&mut self) -> &mut C {
        &mut self.collateral
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hands the retained log to an external sink and clears it. Ids keep counting.
    pub fn flush_events<E: EventEmitter>(&mut self, emitter: &mut E) {
        for event in self.events.drain(..) {
            emitter.emit(event);
        }
    }

    /// Ledger supply is the source of truth. The mirror is only written on success,
    /// so a divergence here means someone else minted or burned.
    pub(super) fn reconciled_supply(&self) -> U256 {
        let ledger_supply = self.bonded.total_supply();
        if self.state.initialized && ledger_supply != self.state.circulating_supply {
            warn!(
                mirror = %self.state.circulating_supply,
                ledger = %ledger_supply,
                "circulating supply diverged from ledger; pricing against ledger"
            );
        }
        ledger_supply
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            info!(event_id = event.id.0, payload = ?event.payload, "curve event");
        } else {
            debug!(event_id = event.id.0, payload = ?event.payload, "curve event");
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
