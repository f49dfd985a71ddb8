use chrono::NaiveDateTime;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigError;
use crate::rates::{Amount, RateTable};

pub type SpaceId = u32;

/// A ticket is numbered after the space it claims.
pub type TicketId = SpaceId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ticket {
    pub id: TicketId,
    pub issued_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SaleRecord {
    pub paid_at: NaiveDateTime,
    pub amount: Amount,
}

/// In-memory garage. A space is either free or held by exactly one
/// outstanding ticket, so `capacity == free + outstanding` at all times.
#[derive(Debug, Clone)]
pub struct GarageState {
    rates: RateTable,
    free_spaces: BTreeSet<SpaceId>,
    outstanding: BTreeMap<TicketId, Ticket>,
    sales: Vec<SaleRecord>,
}

impl GarageState {
    pub fn new(
        rates: RateTable,
        spaces: impl IntoIterator<Item = SpaceId>,
    ) -> Result<Self, ConfigError> {
        let mut free_spaces = BTreeSet::new();
        for space in spaces {
            if space == 0 {
                return Err(ConfigError::InvalidSpace(space));
            }
            if !free_spaces.insert(space) {
                return Err(ConfigError::DuplicateSpace(space));
            }
        }
        if free_spaces.is_empty() {
            return Err(ConfigError::NoSpaces);
        }
        debug!("Opening garage with {} spaces", free_spaces.len());

        Ok(GarageState {
            rates,
            free_spaces,
            outstanding: BTreeMap::new(),
            sales: vec![],
        })
    }

    /// Spaces numbered `1..=capacity`.
    pub fn with_capacity(rates: RateTable, capacity: u32) -> Result<Self, ConfigError> {
        GarageState::new(rates, 1..=capacity)
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn free_spaces(&self) -> &BTreeSet<SpaceId> {
        &self.free_spaces
    }

    pub fn outstanding_tickets(&self) -> &BTreeMap<TicketId, Ticket> {
        &self.outstanding
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn capacity(&self) -> usize {
        self.free_spaces.len() + self.outstanding.len()
    }

    pub(crate) fn claim_lowest_space(&mut self, issued_at: NaiveDateTime) -> Option<Ticket> {
        let id = self.free_spaces.pop_first()?;
        let ticket = Ticket { id, issued_at };
        self.outstanding.insert(id, ticket);
        Some(ticket)
    }

    pub(crate) fn release(&mut self, id: TicketId, sale: SaleRecord) -> Option<Ticket> {
        let ticket = self.outstanding.remove(&id)?;
        self.free_spaces.insert(id);
        self.sales.push(sale);
        Some(ticket)
    }
}
