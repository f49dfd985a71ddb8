use thiserror::Error;

use crate::rates::RateUnit;
use crate::state::{SpaceId, TicketId};

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("the parking garage is full")]
pub struct GarageFull;

/// Unknown and unparsable ticket numbers are reported identically to the
/// customer; the variants only exist so logs can tell them apart.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TicketError {
    #[error("invalid ticket number")]
    NotFound(TicketId),
    #[error("invalid ticket number")]
    InvalidFormat(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("the {0} rate must be greater than zero")]
    NonPositiveRate(RateUnit),
    #[error("the {0} rate is above the {max} ceiling", max = crate::rates::MAX_RATE)]
    RateTooHigh(RateUnit),
    #[error("a garage needs at least one parking space")]
    NoSpaces,
    #[error("space {0} is not a positive identifier")]
    InvalidSpace(SpaceId),
    #[error("space {0} is listed more than once")]
    DuplicateSpace(SpaceId),
    #[error("the time scale must be at least 1")]
    InvalidTimeScale,
}
