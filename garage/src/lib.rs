pub mod clock;
pub mod error;
pub mod fee;
pub mod rates;
pub mod service;
pub mod state;

pub use clock::{Clock, LocalClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use error::{ConfigError, GarageFull, TicketError};
pub use fee::{BilledPeriod, TimeScale};
pub use rates::{Amount, MAX_RATE, RateTable, RateUnit};
pub use service::{GarageService, Quote, SalesReport, parse_ticket_id};
pub use state::{GarageState, SaleRecord, SpaceId, Ticket, TicketId};

/// Rendering used for every timestamp shown to a customer.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
