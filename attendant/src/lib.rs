use chrono::NaiveDateTime;
use log::error;
use thiserror::Error;
use tokio::sync::mpsc::{self, Sender};
use tokio::sync::oneshot;

mod manager;

use garage::{
    GarageFull, GarageService, Quote, RateTable, SaleRecord, SalesReport, Ticket, TicketError,
    TicketId,
};

pub use crate::manager::{GarageCommand, manager};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AttendantError {
    #[error(transparent)]
    Full(#[from] GarageFull),
    #[error(transparent)]
    Ticket(#[from] TicketError),
    #[error("the garage attendant has stopped")]
    Closed,
}

/// Starts the manager task for `service` and returns a handle to it.
/// Must be called from within a tokio runtime.
pub fn spawn(service: GarageService) -> GarageHandle {
    let (manager_tx, manager_rx) = mpsc::channel::<GarageCommand>(100);

    tokio::spawn(async move {
        manager(manager_rx, service).await;
    });

    GarageHandle { tx: manager_tx }
}

/// Cloneable access to one garage shared by any number of sessions.
#[derive(Clone)]
pub struct GarageHandle {
    tx: Sender<GarageCommand>,
}

impl GarageHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> GarageCommand,
    ) -> Result<T, AttendantError> {
        let (reply_tx, reply_rx) = oneshot::channel::<T>();
        if self.tx.send(command(reply_tx)).await.is_err() {
            error!("Garage manager is not running");
            return Err(AttendantError::Closed);
        }
        reply_rx.await.map_err(|_| AttendantError::Closed)
    }

    pub async fn rates(&self) -> Result<RateTable, AttendantError> {
        self.request(GarageCommand::Rates).await
    }

    pub async fn take(&self, now: NaiveDateTime) -> Result<Ticket, AttendantError> {
        Ok(self
            .request(|reply| GarageCommand::Take(now, reply))
            .await??)
    }

    pub async fn has_outstanding(&self) -> Result<bool, AttendantError> {
        self.request(GarageCommand::HasOutstanding).await
    }

    pub async fn quote(&self, id: TicketId, now: NaiveDateTime) -> Result<Quote, AttendantError> {
        Ok(self
            .request(|reply| GarageCommand::Quote(id, now, reply))
            .await??)
    }

    pub async fn settle(
        &self,
        id: TicketId,
        now: NaiveDateTime,
        accepted: bool,
    ) -> Result<Option<SaleRecord>, AttendantError> {
        Ok(self
            .request(|reply| GarageCommand::Settle(id, now, accepted, reply))
            .await??)
    }

    pub async fn sales(&self) -> Result<SalesReport, AttendantError> {
        self.request(GarageCommand::Sales).await
    }
}
