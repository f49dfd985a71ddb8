use chrono::NaiveDateTime;
use log::debug;
use tokio::sync::mpsc::Receiver;
use tokio::sync::oneshot;

use garage::{
    GarageFull, GarageService, Quote, RateTable, SaleRecord, SalesReport, Ticket, TicketError,
    TicketId,
};

pub enum GarageCommand {
    Rates(oneshot::Sender<RateTable>),
    Take(NaiveDateTime, oneshot::Sender<Result<Ticket, GarageFull>>),
    HasOutstanding(oneshot::Sender<bool>),
    Quote(
        TicketId,
        NaiveDateTime,
        oneshot::Sender<Result<Quote, TicketError>>,
    ),
    Settle(
        TicketId,
        NaiveDateTime,
        bool, // payment accepted
        oneshot::Sender<Result<Option<SaleRecord>, TicketError>>,
    ),
    Sales(oneshot::Sender<SalesReport>),
}

/// Owns the garage and applies commands one at a time, so no caller can see
/// a space that is neither free nor ticketed.
pub async fn manager(mut rx: Receiver<GarageCommand>, mut service: GarageService) {
    while let Some(command) = rx.recv().await {
        // A dropped reply channel means the caller gave up; the work stands.
        match command {
            GarageCommand::Rates(reply) => {
                let _ = reply.send(service.quote_rates());
            }
            GarageCommand::Take(now, reply) => {
                let _ = reply.send(service.issue_ticket(now));
            }
            GarageCommand::HasOutstanding(reply) => {
                let _ = reply.send(service.has_outstanding());
            }
            GarageCommand::Quote(id, now, reply) => {
                let _ = reply.send(service.quote(id, now));
            }
            GarageCommand::Settle(id, now, accepted, reply) => {
                let _ = reply.send(service.settle_ticket(id, now, accepted));
            }
            GarageCommand::Sales(reply) => {
                let _ = reply.send(service.report_sales());
            }
        }
    }
    debug!("All garage handles dropped, closing the garage");
}
