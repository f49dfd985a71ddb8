use futures::sink::SinkExt;
use log::{debug, info, warn};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_stream::StreamExt;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

pub mod command;
pub mod screen;

use attendant::{AttendantError, GarageHandle};
use garage::{Clock, GarageService, LocalClock, parse_ticket_id};

use crate::command::{MenuCommand, is_yes};
use crate::screen::{Screen, ScreenEncoder};

#[derive(Debug, Error)]
pub enum KioskError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read input: {0}")]
    Input(#[from] LinesCodecError),
    #[error(transparent)]
    Attendant(#[from] AttendantError),
}

/// Runs one interactive session on the process terminal.
pub async fn run(service: GarageService, clear: bool) -> Result<(), KioskError> {
    info!(
        "Garage open, one second bills as {} seconds",
        service.time_scale().multiplier()
    );
    let garage = attendant::spawn(service);

    Session::new(
        tokio::io::stdin(),
        tokio::io::stdout(),
        garage,
        Arc::new(LocalClock),
        clear,
    )
    .run()
    .await
}

pub struct Session<R, W> {
    reader: FramedRead<R, LinesCodec>,
    writer: FramedWrite<W, ScreenEncoder>,
    garage: GarageHandle,
    clock: Arc<dyn Clock>,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        input: R,
        output: W,
        garage: GarageHandle,
        clock: Arc<dyn Clock>,
        clear: bool,
    ) -> Self {
        Session {
            reader: FramedRead::new(input, LinesCodec::new()),
            writer: FramedWrite::new(output, ScreenEncoder::new(clear)),
            garage,
            clock,
        }
    }

    /// Prompts for commands until the customer quits or input ends.
    pub async fn run(mut self) -> Result<(), KioskError> {
        loop {
            self.show(Screen::MainMenu).await?;
            let Some(line) = self.next_line().await? else {
                debug!("Input closed");
                return Ok(());
            };

            let command = match line.parse::<MenuCommand>() {
                Ok(command) => command,
                Err(_) => {
                    self.show(Screen::InvalidCommand).await?;
                    continue;
                }
            };
            debug!("Command {:?}", command);
            self.show(Screen::Clear).await?;

            match command {
                MenuCommand::Rates => {
                    let rates = self.garage.rates().await?;
                    self.show(Screen::Rates(rates)).await?;
                }
                MenuCommand::Take => {
                    let taken = self.garage.take(self.clock.now()).await;
                    match taken {
                        Ok(ticket) => self.show(Screen::TicketIssued(ticket)).await?,
                        Err(AttendantError::Full(_)) => self.show(Screen::GarageFull).await?,
                        Err(e) => return Err(e.into()),
                    }
                }
                MenuCommand::Pay => self.pay().await?,
                MenuCommand::Sales => {
                    let report = self.garage.sales().await?;
                    self.show(Screen::Sales(report)).await?;
                }
                MenuCommand::Quit => {
                    self.show(Screen::Farewell).await?;
                    return Ok(());
                }
            }
        }
    }

    async fn pay(&mut self) -> Result<(), KioskError> {
        if !self.garage.has_outstanding().await? {
            return self.show(Screen::NoOutstandingTickets).await;
        }

        self.show(Screen::TicketNumberPrompt).await?;
        let line = self.next_line().await?.unwrap_or_default();
        // quote and charge at the same instant
        let now = self.clock.now();

        let quoted = match parse_ticket_id(&line) {
            Ok(id) => self.garage.quote(id, now).await,
            Err(e) => Err(e.into()),
        };
        let quote = match quoted {
            Ok(quote) => quote,
            Err(AttendantError::Ticket(e)) => {
                warn!("Rejected ticket {:?}: {:?}", line, e);
                return self.show(Screen::InvalidTicket).await;
            }
            Err(e) => return Err(e.into()),
        };

        self.show(Screen::ParkedTimes(quote)).await?;
        self.show(Screen::PaymentPrompt(quote.amount)).await?;
        let answer = self.next_line().await?.unwrap_or_default();

        let settled = self
            .garage
            .settle(quote.ticket.id, now, is_yes(&answer))
            .await;
        match settled {
            Ok(Some(_)) => self.show(Screen::PaymentConfirmed).await,
            Ok(None) => Ok(()),
            // settled from another session in the meantime
            Err(AttendantError::Ticket(_)) => self.show(Screen::InvalidTicket).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn next_line(&mut self) -> Result<Option<String>, KioskError> {
        Ok(self.reader.next().await.transpose()?)
    }

    async fn show(&mut self, screen: Screen) -> Result<(), KioskError> {
        self.writer.send(screen).await?;
        Ok(())
    }
}
