use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use garage::{Amount, Quote, RateTable, SalesReport, TIMESTAMP_FORMAT, Ticket};

const CLEAR_TERMINAL: &[u8] = b"\x1b[2J\x1b[;H";
const UNDERLINE: &str = "\x1b[04m";
const PLAIN: &str = "\x1b[0m";

/// Everything the kiosk can show a customer.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Screen {
    Clear,
    MainMenu,
    Rates(RateTable),
    TicketIssued(Ticket),
    GarageFull,
    NoOutstandingTickets,
    TicketNumberPrompt,
    InvalidTicket,
    ParkedTimes(Quote),
    PaymentPrompt(Amount),
    PaymentConfirmed,
    Sales(SalesReport),
    InvalidCommand,
    Farewell,
}

fn price(amount: Amount) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn put_str(dst: &mut BytesMut, s: &str) {
    dst.reserve(s.len());
    dst.put_slice(s.as_bytes());
}

fn put_line(dst: &mut BytesMut, s: &str) {
    put_str(dst, s);
    dst.put_u8(b'\n');
}

pub struct ScreenEncoder {
    clear: bool,
}

impl ScreenEncoder {
    /// `clear` controls whether [`Screen::Clear`] emits the ANSI clear sequence.
    pub fn new(clear: bool) -> Self {
        ScreenEncoder { clear }
    }
}

impl Encoder<Screen> for ScreenEncoder {
    type Error = std::io::Error;

    fn encode(&mut self, item: Screen, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Screen::Clear => {
                if self.clear {
                    dst.extend_from_slice(CLEAR_TERMINAL);
                }
            }
            Screen::MainMenu => {
                // sales is left off on purpose
                let hotkey = |key: &str, rest: &str| format!("{UNDERLINE}{key}{PLAIN}{rest}");
                put_str(
                    dst,
                    &format!(
                        "Would you like to see {}, {}, {} or {}? ",
                        hotkey("R", "ates"),
                        hotkey("T", "ake Ticket"),
                        hotkey("P", "ay Ticket"),
                        hotkey("Q", "uit"),
                    ),
                );
            }
            Screen::Rates(rates) => {
                put_line(dst, "Parking Rates:");
                for (unit, amount) in rates.iter() {
                    put_line(dst, &format!("\t- ${} per {}.", price(amount), unit));
                }
                put_line(dst, "Note: 1 hour minimum.");
            }
            Screen::TicketIssued(ticket) => {
                put_line(
                    dst,
                    &format!(
                        "Your ticket # is: {}. Time In: {}\n",
                        ticket.id,
                        ticket.issued_at.format(TIMESTAMP_FORMAT)
                    ),
                );
            }
            Screen::GarageFull => {
                put_line(
                    dst,
                    "Unfortunately the parking garage is full. Please try again later.\n",
                );
            }
            Screen::NoOutstandingTickets => {
                put_line(dst, "There aren't any outstanding tickets. Please try again.");
            }
            Screen::TicketNumberPrompt => put_str(dst, "Please enter your ticket number: "),
            Screen::InvalidTicket => {
                put_line(
                    dst,
                    "You have entered an invalid ticket number. Please try again.\n",
                );
            }
            Screen::ParkedTimes(quote) => {
                put_line(
                    dst,
                    &format!(
                        "Time In: {}",
                        quote.ticket.issued_at.format(TIMESTAMP_FORMAT)
                    ),
                );
                put_line(
                    dst,
                    &format!("Time Out: {}", quote.quoted_at.format(TIMESTAMP_FORMAT)),
                );
            }
            Screen::PaymentPrompt(amount) => put_str(
                dst,
                &format!(
                    "Your total cost for parking is ${}. Would you like to pay? (Yes/No) ",
                    price(amount)
                ),
            ),
            Screen::PaymentConfirmed => {
                put_line(dst, "Payment confirmed.");
                put_line(dst, "Please proceed to the nearest exit.\n");
            }
            Screen::Sales(report) => {
                if report.is_empty() {
                    put_line(dst, "You haven't made any sales today. Get back to work!");
                } else {
                    put_line(dst, "Sales:");
                    for sale in &report.records {
                        put_line(
                            dst,
                            &format!(
                                "{} ${}",
                                sale.paid_at.format(TIMESTAMP_FORMAT),
                                price(sale.amount)
                            ),
                        );
                    }
                    put_line(dst, &format!("Total Sales: ${}.", price(report.total)));
                }
            }
            Screen::InvalidCommand => {
                put_line(dst, "You did not enter a valid command. Please try again.");
            }
            Screen::Farewell => {
                put_line(dst, "Thanks for using the parking garage. Have a nice day!");
            }
        }
        Ok(())
    }
}
