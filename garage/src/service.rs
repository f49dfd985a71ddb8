use chrono::NaiveDateTime;
use log::{debug, info};

use crate::error::{GarageFull, TicketError};
use crate::fee::{BilledPeriod, TimeScale};
use crate::rates::{Amount, RateTable};
use crate::state::{GarageState, SaleRecord, Ticket, TicketId};

/// Fee owed on a ticket at a given moment.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Quote {
    pub ticket: Ticket,
    pub quoted_at: NaiveDateTime,
    pub amount: Amount,
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SalesReport {
    pub records: Vec<SaleRecord>,
    pub total: Amount,
}

impl SalesReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Validates a ticket number typed by a customer.
pub fn parse_ticket_id(input: &str) -> Result<TicketId, TicketError> {
    match input.trim().parse::<TicketId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(TicketError::InvalidFormat(input.to_string())),
    }
}

/// Every state change of a garage goes through here.
#[derive(Debug, Clone)]
pub struct GarageService {
    state: GarageState,
    scale: TimeScale,
}

impl GarageService {
    pub fn new(state: GarageState, scale: TimeScale) -> Self {
        GarageService { state, scale }
    }

    pub fn state(&self) -> &GarageState {
        &self.state
    }

    pub fn time_scale(&self) -> TimeScale {
        self.scale
    }

    pub fn quote_rates(&self) -> RateTable {
        *self.state.rates()
    }

    /// Hands out the lowest numbered free space.
    pub fn issue_ticket(&mut self, now: NaiveDateTime) -> Result<Ticket, GarageFull> {
        match self.state.claim_lowest_space(now) {
            Some(ticket) => {
                info!("Issued ticket {} at {}", ticket.id, now);
                Ok(ticket)
            }
            None => {
                debug!("No free space for a ticket at {}", now);
                Err(GarageFull)
            }
        }
    }

    pub fn has_outstanding(&self) -> bool {
        !self.state.outstanding_tickets().is_empty()
    }

    pub fn quote(&self, id: TicketId, now: NaiveDateTime) -> Result<Quote, TicketError> {
        let ticket = *self
            .state
            .outstanding_tickets()
            .get(&id)
            .ok_or(TicketError::NotFound(id))?;

        let seconds = self.scale.scaled_seconds(ticket.issued_at, now);
        let period = BilledPeriod::from_seconds(seconds);
        let amount = period.charge(self.state.rates());
        debug!(
            "Ticket {} parked {} scaled seconds ({:?}), owes {}",
            id, seconds, period, amount
        );

        Ok(Quote {
            ticket,
            quoted_at: now,
            amount,
        })
    }

    pub fn quote_fee(&self, id: TicketId, now: NaiveDateTime) -> Result<Amount, TicketError> {
        self.quote(id, now).map(|quote| quote.amount)
    }

    /// Charges the fee quoted at `now` if `accepted`. A declined payment
    /// changes nothing and returns `Ok(None)`.
    pub fn settle_ticket(
        &mut self,
        id: TicketId,
        now: NaiveDateTime,
        accepted: bool,
    ) -> Result<Option<SaleRecord>, TicketError> {
        let quote = self.quote(id, now)?;
        if !accepted {
            debug!("Payment for ticket {} declined", id);
            return Ok(None);
        }

        let sale = SaleRecord {
            paid_at: now,
            amount: quote.amount,
        };
        self.state
            .release(id, sale)
            .ok_or(TicketError::NotFound(id))?;
        info!("Ticket {} paid {} at {}", id, sale.amount, now);

        Ok(Some(sale))
    }

    pub fn report_sales(&self) -> SalesReport {
        let records = self.state.sales().to_vec();
        let total = records
            .iter()
            .fold(Amount::ZERO, |total, sale| total.saturating_add(sale.amount));
        SalesReport { records, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_WEEK};
    use crate::rates::RateUnit;
    use chrono::{NaiveDate, TimeDelta};
    use rust_decimal_macros::dec;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn service(spaces: u32) -> GarageService {
        let state = GarageState::with_capacity(RateTable::default(), spaces).unwrap();
        GarageService::new(state, TimeScale::default())
    }

    fn free(service: &GarageService) -> Vec<u32> {
        service.state().free_spaces().iter().copied().collect()
    }

    #[test]
    fn test_garage_full() {
        let mut garage = service(3);
        for expected in 1..=3 {
            assert_eq!(garage.issue_ticket(start()).unwrap().id, expected);
        }
        assert_eq!(garage.issue_ticket(start()), Err(GarageFull));
        assert_eq!(garage.state().outstanding_tickets().len(), 3);
        assert!(free(&garage).is_empty());
    }

    #[test]
    fn test_issue_settle_scenario() {
        let mut garage = service(5);

        let ticket = garage.issue_ticket(start()).unwrap();
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.issued_at, start());
        assert_eq!(free(&garage), vec![2, 3, 4, 5]);

        assert_eq!(garage.quote_fee(1, start()), Ok(dec!(5.00)));
        let sale = garage.settle_ticket(1, start(), true).unwrap().unwrap();
        assert_eq!(sale.amount, dec!(5.00));
        assert_eq!(sale.paid_at, start());
        assert_eq!(free(&garage), vec![1, 2, 3, 4, 5]);

        let report = garage.report_sales();
        assert_eq!(report.records, vec![sale]);
        assert_eq!(report.total, dec!(5.00));
    }

    #[test]
    fn test_released_space_is_reissued_first() {
        let mut garage = service(3);
        garage.issue_ticket(start()).unwrap();
        garage.issue_ticket(start()).unwrap();
        garage.issue_ticket(start()).unwrap();

        garage.settle_ticket(2, start(), true).unwrap();
        assert_eq!(free(&garage), vec![2]);
        assert_eq!(garage.issue_ticket(start()).unwrap().id, 2);
    }

    #[test]
    fn test_decline_changes_nothing() {
        let mut garage = service(2);
        garage.issue_ticket(start()).unwrap();
        let later = start() + TimeDelta::seconds(25);

        for _ in 0..3 {
            assert_eq!(garage.settle_ticket(1, later, false), Ok(None));
        }
        assert!(garage.state().outstanding_tickets().contains_key(&1));
        assert_eq!(free(&garage), vec![2]);
        assert!(garage.report_sales().is_empty());

        let sale = garage.settle_ticket(1, later, true).unwrap().unwrap();
        assert_eq!(sale.amount, dec!(105));
    }

    #[test]
    fn test_fee_boundaries_at_accelerated_time() {
        let garage = {
            let mut garage = service(1);
            garage.issue_ticket(start()).unwrap();
            garage
        };
        let rates = garage.quote_rates();
        // One real second bills as one hour.
        let cases = [
            (SECONDS_PER_HOUR, rates.get(RateUnit::Hour)),
            (SECONDS_PER_DAY, rates.get(RateUnit::Day)),
            (SECONDS_PER_WEEK, rates.get(RateUnit::Week)),
            (
                SECONDS_PER_DAY + SECONDS_PER_HOUR,
                rates.get(RateUnit::Day) + rates.get(RateUnit::Hour),
            ),
        ];
        for (scaled, expected) in cases {
            let now = start() + TimeDelta::seconds(scaled / 3_600);
            assert_eq!(garage.quote_fee(1, now), Ok(expected), "{} seconds", scaled);
        }
    }

    #[test]
    fn test_real_time_scale() {
        let state = GarageState::with_capacity(RateTable::default(), 1).unwrap();
        let mut garage = GarageService::new(state, TimeScale::REAL_TIME);
        garage.issue_ticket(start()).unwrap();

        assert_eq!(
            garage.quote_fee(1, start() + TimeDelta::minutes(59)),
            Ok(dec!(5))
        );
        assert_eq!(
            garage.quote_fee(1, start() + TimeDelta::hours(3)),
            Ok(dec!(15))
        );
    }

    #[test]
    fn test_unknown_and_malformed_tickets() {
        let mut garage = service(2);
        garage.issue_ticket(start()).unwrap();
        let before = garage.state().outstanding_tickets().clone();

        assert_eq!(
            garage.settle_ticket(999, start(), true),
            Err(TicketError::NotFound(999))
        );
        assert_eq!(
            garage.quote_fee(2, start()),
            Err(TicketError::NotFound(2))
        );
        for input in ["abc", "", "-1", "0", "1.5"] {
            assert_eq!(
                parse_ticket_id(input),
                Err(TicketError::InvalidFormat(input.to_string()))
            );
        }
        assert_eq!(parse_ticket_id(" 1 "), Ok(1));

        assert_eq!(garage.state().outstanding_tickets(), &before);
        assert!(garage.report_sales().is_empty());
        assert_eq!(
            TicketError::NotFound(999).to_string(),
            TicketError::InvalidFormat("abc".into()).to_string()
        );
    }

    #[test]
    fn test_sales_report_in_order() {
        let mut garage = service(2);
        garage.issue_ticket(start()).unwrap();
        garage.issue_ticket(start()).unwrap();

        let first = start() + TimeDelta::seconds(2);
        let second = start() + TimeDelta::seconds(24);
        garage.settle_ticket(2, first, true).unwrap();
        garage.settle_ticket(1, second, true).unwrap();

        let report = garage.report_sales();
        let paid: Vec<_> = report.records.iter().map(|s| (s.paid_at, s.amount)).collect();
        assert_eq!(paid, vec![(first, dec!(10)), (second, dec!(100))]);
        assert_eq!(report.total, dec!(110));
    }
}
