//! Post-generation integrity checks over the in-memory dataset.
//!
//! Runs after generation and before serialization when requested. Any issue
//! is fatal for the run: the pipeline is supposed to make these conditions
//! impossible, so a hit means a generation bug, not bad input.

use crate::catalog::VENUES;
use crate::generator::tickets::SESSION_SEAT_CAP;
use crate::model::{Dataset, ListingType, TradeRole, REASON_TRADE_PAYMENT};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use std::fmt;

/// Maximum number of issues to collect before stopping.
const MAX_ISSUES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single integrity violation.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub issues: Vec<Issue>,
}

impl Report {
    fn push(&mut self, issue: Issue) {
        if self.issues.len() < MAX_ISSUES {
            self.issues.push(issue);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run every check and collect the findings.
pub fn check(data: &Dataset) -> Report {
    let mut report = Report::default();
    check_tickets(data, &mut report);
    check_listings(data, &mut report);
    check_trades(data, &mut report);
    check_balance_logs(data, &mut report);
    report
}

/// Session references, per-session seat uniqueness, and capacity ceilings.
fn check_tickets(data: &Dataset, report: &mut Report) {
    let session_index: AHashMap<i64, usize> = data
        .sessions
        .iter()
        .enumerate()
        .map(|(i, s)| (s.eventtime_id, i))
        .collect();

    let mut seats_per_session: AHashMap<i64, AHashSet<(&str, u16)>> = AHashMap::new();
    for ticket in &data.tickets {
        if !session_index.contains_key(&ticket.eventtime_id) {
            report.push(Issue::error(
                "TICKET_SESSION_FK",
                format!(
                    "ticket {} references missing session {}",
                    ticket.ticket_id, ticket.eventtime_id
                ),
            ));
            continue;
        }
        let seats = seats_per_session.entry(ticket.eventtime_id).or_default();
        if !seats.insert((ticket.seat_area, ticket.seat_number)) {
            report.push(Issue::error(
                "SEAT_DUPLICATE",
                format!(
                    "session {} has seat {} {} assigned twice",
                    ticket.eventtime_id, ticket.seat_area, ticket.seat_number
                ),
            ));
        }
    }

    for session in &data.sessions {
        let ceiling =
            (VENUES[session.venue_idx].capacity as usize).min(SESSION_SEAT_CAP);
        let count = seats_per_session
            .get(&session.eventtime_id)
            .map(|s| s.len())
            .unwrap_or(0);
        if count > ceiling {
            report.push(Issue::error(
                "SEAT_CEILING",
                format!(
                    "session {} holds {count} tickets, ceiling is {ceiling}",
                    session.eventtime_id
                ),
            ));
        }
    }
}

/// Sell/Exchange posts must offer tickets the poster owns, bound to the
/// listed event; Buy posts must not carry tickets.
fn check_listings(data: &Dataset, report: &mut Report) {
    let ticket_index: AHashMap<i64, usize> = data
        .tickets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.ticket_id, i))
        .collect();
    let session_event: AHashMap<i64, i64> = data
        .sessions
        .iter()
        .map(|s| (s.eventtime_id, s.event_id))
        .collect();

    for listing in &data.listings {
        match (&listing.offered_ticket_ids, listing.kind) {
            (Some(_), ListingType::Buy) => {
                report.push(Issue::error(
                    "LISTING_BUY_OFFER",
                    format!("Buy listing {} carries offered tickets", listing.listing_id),
                ));
            }
            (Some(offered), _) => {
                for ticket_id in offered {
                    let Some(&ti) = ticket_index.get(ticket_id) else {
                        report.push(Issue::error(
                            "LISTING_TICKET_FK",
                            format!(
                                "listing {} references missing ticket {ticket_id}",
                                listing.listing_id
                            ),
                        ));
                        continue;
                    };
                    let ticket = &data.tickets[ti];
                    if ticket.owner_id != listing.user_id {
                        report.push(Issue::error(
                            "LISTING_OWNERSHIP",
                            format!(
                                "listing {} offers ticket {ticket_id} not owned by its poster",
                                listing.listing_id
                            ),
                        ));
                    }
                    if session_event.get(&ticket.eventtime_id) != Some(&listing.event_id) {
                        report.push(Issue::error(
                            "LISTING_EVENT",
                            format!(
                                "listing {} offers ticket {ticket_id} from another event",
                                listing.listing_id
                            ),
                        ));
                    }
                }
            }
            (None, _) => {}
        }
    }
}

/// Trade-to-listing references and participant pairing.
fn check_trades(data: &Dataset, report: &mut Report) {
    let listing_index: AHashMap<i64, usize> = data
        .listings
        .iter()
        .enumerate()
        .map(|(i, l)| (l.listing_id, i))
        .collect();
    let ticket_ids: AHashSet<i64> = data.tickets.iter().map(|t| t.ticket_id).collect();

    let mut participants_by_trade: AHashMap<i64, Vec<usize>> = AHashMap::new();
    for (i, participant) in data.participants.iter().enumerate() {
        participants_by_trade
            .entry(participant.trade_id)
            .or_default()
            .push(i);
    }

    for trade in &data.trades {
        match listing_index.get(&trade.listing_id) {
            None => report.push(Issue::error(
                "TRADE_LISTING_FK",
                format!(
                    "trade {} references missing listing {}",
                    trade.trade_id, trade.listing_id
                ),
            )),
            Some(&li) if !data.listings[li].kind.is_offer() => report.push(Issue::error(
                "TRADE_LISTING_TYPE",
                format!(
                    "trade {} references non-tradeable listing {}",
                    trade.trade_id, trade.listing_id
                ),
            )),
            Some(_) => {}
        }

        let empty = Vec::new();
        let members = participants_by_trade.get(&trade.trade_id).unwrap_or(&empty);
        let sellers: Vec<&str> = members
            .iter()
            .map(|&i| &data.participants[i])
            .filter(|p| p.role == TradeRole::Seller)
            .map(|p| p.user_id.as_str())
            .collect();
        let buyers: Vec<&str> = members
            .iter()
            .map(|&i| &data.participants[i])
            .filter(|p| p.role == TradeRole::Buyer)
            .map(|p| p.user_id.as_str())
            .collect();
        if sellers.len() != 1 || buyers.len() != 1 {
            report.push(Issue::error(
                "TRADE_PARTICIPANTS",
                format!(
                    "trade {} has {} sellers and {} buyers",
                    trade.trade_id,
                    sellers.len(),
                    buyers.len()
                ),
            ));
        } else if sellers[0] == buyers[0] {
            report.push(Issue::error(
                "TRADE_SELF_DEAL",
                format!("trade {} has the same user on both sides", trade.trade_id),
            ));
        }
    }

    for transfer in &data.trade_tickets {
        if !ticket_ids.contains(&transfer.ticket_id) {
            report.push(Issue::error(
                "TRADE_TICKET_FK",
                format!(
                    "trade {} transfers missing ticket {}",
                    transfer.trade_id, transfer.ticket_id
                ),
            ));
        }
    }
}

/// Every trade must have exactly two payment rows summing to zero.
fn check_balance_logs(data: &Dataset, report: &mut Report) {
    let mut payments: AHashMap<i64, Vec<f64>> = AHashMap::new();
    for log in &data.balance_logs {
        if log.reason == REASON_TRADE_PAYMENT {
            if let Some(trade_id) = log.trade_id {
                payments.entry(trade_id).or_default().push(log.change);
            } else {
                report.push(Issue::error(
                    "BALANCE_NO_TRADE",
                    "trade payment row has no trade id".to_string(),
                ));
            }
        }
    }

    for trade in &data.trades {
        let empty = Vec::new();
        let rows = payments.get(&trade.trade_id).unwrap_or(&empty);
        if rows.len() != 2 {
            report.push(Issue::error(
                "BALANCE_PAIR",
                format!(
                    "trade {} has {} payment rows, expected 2",
                    trade.trade_id,
                    rows.len()
                ),
            ));
        } else if rows[0] + rows[1] != 0.0 {
            report.push(Issue::error(
                "BALANCE_SUM",
                format!(
                    "trade {} payment rows sum to {}, expected 0",
                    trade.trade_id,
                    rows[0] + rows[1]
                ),
            ));
        }
    }
}
