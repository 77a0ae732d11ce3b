//! In-memory record types for the generated dataset.
//!
//! Every entity is created exactly once by its pipeline stage and never
//! mutated afterwards. Cross-references between stages are carried as ids
//! (sequential `i64` counters, or UUID strings for users), never as
//! in-language pointers.

use chrono::NaiveDateTime;
use smallvec::SmallVec;

/// Reason code for the paired debit/credit rows written per trade.
pub const REASON_TRADE_PAYMENT: &str = "TRADE_PAYMENT";
/// Reason code for the per-user starting balance row.
pub const REASON_INITIAL_BALANCE: &str = "INITIAL_BALANCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Suspended,
    Warning,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
            UserStatus::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Operator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Operator => "Operator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Active,
    Locked,
    Completed,
    Expired,
    Canceled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::Active,
        TicketStatus::Locked,
        TicketStatus::Completed,
        TicketStatus::Expired,
        TicketStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Active => "Active",
            TicketStatus::Locked => "Locked",
            TicketStatus::Completed => "Completed",
            TicketStatus::Expired => "Expired",
            TicketStatus::Canceled => "Canceled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingType {
    Sell,
    Exchange,
    Buy,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Sell => "Sell",
            ListingType::Exchange => "Exchange",
            ListingType::Buy => "Buy",
        }
    }

    /// Sell and Exchange listings carry tickets and can be traded against.
    pub fn is_offer(self) -> bool {
        matches!(self, ListingType::Sell | ListingType::Exchange)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeRole {
    Seller,
    Buyer,
}

impl TradeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeRole::Seller => "seller",
            TradeRole::Buyer => "buyer",
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub status: UserStatus,
    pub balance: i64,
    pub created_at: NaiveDateTime,
    /// Emitted as one `user_role` row per user.
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: i64,
    pub name: String,
    /// Index into [`crate::catalog::VENUES`].
    pub venue_idx: usize,
    pub description: String,
    /// Artist tier multiplier times venue kind multiplier; feeds the asking
    /// prices quoted in listing content.
    pub price_multiplier: f64,
}

/// One scheduled occurrence of an event (the `eventtime` table).
#[derive(Debug, Clone)]
pub struct EventTime {
    pub eventtime_id: i64,
    pub event_id: i64,
    /// Copied from the parent event so the allocator can resolve capacity
    /// without a second lookup.
    pub venue_idx: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub ticket_id: i64,
    pub eventtime_id: i64,
    pub owner_id: String,
    pub seat_area: &'static str,
    pub seat_number: u16,
    pub price: i64,
    pub status: TicketStatus,
    pub created_at: NaiveDateTime,
}

/// Sell/Exchange listings attach between one and three tickets.
pub type OfferedTickets = SmallVec<[i64; 3]>;

#[derive(Debug, Clone)]
pub struct Listing {
    pub listing_id: i64,
    pub user_id: String,
    pub event_id: i64,
    pub event_date: NaiveDateTime,
    pub content: String,
    pub status: &'static str,
    pub kind: ListingType,
    pub offered_ticket_ids: Option<OfferedTickets>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Trade {
    pub trade_id: i64,
    pub listing_id: i64,
    pub status: &'static str,
    pub agreed_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct TradeParticipant {
    pub trade_id: i64,
    pub user_id: String,
    pub role: TradeRole,
    pub confirmed: bool,
    pub confirmed_at: NaiveDateTime,
}

/// Transfer-of-record for a traded ticket. Ticket ownership in the ticket
/// table is intentionally left untouched; this row is the authoritative
/// record of the transfer.
#[derive(Debug, Clone)]
pub struct TradeTicket {
    pub trade_id: i64,
    pub ticket_id: i64,
    pub from_user_id: String,
    pub to_user_id: String,
}

#[derive(Debug, Clone)]
pub struct BalanceLog {
    pub user_id: String,
    pub trade_id: Option<i64>,
    pub change: f64,
    pub reason: &'static str,
    pub created_at: NaiveDateTime,
}

/// Everything the pipeline produces, held in memory until serialization.
#[derive(Debug, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub sessions: Vec<EventTime>,
    pub tickets: Vec<Ticket>,
    pub listings: Vec<Listing>,
    pub trades: Vec<Trade>,
    pub participants: Vec<TradeParticipant>,
    pub trade_tickets: Vec<TradeTicket>,
    pub balance_logs: Vec<BalanceLog>,
}

impl Dataset {
    /// Total row count across all tables, including the per-user role and
    /// initial-balance rows emitted at serialization time.
    pub fn total_rows(&self) -> usize {
        self.users.len() * 3
            + self.events.len()
            + self.sessions.len()
            + self.tickets.len()
            + self.listings.len()
            + self.offered_ticket_rows()
            + self.trades.len()
            + self.participants.len()
            + self.trade_tickets.len()
            + self.balance_logs.len()
    }

    /// Number of `listing_ticket` junction rows.
    pub fn offered_ticket_rows(&self) -> usize {
        self.listings
            .iter()
            .filter_map(|l| l.offered_ticket_ids.as_ref())
            .map(|ids| ids.len())
            .sum()
    }
}

/// Running id counters for all sequentially-keyed entities.
#[derive(Debug, Default)]
pub struct IdCounters {
    event: i64,
    eventtime: i64,
    ticket: i64,
    listing: i64,
    trade: i64,
}

impl IdCounters {
    pub fn next_event_id(&mut self) -> i64 {
        self.event += 1;
        self.event
    }

    pub fn next_eventtime_id(&mut self) -> i64 {
        self.eventtime += 1;
        self.eventtime
    }

    pub fn next_ticket_id(&mut self) -> i64 {
        self.ticket += 1;
        self.ticket
    }

    pub fn next_listing_id(&mut self) -> i64 {
        self.listing += 1;
        self.listing
    }

    pub fn next_trade_id(&mut self) -> i64 {
        self.trade += 1;
        self.trade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_counters_start_at_one() {
        let mut ids = IdCounters::default();
        assert_eq!(ids.next_event_id(), 1);
        assert_eq!(ids.next_event_id(), 2);
        assert_eq!(ids.next_ticket_id(), 1);
        assert_eq!(ids.next_trade_id(), 1);
    }

    #[test]
    fn listing_type_offer_split() {
        assert!(ListingType::Sell.is_offer());
        assert!(ListingType::Exchange.is_offer());
        assert!(!ListingType::Buy.is_offer());
    }
}
