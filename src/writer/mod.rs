//! SQL artifact serialization.
//!
//! Renders the in-memory dataset as one batched multi-row INSERT per table,
//! in foreign-key dependency order, targeting PostgreSQL. Table and column
//! order match the destination schema contract exactly; changing either
//! breaks consumers.

use crate::model::{Dataset, REASON_INITIAL_BALANCE};
use chrono::NaiveDateTime;
use std::io::{self, BufWriter, Write};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;

/// Escape a string literal for PostgreSQL (single quotes doubled).
pub fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

fn quoted(s: &str) -> String {
    format!("'{}'", escape(s))
}

fn timestamp(t: &NaiveDateTime) -> String {
    format!("'{}'", t.format("%Y-%m-%dT%H:%M:%S"))
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Streaming writer for the seed artifact.
pub struct SqlWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> SqlWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: BufWriter::with_capacity(WRITER_BUFFER_SIZE, inner),
        }
    }

    /// Write the full artifact: header comment, then every table in
    /// dependency order.
    pub fn write_dataset(&mut self, data: &Dataset, seed: u64) -> io::Result<()> {
        writeln!(self.out, "-- Synthetic seed data for the Ticket Match database")?;
        writeln!(self.out, "-- Generator: ticket-seeder (seed {seed})")?;
        writeln!(
            self.out,
            "-- Users: {}, Events: {}, Sessions: {}, Tickets: {}, Listings: {}, Trades: {}",
            data.users.len(),
            data.events.len(),
            data.sessions.len(),
            data.tickets.len(),
            data.listings.len(),
            data.trades.len()
        )?;
        writeln!(self.out)?;

        self.write_insert(
            "Users",
            "\"USER\"",
            "user_id, username, password_hash, email, status, balance, created_at",
            &user_rows(data),
        )?;
        self.write_insert("User Roles", "user_role", "user_id, role", &role_rows(data))?;
        self.write_insert(
            "Events",
            "event",
            "event_id, event_name, venue, description",
            &event_rows(data),
        )?;
        self.write_insert(
            "Event Times",
            "eventtime",
            "eventtime_id, event_id, start_time, end_time",
            &session_rows(data),
        )?;
        self.write_insert(
            "Tickets",
            "ticket",
            "ticket_id, eventtime_id, owner_id, seat_area, seat_number, price, status, created_at",
            &ticket_rows(data),
        )?;
        self.write_insert(
            "Listings",
            "listing",
            "listing_id, user_id, event_id, event_date, content, status, type, \
             offered_ticket_ids, created_at",
            &listing_rows(data),
        )?;
        self.write_insert(
            "Listing Tickets",
            "listing_ticket",
            "listing_id, ticket_id",
            &listing_ticket_rows(data),
        )?;
        self.write_insert(
            "Trades",
            "trade",
            "trade_id, listing_id, status, agreed_price, created_at, updated_at",
            &trade_rows(data),
        )?;
        self.write_insert(
            "Trade Participants",
            "trade_participant",
            "trade_id, user_id, role, confirmed, confirmed_at",
            &participant_rows(data),
        )?;
        self.write_insert(
            "Trade Tickets",
            "trade_ticket",
            "trade_id, ticket_id, from_user_id, to_user_id",
            &trade_ticket_rows(data),
        )?;
        self.write_insert(
            "Balance Logs",
            "user_balance_log",
            "user_id, trade_id, change, reason, created_at",
            &balance_rows(data),
        )?;

        self.out.flush()
    }

    /// One batched multi-row INSERT. Empty tables produce no statement.
    fn write_insert(
        &mut self,
        comment: &str,
        table: &str,
        columns: &str,
        rows: &[String],
    ) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "-- {comment}")?;
        writeln!(self.out, "INSERT INTO {table} ({columns}) VALUES")?;
        for (i, row) in rows.iter().enumerate() {
            let terminator = if i + 1 == rows.len() { ";" } else { "," };
            writeln!(self.out, "{row}{terminator}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Render the artifact into a string. Used by tests and the reproducibility
/// guarantee: same dataset, same bytes.
pub fn render_to_string(data: &Dataset, seed: u64) -> io::Result<String> {
    let mut buf = Vec::new();
    SqlWriter::new(&mut buf).write_dataset(data, seed)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn user_rows(data: &Dataset) -> Vec<String> {
    data.users
        .iter()
        .map(|u| {
            format!(
                "({}, {}, {}, {}, {}, {}, {})",
                quoted(&u.user_id),
                quoted(&u.username),
                quoted(&u.password_hash),
                quoted(&u.email),
                quoted(u.status.as_str()),
                u.balance,
                timestamp(&u.created_at)
            )
        })
        .collect()
}

fn role_rows(data: &Dataset) -> Vec<String> {
    data.users
        .iter()
        .map(|u| format!("({}, {})", quoted(&u.user_id), quoted(u.role.as_str())))
        .collect()
}

fn event_rows(data: &Dataset) -> Vec<String> {
    data.events
        .iter()
        .map(|e| {
            format!(
                "({}, {}, {}, {})",
                e.event_id,
                quoted(&e.name),
                quoted(crate::catalog::VENUES[e.venue_idx].name),
                quoted(&e.description)
            )
        })
        .collect()
}

fn session_rows(data: &Dataset) -> Vec<String> {
    data.sessions
        .iter()
        .map(|s| {
            format!(
                "({}, {}, {}, {})",
                s.eventtime_id,
                s.event_id,
                timestamp(&s.start),
                timestamp(&s.end)
            )
        })
        .collect()
}

fn ticket_rows(data: &Dataset) -> Vec<String> {
    data.tickets
        .iter()
        .map(|t| {
            format!(
                "({}, {}, {}, {}, {}, {}, {}, {})",
                t.ticket_id,
                t.eventtime_id,
                quoted(&t.owner_id),
                quoted(t.seat_area),
                t.seat_number,
                t.price,
                quoted(t.status.as_str()),
                timestamp(&t.created_at)
            )
        })
        .collect()
}

fn listing_rows(data: &Dataset) -> Vec<String> {
    data.listings
        .iter()
        .map(|l| {
            let offered = match &l.offered_ticket_ids {
                Some(ids) => {
                    let inner: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                    format!("ARRAY[{}]", inner.join(", "))
                }
                None => "NULL".to_string(),
            };
            format!(
                "({}, {}, {}, {}, {}, {}, {}, {}, {})",
                l.listing_id,
                quoted(&l.user_id),
                l.event_id,
                timestamp(&l.event_date),
                quoted(&l.content),
                quoted(l.status),
                quoted(l.kind.as_str()),
                offered,
                timestamp(&l.created_at)
            )
        })
        .collect()
}

fn listing_ticket_rows(data: &Dataset) -> Vec<String> {
    let mut rows = Vec::with_capacity(data.offered_ticket_rows());
    for listing in &data.listings {
        if let Some(ids) = &listing.offered_ticket_ids {
            for ticket_id in ids {
                rows.push(format!("({}, {})", listing.listing_id, ticket_id));
            }
        }
    }
    rows
}

fn trade_rows(data: &Dataset) -> Vec<String> {
    data.trades
        .iter()
        .map(|t| {
            format!(
                "({}, {}, {}, {}, {}, {})",
                t.trade_id,
                t.listing_id,
                quoted(t.status),
                money(t.agreed_price),
                timestamp(&t.created_at),
                timestamp(&t.updated_at)
            )
        })
        .collect()
}

fn participant_rows(data: &Dataset) -> Vec<String> {
    data.participants
        .iter()
        .map(|p| {
            format!(
                "({}, {}, {}, {}, {})",
                p.trade_id,
                quoted(&p.user_id),
                quoted(p.role.as_str()),
                if p.confirmed { "TRUE" } else { "FALSE" },
                timestamp(&p.confirmed_at)
            )
        })
        .collect()
}

fn trade_ticket_rows(data: &Dataset) -> Vec<String> {
    data.trade_tickets
        .iter()
        .map(|t| {
            format!(
                "({}, {}, {}, {})",
                t.trade_id,
                t.ticket_id,
                quoted(&t.from_user_id),
                quoted(&t.to_user_id)
            )
        })
        .collect()
}

/// Trade-payment rows first, then one initial-balance row per user.
fn balance_rows(data: &Dataset) -> Vec<String> {
    let mut rows: Vec<String> = data
        .balance_logs
        .iter()
        .map(|log| {
            let trade_id = match log.trade_id {
                Some(id) => id.to_string(),
                None => "NULL".to_string(),
            };
            format!(
                "({}, {}, {}, {}, {})",
                quoted(&log.user_id),
                trade_id,
                money(log.change),
                quoted(log.reason),
                timestamp(&log.created_at)
            )
        })
        .collect();

    for user in &data.users {
        rows.push(format!(
            "({}, NULL, {}, {}, {})",
            quoted(&user.user_id),
            money(user.balance as f64),
            quoted(REASON_INITIAL_BALANCE),
            timestamp(&user.created_at)
        ));
    }
    rows
}
