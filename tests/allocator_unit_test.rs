//! Unit tests for the inventory allocator: seat uniqueness, capacity
//! ceilings, and clamping behavior.

use ahash::AHashSet;
use ticket_seeder::catalog::VENUES;
use ticket_seeder::generator::tickets::SESSION_SEAT_CAP;
use ticket_seeder::generator::{events, tickets, users, GenContext};

fn context_with_sessions(seed: u64, user_count: usize, event_count: usize) -> GenContext {
    let mut ctx = GenContext::new(seed);
    users::generate(&mut ctx, user_count);
    events::generate(&mut ctx, event_count).unwrap();
    ctx
}

#[test]
fn seats_are_unique_within_each_session() {
    let mut ctx = context_with_sessions(42, 50, 5);
    tickets::generate(&mut ctx, 500).unwrap();

    let mut seen: AHashSet<(i64, &str, u16)> = AHashSet::new();
    for ticket in &ctx.data.tickets {
        assert!(
            seen.insert((ticket.eventtime_id, ticket.seat_area, ticket.seat_number)),
            "duplicate seat {} {} in session {}",
            ticket.seat_area,
            ticket.seat_number,
            ticket.eventtime_id
        );
    }
}

#[test]
fn session_ticket_counts_stay_under_ceiling() {
    let mut ctx = context_with_sessions(42, 50, 3);
    tickets::generate(&mut ctx, 5000).unwrap();

    for session in &ctx.data.sessions {
        let ceiling = (VENUES[session.venue_idx].capacity as usize).min(SESSION_SEAT_CAP);
        let count = ctx
            .data
            .tickets
            .iter()
            .filter(|t| t.eventtime_id == session.eventtime_id)
            .count();
        assert!(
            count <= ceiling,
            "session {} has {count} tickets over ceiling {ceiling}",
            session.eventtime_id
        );
    }
}

#[test]
fn oversized_request_clamps_with_warning() {
    let mut ctx = context_with_sessions(42, 20, 2);
    let total_capacity: usize = ctx
        .data
        .sessions
        .iter()
        .map(|s| (VENUES[s.venue_idx].capacity as usize).min(SESSION_SEAT_CAP))
        .sum();

    let realized = tickets::generate(&mut ctx, total_capacity + 1000).unwrap();

    assert_eq!(realized, total_capacity);
    assert_eq!(ctx.data.tickets.len(), total_capacity);
    assert!(ctx.warnings.iter().any(|w| w.contains("clamping")));
}

#[test]
fn exact_capacity_request_fills_without_warning() {
    let mut ctx = context_with_sessions(7, 20, 1);
    let total_capacity: usize = ctx
        .data
        .sessions
        .iter()
        .map(|s| (VENUES[s.venue_idx].capacity as usize).min(SESSION_SEAT_CAP))
        .sum();

    let realized = tickets::generate(&mut ctx, total_capacity).unwrap();

    assert_eq!(realized, total_capacity);
    assert!(ctx.warnings.is_empty());
}

#[test]
fn seat_areas_match_the_venue_tier() {
    let mut ctx = context_with_sessions(42, 50, 10);
    tickets::generate(&mut ctx, 800).unwrap();

    for ticket in &ctx.data.tickets {
        let session = ctx
            .data
            .sessions
            .iter()
            .find(|s| s.eventtime_id == ticket.eventtime_id)
            .unwrap();
        let areas = ticket_seeder::catalog::seat_areas(&VENUES[session.venue_idx]);
        assert!(
            areas.contains(&ticket.seat_area),
            "seat area {} not sold at venue {}",
            ticket.seat_area,
            VENUES[session.venue_idx].name
        );
    }
}

#[test]
fn owners_are_real_users() {
    let mut ctx = context_with_sessions(42, 30, 3);
    tickets::generate(&mut ctx, 200).unwrap();

    let user_ids: AHashSet<&str> = ctx.data.users.iter().map(|u| u.user_id.as_str()).collect();
    for ticket in &ctx.data.tickets {
        assert!(user_ids.contains(ticket.owner_id.as_str()));
    }
}

#[test]
fn zero_request_allocates_nothing() {
    let mut ctx = context_with_sessions(42, 10, 2);
    let realized = tickets::generate(&mut ctx, 0).unwrap();
    assert_eq!(realized, 0);
    assert!(ctx.data.tickets.is_empty());
}
