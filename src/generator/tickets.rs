//! Inventory allocation: seat-unique tickets bound to sessions.
//!
//! Every session has a hard seat ceiling of `min(venue capacity,
//! SESSION_SEAT_CAP)`. A request that exceeds the summed ceilings is clamped
//! with a warning rather than failing; running out of open sessions mid-run
//! stops allocation early, also with a warning.

use crate::catalog::{self, VENUES};
use crate::generator::GenContext;
use crate::model::{Ticket, TicketStatus};
use ahash::AHashSet;
use anyhow::bail;

/// Upper bound on distinct seats allocated for any one session, keeping the
/// per-session seat space small enough for rejection sampling.
pub const SESSION_SEAT_CAP: usize = 300;

/// Seat numbers run 1..=MAX_SEAT_NUMBER within each seat area.
pub const MAX_SEAT_NUMBER: i64 = 150;

const PRICE_RANGE: (i64, i64) = (1200, 12_000);

/// Allocate up to `requested` tickets. Returns the realized count.
pub fn generate(ctx: &mut GenContext, requested: usize) -> anyhow::Result<usize> {
    if requested == 0 {
        return Ok(0);
    }
    if ctx.data.users.is_empty() {
        bail!("cannot allocate tickets without users");
    }

    // Per-session ceilings and seat-area vocabularies, resolved once.
    let sessions: Vec<(i64, &'static [&'static str], usize)> = ctx
        .data
        .sessions
        .iter()
        .map(|s| {
            let venue = &VENUES[s.venue_idx];
            let ceiling = (venue.capacity as usize).min(SESSION_SEAT_CAP);
            (s.eventtime_id, catalog::seat_areas(venue), ceiling)
        })
        .collect();

    let total_capacity: usize = sessions.iter().map(|(_, _, ceiling)| ceiling).sum();
    let mut target = requested;
    if target > total_capacity {
        ctx.warn(format!(
            "requested {requested} tickets but sessions only hold {total_capacity} seats, \
             clamping to {total_capacity}"
        ));
        target = total_capacity;
    }

    let mut used: Vec<AHashSet<(&'static str, u16)>> = vec![AHashSet::new(); sessions.len()];
    // Indices of sessions that still have seats; filled ones are swapped out
    // so sampling stays O(1).
    let mut open: Vec<usize> = (0..sessions.len())
        .filter(|&i| sessions[i].2 > 0)
        .collect();

    let mut allocated = 0;
    while allocated < target {
        if open.is_empty() {
            ctx.warn(format!(
                "seat capacity exhausted after {allocated} of {target} tickets"
            ));
            break;
        }
        let slot_pos = ctx.fake.pick_index(open.len());
        let slot = open[slot_pos];
        let (eventtime_id, areas, ceiling) = sessions[slot];

        // Rejection-sample a free (area, number) pair for this session.
        let (seat_area, seat_number) = loop {
            let area = *ctx.fake.pick(areas);
            let number = ctx.fake.int_range(1, MAX_SEAT_NUMBER) as u16;
            if used[slot].insert((area, number)) {
                break (area, number);
            }
        };
        if used[slot].len() >= ceiling {
            open.swap_remove(slot_pos);
        }

        let owner_id = ctx.fake.pick(&ctx.data.users).user_id.clone();
        let ticket_id = ctx.ids.next_ticket_id();
        let price = ctx.fake.int_range(PRICE_RANGE.0, PRICE_RANGE.1);
        let status = *ctx.fake.pick(&TicketStatus::ALL);
        let created_at = ctx.fake.datetime_days_back(365);
        ctx.data.tickets.push(Ticket {
            ticket_id,
            eventtime_id,
            owner_id,
            seat_area,
            seat_number,
            price,
            status,
            created_at,
        });
        allocated += 1;
    }

    Ok(allocated)
}
