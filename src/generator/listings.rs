//! Listing planning: marketplace posts constrained by actual holdings.
//!
//! Planning happens in two phases. First, Sell and Exchange posts are
//! assigned to ticket-holding users only, capped per user, until the ratio
//! targets are met or holders run out; the remainder of the requested count
//! becomes Buy posts spread over the whole population. Second, each planned
//! post is materialized: Sell/Exchange posts anchor to one of the owner's
//! tickets, attach 1..=3 tickets from the same event, and fall back to a Buy
//! post if the owner has nothing sellable for the chosen event.

use crate::catalog::{BUY_TEMPLATES, EXCHANGE_TEMPLATES, SEAT_AREAS, SELL_TEMPLATES};
use crate::fake::FakeData;
use crate::generator::GenContext;
use crate::model::{Dataset, Listing, ListingType, OfferedTickets};
use ahash::AHashMap;
use anyhow::bail;
use rand_chacha::ChaCha8Rng;

/// Ratio targets as percentages of the requested count.
pub const SELL_PERCENT: usize = 20;
pub const EXCHANGE_PERCENT: usize = 10;

/// Per-user caps on seller-side posts.
pub const MAX_SELL_PER_USER: usize = 3;
pub const MAX_EXCHANGE_PER_USER: usize = 2;

/// Tickets attached to one Sell/Exchange post.
const OFFER_RANGE: (i64, i64) = (1, 3);

/// Asking-price range quoted in listing text, before the event multiplier.
const ASKING_PRICE_RANGE: (i64, i64) = (1500, 8000);

struct Assignment {
    user_idx: usize,
    kind: ListingType,
}

pub fn generate(ctx: &mut GenContext, count: usize) -> anyhow::Result<()> {
    if count == 0 {
        return Ok(());
    }
    if ctx.data.users.is_empty() {
        bail!("cannot plan listings without users");
    }
    if ctx.data.events.is_empty() {
        bail!("cannot plan listings without events");
    }

    let GenContext {
        fake, ids, data, ..
    } = ctx;
    let Dataset {
        users,
        events,
        sessions,
        tickets,
        listings,
        ..
    } = data;

    // Index maps, built once per stage.
    let user_index: AHashMap<&str, usize> = users
        .iter()
        .enumerate()
        .map(|(i, u)| (u.user_id.as_str(), i))
        .collect();
    let session_index: AHashMap<i64, usize> = sessions
        .iter()
        .enumerate()
        .map(|(i, s)| (s.eventtime_id, i))
        .collect();
    let event_index: AHashMap<i64, usize> = events
        .iter()
        .enumerate()
        .map(|(i, e)| (e.event_id, i))
        .collect();
    let mut sessions_by_event: AHashMap<i64, Vec<usize>> = AHashMap::new();
    for (i, session) in sessions.iter().enumerate() {
        sessions_by_event.entry(session.event_id).or_default().push(i);
    }

    // Owner -> indices of owned tickets, in user order.
    let mut holdings: Vec<Vec<usize>> = vec![Vec::new(); users.len()];
    for (ti, ticket) in tickets.iter().enumerate() {
        if let Some(&ui) = user_index.get(ticket.owner_id.as_str()) {
            holdings[ui].push(ti);
        }
    }
    let holders: Vec<usize> = (0..users.len())
        .filter(|&ui| !holdings[ui].is_empty())
        .collect();

    // Phase 1: the plan. Shortfall against the Sell/Exchange targets is
    // absorbed, never back-filled into Buy.
    let mut plan: Vec<Assignment> = Vec::with_capacity(count);
    let sell_target = count * SELL_PERCENT / 100;
    let mut assigned = 0;
    'sell: for &ui in &holders {
        for _ in 0..MAX_SELL_PER_USER.min(holdings[ui].len()) {
            if assigned >= sell_target {
                break 'sell;
            }
            plan.push(Assignment {
                user_idx: ui,
                kind: ListingType::Sell,
            });
            assigned += 1;
        }
    }

    let exchange_target = count * EXCHANGE_PERCENT / 100;
    let mut assigned = 0;
    'exchange: for &ui in &holders {
        for _ in 0..MAX_EXCHANGE_PER_USER.min(holdings[ui].len()) {
            if assigned >= exchange_target {
                break 'exchange;
            }
            plan.push(Assignment {
                user_idx: ui,
                kind: ListingType::Exchange,
            });
            assigned += 1;
        }
    }

    let buy_count = count - plan.len();
    for i in 0..buy_count {
        plan.push(Assignment {
            user_idx: i % users.len(),
            kind: ListingType::Buy,
        });
    }

    // Phase 2: materialize each planned post.
    for assignment in plan {
        let user_id = users[assignment.user_idx].user_id.clone();

        let (kind, event_idx, session_idx, offered) = match assignment.kind {
            ListingType::Sell | ListingType::Exchange => {
                let owned = &holdings[assignment.user_idx];
                // Anchor on one owned ticket; its session fixes the event.
                let anchor = *fake.pick(owned);
                let anchor_session = session_index[&tickets[anchor].eventtime_id];
                let event_id = sessions[anchor_session].event_id;

                let event_tickets: Vec<usize> = owned
                    .iter()
                    .copied()
                    .filter(|&ti| {
                        sessions[session_index[&tickets[ti].eventtime_id]].event_id == event_id
                    })
                    .collect();

                if event_tickets.is_empty() {
                    // No sellable stock for this event: degrade to a Buy post.
                    (ListingType::Buy, event_index[&event_id], anchor_session, None)
                } else {
                    let want = fake.int_range(OFFER_RANGE.0, OFFER_RANGE.1) as usize;
                    let chosen = fake.sample(&event_tickets, want.min(event_tickets.len()));
                    let offered: OfferedTickets =
                        chosen.into_iter().map(|&ti| tickets[ti].ticket_id).collect();
                    (
                        assignment.kind,
                        event_index[&event_id],
                        anchor_session,
                        Some(offered),
                    )
                }
            }
            ListingType::Buy => {
                let event_idx = fake.pick_index(events.len());
                let event_sessions = &sessions_by_event[&events[event_idx].event_id];
                let session_idx = *fake.pick(event_sessions);
                (ListingType::Buy, event_idx, session_idx, None)
            }
        };

        let event = &events[event_idx];
        let content = content(fake, kind, &event.name, event.price_multiplier);
        let listing_id = ids.next_listing_id();
        let created_at = fake.datetime_days_back(30);
        listings.push(Listing {
            listing_id,
            user_id,
            event_id: event.event_id,
            event_date: sessions[session_idx].start,
            content,
            status: "Active",
            kind,
            offered_ticket_ids: offered,
            created_at,
        });
    }

    Ok(())
}

/// Fill a type-specific template. Only the `{event}` slot is guaranteed;
/// `{area}` and `{price}` are substituted when the chosen template uses them.
fn content(
    fake: &mut FakeData<ChaCha8Rng>,
    kind: ListingType,
    event_name: &str,
    multiplier: f64,
) -> String {
    let templates = match kind {
        ListingType::Sell => SELL_TEMPLATES,
        ListingType::Exchange => EXCHANGE_TEMPLATES,
        ListingType::Buy => BUY_TEMPLATES,
    };
    let mut text = fake.pick(templates).replace("{event}", event_name);
    if text.contains("{area}") {
        text = text.replace("{area}", *fake.pick(SEAT_AREAS));
    }
    if text.contains("{price}") {
        let asking = fake.int_range(ASKING_PRICE_RANGE.0, ASKING_PRICE_RANGE.1);
        let scaled = (asking as f64 * multiplier).round() as i64;
        text = text.replace("{price}", &scaled.to_string());
    }
    text
}
