//! Catalog expansion: events and their scheduled sessions.

use crate::catalog::{Artist, Venue, ARTISTS, DESCRIPTION_TEMPLATES, EVENT_TYPES, VENUES};
use crate::fake::FakeData;
use crate::generator::GenContext;
use crate::model::{Event, EventTime};
use anyhow::bail;
use chrono::{Duration, NaiveDateTime};
use rand_chacha::ChaCha8Rng;

/// Session instances generated per event.
pub const SESSIONS_PER_EVENT: usize = 4;

/// Sessions start between these many days after the reference date.
const SCHEDULE_WINDOW_DAYS: (i64, i64) = (30, 180);

/// Attempts to place one session before giving up on the whole run.
const START_SAMPLE_ATTEMPTS: usize = 64;

/// Show lengths in minutes (2.5 to 4 hours).
const DURATIONS_MIN: &[i64] = &[150, 180, 210, 240];

pub fn generate(ctx: &mut GenContext, count: usize) -> anyhow::Result<()> {
    for _ in 0..count {
        let artist = ctx.fake.pick(ARTISTS);
        let venue_idx = ctx.fake.pick_index(VENUES.len());
        let venue = &VENUES[venue_idx];

        let name = format!("{} {}", artist.name, ctx.fake.pick(EVENT_TYPES));
        let description = description(&mut ctx.fake, artist, venue);
        let price_multiplier = artist.tier.price_multiplier() * venue.kind.price_multiplier();

        let event_id = ctx.ids.next_event_id();
        ctx.data.events.push(Event {
            event_id,
            name,
            venue_idx,
            description,
            price_multiplier,
        });

        let mut starts: Vec<NaiveDateTime> = Vec::with_capacity(SESSIONS_PER_EVENT);
        for _ in 0..SESSIONS_PER_EVENT {
            let start = sample_start(&mut ctx.fake, &starts)?;
            starts.push(start);
            let end = start + Duration::minutes(*ctx.fake.pick(DURATIONS_MIN));
            let eventtime_id = ctx.ids.next_eventtime_id();
            ctx.data.sessions.push(EventTime {
                eventtime_id,
                event_id,
                venue_idx,
                start,
                end,
            });
        }
    }
    Ok(())
}

/// Rejection-sample a session start at least one full day away from every
/// other session of the same event.
fn sample_start(
    fake: &mut FakeData<ChaCha8Rng>,
    taken: &[NaiveDateTime],
) -> anyhow::Result<NaiveDateTime> {
    for _ in 0..START_SAMPLE_ATTEMPTS {
        let candidate = fake.datetime_days_ahead(SCHEDULE_WINDOW_DAYS.0, SCHEDULE_WINDOW_DAYS.1);
        if taken
            .iter()
            .all(|start| (*start - candidate).num_seconds().abs() >= 86_400)
        {
            return Ok(candidate);
        }
    }
    bail!(
        "could not place {SESSIONS_PER_EVENT} sessions at least one day apart \
         within the scheduling window"
    )
}

fn description(fake: &mut FakeData<ChaCha8Rng>, artist: &Artist, venue: &Venue) -> String {
    fake.pick(DESCRIPTION_TEMPLATES)
        .replace("{artist}", artist.name)
        .replace("{city}", venue.city)
}
