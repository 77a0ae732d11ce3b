//! Trade synthesis: completed transactions against Sell/Exchange listings.
//!
//! Every listing stays eligible for repeated selection; a post can be traded
//! more than once in this synthetic model. Ticket ownership is never
//! rewritten after a trade; the trade_ticket rows are the transfer of
//! record.

use crate::fake::round2;
use crate::generator::GenContext;
use crate::model::{
    BalanceLog, Dataset, ListingType, Trade, TradeParticipant, TradeRole, TradeTicket,
    REASON_TRADE_PAYMENT,
};
use ahash::AHashMap;
use anyhow::bail;

/// Agreed price when the listing carries no priced tickets.
const FALLBACK_PRICE_RANGE: (i64, i64) = (2000, 8000);

/// Haggling factor applied to the summed ticket prices of a Sell listing.
const HAGGLE_RANGE: (f64, f64) = (0.9, 1.1);

pub fn generate(ctx: &mut GenContext, count: usize) -> anyhow::Result<()> {
    if count == 0 {
        return Ok(());
    }

    let GenContext {
        fake, ids, data, warnings, ..
    } = ctx;
    let Dataset {
        users,
        tickets,
        listings,
        trades,
        participants,
        trade_tickets,
        balance_logs,
        ..
    } = data;

    let eligible: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.kind.is_offer())
        .map(|(i, _)| i)
        .collect();
    if eligible.is_empty() {
        warnings.push("no Sell or Exchange listings available, skipping trade synthesis".into());
        return Ok(());
    }
    if users.len() < 2 {
        bail!("need at least two users to synthesize trades");
    }

    let ticket_index: AHashMap<i64, usize> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.ticket_id, i))
        .collect();

    for _ in 0..count {
        let listing = &listings[*fake.pick(&eligible)];
        let seller_id = listing.user_id.clone();
        let buyer_id = loop {
            let candidate = fake.pick(users);
            if candidate.user_id != seller_id {
                break candidate.user_id.clone();
            }
        };

        let agreed_price = match (listing.kind, &listing.offered_ticket_ids) {
            (ListingType::Sell, Some(offered)) if !offered.is_empty() => {
                let base: i64 = offered
                    .iter()
                    .map(|id| tickets[ticket_index[id]].price)
                    .sum();
                round2(base as f64 * fake.uniform(HAGGLE_RANGE.0, HAGGLE_RANGE.1))
            }
            _ => fake.int_range(FALLBACK_PRICE_RANGE.0, FALLBACK_PRICE_RANGE.1) as f64,
        };

        let trade_id = ids.next_trade_id();
        let created_at = fake.datetime_days_back(30);
        trades.push(Trade {
            trade_id,
            listing_id: listing.listing_id,
            status: "Completed",
            agreed_price,
            created_at,
            updated_at: created_at,
        });

        participants.push(TradeParticipant {
            trade_id,
            user_id: seller_id.clone(),
            role: TradeRole::Seller,
            confirmed: true,
            confirmed_at: created_at,
        });
        participants.push(TradeParticipant {
            trade_id,
            user_id: buyer_id.clone(),
            role: TradeRole::Buyer,
            confirmed: true,
            confirmed_at: created_at,
        });

        if let Some(offered) = &listing.offered_ticket_ids {
            for &ticket_id in offered {
                trade_tickets.push(TradeTicket {
                    trade_id,
                    ticket_id,
                    from_user_id: seller_id.clone(),
                    to_user_id: buyer_id.clone(),
                });
            }
        }

        // Double-entry pair: always sums to exactly zero.
        balance_logs.push(BalanceLog {
            user_id: seller_id,
            trade_id: Some(trade_id),
            change: agreed_price,
            reason: REASON_TRADE_PAYMENT,
            created_at,
        });
        balance_logs.push(BalanceLog {
            user_id: buyer_id,
            trade_id: Some(trade_id),
            change: -agreed_price,
            reason: REASON_TRADE_PAYMENT,
            created_at,
        });
    }

    Ok(())
}
