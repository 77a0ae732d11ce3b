//! Unit tests for the integrity checker, including deliberately corrupted
//! datasets.

use ticket_seeder::generator::{self, GenPlan};
use ticket_seeder::model::{BalanceLog, ListingType, TradeRole, REASON_TRADE_PAYMENT};
use ticket_seeder::validate;

fn generated() -> ticket_seeder::model::Dataset {
    let plan = GenPlan {
        users: 40,
        events: 4,
        tickets: 80,
        listings: 100,
        trades: 30,
    };
    generator::run(&plan, 42).unwrap().data
}

#[test]
fn clean_dataset_passes() {
    let data = generated();
    let report = validate::check(&data);
    assert!(report.is_clean(), "{:?}", report.issues);
    assert!(!report.has_errors());
}

#[test]
fn dangling_ticket_session_is_reported() {
    let mut data = generated();
    data.tickets[0].eventtime_id = 999_999;

    let report = validate::check(&data);
    assert!(report.has_errors());
    assert!(report
        .issues
        .iter()
        .any(|i| i.code == "TICKET_SESSION_FK"));
}

#[test]
fn duplicate_seat_is_reported() {
    let mut data = generated();
    let clone = data.tickets[0].clone();
    let stolen_id = data.tickets[1].ticket_id;
    data.tickets[1] = clone;
    data.tickets[1].ticket_id = stolen_id;

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "SEAT_DUPLICATE"));
}

#[test]
fn foreign_owned_offer_is_reported() {
    let mut data = generated();
    let poster = data
        .listings
        .iter()
        .position(|l| l.offered_ticket_ids.is_some())
        .expect("generated data has offer listings");
    let victim_ticket = {
        let listing = &data.listings[poster];
        data.tickets
            .iter()
            .position(|t| {
                t.owner_id != listing.user_id
            })
            .expect("another user owns a ticket")
    };
    let foreign_id = data.tickets[victim_ticket].ticket_id;
    data.listings[poster]
        .offered_ticket_ids
        .as_mut()
        .unwrap()[0] = foreign_id;

    let report = validate::check(&data);
    assert!(report.has_errors());
    assert!(report.issues.iter().any(|i| i.code == "LISTING_OWNERSHIP"));
}

#[test]
fn buy_listing_with_tickets_is_reported() {
    let mut data = generated();
    let buy = data
        .listings
        .iter()
        .position(|l| l.kind == ListingType::Buy)
        .expect("generated data has buy listings");
    let some_ticket = data.tickets[0].ticket_id;
    data.listings[buy].offered_ticket_ids = Some([some_ticket].into_iter().collect());

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "LISTING_BUY_OFFER"));
}

#[test]
fn self_dealing_trade_is_reported() {
    let mut data = generated();
    let trade_id = data.trades[0].trade_id;
    let seller_id = data
        .participants
        .iter()
        .find(|p| p.trade_id == trade_id && p.role == TradeRole::Seller)
        .unwrap()
        .user_id
        .clone();
    for participant in &mut data.participants {
        if participant.trade_id == trade_id && participant.role == TradeRole::Buyer {
            participant.user_id = seller_id.clone();
        }
    }

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "TRADE_SELF_DEAL"));
}

#[test]
fn unbalanced_payment_pair_is_reported() {
    let mut data = generated();
    let trade_id = data.trades[0].trade_id;
    for log in &mut data.balance_logs {
        if log.trade_id == Some(trade_id) && log.change < 0.0 {
            log.change += 1.0;
        }
    }

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "BALANCE_SUM"));
}

#[test]
fn missing_payment_row_is_reported() {
    let mut data = generated();
    let trade_id = data.trades[0].trade_id;
    let drop_idx = data
        .balance_logs
        .iter()
        .position(|log| log.trade_id == Some(trade_id))
        .unwrap();
    data.balance_logs.remove(drop_idx);

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "BALANCE_PAIR"));
}

#[test]
fn payment_without_trade_id_is_reported() {
    let mut data = generated();
    data.balance_logs.push(BalanceLog {
        user_id: data.users[0].user_id.clone(),
        trade_id: None,
        change: 100.0,
        reason: REASON_TRADE_PAYMENT,
        created_at: data.users[0].created_at,
    });

    let report = validate::check(&data);
    assert!(report.issues.iter().any(|i| i.code == "BALANCE_NO_TRADE"));
}
