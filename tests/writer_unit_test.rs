//! Unit tests for the SQL serializer: statement order, escaping, and the
//! on-disk artifact.

use std::io::Read;
use ticket_seeder::generator::{self, GenPlan};
use ticket_seeder::writer::{render_to_string, SqlWriter};

fn small_plan() -> GenPlan {
    GenPlan {
        users: 30,
        events: 3,
        tickets: 60,
        listings: 80,
        trades: 20,
    }
}

#[test]
fn tables_appear_in_dependency_order() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let sql = render_to_string(&outcome.data, 42).unwrap();

    let order = [
        "INSERT INTO \"USER\" ",
        "INSERT INTO user_role ",
        "INSERT INTO event ",
        "INSERT INTO eventtime ",
        "INSERT INTO ticket ",
        "INSERT INTO listing ",
        "INSERT INTO listing_ticket ",
        "INSERT INTO trade ",
        "INSERT INTO trade_participant ",
        "INSERT INTO trade_ticket ",
        "INSERT INTO user_balance_log ",
    ];

    let mut last = 0;
    for needle in order {
        let pos = sql[last..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} missing or out of order"));
        last += pos + needle.len();
    }
}

#[test]
fn one_statement_per_table() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let sql = render_to_string(&outcome.data, 42).unwrap();

    assert_eq!(sql.matches("INSERT INTO \"USER\" ").count(), 1);
    assert_eq!(sql.matches("INSERT INTO user_balance_log ").count(), 1);
    assert_eq!(sql.matches("INSERT INTO ticket ").count(), 1);
}

#[test]
fn row_counts_match_the_dataset() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let data = &outcome.data;
    let sql = render_to_string(data, 42).unwrap();

    // Every row is one value-tuple line ending in `,` or `;`.
    let statement_lines = sql
        .lines()
        .filter(|line| line.starts_with('('))
        .count();
    assert_eq!(statement_lines, data.total_rows());
}

#[test]
fn apostrophes_are_escaped() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let sql = render_to_string(&outcome.data, 42).unwrap();

    // Listing templates include "Can't make it anymore"; it must arrive
    // doubled and the raw form must not appear inside a literal.
    if sql.contains("Can") {
        assert!(!sql.contains("Can't"));
    }
    for line in sql.lines().filter(|l| l.contains("Can''t")) {
        assert!(line.contains("''"));
    }
}

#[test]
fn offered_ticket_ids_render_as_array_or_null() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let sql = render_to_string(&outcome.data, 42).unwrap();

    let has_offers = outcome
        .data
        .listings
        .iter()
        .any(|l| l.offered_ticket_ids.is_some());
    if has_offers {
        assert!(sql.contains("ARRAY["));
    }
    let has_buys = outcome
        .data
        .listings
        .iter()
        .any(|l| l.offered_ticket_ids.is_none());
    if has_buys {
        assert!(sql.contains(", NULL, "));
    }
}

#[test]
fn header_carries_seed_and_counts() {
    let outcome = generator::run(&small_plan(), 99).unwrap();
    let sql = render_to_string(&outcome.data, 99).unwrap();

    assert!(sql.starts_with("-- Synthetic seed data"));
    assert!(sql.contains("seed 99"));
    assert!(sql.contains(&format!("Users: {}", outcome.data.users.len())));
}

#[test]
fn writes_identical_bytes_to_disk() {
    let outcome = generator::run(&small_plan(), 42).unwrap();
    let rendered = render_to_string(&outcome.data, 42).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("seed.sql");
    let file = std::fs::File::create(&path).unwrap();
    SqlWriter::new(file)
        .write_dataset(&outcome.data, 42)
        .unwrap();

    let mut on_disk = String::new();
    std::fs::File::open(&path)
        .unwrap()
        .read_to_string(&mut on_disk)
        .unwrap();
    assert_eq!(on_disk, rendered);
}

#[test]
fn empty_tables_emit_no_statement() {
    let plan = GenPlan {
        users: 10,
        events: 0,
        tickets: 0,
        listings: 0,
        trades: 0,
    };
    let outcome = generator::run(&plan, 42).unwrap();
    let sql = render_to_string(&outcome.data, 42).unwrap();

    assert!(sql.contains("INSERT INTO \"USER\" "));
    assert!(sql.contains("INSERT INTO user_balance_log "));
    assert!(!sql.contains("INSERT INTO event "));
    assert!(!sql.contains("INSERT INTO ticket "));
    assert!(!sql.contains("INSERT INTO trade "));
}
