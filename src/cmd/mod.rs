//! Command-line entry: plan the run, confirm, generate, validate, write.

use crate::generator::{self, events, listings, tickets, trades, users, GenContext, GenPlan};
use crate::validate;
use crate::writer::SqlWriter;
use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ticket-seeder")]
#[command(version)]
#[command(
    about = "Generate deterministic SQL seed data for the Ticket Match database",
    long_about = None
)]
pub struct Cli {
    /// Number of users to generate
    #[arg(long, default_value_t = 3000)]
    pub users: usize,

    /// Number of events (each gets four sessions)
    #[arg(long, default_value_t = 300)]
    pub events: usize,

    /// Number of tickets (clamped to available seat capacity)
    #[arg(long, default_value_t = 10_000)]
    pub tickets: usize,

    /// Number of marketplace listings
    #[arg(long, default_value_t = 12_000)]
    pub listings: usize,

    /// Number of completed trades
    #[arg(long, default_value_t = 3000)]
    pub trades: usize,

    /// Overall scale multiplier applied to every count
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Random seed; the same seed and counts reproduce the output byte for byte
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output SQL file
    #[arg(short, long, default_value = "generated-data.sql")]
    pub output: PathBuf,

    /// Run referential integrity checks after generation (failures are fatal)
    #[arg(long)]
    pub validate: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    scale: f64,
    users: usize,
    events: usize,
    sessions: usize,
    tickets: usize,
    listings: usize,
    listing_tickets: usize,
    trades: usize,
    trade_participants: usize,
    trade_tickets: usize,
    balance_logs: usize,
    total_rows: usize,
    output: String,
    warnings: &'a [String],
    elapsed_secs: f64,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.scale <= 0.0 {
        bail!("--scale must be positive, got {}", cli.scale);
    }

    let plan = GenPlan {
        users: cli.users,
        events: cli.events,
        tickets: cli.tickets,
        listings: cli.listings,
        trades: cli.trades,
    }
    .scaled(cli.scale);

    if !cli.json {
        print_plan(&plan, &cli);
    }

    if !cli.yes && !confirm()? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let start_time = Instant::now();
    let mut ctx = GenContext::new(cli.seed);

    stage(&cli, "Generating users", &mut ctx, |ctx| {
        users::generate(ctx, plan.users);
        Ok(ctx.data.users.len())
    })?;
    stage(&cli, "Generating events and sessions", &mut ctx, |ctx| {
        events::generate(ctx, plan.events)?;
        Ok(ctx.data.sessions.len())
    })?;
    stage(&cli, "Allocating tickets", &mut ctx, |ctx| {
        tickets::generate(ctx, plan.tickets)
    })?;
    stage(&cli, "Planning listings", &mut ctx, |ctx| {
        listings::generate(ctx, plan.listings)?;
        Ok(ctx.data.listings.len())
    })?;
    stage(&cli, "Synthesizing trades", &mut ctx, |ctx| {
        trades::generate(ctx, plan.trades)?;
        Ok(ctx.data.trades.len())
    })?;

    let outcome = generator::GenOutcome {
        data: ctx.data,
        warnings: ctx.warnings,
    };

    if !cli.json {
        for warning in &outcome.warnings {
            eprintln!("Warning: {warning}");
        }
    }

    if cli.validate {
        let report = validate::check(&outcome.data);
        if !report.is_clean() {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for issue in &report.issues {
                    eprintln!("{issue}");
                }
                eprintln!();
                eprintln!("Result: FAILED ({} issues)", report.issues.len());
            }
            bail!("data integrity validation failed");
        }
        if !cli.json {
            eprintln!("Integrity checks passed.");
        }
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    SqlWriter::new(file)
        .write_dataset(&outcome.data, cli.seed)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    let elapsed = start_time.elapsed();

    if cli.json {
        let summary = RunSummary {
            seed: cli.seed,
            scale: cli.scale,
            users: outcome.data.users.len(),
            events: outcome.data.events.len(),
            sessions: outcome.data.sessions.len(),
            tickets: outcome.data.tickets.len(),
            listings: outcome.data.listings.len(),
            listing_tickets: outcome.data.offered_ticket_rows(),
            trades: outcome.data.trades.len(),
            trade_participants: outcome.data.participants.len(),
            trade_tickets: outcome.data.trade_tickets.len(),
            balance_logs: outcome.data.balance_logs.len() + outcome.data.users.len(),
            total_rows: outcome.data.total_rows(),
            output: cli.output.display().to_string(),
            warnings: &outcome.warnings,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n✓ Seed data written to {}", cli.output.display());
        println!("\nStatistics:");
        println!("  Users: {}", outcome.data.users.len());
        println!("  Events: {}", outcome.data.events.len());
        println!("  Sessions: {}", outcome.data.sessions.len());
        println!("  Tickets: {}", outcome.data.tickets.len());
        println!("  Listings: {}", outcome.data.listings.len());
        println!("  Trades: {}", outcome.data.trades.len());
        println!("  Total rows: {}", outcome.data.total_rows());
        println!("  Elapsed time: {:.3?}", elapsed);
    }

    Ok(())
}

fn print_plan(plan: &GenPlan, cli: &Cli) {
    println!("Ticket Match seed data generator");
    println!();
    println!("Planned rows (scale {}):", cli.scale);
    println!("  Users: {}", plan.users);
    println!("  Events: {}", plan.events);
    println!("  Sessions: {}", plan.sessions());
    println!("  Tickets: {} (may clamp to seat capacity)", plan.tickets);
    println!("  Listings: {}", plan.listings);
    println!("  Trades: {}", plan.trades);
    println!("  Trade participants: {}", plan.trades * 2);
    println!(
        "  Balance logs: {} (trade payments plus initial balances)",
        plan.trades * 2 + plan.users
    );
    println!();
    println!("Seed: {}", cli.seed);
    println!("Output: {}", cli.output.display());
    println!();
}

/// Ask the user to confirm the run. Declining is not an error.
fn confirm() -> anyhow::Result<bool> {
    eprint!("Proceed with generation? [y/N]: ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Wrap a pipeline stage with a spinner (suppressed under --json). The stage
/// closure returns the realized row count for the finish message.
fn stage<F>(cli: &Cli, message: &str, ctx: &mut GenContext, body: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut GenContext) -> anyhow::Result<usize>,
{
    let pb = if cli.json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message(message.to_string());
        Some(pb)
    };

    let count = body(ctx)?;

    if let Some(pb) = pb {
        pb.finish_with_message(format!("{message}: {count} rows"));
    }
    Ok(())
}
