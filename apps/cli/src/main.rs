#![deny(warnings)]

//! Headless driver: runs a seeded studio for a number of days and prints KPIs.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use studio_core::{AutomationMode, BalanceConfig, ProjectReport};
use studio_runtime::{ReportSink, Studio, StudioError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const PAYROLL_EVERY_DAYS: u32 = 7;
const STARTING_MONEY: i64 = 20_000;
const STARTING_LEVEL: u32 = 3;
const STARTING_HIRES: usize = 3;

struct Args {
    days: u32,
    seed: u64,
    mode: AutomationMode,
    config: Option<PathBuf>,
    save: Option<PathBuf>,
    load: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        days: 30,
        seed: 42,
        mode: AutomationMode::FullAuto,
        config: None,
        save: None,
        load: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--days" => {
                args.days = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .context("--days expects a number")?
            }
            "--seed" => {
                args.seed = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .context("--seed expects a number")?
            }
            "--mode" => {
                args.mode = match it.next().as_deref() {
                    Some("manual") => AutomationMode::Manual,
                    Some("semi") => AutomationMode::SemiAuto,
                    Some("full") => AutomationMode::FullAuto,
                    other => bail!("unknown --mode {other:?}; use manual, semi or full"),
                }
            }
            "--config" => args.config = it.next().map(PathBuf::from),
            "--save" => args.save = it.next().map(PathBuf::from),
            "--load" => args.load = it.next().map(PathBuf::from),
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(args)
}

/// Per-genre tallies, standing in for a market-trends collaborator.
#[derive(Clone, Default)]
struct GenreLedger(Rc<RefCell<BTreeMap<String, (u32, Decimal)>>>);

impl ReportSink for GenreLedger {
    fn on_project_resolved(&mut self, report: &ProjectReport) {
        let mut ledger = self.0.borrow_mut();
        let entry = ledger.entry(report.genre.clone()).or_default();
        entry.0 += 1;
        entry.1 += report.payout;
    }
}

fn new_studio(args: &Args) -> Result<Studio> {
    let config = match &args.config {
        Some(path) => BalanceConfig::load(path)
            .with_context(|| format!("loading balance config {}", path.display()))?,
        None => BalanceConfig::default(),
    };
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("start date")?;
    let mut studio = Studio::new(
        config,
        args.seed,
        Decimal::new(STARTING_MONEY, 0),
        STARTING_LEVEL,
        start,
    );
    studio.refresh_candidates()?;
    let picks: Vec<_> = studio
        .state()
        .staff
        .candidates()
        .iter()
        .take(STARTING_HIRES)
        .map(|c| c.id.clone())
        .collect();
    for id in picks {
        studio.hire(&id)?;
    }
    Ok(studio)
}

/// Take offers until the studio is full.
fn fill_lineup(studio: &mut Studio) {
    while studio.can_admit() {
        let Some(id) = studio.generate_offers(1).pop() else {
            break;
        };
        match studio.start_project(&id) {
            Ok(()) => {}
            Err(StudioError::CapacityExceeded { .. }) => break,
            Err(e) => {
                warn!(error = %e, "could not start offer");
                break;
            }
        }
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args()?;
    info!(days = args.days, seed = args.seed, mode = ?args.mode, "starting studio run");

    let mut studio = match &args.load {
        Some(path) => persistence::load(path)
            .with_context(|| format!("loading snapshot {}", path.display()))?,
        None => new_studio(&args)?,
    };
    studio.set_mode(args.mode);
    let ledger = GenreLedger::default();
    studio.register_sink(Box::new(ledger.clone()));

    fill_lineup(&mut studio);
    if args.mode == AutomationMode::Manual {
        studio.optimize_assignments();
    }

    let mut stages = 0;
    for _ in 0..args.days {
        let report = studio.advance_day();
        stages += report.stages_completed.len();
        if !report.resolved.is_empty() {
            fill_lineup(&mut studio);
            if args.mode == AutomationMode::Manual {
                studio.optimize_assignments();
            }
        }
        if report.day % PAYROLL_EVERY_DAYS == 0 {
            if let Err(e) = studio.run_payroll() {
                warn!(error = %e, day = report.day, "payroll missed");
            }
        }
    }

    let state = studio.state();
    let agg = &state.aggregate;
    let capacity = studio.capacity();
    println!(
        "Studio | date: {} | day: {} | staff: {} | active: {}/{}",
        agg.date,
        agg.day,
        state.staff.headcount(),
        capacity.current_projects,
        capacity.max_projects
    );
    println!(
        "KPI | money: ${} | reputation: {} | influence: {} | completed: {} | stages: {} | utilization: {:.0}%",
        agg.money,
        agg.reputation,
        agg.influence,
        agg.completed_projects.len(),
        stages,
        capacity.staff_utilization * 100.0
    );
    for (genre, (count, payout)) in ledger.0.borrow().iter() {
        println!("Genre | {genre}: {count} released, ${payout} earned");
    }
    for view in studio.project_views() {
        println!(
            "Project | {} | {:.1}% | rank {} | staff {} | eta {}",
            view.title,
            view.progress_percent,
            view.priority_rank,
            view.assigned_staff_ids.len(),
            view.estimated_days_remaining
                .map_or_else(|| "-".to_string(), |d| format!("{d}d"))
        );
    }

    if let Some(path) = &args.save {
        persistence::save(&studio, path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
        println!("Saved snapshot to {}", path.display());
    }
    Ok(())
}
