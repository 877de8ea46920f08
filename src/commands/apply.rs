//! Apply and plan - reconcile the intent file against the switch
//!
//! `apply` walks the intent file's resources through the reconciliation
//! engine, one existence check plus at most one mutating command each.
//! Independent resources may run in parallel with `--jobs`; the engine
//! itself shares nothing between invocations. `plan` runs the same
//! resolution and existence checks but renders instead of executing.

use anyhow::{Context as AnyhowContext, Result, bail};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use nvoskit::CliSession;
use reconcile::selector::{Action, select};
use reconcile::{DesiredState, Identity, Operation, Outcome, Reconciler, RunSummary, render};

use crate::Context;
use crate::config::{self, PlannedResource};
use crate::progress;
use crate::ui;

pub struct ApplyOptions {
    pub dry_run: bool,
    pub yes: bool,
    pub jobs: usize,
    pub json: bool,
}

/// Row of the `--json` report: one intent entry with its outcome or error.
#[derive(Serialize)]
struct ReportRow<'a> {
    resource: &'a str,
    id: String,
    operation: Operation,
    #[serde(flatten)]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn apply(
    ctx: &Context,
    config_path: Option<&str>,
    switch: Option<String>,
    cli_path: &str,
    opts: &ApplyOptions,
) -> Result<()> {
    let (path, file) = config::load(config_path)?;
    let planned = config::plan_resources(&file)?;

    if planned.is_empty() {
        ui::info("Intent file has no resources");
        return Ok(());
    }

    let target = switch.or_else(|| file.switch.clone());
    let session = CliSession::new()
        .with_cli_path(cli_path)
        .on_switch(target.clone());

    if !opts.json {
        ui::header(&format!("Reconciling {} resource(s)", planned.len()));
        ui::kv("Intent", &path.display().to_string());
        ui::kv("Switch", target.as_deref().unwrap_or("local"));
    }

    if opts.dry_run {
        return preview(&session, &planned);
    }

    if !opts.yes && !confirm_proceed()? {
        println!();
        println!("  {} Aborted", "✗".red());
        return Ok(());
    }

    let show_progress = !opts.json && !ctx.quiet;
    let results = execute(&session, &planned, opts.jobs, show_progress)?;

    let mut summary = RunSummary::default();
    let mut errors = 0usize;

    if !opts.json {
        println!();
    }
    for (res, result) in planned.iter().zip(&results) {
        match result {
            Ok(outcome) => {
                summary.add(outcome);
                if !opts.json {
                    report_outcome(ctx, res, outcome);
                }
            }
            Err(err) => {
                errors += 1;
                if !opts.json {
                    println!("  {} {} - {}", "✗".red(), res.display_id(), err);
                }
            }
        }
    }

    if opts.json {
        let rows: Vec<ReportRow> = planned
            .iter()
            .zip(&results)
            .map(|(res, result)| ReportRow {
                resource: res.schema.kind,
                id: res.display_id(),
                operation: res.op,
                outcome: result.as_ref().ok(),
                error: result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_summary(&summary, errors);
    }

    if summary.failed > 0 || errors > 0 {
        bail!(
            "{} of {} resource(s) did not reconcile",
            summary.failed + errors,
            planned.len()
        );
    }
    Ok(())
}

/// What `plan` would do for one resource.
enum PlanView {
    /// Already converged; carries the skip reason
    Converged(String),
    /// A command would run; carries its audit rendition
    Pending(String),
}

/// Run `apply` in preview mode: `plan` and `apply --dry-run`.
fn preview(session: &CliSession, planned: &[PlannedResource]) -> Result<()> {
    ui::section("Plan");

    let mut pending = 0usize;
    for res in planned {
        match plan_one(session, res) {
            Ok(PlanView::Converged(reason)) => {
                println!("  {} {}", "⊘".dimmed(), reason.dimmed());
            }
            Ok(PlanView::Pending(command)) => {
                pending += 1;
                println!("  {} {}", "→".cyan(), command);
            }
            Err(err) => {
                println!("  {} {} - {}", "✗".red(), res.display_id(), err);
            }
        }
    }

    println!();
    if pending == 0 {
        ui::success("Nothing to do - device state matches intent");
    } else {
        ui::info(&format!("{pending} command(s) would run"));
    }
    Ok(())
}

fn plan_one(session: &CliSession, res: &PlannedResource) -> reconcile::Result<PlanView> {
    let identity = Identity::resolve(res.schema, &res.identity)?;
    let desired = match res.op {
        Operation::Delete => DesiredState::empty(),
        Operation::Create | Operation::Modify => DesiredState::resolve(res.schema, &res.set)?,
    };

    match select(session, res.schema, res.op, &identity)? {
        Action::Skip { reason } => Ok(PlanView::Converged(reason)),
        Action::Execute { verb } => {
            let command = render::render(verb, &identity, &desired);
            Ok(PlanView::Pending(command.audit()))
        }
    }
}

/// Reconcile every planned resource, sequentially or in a bounded pool.
fn execute(
    session: &CliSession,
    planned: &[PlannedResource],
    jobs: usize,
    show_progress: bool,
) -> Result<Vec<reconcile::Result<Outcome>>> {
    let pb = show_progress.then(|| progress::bar(planned.len() as u64, "Reconciling"));

    let results = if jobs <= 1 || planned.len() == 1 {
        let mut results = Vec::with_capacity(planned.len());
        for res in planned {
            if let Some(pb) = &pb {
                pb.set_message(res.display_id());
            }
            results.push(reconcile_one(session, res));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        results
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to create reconcile thread pool")?;

        pool.install(|| {
            planned
                .par_iter()
                .map(|res| {
                    let result = reconcile_one(session, res);
                    if let Some(pb) = &pb {
                        pb.set_message(res.display_id());
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        })
    };

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    Ok(results)
}

fn reconcile_one(session: &CliSession, res: &PlannedResource) -> reconcile::Result<Outcome> {
    Reconciler::new(session).reconcile(res.schema, res.op, &res.identity, &res.set)
}

fn report_outcome(ctx: &Context, res: &PlannedResource, outcome: &Outcome) {
    if outcome.failed() {
        println!("  {} {} - {}", "✗".red(), res.display_id(), outcome.message);
        if let Some(stderr) = &outcome.stderr
            && !stderr.is_empty()
        {
            ui::dim(&format!("    {stderr}"));
        }
    } else if outcome.skipped {
        println!(
            "  {} {} - {}",
            "⊘".yellow(),
            res.display_id(),
            outcome.message.as_str().dimmed()
        );
    } else {
        println!("  {} {} - {}", "✓".green(), res.display_id(), outcome.message);
        if ctx.verbose > 0
            && let Some(command) = &outcome.command
        {
            ui::dim(&format!("    {command}"));
        }
    }
}

/// Confirm with user
fn confirm_proceed() -> Result<bool> {
    use dialoguer::Confirm;

    let confirmed = Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()?;

    Ok(confirmed)
}

/// Print final summary
fn print_summary(summary: &RunSummary, errors: usize) {
    println!();
    if summary.is_success() && errors == 0 {
        println!("  {} Configuration reconciled", "✓".green().bold());
    } else {
        println!(
            "  {} Reconciliation finished with failures",
            "⚠".yellow().bold()
        );
    }

    if summary.changed > 0 {
        println!("    • {} resource(s) changed", summary.changed);
    }
    if summary.skipped > 0 {
        println!("    • {} resource(s) already converged", summary.skipped);
    }
    if summary.failed > 0 {
        println!("    • {} {} failed on the device", summary.failed, "resource(s)".red());
    }
    if errors > 0 {
        println!(
            "    • {} {} not attempted (config or query errors)",
            errors,
            "resource(s)".red()
        );
    }
}
