use std::io::Write;
use std::time::Duration;

use chrono::Datelike;

use super::{CmdResult, Context, local_now, print_json};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::ops::deadline_ops::{self, DeadlineError, DeadlineStore};
use crate::ops::notify::UrgencyNotifier;
use crate::ops::refresh::{self, DeadlineRow};

pub(super) fn cmd_deadline(args: DeadlineCmd, ctx: &Context) -> CmdResult {
    match args.action {
        None | Some(DeadlineAction::List) => cmd_deadline_list(ctx),
        Some(DeadlineAction::Add(a)) => cmd_deadline_add(a, ctx),
        Some(DeadlineAction::Edit(a)) => cmd_deadline_edit(a, ctx),
        Some(DeadlineAction::Rm(a)) => cmd_deadline_rm(a, ctx),
        Some(DeadlineAction::Watch(a)) => cmd_deadline_watch(a, ctx),
    }
}

fn open_store(ctx: &Context) -> DeadlineStore {
    DeadlineStore::open(&ctx.config.deadlines.file)
}

fn print_rows(rows: &[DeadlineRow], json: bool) -> CmdResult {
    if json {
        let items: Vec<DeadlineJson> = rows.iter().map(row_to_json).collect();
        return print_json(&items);
    }
    if rows.is_empty() {
        println!("No deadlines. Add one with `dk deadline add <name> <MM-DD>`.");
        return Ok(());
    }
    for line in format_deadline_table(rows) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_deadline_list(ctx: &Context) -> CmdResult {
    let mut store = open_store(ctx);
    let rows = refresh::build_rows(&mut store, local_now());
    print_rows(&rows, ctx.json)
}

fn cmd_deadline_add(args: DeadlineAddArgs, ctx: &Context) -> CmdResult {
    let now = local_now();
    let deadline_at =
        deadline_ops::parse_deadline_input(&args.date, args.year.as_deref(), args.time.as_deref(), now)?;
    let days_needed = match args.days.as_deref() {
        Some(text) => deadline_ops::parse_days_needed(text)?,
        None => None,
    };
    let mut store = open_store(ctx);
    let added = store.add(&args.name, Some(deadline_at), days_needed, now)?;
    println!(
        "added '{}' due {}",
        added.name,
        added.deadline_at.format(DISPLAY_DATE_FORMAT)
    );
    Ok(())
}

fn cmd_deadline_edit(args: DeadlineEditArgs, ctx: &Context) -> CmdResult {
    let now = local_now();
    let mut store = open_store(ctx);
    store.sort_by_deadline();
    let current = store
        .get(args.index)
        .cloned()
        .ok_or(DeadlineError::NotFound(args.index))?;

    let name = args.name.unwrap_or_else(|| current.name.clone());
    let deadline_at = if args.date.is_some() || args.year.is_some() || args.time.is_some() {
        // A short MM-DD date keeps the deadline's own year unless --year is given
        let year = args
            .year
            .unwrap_or_else(|| current.deadline_at.year().to_string());
        let date = args
            .date
            .unwrap_or_else(|| current.deadline_at.format("%m-%d").to_string());
        let time = args
            .time
            .unwrap_or_else(|| current.deadline_at.format("%H:%M").to_string());
        deadline_ops::parse_deadline_input(&date, Some(&year), Some(&time), now)?
    } else {
        current.deadline_at
    };
    let days_needed = if args.clear_days {
        None
    } else {
        match args.days.as_deref() {
            Some(text) => deadline_ops::parse_days_needed(text)?,
            None => current.days_needed.map(i64::from),
        }
    };

    store.edit(args.index, &name, Some(deadline_at), days_needed, now)?;
    println!("updated {}", args.index);
    Ok(())
}

fn cmd_deadline_rm(args: DeadlineIndexArg, ctx: &Context) -> CmdResult {
    let mut store = open_store(ctx);
    store.sort_by_deadline();
    let removed = store.delete(args.index)?;
    println!("deleted '{}'", removed.name);
    Ok(())
}

/// Reload, refresh and redraw on every tick so edits made by other `dk`
/// invocations show up.
fn cmd_deadline_watch(args: WatchArgs, ctx: &Context) -> CmdResult {
    let interval = args
        .interval
        .unwrap_or(ctx.config.deadlines.refresh_interval_secs)
        .max(1);
    let mut notifier = UrgencyNotifier::from_config(&ctx.config.notify);
    loop {
        let mut store = open_store(ctx);
        let rows = refresh::refresh(&mut store, &mut notifier, local_now());
        if !args.once && !ctx.json {
            // clear screen, cursor home
            print!("\x1b[2J\x1b[H");
        }
        print_rows(&rows, ctx.json)?;
        std::io::stdout().flush()?;
        if args.once {
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(interval));
    }
}
