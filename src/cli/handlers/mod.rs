mod config;
mod deadline;
mod files;
mod lists;

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::cli::commands::*;
use crate::io::config_io;
use crate::model::config::AppConfig;
use crate::ops::session::MultiFileSession;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// What every handler needs besides its own arguments
pub struct Context {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, ctx: &Context) -> CmdResult {
    match command {
        Commands::Deadline(args) => deadline::cmd_deadline(args, ctx),
        Commands::List(args) => lists::cmd_list(args, ctx),
        Commands::Item(args) => lists::cmd_item(args, ctx),
        Commands::Trash(args) => lists::cmd_trash(args, ctx),
        Commands::File(args) => files::cmd_file(args, ctx),
        Commands::Import(args) => files::cmd_import(args, ctx),
        Commands::Export(args) => files::cmd_export(args, ctx),
        Commands::Config(args) => config::cmd_config(args, ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn load_session(ctx: &Context) -> MultiFileSession {
    MultiFileSession::restore(config_io::recent_files_path(&ctx.config))
}

/// Session whose active document is backed by a file, for commands that
/// write through.
fn load_session_with_file(ctx: &Context) -> Result<MultiFileSession, Box<dyn std::error::Error>> {
    let session = load_session(ctx);
    if session.active_path().is_none() {
        return Err("no list file open (use `dk file open <path>` or `dk file new <path>`)".into());
    }
    Ok(session)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
