use std::path::Path;

use super::{CmdResult, Context, load_session, print_json};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recent::abbreviate_path;
use crate::ops::transfer;

pub(super) fn cmd_file(args: FileCmd, ctx: &Context) -> CmdResult {
    let mut session = load_session(ctx);
    match args.action {
        None | Some(FileAction::List) => {
            let active = session
                .active_path()
                .map(|p| p.to_string_lossy().into_owned());
            let files: Vec<OpenFileJson> = session
                .open_files()
                .map(|path| OpenFileJson {
                    path: path.to_string(),
                    active: active.as_deref() == Some(path),
                })
                .collect();
            if ctx.json {
                return print_json(&files);
            }
            if files.is_empty() {
                println!("No files open.");
            }
            for f in &files {
                let marker = if f.active { '*' } else { ' ' };
                println!("{} {}", marker, abbreviate_path(&f.path));
            }
        }
        Some(FileAction::New(a)) => {
            let path = Path::new(&a.path);
            if path.exists() {
                return Err(format!("{} already exists (use `dk file open`)", a.path).into());
            }
            session.new_file()?;
            session.save_as(path)?;
            println!("created {}", a.path);
        }
        Some(FileAction::Open(a)) => {
            session.open(Path::new(&a.path))?;
            println!("opened {}", a.path);
        }
        Some(FileAction::SaveAs(a)) => {
            session.save_as(Path::new(&a.path))?;
            println!("saved as {}", a.path);
        }
        Some(FileAction::Switch(a)) => {
            session.switch(Path::new(&a.path))?;
            println!("switched to {}", a.path);
        }
        Some(FileAction::Close(a)) => {
            let path = match a.path {
                Some(p) => p,
                None => session
                    .active_path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .ok_or("no file open")?,
            };
            session.close(Path::new(&path))?;
            println!("closed {}", path);
        }
    }
    Ok(())
}

/// Replace the active document with the text file's lines and save it as
/// `output`, which becomes the active file.
pub(super) fn cmd_import(args: ImportArgs, ctx: &Context) -> CmdResult {
    let output = Path::new(&args.output);
    if output.exists() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", args.output).into());
    }
    let doc = transfer::import_txt_file(Path::new(&args.txt))?;
    let count = doc.item_count();
    let mut session = load_session(ctx);
    session.replace_active(doc)?;
    session.save_as(output)?;
    println!("imported {} item(s) into {}", count, args.output);
    Ok(())
}

pub(super) fn cmd_export(args: ExportArgs, ctx: &Context) -> CmdResult {
    let session = load_session(ctx);
    let items = session.active().items(&args.list)?;
    transfer::export_txt_file(Path::new(&args.txt), items)?;
    println!("exported {} item(s) to {}", items.len(), args.txt);
    Ok(())
}
