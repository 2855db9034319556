use super::{CmdResult, Context, load_session, load_session_with_file, print_json};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recent::abbreviate_path;
use crate::ops::list_ops::{Direction, ListError};

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

pub(super) fn cmd_list(args: ListCmd, ctx: &Context) -> CmdResult {
    match args.action {
        None => cmd_list_show(ListShowArgs { name: None }, ctx),
        Some(ListAction::Show(a)) => cmd_list_show(a, ctx),
        Some(ListAction::New(a)) => {
            let mut session = load_session_with_file(ctx)?;
            session.active_mut().add_list(&a.name)?;
            session.sync_active();
            println!("created list '{}'", a.name.trim());
            Ok(())
        }
        Some(ListAction::Rm(a)) => {
            let mut session = load_session_with_file(ctx)?;
            let count = session.active().items(&a.name)?.len();
            session.active_mut().delete_list(&a.name)?;
            session.sync_active();
            println!("deleted list '{}' ({} item(s) moved to trash)", a.name, count);
            Ok(())
        }
        Some(ListAction::Rename(a)) => {
            let mut session = load_session_with_file(ctx)?;
            session.active_mut().rename_list(&a.old, &a.new)?;
            session.sync_active();
            println!("renamed '{}' to '{}'", a.old, a.new.trim());
            Ok(())
        }
    }
}

fn cmd_list_show(args: ListShowArgs, ctx: &Context) -> CmdResult {
    let session = load_session(ctx);
    let doc = session.active().document();
    if let Some(name) = &args.name
        && doc.list(name).is_none()
    {
        return Err(ListError::NotFound(name.clone()).into());
    }
    let file = session
        .active_path()
        .map(|p| p.to_string_lossy().into_owned());

    if ctx.json {
        return print_json(&document_to_json(doc, file, args.name.as_deref()));
    }

    match &file {
        Some(f) => println!("file: {}", abbreviate_path(f)),
        None => println!("file: (none open)"),
    }
    for (name, items) in &doc.lists {
        if args.name.as_ref().is_some_and(|n| n != name) {
            continue;
        }
        println!();
        for line in format_list(name, items) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

pub(super) fn cmd_item(args: ItemCmd, ctx: &Context) -> CmdResult {
    let mut session = load_session_with_file(ctx)?;
    let lists = session.active_mut();
    match args.action {
        ItemAction::Add(a) => {
            if lists.add_item(&a.list, &a.text)? {
                println!("added to '{}'", a.list);
            } else {
                println!("nothing to add (blank text)");
            }
        }
        ItemAction::Edit(a) => {
            if lists.edit_item(&a.list, a.index, &a.text)? {
                println!("updated '{}' #{}", a.list, a.index);
            } else {
                println!("unchanged (blank text)");
            }
        }
        ItemAction::Rm(a) => {
            let item = lists.delete_item(&a.list, a.index)?;
            println!("moved '{}' to trash", item);
        }
        ItemAction::Up(a) => report_move(lists.move_item(&a.list, a.index, Direction::Up)?),
        ItemAction::Down(a) => report_move(lists.move_item(&a.list, a.index, Direction::Down)?),
        ItemAction::Mv(a) => {
            lists.move_item_to_list(&a.list, a.index, &a.target)?;
            println!("moved to '{}'", a.target);
        }
        ItemAction::Reorder(a) => report_move(lists.reorder_item(&a.list, a.from, a.to)?),
    }
    session.sync_active();
    Ok(())
}

fn report_move(moved: bool) {
    if moved {
        println!("moved");
    } else {
        println!("already in place");
    }
}

// ---------------------------------------------------------------------------
// Trash
// ---------------------------------------------------------------------------

pub(super) fn cmd_trash(args: TrashCmd, ctx: &Context) -> CmdResult {
    match args.action {
        None | Some(TrashAction::Show) => {
            let session = load_session(ctx);
            let trash = session.active().trash();
            if ctx.json {
                return print_json(&trash_to_json(trash));
            }
            if trash.is_empty() {
                println!("Trash is empty.");
            }
            for line in format_trash(trash) {
                println!("{}", line);
            }
            Ok(())
        }
        Some(TrashAction::Restore(a)) => {
            let mut session = load_session_with_file(ctx)?;
            let fallback = match a.to {
                Some(list) => list,
                None => session
                    .active()
                    .document()
                    .first_list_name()
                    .unwrap_or_default()
                    .to_string(),
            };
            let target = session.active_mut().restore_from_trash(a.index, &fallback)?;
            session.sync_active();
            println!("restored to '{}'", target);
            Ok(())
        }
        Some(TrashAction::Clear) => {
            let mut session = load_session_with_file(ctx)?;
            let count = session.active_mut().clear_trash()?;
            session.sync_active();
            println!("removed {} item(s) permanently", count);
            Ok(())
        }
    }
}
