use super::{CmdResult, Context};
use crate::cli::commands::{ConfigAction, ConfigCmd};
use crate::io::config_io;
use crate::model::config::AppConfig;

pub(super) fn cmd_config(args: ConfigCmd, ctx: &Context) -> CmdResult {
    match args.action {
        None | Some(ConfigAction::Path) => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        Some(ConfigAction::Init(a)) => {
            config_io::write_config_to(&ctx.config_path, &AppConfig::default(), a.force)?;
            println!("wrote {}", ctx.config_path.display());
            Ok(())
        }
    }
}
