pub mod cli;
pub mod config;
pub mod error;
pub mod file_status;
pub mod file_watcher;
mod process;
pub mod svn;

#[cfg(all(test, unix))]
mod tests;

use cli::Commands;
use error::Error;
use std::{error::Error as StdError, io::Write};

pub use process::SvnCommand;
pub use svn::{Backend, Info, NativeClient, Repository, StatusCode, XmlClient};

const APP_NAME: &str = "svnline";

pub type Res<T> = Result<T, Box<dyn StdError>>;

pub fn run(args: &cli::Args, out: &mut impl Write) -> Res<()> {
    log::debug!("Initializing config");
    let config = config::init_config(args.config.as_deref())?;

    let command = args.command.clone().unwrap_or(Commands::Prompt);

    log::debug!("Opening working copy {:?}", args.dir);
    let repo = match Repository::open(&args.dir, &config.svn) {
        Ok(repo) => repo,
        Err(e) if command == Commands::Prompt && Error::is_svn_unavailable(&*e) => {
            log::warn!("{}, hiding prompt", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    match command {
        Commands::Status { path } => {
            if let Some(status) = repo.status(path.as_deref())? {
                writeln!(out, "{}", status)?;
            }
        }
        Commands::Branch => writeln!(out, "{}", repo.branch()?)?,
        Commands::Prompt => {
            let branch = repo.branch()?;
            match repo.status(None)? {
                Some(status) => writeln!(out, "{} {}", branch, status)?,
                None => writeln!(out, "{}", branch)?,
            }
        }
    }

    Ok(())
}
