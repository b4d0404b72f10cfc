use clap::Parser;
use git_version::git_version;
use log::LevelFilter;
use std::io;
use svnline::{Res, cli, error::Error};

pub const VERSION: &str = git_version!(
    args = ["--tags", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

fn main() -> Res<()> {
    let args = cli::Args::parse();

    if args.version {
        println!("svnline {}", VERSION);
        return Ok(());
    }

    if args.log {
        simple_logging::log_to_file("svnline.log", LevelFilter::Debug)
            .map_err(Error::OpenLogFile)?;
    }

    log::debug!("Starting with {:?}", args);
    svnline::run(&args, &mut io::stdout().lock())
}
