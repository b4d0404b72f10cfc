use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = crate::APP_NAME)]
#[command(flatten_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Working copy to inspect
    #[clap(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,
    /// Read configuration from this file instead of the default location
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Enable logging to 'svnline.log'
    #[clap(long, action)]
    pub log: bool,

    #[clap(long, action)]
    /// Print version
    pub version: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: None,
            dir: PathBuf::from("."),
            config: None,
            log: false,
            version: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Print the status code of the working copy, or of a single file
    Status { path: Option<PathBuf> },
    /// Print the branch or tag label
    Branch,
    /// Print the branch label followed by the status code (default)
    Prompt,
}
