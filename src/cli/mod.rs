pub mod build;

use std::path::PathBuf;

use clap::Parser;

/// tqsprite - Convert sprite sheets into TIQuest include files
#[derive(Parser, Debug, Clone)]
#[command(name = "tqsprite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the input image
    #[arg(short, long)]
    pub image: PathBuf,

    /// Path to a csv file describing how the frames are laid out
    #[arg(short, long)]
    pub map: PathBuf,

    /// Output .inc file
    #[arg(short, long)]
    pub out: PathBuf,
}
