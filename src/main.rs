use clap::Parser;
use miette::Result;
use tqsprite::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tqsprite::cli::build::run(cli)?;
    Ok(())
}
