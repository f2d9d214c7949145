mod action;
mod app;
mod backend;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::{app::App, cli::Cli};

#[tokio::main]
async fn main() -> Result<()> {
    crate::errors::init()?;
    crate::logging::init()?;

    let args = Cli::parse();
    let mut app = App::new(args)?;
    app.run().await?;
    Ok(())
}
