#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod debounce;
mod error;
mod prelude;
mod products;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse a remote product catalog from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base path of the catalog API, e.g. https://catalog.example.com/api
    #[clap(long, env = "VITRINE_API_BASE", global = true)]
    api_base: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "VITRINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Product catalog operations
    Products(crate::products::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Products(sub_app) => crate::products::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
