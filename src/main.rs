use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::{AppConfig, KeyResolver};
use crate::source::Dataset;

mod app;
mod cli;
mod config;
mod dashboard;
mod export;
mod model;
mod screen;
mod search;
mod source;
pub mod table;
mod theme;
pub mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting quantum-admin");

    let args = cli::Args::parse();

    let mut config = config::load(args.config.as_deref())?;
    apply_cli_args(&mut config, &args);
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
    let theme = theme::theme_from_name(&config.theme.name);

    let dataset = match &args.data_dir {
        Some(dir) => Dataset::load(dir)?,
        None => Dataset::demo(),
    };

    let mut app = App::new(dataset, &config.table, resolver, theme, args.export_dir.clone());
    app.select_tab(args.dataset.index());
    app.run().await?;

    info!("Exiting quantum-admin");
    Ok(())
}

/// Command-line flags take precedence over the config file.
fn apply_cli_args(config: &mut AppConfig, args: &cli::Args) {
    if let Some(page_size) = args.page_size {
        config.table.items_per_page = page_size;
    }
    if let Some(paging) = args.paging {
        config.table.paging = paging;
    }
    if let Some(sorting) = args.sorting {
        config.table.sorting = sorting;
    }
    if let Some(theme) = &args.theme {
        config.theme.name.clone_from(theme);
    }
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("quantum-admin").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "quantum-admin.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
