use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use log::LevelFilter;

use crate::api::HttpApi;
use crate::app::commands;
use crate::app::controller::AppController;
use crate::app::state::SharedApi;
use crate::cli::{Cli, Commands, FavoritesCommand};
use crate::config::{self, validate_config, Config};
use crate::error::{Context, Result};

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// `RUST_LOG` wins over `-v`. With `log_file` set, records go there instead of stderr.
fn init_logger(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbose)).parse_default_env();

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let config = config::load(cli.config.as_deref())?
        .with_overrides(cli.api_url.as_deref(), cli.page_size);
    validate_config(&config)?;
    Ok(config)
}

/// Entry point used by `main`: merge configuration, set up logging, dispatch the command.
pub async fn run(cli: Cli) -> Result<()> {
    let command = cli.selected_command();
    let config = resolve_config(&cli)?;

    let log_file = matches!(command, Commands::Browse).then_some(config.log_file.as_path());
    init_logger(cli.verbose, log_file)?;

    let api: SharedApi = Arc::new(HttpApi::new(&config.api)?);
    let page_size = config.api.page_size;

    match command {
        Commands::Browse => AppController::new(api, page_size).run().await,
        Commands::List {
            pages,
            all,
            filters,
            csv,
        } => {
            let max_pages = (!all).then_some(pages);
            commands::run_list(api, page_size, filters.to_criteria()?, max_pages, csv.as_deref())
                .await
        }
        Commands::Favorites(FavoritesCommand::List { csv }) => {
            commands::run_favorites_list(api, csv.as_deref()).await
        }
        Commands::Favorites(FavoritesCommand::Remove { id }) => {
            let notice = commands::run_favorites_remove(api, id).await?;
            println!("{notice}");
            Ok(())
        }
        Commands::Favorites(FavoritesCommand::Add { id, filters }) => {
            let notice =
                commands::run_favorites_add(api, page_size, filters.to_criteria()?, id).await?;
            println!("{notice}");
            Ok(())
        }
    }
}
