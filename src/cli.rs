use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::filter::{FilterCriteria, PropertyKind, Purpose, RangeBound};
use crate::listing::ListingId;

#[derive(Debug, Parser)]
#[command(name = "imoveis-cli")]
#[command(about = "Browse real-estate listings and manage favorites from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the listings API (overrides config and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Rows requested per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Start the interactive browser (default)
    Browse,

    /// Page through listings and print them
    List {
        /// Number of pages to request
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Keep paging until the server runs out of rows
        #[arg(long, conflicts_with = "pages")]
        all: bool,

        #[command(flatten)]
        filters: FilterArgs,

        /// Write the rows to CSV instead of printing (file or directory)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Manage the favorites list
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesCommand {
    /// Print all favorites
    List {
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Remove a favorite by listing id
    Remove { id: ListingId },

    /// Find a listing by id and add it to favorites
    Add {
        id: ListingId,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// venda, locacao or temporada
    #[arg(long)]
    pub purpose: Option<String>,

    /// casa, apartamento, sala, barracao, chacara, terreno or rancho
    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long)]
    pub neighborhood: Option<String>,

    #[arg(long)]
    pub land_min: Option<f64>,
    #[arg(long)]
    pub land_max: Option<f64>,
    #[arg(long)]
    pub built_min: Option<f64>,
    #[arg(long)]
    pub built_max: Option<f64>,
    #[arg(long)]
    pub sale_min: Option<f64>,
    #[arg(long)]
    pub sale_max: Option<f64>,
    #[arg(long)]
    pub rent_min: Option<f64>,
    #[arg(long)]
    pub rent_max: Option<f64>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            purpose: self.purpose.as_deref().map(str::parse::<Purpose>).transpose()?,
            kind: self.kind.as_deref().map(str::parse::<PropertyKind>).transpose()?,
            neighborhood: self
                .neighborhood
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            land_area: RangeBound::new(self.land_min, self.land_max),
            built_area: RangeBound::new(self.built_min, self.built_max),
            sale_price: RangeBound::new(self.sale_min, self.sale_max),
            rent_price: RangeBound::new(self.rent_min, self.rent_max),
        })
    }
}
