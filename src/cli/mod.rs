pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Generation, SortKey};

#[derive(Parser)]
#[command(name = "dexterm")]
#[command(about = "Browse the Pokémon catalog from the terminal", long_about = None)]
pub struct Cli {
    /// Number of entries to load from the index
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Detail requests issued together while loading
    #[arg(short, long, global = true)]
    pub batch_size: Option<usize>,

    /// Defaults to `tui`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI
    Tui,
    /// Print one page of the filtered catalog
    List(ListArgs),
    /// Show everything known about one entry
    Show {
        /// Numeric id, e.g. 25
        id: u32,
    },
    /// Add or remove a favorite
    Fav {
        id: u32,
    },
    /// List favorite ids
    Favs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the name
    #[arg(short, long)]
    pub query: Option<String>,

    /// Keep entries that have all of these types (repeatable)
    #[arg(short = 't', long = "category")]
    pub categories: Vec<String>,

    /// Generation number, 1 to 9
    #[arg(short, long)]
    pub generation: Option<Generation>,

    /// id, name, height or weight
    #[arg(short, long, default_value_t = SortKey::Id)]
    pub sort: SortKey,

    /// Only show favorites
    #[arg(short, long)]
    pub favorites: bool,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,
}
