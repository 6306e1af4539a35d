//! # dexterm
//!
//! A terminal browser for the Pokémon catalog served by PokeAPI.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → DetailCache → Normalizer → CatalogState → UI
//!                                          ↑
//!                                    FavoritesStore
//! ```
//!
//! - [`fetcher`]: HTTP client, detail cache and batched catalog loader
//! - [`normalizer`]: Converts raw detail records into [`Item`](domain::Item)s
//! - [`catalog`]: Filter/sort pipeline, pagination and the state owner
//! - [`store`]: SQLite-backed favorites
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! dexterm
//!
//! # Fire types from the first generation, heaviest last
//! dexterm list --category fire --generation 1 --sort weight
//!
//! # One entry in detail
//! dexterm show 25
//!
//! # Mark a favorite
//! dexterm fav 25
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher, detail cache and loader.
pub mod app;

/// Filtering, sorting and pagination over the loaded collection.
///
/// - [`recompute`](catalog::recompute): the pure filter/sort pipeline
/// - [`paginate`](catalog::paginate): page slicing with clamping
/// - [`CatalogState`](catalog::CatalogState): applies [`Intent`](catalog::Intent)s
pub mod catalog;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `list` - Print one filtered page
/// - `show <id>` - Print one entry
/// - `fav <id>` / `favs` - Manage favorites
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/dexterm/config.toml`, supporting:
/// - API source and load batching
/// - Page sizes and search debounce
/// - Custom colors (named or hex) and keybindings
pub mod config;

/// Core domain models: [`Item`](domain::Item) and the filter criteria.
pub mod domain;

/// Fetching the catalog.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for retrieving a URL
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`DetailCache`](fetcher::DetailCache): URL-keyed cache of successful payloads
/// - [`CatalogLoader`](fetcher::CatalogLoader): Index then details, in batches
pub mod fetcher;

pub mod normalizer;

/// SQLite persistence layer.
///
/// - [`KeyValueStore`](store::KeyValueStore): String key-value storage
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`FavoritesStore`](store::FavoritesStore): The persisted favorites set
pub mod store;

/// Terminal user interface.
///
/// A filter bar, the current page of results, a pagination line and a
/// status bar, with popups for the type picker and entry details.
pub mod tui;
