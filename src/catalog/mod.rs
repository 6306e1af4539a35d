//! Client-side view over the loaded collection: filtering, sorting and paging.

pub mod filter;
pub mod paginator;
pub mod state;

pub use filter::recompute;
pub use paginator::{paginate, PageInfo};
pub use state::{CatalogState, Intent, PageRow, PageView};
