pub mod filter;
pub mod item;

pub use filter::{FilterConfig, Generation, SortKey, KNOWN_CATEGORIES};
pub use item::{Item, Stat};
