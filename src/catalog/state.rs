//! The single owner of catalog state.
//!
//! All mutation goes through [`CatalogState::apply`]; rendering reads the
//! derived [`PageView`].

use crate::app::{DexError, Result};
use crate::catalog::filter::recompute_indices;
use crate::catalog::paginator::{self, PageInfo, DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES};
use crate::domain::{FilterConfig, Generation, Item, SortKey};
use crate::store::FavoritesStore;

/// A user action the state knows how to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetText(String),
    ToggleCategory(String),
    SetGeneration(Option<Generation>),
    CycleGeneration,
    SetSort(SortKey),
    CycleSort,
    ToggleFavoritesOnly,
    Reset,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GoToPage(usize),
    SetPageSize(usize),
    CyclePageSize,
    ToggleFavorite(u32),
}

/// Everything needed to draw one page.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub rows: Vec<PageRow<'a>>,
    pub page: PageInfo,
}

#[derive(Debug, Clone, Copy)]
pub struct PageRow<'a> {
    pub item: &'a Item,
    pub is_favorite: bool,
}

pub struct CatalogState {
    items: Vec<Item>,
    filters: FilterConfig,
    favorites: FavoritesStore,
    shown: Vec<usize>,
    page: usize,
    page_size: usize,
    page_size_choices: Vec<usize>,
}

impl CatalogState {
    pub fn new(items: Vec<Item>, favorites: FavoritesStore) -> Self {
        let mut state = Self {
            items,
            filters: FilterConfig::default(),
            favorites,
            shown: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_choices: PAGE_SIZE_CHOICES.to_vec(),
        };
        state.recompute();
        state
    }

    /// Restricts page sizes to `choices`, falling back to the defaults when empty.
    pub fn with_page_sizes(mut self, page_size: usize, choices: &[usize]) -> Self {
        let mut choices: Vec<usize> = choices.iter().copied().filter(|&c| c > 0).collect();
        if choices.is_empty() {
            choices = PAGE_SIZE_CHOICES.to_vec();
        }
        choices.sort_unstable();
        choices.dedup();
        self.page_size = if choices.contains(&page_size) {
            page_size
        } else {
            choices[0]
        };
        self.page_size_choices = choices;
        self.page = 1;
        self
    }

    pub fn apply(&mut self, intent: Intent) -> Result<()> {
        tracing::trace!("Applying {:?}", intent);
        match intent {
            Intent::SetText(text) => {
                self.filters.set_text(&text);
                self.recompute();
            }
            Intent::ToggleCategory(category) => {
                self.filters.toggle_category(&category);
                self.recompute();
            }
            Intent::SetGeneration(generation) => {
                self.filters.generation = generation;
                self.recompute();
            }
            Intent::CycleGeneration => {
                self.filters.generation = Generation::cycle(self.filters.generation);
                self.recompute();
            }
            Intent::SetSort(key) => {
                self.filters.sort_by = key;
                self.recompute();
            }
            Intent::CycleSort => {
                self.filters.sort_by = self.filters.sort_by.next();
                self.recompute();
            }
            Intent::ToggleFavoritesOnly => {
                self.filters.favorites_only = !self.filters.favorites_only;
                self.recompute();
            }
            Intent::Reset => {
                self.filters = FilterConfig::default();
                self.recompute();
            }
            Intent::FirstPage => self.go_to(1),
            Intent::PrevPage => self.go_to(self.page.saturating_sub(1)),
            Intent::NextPage => self.go_to(self.page + 1),
            Intent::LastPage => self.go_to(self.total_pages()),
            Intent::GoToPage(page) => self.go_to(page),
            Intent::SetPageSize(size) => {
                if !self.page_size_choices.contains(&size) {
                    return Err(DexError::Other(format!(
                        "Page size {} is not one of {:?}",
                        size, self.page_size_choices
                    )));
                }
                self.page_size = size;
                self.go_to(1);
            }
            Intent::CyclePageSize => {
                let pos = self
                    .page_size_choices
                    .iter()
                    .position(|&c| c == self.page_size)
                    .unwrap_or(0);
                self.page_size = self.page_size_choices[(pos + 1) % self.page_size_choices.len()];
                self.go_to(1);
            }
            Intent::ToggleFavorite(id) => {
                let result = self.favorites.toggle(id);
                if self.filters.favorites_only {
                    // Membership changed under an active favorites filter.
                    self.recompute();
                }
                result?;
            }
        }
        Ok(())
    }

    pub fn view(&self) -> PageView<'_> {
        let (slice, page) = paginator::paginate(&self.shown, self.page, self.page_size);
        let rows = slice
            .iter()
            .map(|&i| {
                let item = &self.items[i];
                PageRow {
                    item,
                    is_favorite: self.favorites.is_favorite(item.id),
                }
            })
            .collect();
        PageView { rows, page }
    }

    /// The shown sequence in display order.
    pub fn shown(&self) -> impl Iterator<Item = &Item> + '_ {
        self.shown.iter().map(|&i| &self.items[i])
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.shown.len(), self.page_size)
    }

    fn recompute(&mut self) {
        self.shown = recompute_indices(&self.items, &self.filters, self.favorites.set());
        self.page = 1;
        tracing::debug!("{} of {} items shown", self.shown.len(), self.items.len());
    }

    fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }
}
