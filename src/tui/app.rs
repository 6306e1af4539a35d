use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

use crate::catalog::{CatalogState, Intent};
use crate::domain::{Item, KNOWN_CATEGORIES};
use crate::tui::debounce::Debouncer;
use crate::tui::event::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    Categories,
    Detail(u32),
}

/// Side effects the event loop performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenUrl(String),
}

pub struct TuiApp {
    pub catalog: Option<CatalogState>,
    pub mode: Mode,
    pub row_index: usize,
    pub list_state: ListState,
    pub category_index: usize,
    pub category_list_state: ListState,
    pub search_input: String,
    pub search_debounce: Debouncer<String>,
    pub detail_scroll: u16,
    pub should_quit: bool,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(search_debounce: Duration) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        let mut category_list_state = ListState::default();
        category_list_state.select(Some(0));

        Self {
            catalog: None,
            mode: Mode::Browse,
            row_index: 0,
            list_state,
            category_index: 0,
            category_list_state,
            search_input: String::new(),
            search_debounce: Debouncer::new(search_debounce),
            detail_scroll: 0,
            should_quit: false,
            is_loading: true,
            load_error: None,
            status_message: None,
        }
    }

    /// Installs the loaded catalog.
    pub fn loaded(&mut self, catalog: CatalogState) {
        self.catalog = Some(catalog);
        self.is_loading = false;
        self.sync_selection();
    }

    pub fn load_failed(&mut self, message: String) {
        self.load_error = Some(message);
        self.is_loading = false;
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let catalog = self.catalog.as_ref()?;
        catalog.view().rows.get(self.row_index).map(|row| row.item)
    }

    pub fn detail_item(&self) -> Option<&Item> {
        match self.mode {
            Mode::Detail(id) => self.catalog.as_ref()?.item(id),
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Option<Command> {
        if action == Action::Quit {
            self.should_quit = true;
            return None;
        }

        match self.mode {
            Mode::Browse => self.handle_browse(action),
            Mode::Categories => {
                self.handle_categories(action);
                None
            }
            Mode::Detail(id) => self.handle_detail(id, action),
            // Search input is routed through `handle_search_key`.
            Mode::Search => None,
        }
    }

    fn handle_browse(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::MoveUp => {
                self.row_index = self.row_index.saturating_sub(1);
                self.list_state.select(Some(self.row_index));
            }
            Action::MoveDown => {
                self.row_index += 1;
                self.sync_selection();
            }
            Action::NextPage => self.apply(Intent::NextPage),
            Action::PrevPage => self.apply(Intent::PrevPage),
            Action::FirstPage => self.apply(Intent::FirstPage),
            Action::LastPage => self.apply(Intent::LastPage),
            Action::CycleGeneration => self.apply(Intent::CycleGeneration),
            Action::CycleSort => self.apply(Intent::CycleSort),
            Action::CyclePageSize => self.apply(Intent::CyclePageSize),
            Action::ToggleFavoritesOnly => self.apply(Intent::ToggleFavoritesOnly),
            Action::ResetFilters => {
                self.search_input.clear();
                self.search_debounce.cancel();
                self.apply(Intent::Reset);
                self.set_status("Filters reset".to_string());
            }
            Action::ToggleFavorite => {
                if let Some(id) = self.selected_item().map(|i| i.id) {
                    self.toggle_favorite(id);
                }
            }
            Action::Select => {
                if let Some(id) = self.selected_item().map(|i| i.id) {
                    self.detail_scroll = 0;
                    self.mode = Mode::Detail(id);
                }
            }
            Action::Search => {
                if self.catalog.is_some() {
                    self.mode = Mode::Search;
                }
            }
            Action::Categories => {
                if self.catalog.is_some() {
                    self.mode = Mode::Categories;
                }
            }
            Action::OpenImage => return self.selected_item().and_then(open_image),
            Action::Close => self.clear_status(),
            Action::Quit | Action::None => {}
        }
        None
    }

    fn handle_categories(&mut self, action: Action) {
        match action {
            Action::MoveUp => {
                self.category_index = self.category_index.saturating_sub(1);
            }
            Action::MoveDown => {
                self.category_index = (self.category_index + 1).min(KNOWN_CATEGORIES.len() - 1);
            }
            Action::Select | Action::ToggleFavorite => {
                let category = KNOWN_CATEGORIES[self.category_index].to_string();
                self.apply(Intent::ToggleCategory(category));
            }
            Action::Close | Action::Categories => self.mode = Mode::Browse,
            _ => {}
        }
        self.category_list_state.select(Some(self.category_index));
    }

    fn handle_detail(&mut self, id: u32, action: Action) -> Option<Command> {
        match action {
            Action::Close | Action::Select => self.mode = Mode::Browse,
            Action::MoveUp => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            Action::MoveDown => self.detail_scroll = self.detail_scroll.saturating_add(1),
            Action::ToggleFavorite => self.toggle_favorite(id),
            Action::OpenImage => {
                return self
                    .catalog
                    .as_ref()
                    .and_then(|c| c.item(id))
                    .and_then(open_image);
            }
            _ => {}
        }
        None
    }

    /// Edits the search text. Recomputation waits for the debouncer unless
    /// the user confirms or leaves the prompt.
    pub fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.search_debounce.push(self.search_input.clone(), now);
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search_debounce.push(self.search_input.clone(), now);
            }
            KeyCode::Enter | KeyCode::Esc => {
                if let Some(text) = self.search_debounce.flush() {
                    self.apply(Intent::SetText(text));
                }
                self.mode = Mode::Browse;
            }
            _ => {}
        }
    }

    /// Runs once per event-loop tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search_debounce.poll(now) {
            self.apply(Intent::SetText(text));
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn toggle_favorite(&mut self, id: u32) {
        let Some(catalog) = self.catalog.as_mut() else {
            return;
        };
        let message = match catalog.apply(Intent::ToggleFavorite(id)) {
            Ok(()) if catalog.is_favorite(id) => format!("Added #{} to favorites", id),
            Ok(()) => format!("Removed #{} from favorites", id),
            Err(e) => {
                tracing::warn!("Failed to save favorites: {}", e);
                format!("Could not save favorites: {}", e)
            }
        };
        if catalog.filters().favorites_only {
            // The shown sequence was rebuilt from page 1.
            self.row_index = 0;
        }
        self.status_message = Some(message);
        self.sync_selection();
    }

    fn apply(&mut self, intent: Intent) {
        let Some(catalog) = self.catalog.as_mut() else {
            return;
        };
        let resets_row = !matches!(intent, Intent::ToggleFavorite(_));
        if let Err(e) = catalog.apply(intent) {
            self.status_message = Some(e.to_string());
        }
        if resets_row {
            self.row_index = 0;
        }
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let rows = self
            .catalog
            .as_ref()
            .map(|c| c.view().rows.len())
            .unwrap_or(0);
        self.row_index = self.row_index.min(rows.saturating_sub(1));
        self.list_state.select(Some(self.row_index));
    }
}

fn open_image(item: &Item) -> Option<Command> {
    item.has_image().then(|| Command::OpenUrl(item.image.clone()))
}
