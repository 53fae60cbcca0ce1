use crate::catalog::{Catalog, GenreIndex, Podcast, SeasonsMap};
use crate::modal::ModalController;
use crate::ui::HitMap;

/// Sentinel value of the leading dropdown option.
pub const ALL_GENRES: &str = "all";

/// One entry in the genre dropdown. `value` is the genre identifier rendered
/// as a string, or the sentinel `"all"` for the leading option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub genre_index: GenreIndex,
    pub seasons: SeasonsMap,

    pub should_quit: bool,
    pub show_help: bool,

    // Grid state
    pub filtered: Vec<usize>, // indices into catalog.podcasts, input order
    pub selected: usize,      // index within `filtered`
    pub grid_columns: usize,  // updated at draw time from the frame width
    pub scroll_row: usize,    // first visible card row

    // Genre dropdown state
    pub filter_options: Vec<FilterOption>,
    pub filter_value: String,
    pub dropdown_open: bool,
    pub dropdown_selected: usize,

    pub modal: ModalController,

    // Rectangles recorded by the most recent draw, for mouse hit-testing
    pub hit: HitMap,

    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let genre_index = GenreIndex::build(&catalog.genres);
        let seasons = SeasonsMap::build(&catalog.seasons);

        let mut app = App {
            catalog,
            genre_index,
            seasons,

            should_quit: false,
            show_help: false,

            filtered: Vec::new(),
            selected: 0,
            grid_columns: 1,
            scroll_row: 0,

            filter_options: Vec::new(),
            filter_value: ALL_GENRES.to_string(),
            dropdown_open: false,
            dropdown_selected: 0,

            modal: ModalController::new(),

            hit: HitMap::default(),

            status_msg: String::new(),
        };
        app.populate_genre_filter();
        app.apply_filter();
        app.status_msg = format!("{} podcasts loaded", app.catalog.podcasts.len());
        app
    }

    /// Clear and repopulate the dropdown options: one "All Genres" option
    /// first, then one option per genre in input order.
    pub fn populate_genre_filter(&mut self) {
        self.filter_options.clear();
        self.filter_options.push(FilterOption {
            value: ALL_GENRES.to_string(),
            label: "All Genres".to_string(),
        });
        for genre in &self.catalog.genres {
            self.filter_options.push(FilterOption {
                value: genre.id.to_string(),
                label: genre.title.clone(),
            });
        }
    }

    /// Recompute the visible podcast list from the active genre filter and
    /// reset the grid selection.
    pub fn apply_filter(&mut self) {
        self.filtered.clear();
        let wanted = if self.filter_value == ALL_GENRES {
            None
        } else {
            self.filter_value.parse::<u64>().ok()
        };
        for (i, podcast) in self.catalog.podcasts.iter().enumerate() {
            match wanted {
                Some(id) if !podcast.genres.contains(&id) => {}
                _ => self.filtered.push(i),
            }
        }

        self.selected = 0;
        self.scroll_row = 0;
        self.status_msg = format!(
            "{} shows · genre: {}",
            self.filtered.len(),
            self.current_filter_label()
        );
    }

    /// Label of the currently applied dropdown option.
    pub fn current_filter_label(&self) -> &str {
        self.filter_options
            .iter()
            .find(|opt| opt.value == self.filter_value)
            .map(|opt| opt.label.as_str())
            .unwrap_or("All Genres")
    }

    pub fn visible_podcast(&self, slot: usize) -> Option<&Podcast> {
        self.filtered.get(slot).map(|&i| &self.catalog.podcasts[i])
    }

    // ── Grid navigation ──

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move down one grid row.
    pub fn select_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let target = self.selected + self.grid_columns;
        if target < self.filtered.len() {
            self.selected = target;
        }
    }

    /// Move up one grid row.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.grid_columns);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    /// Open the details overlay for the currently selected card.
    pub fn open_selected(&mut self) {
        if let Some(&idx) = self.filtered.get(self.selected) {
            let podcast = &self.catalog.podcasts[idx];
            self.modal.show(podcast, &self.genre_index, &self.seasons);
        }
    }

    // ── Dropdown ──

    pub fn open_dropdown(&mut self) {
        self.dropdown_open = true;
        // Start on the currently applied option.
        self.dropdown_selected = self
            .filter_options
            .iter()
            .position(|opt| opt.value == self.filter_value)
            .unwrap_or(0);
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    pub fn dropdown_next(&mut self) {
        if self.dropdown_selected + 1 < self.filter_options.len() {
            self.dropdown_selected += 1;
        }
    }

    pub fn dropdown_prev(&mut self) {
        self.dropdown_selected = self.dropdown_selected.saturating_sub(1);
    }

    /// Apply the highlighted dropdown option and close the dropdown.
    pub fn apply_dropdown(&mut self) {
        if let Some(opt) = self.filter_options.get(self.dropdown_selected) {
            self.filter_value = opt.value.clone();
            self.apply_filter();
        }
        self.dropdown_open = false;
    }

    /// Reset the genre filter back to "all".
    pub fn clear_filter(&mut self) {
        if self.filter_value != ALL_GENRES {
            self.filter_value = ALL_GENRES.to_string();
            self.apply_filter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Genre, SeasonEntry};
    use proptest::prelude::*;

    fn sample_catalog() -> Catalog {
        Catalog {
            podcasts: vec![
                Podcast {
                    id: 1,
                    title: "Show A".to_string(),
                    description: "A show about things.".to_string(),
                    image: "a.png".to_string(),
                    genres: vec![10],
                    seasons: 3,
                    updated: "2023-05-01".to_string(),
                },
                Podcast {
                    id: 2,
                    title: "Show B".to_string(),
                    description: "A show about other things.".to_string(),
                    image: "b.png".to_string(),
                    genres: vec![11, 99],
                    seasons: 1,
                    updated: "2024-02-29".to_string(),
                },
            ],
            genres: vec![
                Genre {
                    id: 10,
                    title: "Comedy".to_string(),
                },
                Genre {
                    id: 11,
                    title: "News".to_string(),
                },
            ],
            seasons: vec![SeasonEntry {
                podcast_id: 1,
                title: "Season 1".to_string(),
                episodes: 10,
            }],
        }
    }

    #[test]
    fn filter_options_have_all_sentinel_first() {
        let app = App::new(sample_catalog());
        assert_eq!(app.filter_options.len(), 3); // genres + 1
        assert_eq!(app.filter_options[0].value, ALL_GENRES);
        assert_eq!(app.filter_options[0].label, "All Genres");
        assert_eq!(app.filter_options[1].value, "10");
        assert_eq!(app.filter_options[1].label, "Comedy");
    }

    #[test]
    fn populate_genre_filter_is_idempotent() {
        let mut app = App::new(sample_catalog());
        app.populate_genre_filter();
        app.populate_genre_filter();
        assert_eq!(app.filter_options.len(), app.catalog.genres.len() + 1);
    }

    #[test]
    fn apply_filter_narrows_by_genre() {
        let mut app = App::new(sample_catalog());
        assert_eq!(app.filtered.len(), 2);

        app.filter_value = "11".to_string();
        app.apply_filter();
        assert_eq!(app.filtered.len(), 1);
        assert_eq!(app.visible_podcast(0).unwrap().title, "Show B");

        app.clear_filter();
        assert_eq!(app.filtered.len(), 2);
    }

    #[test]
    fn dropdown_apply_sets_filter_and_closes() {
        let mut app = App::new(sample_catalog());
        app.open_dropdown();
        assert!(app.dropdown_open);
        assert_eq!(app.dropdown_selected, 0); // "all" is applied initially

        app.dropdown_next();
        app.apply_dropdown();
        assert!(!app.dropdown_open);
        assert_eq!(app.filter_value, "10");
        assert_eq!(app.filtered.len(), 1);
    }

    #[test]
    fn open_selected_shows_modal_for_card() {
        let mut app = App::new(sample_catalog());
        app.select_next();
        app.open_selected();
        assert!(app.modal.is_open());
    }

    #[test]
    fn grid_navigation_clamps_at_edges() {
        let mut app = App::new(sample_catalog());
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_last();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_up();
        assert_eq!(app.selected, 0);
    }

    proptest! {
        #[test]
        fn options_always_count_genres_plus_one(titles in proptest::collection::vec("[a-zA-Z ]{1,12}", 0..16)) {
            let mut catalog = sample_catalog();
            catalog.genres = titles
                .iter()
                .enumerate()
                .map(|(i, title)| Genre { id: i as u64, title: title.clone() })
                .collect();
            catalog.podcasts.clear();
            let app = App::new(catalog);
            prop_assert_eq!(app.filter_options.len(), titles.len() + 1);
            prop_assert_eq!(app.filter_options[0].value.as_str(), ALL_GENRES);
        }
    }
}
