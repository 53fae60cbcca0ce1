use ratatui::style::Stylize;
use ratatui::text::{Line, Span, Text};

use crate::catalog::{GenreIndex, Podcast, SeasonsMap, UNKNOWN, long_date};

/// Modal visibility. `Closed` is the initial state; the only transitions are
/// `show` (closed → open) and `hide` (open → closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Empty-state message when a podcast has no season entries.
pub const NO_SEASONS: &str = "No season information available.";

/// Owns the details overlay: its open/closed state, the content injected into
/// it, and the scroll position. Content is built on `show` and dropped on
/// `hide` so nothing stale can appear on the next open.
pub struct ModalController {
    state: ModalState,
    content: Text<'static>,
    scroll: u16,
}

impl ModalController {
    pub fn new() -> Self {
        ModalController {
            state: ModalState::Closed,
            content: Text::default(),
            scroll: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Closed → open. Fully replaces any previous content before the new
    /// overlay becomes dismissible.
    pub fn show(&mut self, podcast: &Podcast, genres: &GenreIndex, seasons: &SeasonsMap) {
        self.content = detail_text(podcast, genres, seasons);
        self.scroll = 0;
        self.state = ModalState::Open;
    }

    /// Open → closed. Safe no-op when already closed.
    pub fn hide(&mut self) {
        self.state = ModalState::Closed;
        self.content = Text::default();
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the detail view for one podcast: cover, description, genre tags,
/// long-form update date, and the season list or its empty-state message.
fn detail_text(podcast: &Podcast, genres: &GenreIndex, seasons: &SeasonsMap) -> Text<'static> {
    let mut lines = vec![
        Line::from(podcast.title.clone().bold()),
        Line::from(podcast.image.clone().dim()),
        Line::default(),
        Line::from(podcast.description.clone()),
        Line::default(),
        Line::from("Genres".underlined()),
    ];

    let tags: Vec<Span<'static>> = podcast
        .genres
        .iter()
        .flat_map(|&id| {
            let title = genres.resolve(id, UNKNOWN).to_string();
            [Span::from(format!("[{title}]")).cyan(), Span::from(" ")]
        })
        .collect();
    lines.push(Line::from(tags));
    lines.push(Line::from(format!(
        "Last updated: {}",
        long_date(&podcast.updated)
    )));
    lines.push(Line::default());
    lines.push(Line::from("Seasons".underlined()));

    let list = seasons.for_podcast(podcast.id);
    if list.is_empty() {
        lines.push(Line::from(NO_SEASONS));
    } else {
        for season in list {
            lines.push(Line::from(vec![
                Span::from(season.title.clone()),
                Span::from(format!("  {} episodes", season.episodes)).dim(),
            ]));
        }
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Genre, SeasonEntry};

    fn show_a() -> Podcast {
        Podcast {
            id: 1,
            title: "Show A".to_string(),
            description: "A show about things.".to_string(),
            image: "a.png".to_string(),
            genres: vec![10],
            seasons: 3,
            updated: "2023-05-01".to_string(),
        }
    }

    fn comedy_index() -> GenreIndex {
        GenreIndex::build(&[Genre {
            id: 10,
            title: "Comedy".to_string(),
        }])
    }

    fn flatten(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn show_opens_and_builds_detail_content() {
        let mut modal = ModalController::new();
        assert!(!modal.is_open());

        let seasons = SeasonsMap::build(&[SeasonEntry {
            podcast_id: 1,
            title: "Season 1".to_string(),
            episodes: 10,
        }]);
        modal.show(&show_a(), &comedy_index(), &seasons);

        assert!(modal.is_open());
        let rendered = flatten(modal.content());
        assert!(rendered.contains("Show A"));
        assert!(rendered.contains("A show about things."));
        assert!(rendered.contains("[Comedy]"));
        assert!(rendered.contains("Last updated: May 1, 2023"));
        assert!(rendered.contains("Season 1"));
        assert!(rendered.contains("10 episodes"));
    }

    #[test]
    fn unknown_genre_uses_detail_fallback() {
        let mut modal = ModalController::new();
        modal.show(&show_a(), &GenreIndex::default(), &SeasonsMap::default());
        assert!(flatten(modal.content()).contains("[Unknown]"));
    }

    #[test]
    fn missing_seasons_render_explicit_message() {
        let mut modal = ModalController::new();
        modal.show(&show_a(), &comedy_index(), &SeasonsMap::default());
        assert!(flatten(modal.content()).contains(NO_SEASONS));
    }

    #[test]
    fn hide_closes_and_clears_content() {
        let mut modal = ModalController::new();
        modal.show(&show_a(), &comedy_index(), &SeasonsMap::default());
        modal.hide();

        assert!(!modal.is_open());
        assert!(modal.content().lines.is_empty());
        assert_eq!(flatten(modal.content()), "");
    }

    #[test]
    fn hide_when_closed_is_a_no_op() {
        let mut modal = ModalController::new();
        modal.hide();
        assert!(!modal.is_open());
    }

    #[test]
    fn show_replaces_prior_content() {
        let mut modal = ModalController::new();
        let seasons = SeasonsMap::default();
        modal.show(&show_a(), &comedy_index(), &seasons);

        let mut other = show_a();
        other.id = 2;
        other.title = "Show B".to_string();
        modal.show(&other, &comedy_index(), &seasons);

        let rendered = flatten(modal.content());
        assert!(rendered.contains("Show B"));
        assert!(!rendered.contains("Show A"));
    }
}
