use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::catalog::{GenreIndex, Podcast, UNKNOWN_GENRE, short_date};

/// Card geometry: borders plus five content lines.
const CARD_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 30;

/// Rectangles recorded while drawing, consulted by the mouse handler. Reset
/// at the start of every draw so stale targets cannot fire.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub cards: Vec<(Rect, usize)>, // rect → slot within the filtered list
    pub filter_control: Option<Rect>,
    pub dropdown_options: Vec<(Rect, usize)>,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
}

impl HitMap {
    pub fn card_at(&self, pos: Position) -> Option<usize> {
        self.cards
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, slot)| slot)
    }

    pub fn dropdown_option_at(&self, pos: Position) -> Option<usize> {
        self.dropdown_options
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, i)| i)
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    app.hit = HitMap::default();

    let [filter_bar, grid, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_filter_bar(app, frame, filter_bar);
    render_grid(app, frame, grid);
    render_status(app, frame, status);

    if app.dropdown_open {
        render_dropdown(app, frame, filter_bar, grid);
    }
    if app.modal.is_open() {
        render_modal(app, frame, frame.area());
    }
    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn render_filter_bar(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::bordered().title(" podshelf ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        "Genre: ".dim(),
        Span::from(app.current_filter_label().to_string()).bold(),
        " ▾".cyan(),
        "  (f to change)".dim(),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    app.hit.filter_control = Some(area);
}

/// Draw the card grid. The card list is rebuilt from scratch every frame, one
/// card per visible podcast in input order.
fn render_grid(app: &mut App, frame: &mut Frame, area: Rect) {
    let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    app.grid_columns = columns;

    if app.filtered.is_empty() {
        let msg = Paragraph::new("No podcasts match this genre.")
            .alignment(Alignment::Center)
            .dim();
        frame.render_widget(msg, area);
        return;
    }

    let rows_visible = (area.height / CARD_HEIGHT).max(1) as usize;
    let total_rows = app.filtered.len().div_ceil(columns);

    // Keep the selected card's row on screen.
    let selected_row = app.selected / columns;
    if selected_row < app.scroll_row {
        app.scroll_row = selected_row;
    } else if selected_row >= app.scroll_row + rows_visible {
        app.scroll_row = selected_row + 1 - rows_visible;
    }
    app.scroll_row = app.scroll_row.min(total_rows.saturating_sub(1));

    let card_width = area.width / columns as u16;
    for row in 0..rows_visible {
        let grid_row = app.scroll_row + row;
        for col in 0..columns {
            let slot = grid_row * columns + col;
            let Some(podcast) = app.visible_podcast(slot) else {
                break;
            };
            let rect = Rect::new(
                area.x + col as u16 * card_width,
                area.y + row as u16 * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );
            let selected = slot == app.selected;
            let card = podcast_card(podcast, &app.genre_index, card_width.saturating_sub(2));
            let border = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::bordered().border_style(border);
            frame.render_widget(Paragraph::new(card).block(block), rect);
            app.hit.cards.push((rect, slot));
        }
    }
}

/// Pure card construction: cover line, title, season count, genre tags, and
/// the short-form update date, fitted to `width` columns.
pub fn podcast_card(podcast: &Podcast, genres: &GenreIndex, width: u16) -> Text<'static> {
    let max = width as usize;
    let tags = podcast
        .genres
        .iter()
        .map(|&id| genres.resolve(id, UNKNOWN_GENRE))
        .collect::<Vec<_>>()
        .join(" · ");

    Text::from(vec![
        Line::from(fit(&podcast.image, max).dim()),
        Line::from(fit(&podcast.title, max).bold()),
        Line::from(format!("Seasons: {}", podcast.seasons)),
        Line::from(fit(&tags, max).cyan()),
        Line::from(format!("Updated: {}", short_date(&podcast.updated)).dim()),
    ])
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::from(app.status_msg.clone()),
        Span::from("  "),
        Span::from("←↑↓→ move · enter details · f genre · ? help · q quit").dim(),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_dropdown(app: &mut App, frame: &mut Frame, anchor: Rect, below: Rect) {
    let label_width = app
        .filter_options
        .iter()
        .map(|opt| opt.label.width())
        .max()
        .unwrap_or(0);
    let width = (label_width as u16 + 4).min(below.width.saturating_sub(1));
    let height = (app.filter_options.len() as u16 + 2).min(below.height);
    let rect = Rect::new(anchor.x + 1, below.y, width, height);

    let items: Vec<ListItem> = app
        .filter_options
        .iter()
        .map(|opt| ListItem::new(opt.label.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(" Genre "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.dropdown_selected));

    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(list, rect, &mut state);

    let inner = Rect::new(
        rect.x + 1,
        rect.y + 1,
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    );
    for i in 0..(inner.height as usize).min(app.filter_options.len()) {
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        app.hit.dropdown_options.push((row, i));
    }
}

fn render_modal(app: &mut App, frame: &mut Frame, area: Rect) {
    let rect = centered_rect(area, 70, 80);

    let block = Block::bordered()
        .title(" Podcast Details ")
        .title(Line::from(" ✕ ").right_aligned())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(rect);
    let body = Paragraph::new(app.modal.content().clone())
        .wrap(Wrap { trim: false })
        .scroll((app.modal.scroll(), 0));

    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    frame.render_widget(body, inner);

    app.hit.modal = Some(rect);
    app.hit.modal_close = Some(Rect::new(rect.right().saturating_sub(4), rect.y, 3, 1));
}

fn render_help(frame: &mut Frame, area: Rect) {
    let rect = centered_rect(area, 50, 50);
    let lines = vec![
        Line::from("Keys".bold()),
        Line::default(),
        Line::from("←↑↓→ / hjkl   move selection"),
        Line::from("enter         podcast details"),
        Line::from("f             genre filter"),
        Line::from("g / G         first / last card"),
        Line::from("esc           close / clear filter"),
        Line::from("q, ctrl-c     quit"),
        Line::default(),
        Line::from("Press any key to close.".dim()),
    ];
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Help ")),
        rect,
    );
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(mid);
    rect
}

/// Truncate to `max` display columns, appending an ellipsis when cut.
fn fit(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
