// UI rendering: filter tabs, card grid, loading and error views
use crate::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use starview_core::{Language, Repository};

const CARD_HEIGHT: u16 = 8;
const CARD_MIN_WIDTH: u16 = 34;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter tabs
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_language_tabs(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_language_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Language::ALL
        .iter()
        .map(|language| Line::from(language.label()))
        .collect();

    let selected = Language::ALL
        .iter()
        .position(|l| *l == app.state.selected())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Languages "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Exactly one of loading, error, or the grid; all three derive from the
/// same state value.
fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.state.is_loading() {
        render_loading(frame, area);
    } else if let Some(message) = app.state.error() {
        let message = message.to_string();
        render_error(frame, &message, area);
    } else if app.state.repos().is_some() {
        render_repo_grid(frame, app, area);
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Fetching repositories...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Popular repositories "),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry, or pick another language",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Popular repositories "),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_repo_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width) as usize;
    app.columns = columns;

    let count = app.repo_count();
    if count == 0 {
        // An empty result set is a valid cache entry; it just has no cards.
        return;
    }

    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let total_rows = (count + columns - 1) / columns;

    // Keep the highlighted card on screen.
    let selected_row = app.selected_card / columns;
    if selected_row < app.scroll_row {
        app.scroll_row = selected_row;
    } else if selected_row >= app.scroll_row + visible_rows {
        app.scroll_row = selected_row + 1 - visible_rows;
    }
    app.scroll_row = app.scroll_row.min(total_rows.saturating_sub(1));

    let scroll_row = app.scroll_row;
    let selected_card = app.selected_card;
    let repos = app.state.repos().unwrap_or_default();

    let mut row_constraints: Vec<Constraint> = (0..visible_rows)
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .collect();
    row_constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_offset, row_area) in rows.iter().take(visible_rows).enumerate() {
        let row_index = scroll_row + row_offset;
        if row_index >= total_rows {
            break;
        }

        let col_constraints: Vec<Constraint> = (0..columns)
            .map(|_| Constraint::Ratio(1, columns as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row_index * columns + col;
            if index >= count {
                break;
            }
            render_card(frame, &repos[index], index, index == selected_card, *cell);
        }
    }
}

fn render_card(frame: &mut Frame, repo: &Repository, index: usize, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" #{} ", index + 1));

    let lines = vec![
        Line::from(Span::styled(
            repo.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("@{}", repo.owner.login),
            Style::default().fg(Color::Green),
        )),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Rgb(255, 215, 0))),
            Span::raw(format!("{} stars", format_count(repo.stars))),
        ]),
        Line::from(vec![
            Span::styled("⑂ ", Style::default().fg(Color::Rgb(129, 195, 245))),
            Span::raw(format!("{} forks", format_count(repo.forks))),
        ]),
        Line::from(vec![
            Span::styled("! ", Style::default().fg(Color::Rgb(241, 138, 147))),
            Span::raw(format!("{} open issues", format_count(repo.open_issues))),
        ]),
        Line::from(Span::styled(
            repo.url.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ];

    let card = Paragraph::new(lines).block(block);
    frame.render_widget(card, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(repo) = app.selected_repo() {
        Line::from(vec![
            Span::styled(
                format!("@{} ", repo.owner.login),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                repo.owner.avatar_url.clone(),
                Style::default().fg(Color::Blue),
            ),
            Span::raw(" | ←/→: language | ↑/↓: cards | ENTER: open | o: owner | r: refresh | q: quit"),
        ])
    } else {
        Line::from("←/→ or 1-6: language | r: retry | q: quit")
    };

    frame.render_widget(Paragraph::new(status), area);
}

/// Columns that fit the given width, between 1 and 4.
pub fn grid_columns(width: u16) -> u16 {
    (width / CARD_MIN_WIDTH).clamp(1, 4)
}

/// Thousands separators, the way the counts read on the page
/// (12345 -> "12,345").
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
