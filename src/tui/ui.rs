// UI rendering logic
//
// Draws the session's element tree as a card grid. Layout, top to bottom:
// title bar, optional spacer (spaced layout only), search box, sort bar
// (once results exist), results, optional log panel, footer. The help
// panel is a popup over everything else.

use super::app::{App, Focus};
use super::layout::{grid_columns, Breakpoint, CARD_GAP};
use crate::dom::{Element, MessageKind, Tag};
use crate::logging::{LogEntry, LogLevel};
use crate::render::poster::{NO_POSTER_CLASS, NO_POSTER_HEIGHT};
use crate::render::skeleton::SKELETON_FADE_CLASS;
use crate::session::{PageLayout, Phase, Session};
use crate::sort::SortKey;
use crate::util::{center_to_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a card's border
const CARD_BORDER_ROWS: u16 = 2;

/// Rows taken by the title and year lines
const CARD_TEXT_ROWS: u16 = 2;

/// Height of the log panel when shown
const LOG_PANEL_ROWS: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App, session: &Session) {
    let area = f.area();
    let spacer = match session.layout() {
        PageLayout::Spaced => area.height / 4,
        PageLayout::Compact => 0,
    };
    let sort_rows = if session.sort_visible() { 1 } else { 0 };
    let log_rows = if app.show_logs { LOG_PANEL_ROWS } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(3),         // Title bar
        Constraint::Length(spacer),    // Hero spacing before the first result
        Constraint::Length(3),         // Search box
        Constraint::Length(sort_rows), // Sort bar
        Constraint::Min(3),            // Results
        Constraint::Length(log_rows),  // System logs
        Constraint::Length(1),         // Footer
    ])
    .split(area);

    render_title(f, chunks[0], app, session);
    render_search(f, chunks[2], app);
    if session.sort_visible() {
        render_sort_bar(f, chunks[3], app, session);
    }
    render_results(f, chunks[4], app, session);
    if app.show_logs {
        render_logs_panel(f, chunks[5], app);
    }
    render_footer(f, chunks[6], app);

    if app.show_help {
        render_help(f, area);
    }
}

fn render_title(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let status = match (session.phase(), session.last_query()) {
        (Phase::Loading | Phase::Settling, Some(query)) => {
            format!(" {} searching \"{}\"", app.spinner_char(), query)
        }
        (Phase::Displaying, Some(query)) => {
            format!(" ── {} results for \"{}\"", session.results().len(), query)
        }
        _ => String::new(),
    };

    let title = Paragraph::new(format!(" 🎬 reelsearch{}", status))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title_top(Line::from(" F1 ").right_aligned()),
        );

    f.render_widget(title, area);
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search;
    let border = if focused { Color::Yellow } else { Color::DarkGray };

    let (text, style) = if app.input.is_empty() && !focused {
        ("Search for a movie…".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (app.input.clone(), Style::default())
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    f.render_widget(search, area);

    if focused {
        let width = unicode_width::UnicodeWidthStr::width(app.input.as_str()) as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_sort_bar(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let focused = app.focus == Focus::Sort;
    let mut spans = vec![Span::styled(
        " Sort: ",
        Style::default().fg(if focused { Color::Yellow } else { Color::Gray }),
    )];

    for (idx, key) in SortKey::ALL.iter().enumerate() {
        let mut style = Style::default().fg(Color::White);
        if session.sort() == Some(*key) {
            style = style.add_modifier(Modifier::REVERSED);
            if focused {
                style = style.fg(Color::Yellow);
            }
        }
        spans.push(Span::styled(format!(" {} {} ", idx + 1, key.label()), style));
    }

    if session.sort().is_none() {
        spans.push(Span::styled(
            "  (API order)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App, session: &Session) {
    let container = session.container();

    if let Some((message, kind)) = container.message() {
        let style = match kind {
            MessageKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            MessageKind::Info => Style::default().fg(Color::Gray),
        };
        let paragraph = Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let centered = Rect {
            y: area.y + area.height / 3,
            height: area.height - area.height / 3,
            ..area
        };
        f.render_widget(paragraph, centered);
        return;
    }

    let cards = container.children();
    if cards.is_empty() {
        return;
    }

    let cols = grid_columns(area.width, app.card_width);
    let rows: Vec<&[Element]> = cards.chunks(cols).collect();
    let skip = (app.scroll as usize).min(rows.len().saturating_sub(1));

    let mut y = area.y;
    for row in &rows[skip..] {
        if y >= area.bottom() {
            break;
        }
        let row_height = row
            .iter()
            .map(|card| card_height(card, app.poster_min_rows))
            .max()
            .unwrap_or(0);
        let visible = row_height.min(area.bottom() - y);

        for (i, card) in row.iter().enumerate() {
            let x = area.x + i as u16 * (app.card_width + CARD_GAP);
            if x >= area.right() {
                break;
            }
            let rect = Rect {
                x,
                y,
                width: app.card_width.min(area.right() - x),
                height: visible,
            };
            render_card(f, rect, card, app.poster_min_rows);
        }
        y = y.saturating_add(row_height);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &Element, min_rows: u16) {
    let faded = card.style.opacity == Some(0.0);
    let border = if card.has_class(SKELETON_FADE_CLASS) {
        Color::DarkGray
    } else {
        Color::Blue
    };
    let mut block_style = Style::default().fg(border);
    if faded {
        block_style = block_style.add_modifier(Modifier::DIM);
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = card_lines(card, inner_width, min_rows);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(block_style),
    );
    f.render_widget(paragraph, area);
}

/// Rows the poster slot of a card occupies
fn poster_rows(card: &Element, min_rows: u16) -> u16 {
    match card.children().first() {
        Some(slot) if slot.tag == Tag::Img => slot.style.height.unwrap_or(min_rows),
        Some(slot) if slot.has_class(NO_POSTER_CLASS) => {
            slot.style.height.unwrap_or(NO_POSTER_HEIGHT)
        }
        _ => min_rows,
    }
}

/// Total card height including border
pub fn card_height(card: &Element, min_rows: u16) -> u16 {
    poster_rows(card, min_rows) + CARD_TEXT_ROWS + CARD_BORDER_ROWS
}

/// Text content of a card, one entry per inner row
pub fn card_lines(card: &Element, width: usize, min_rows: u16) -> Vec<Line<'static>> {
    if card.has_class(SKELETON_FADE_CLASS) {
        let mut style = Style::default().fg(Color::DarkGray);
        if card.style.opacity == Some(0.0) {
            style = style.add_modifier(Modifier::DIM);
        }
        let mut lines: Vec<Line> = (0..min_rows)
            .map(|_| Line::styled("░".repeat(width), style))
            .collect();
        lines.push(Line::styled("▒".repeat(width), style));
        lines.push(Line::styled("▒".repeat(width / 2), style));
        return lines;
    }

    let rows = poster_rows(card, min_rows) as usize;
    let mut lines = Vec::with_capacity(rows + CARD_TEXT_ROWS as usize);
    let mut title = String::new();
    let mut year = String::new();

    for child in card.children() {
        match child.tag {
            Tag::Img => {
                let caption = match child.style.height {
                    Some(_) => child.attr("alt").unwrap_or_default().to_string(),
                    None => "loading…".to_string(),
                };
                let shade = Style::default().fg(Color::Cyan);
                for row in 0..rows {
                    let text = if row == rows / 2 {
                        center_to_width(&caption, width)
                    } else {
                        "▓".repeat(width)
                    };
                    lines.push(Line::styled(text, shade));
                }
            }
            Tag::Div if child.has_class(NO_POSTER_CLASS) => {
                let captions: Vec<String> = child
                    .children()
                    .iter()
                    .filter_map(|c| c.text().map(str::to_string))
                    .collect();
                // Center the icon and caption block vertically
                let top = rows.saturating_sub(captions.len()) / 2;
                for row in 0..rows {
                    let text = row
                        .checked_sub(top)
                        .and_then(|i| captions.get(i))
                        .map(|c| center_to_width(c, width))
                        .unwrap_or_default();
                    lines.push(Line::styled(text, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::H3 => title = child.text().unwrap_or_default().to_string(),
            Tag::P => year = child.text().unwrap_or_default().to_string(),
            Tag::Div => {}
        }
    }

    lines.push(Line::styled(
        truncate_to_width(&title, width),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        truncate_to_width(&year, width),
        Style::default().fg(Color::Gray),
    ));
    lines
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let mut spans = vec![Span::styled(
        format!(" © {} reelsearch · Movie data from OMDb", app.footer_year),
        Style::default().fg(Color::DarkGray),
    )];
    if bp.at_least(Breakpoint::Normal) {
        spans.push(Span::styled(
            "  │  F1 menu · F2 logs · Tab sort · Esc quit",
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let width = 46.min(area.width);
    let height = 13.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let key = Style::default().fg(Color::Yellow);
    let lines: Vec<Line> = [
        ("Enter", "Search"),
        ("Tab", "Switch search box / sort bar"),
        ("← →", "Change sort order"),
        ("1-4", "Pick sort order directly"),
        ("↑ ↓ PgUp PgDn", "Scroll results"),
        ("F1", "Toggle this menu"),
        ("F2", "Toggle system logs"),
        ("Esc / Ctrl-C", "Quit"),
    ]
    .iter()
    .map(|(k, what)| {
        Line::from(vec![
            Span::styled(format!("  {:<15}", k), key),
            Span::raw(*what),
        ])
    })
    .collect();

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Menu "),
        ),
        popup,
    );
}

fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    // Get recent log entries from buffer
    let height = area.height.saturating_sub(2) as usize; // Account for borders
    let log_entries = app.log_buffer.get_recent(height);

    let items: Vec<ListItem> = log_entries
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Blue),
        LogLevel::Debug => Style::default().fg(Color::Gray),
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Container;
    use crate::logging::LogBuffer;
    use crate::movie::{MovieSummary, POSTER_NOT_AVAILABLE};
    use crate::render::render_movies;
    use crate::render::skeleton::show_skeletons;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines_fallback_card() {
        let mut container = Container::new();
        render_movies(
            &mut container,
            &[MovieSummary::new("Heat", "1995", POSTER_NOT_AVAILABLE)],
        );
        let card = &container.children()[0];

        let lines = card_lines(card, 22, 4);
        assert_eq!(lines.len(), NO_POSTER_HEIGHT as usize + 2);
        assert!(line_text(&lines[1]).contains("Poster Not Available"));
        assert_eq!(line_text(&lines[2]), "Heat");
        assert_eq!(line_text(&lines[3]), "1995");
        assert_eq!(card_height(card, 4), NO_POSTER_HEIGHT + 4);
    }

    #[test]
    fn test_card_height_follows_reconciled_poster() {
        let mut container = Container::new();
        render_movies(
            &mut container,
            &[MovieSummary::new("Heat", "1995", "https://x/heat.jpg")],
        );
        // Pending image uses the minimum
        assert_eq!(card_height(&container.children()[0], 4), 8);

        container.children_mut()[0].children_mut()[0].style.height = Some(10);
        assert_eq!(card_height(&container.children()[0], 4), 14);
    }

    #[test]
    fn test_skeleton_lines() {
        let mut container = Container::new();
        show_skeletons(&mut container, 1);
        let lines = card_lines(&container.children()[0], 10, 3);
        assert_eq!(lines.len(), 5);
        assert_eq!(line_text(&lines[0]), "░".repeat(10));
    }

    #[test]
    fn test_draw_smoke() {
        let mut session = Session::new(2);
        let ticket = session.submit("heat").unwrap();
        let settle = session
            .complete_search(
                ticket.generation,
                Ok(vec![
                    MovieSummary::new("Heat", "1995", POSTER_NOT_AVAILABLE),
                    MovieSummary::new("Thief", "1981", "https://x/thief.jpg"),
                ]),
            )
            .unwrap();
        session.settle(settle.generation);

        let mut app = App::new(LogBuffer::new(), 24, 4);
        app.show_help = true;
        app.show_logs = true;

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, &app, &session)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("reelsearch"));
        assert!(text.contains("Heat"));
        assert!(text.contains("Thief"));
        assert!(text.contains("Title A-Z"));
        assert!(text.contains("System Logs"));
        assert!(text.contains(&app.footer_year.to_string()));
        assert!(text.contains("Menu"));
    }

    #[test]
    fn test_draw_message() {
        let mut session = Session::new(2);
        let ticket = session.submit("zzzz").unwrap();
        session.complete_search(ticket.generation, Ok(vec![]));

        let app = App::new(LogBuffer::new(), 24, 4);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &app, &session)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("No movies found."));
        // Sort bar stays hidden until a search succeeds
        assert!(!text.contains("Title A-Z"));
    }
}
