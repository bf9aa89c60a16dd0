use crate::films::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One two-line row per movie: header line, then the collapsed opening text.
pub fn movie_items(movies: &[Movie], width: u16) -> Vec<ListItem<'_>> {
    let text_width = (width as usize).saturating_sub(10);
    movies
        .iter()
        .map(|movie| {
            let header = Line::from(vec![
                Span::styled(
                    format!("{:>3} ", movie.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    movie.title.as_str(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", movie.release_date),
                    Style::default().fg(Color::Yellow),
                ),
            ]);
            let crawl = Line::from(Span::styled(
                format!("    {}", truncate_str(&movie.opening_summary(), text_width)),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(vec![header, crawl])
        })
        .collect()
}

pub fn render(movies: &[Movie], selected: usize, frame: &mut Frame, area: Rect) {
    let page_info = format!(" {} of {} ", selected.min(movies.len().saturating_sub(1)) + 1, movies.len());

    let list_widget = List::new(movie_items(movies, area.width))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Movies ")
                .title_bottom(Line::from(page_info).alignment(Alignment::Right)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

/// Plain-text rows for non-interactive output.
pub fn plain_rows(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .map(|movie| {
            format!(
                "{:>3}  {}  ({})\n     {}",
                movie.id,
                movie.title,
                movie.release_date,
                movie.opening_summary()
            )
        })
        .collect()
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
