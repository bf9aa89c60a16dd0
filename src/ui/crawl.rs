use crate::films::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Full opening crawl of the selected movie, wrapped and scrollable.
pub fn render(movie: &Movie, scroll: u16, frame: &mut Frame, area: Rect) {
    let content = Paragraph::new(movie.opening_summary())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Episode {}: {} ", movie.id, movie.title))
                .title_bottom(
                    Line::from(format!(" [K/J] scroll: {} ", scroll)).alignment(Alignment::Right),
                ),
        );
    frame.render_widget(content, area);
}
