use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const BINDINGS: &[(&str, &str)] = &[
    ("f/Enter", "Fetch movies"),
    ("↑/k ↓/j", "Navigate up/down"),
    ("PgUp/PgDn", "Move a page up/down"),
    ("g/G", "Jump to first/last movie"),
    ("K/J", "Scroll opening crawl"),
    ("?", "Toggle this help"),
    ("q/Esc", "Quit application"),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Keybindings",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    help_text.extend(BINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("    {:<10}", key), Style::default().fg(Color::Yellow)),
            Span::raw(*action),
        ])
    }));
    help_text.push(Line::from(""));

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
