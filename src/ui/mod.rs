mod crawl;
mod help;
pub mod list;

use crate::app::App;
use crate::controller::{Content, EMPTY_MESSAGE, LOADING_MESSAGE};
use crate::films::Transport;
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Top-level render: header, content area chosen by the controller, status bar.
pub fn render<T: Transport>(app: &App<T>, frame: &mut Frame) {
    // Layout: header(3) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    match app.state.content() {
        Content::Error(message) => render_message(
            frame,
            chunks[1],
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Content::Loading => {
            let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % SPINNER.len();
            render_message(
                frame,
                chunks[1],
                format!("{} {}", SPINNER[spinner_idx], LOADING_MESSAGE),
                Style::default().fg(Color::Cyan),
            )
        }
        Content::Movies(movies) => {
            // Layout: list(40%) + crawl of the selected movie(rest)
            let panes = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(40), Constraint::Min(4)])
                .split(chunks[1]);
            list::render(movies, app.list_selected, frame, panes[0]);
            if let Some(movie) = app.selected_movie() {
                crawl::render(movie, app.crawl_scroll, frame, panes[1]);
            }
        }
        Content::Empty => render_message(
            frame,
            chunks[1],
            EMPTY_MESSAGE.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    }

    render_status(app, frame, chunks[2]);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_header<T: Transport>(app: &App<T>, frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Film Reel",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {}", app.endpoint()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, area: Rect, text: String, style: Style) {
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

fn render_status<T: Transport>(app: &App<T>, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" f", key_style),
        Span::raw(" Fetch Movies  "),
        Span::styled("↑↓", key_style),
        Span::raw(" Navigate  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}
