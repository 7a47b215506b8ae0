//! Navigation bar rendering

use clickfx::{output::AudioBackend, SoundState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, Theme, NAV_ITEMS};

/// Bar, active item and hover colors, inverted between themes.
struct Palette {
    bar: Color,
    text: Color,
    active_bg: Color,
    active_fg: Color,
    hover_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bar: Color::White,
                text: Color::Rgb(0x1e, 0x1e, 0x1e),
                active_bg: Color::Black,
                active_fg: Color::White,
                hover_bg: Color::Rgb(0xf0, 0xf0, 0xf0),
            },
            Theme::Light => Self {
                bar: Color::Black,
                text: Color::White,
                active_bg: Color::White,
                active_fg: Color::Black,
                hover_bg: Color::Rgb(0x2a, 0x2a, 0x2a),
            },
        }
    }
}

pub fn render<B: AudioBackend>(frame: &mut Frame, app: &App<B>, sound: SoundState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation bar
            Constraint::Min(3),    // Page
            Constraint::Length(1), // Sound status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_nav(frame, chunks[0], app);
    render_page(frame, chunks[1], app);
    render_sound(frame, chunks[2], app, sound);

    let help = Paragraph::new(
        " [←/→] Focus  [Enter/1-4] Go  [M] Sound  [+/-] Volume  [T] Theme  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn render_nav<B: AudioBackend>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let palette = Palette::for_theme(app.theme);

    let mut spans = Vec::with_capacity(NAV_ITEMS.len() * 2);
    for (i, item) in NAV_ITEMS.iter().enumerate() {
        let style = if app.is_active(item) {
            Style::default()
                .fg(palette.active_fg)
                .bg(palette.active_bg)
                .add_modifier(Modifier::BOLD)
        } else if app.focused == i {
            Style::default().fg(palette.text).bg(palette.hover_bg)
        } else {
            Style::default().fg(palette.text).bg(palette.bar)
        };

        spans.push(Span::styled(format!(" {} {} ", i + 1, item.label), style));
        spans.push(Span::styled(" ", Style::default().bg(palette.bar)));
    }

    let nav = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(palette.bar))
        .block(Block::default().borders(Borders::ALL).title(" clickfx "));
    frame.render_widget(nav, area);
}

fn render_page<B: AudioBackend>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let title = app.active_label().unwrap_or("Access");
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.location.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn render_sound<B: AudioBackend>(frame: &mut Frame, area: Rect, app: &App<B>, sound: SoundState) {
    let (label, color) = if sound.enabled {
        ("♪ on ", Color::Green)
    } else {
        ("♪ off", Color::Yellow)
    };

    let mut spans = vec![
        Span::styled(format!(" {}  ", label), Style::default().fg(color)),
        Span::styled(
            format!("vol {:>3.0}%  ", sound.volume * 100.0),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
