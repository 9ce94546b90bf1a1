//! Navigation bar and status line

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use resonance::{audio::AudioSessionState, nav::NavCommand};

pub struct FooterView {
    pub current: usize,
    pub count: usize,
    pub transitioning: bool,
}

/// Where the navigation controls were drawn.
#[derive(Debug, Default)]
pub struct FooterHits {
    back: Option<Rect>,
    next: Rect,
    dots: Vec<Rect>,
}

impl FooterHits {
    /// The command for a click at `position`, if it landed on a control.
    pub fn command_at(&self, position: Position) -> Option<NavCommand> {
        if self.back.is_some_and(|r| r.contains(position)) {
            return Some(NavCommand::Prev);
        }
        if self.next.contains(position) {
            return Some(NavCommand::Next);
        }
        self.dots
            .iter()
            .position(|r| r.contains(position))
            .map(NavCommand::GoTo)
    }
}

/// Render Back, the step dots and Next (or Again on the last card)
pub fn render_footer(frame: &mut Frame, area: Rect, view: &FooterView) -> FooterHits {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(1),
            Constraint::Length(12),
        ])
        .split(area);

    let button = |label: &'static str| {
        let style = if view.transitioning {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        Paragraph::new(label)
            .centered()
            .style(style)
            .block(Block::default().borders(Borders::ALL))
    };

    let back = (view.current > 0).then(|| {
        frame.render_widget(button("← Back"), chunks[0]);
        chunks[0]
    });

    let last = view.current + 1 >= view.count;
    frame.render_widget(button(if last { "Again ↺" } else { "Next →" }), chunks[2]);

    // One cell per dot with a space between.
    let dots_row = Rect {
        y: chunks[1].y + chunks[1].height / 2,
        height: 1,
        ..chunks[1]
    };
    let span = (view.count * 2).saturating_sub(1) as u16;
    let start = dots_row.x + dots_row.width.saturating_sub(span) / 2;

    let mut spans = Vec::with_capacity(view.count * 2);
    let mut dots = Vec::with_capacity(view.count);
    for i in 0..view.count {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let (symbol, style) = if i == view.current {
            (
                "●",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(symbol, style));
        dots.push(Rect::new(start + (i * 2) as u16, dots_row.y, 1, 1).intersection(dots_row));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).centered(), dots_row);

    FooterHits {
        back,
        next: chunks[2],
        dots,
    }
}

/// Render mute and narration state, or the current error
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    session: &AudioSessionState,
    error: Option<&str>,
) {
    let line = match error {
        Some(message) => Line::from(vec![
            Span::styled(format!(" ⚠ {message}"), Style::default().fg(Color::Red)),
            Span::styled("  [Esc] dismiss", Style::default().fg(Color::DarkGray)),
        ]),
        None => {
            let (sound, sound_style) = if session.muted {
                (" ♪ muted", Style::default().fg(Color::DarkGray))
            } else {
                (" ♪ ambient on", Style::default().fg(Color::Cyan))
            };
            let narration = if session.is_loading_narration {
                Span::styled("  preparing narration…", Style::default().fg(Color::Yellow))
            } else if session.is_narrating {
                Span::styled("  narrating", Style::default().fg(Color::Green))
            } else {
                Span::raw("")
            };
            Line::from(vec![Span::styled(sound, sound_style), narration])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
