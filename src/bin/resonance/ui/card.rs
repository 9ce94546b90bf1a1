//! Card panel widget - the current card with reveal, slide, tilt and ripples

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use resonance::{
    config::Timing,
    nav::{Direction, Ripple, Tilt, MAX_TILT_DEG},
    Card,
};

const MAX_PANEL_WIDTH: u16 = 76;

/// Everything the card widget needs for one frame.
pub struct CardView<'a> {
    pub card: &'static Card,
    /// Time since the card arrived.
    pub elapsed: Duration,
    /// Progress and direction of an outgoing transition.
    pub transition: Option<(f32, Direction)>,
    pub tilt: Tilt,
    pub ripples: &'a [Ripple],
    pub definition: Option<(&'static str, &'static str)>,
    pub now: Instant,
    pub timing: &'a Timing,
}

/// Draw the card and return the panel's on-screen area.
pub fn render_card(frame: &mut Frame, area: Rect, view: &CardView) -> Rect {
    let width = area.width.min(MAX_PANEL_WIDTH);
    let home = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    // Tilt nudges the panel a couple of cells; the slide carries it off-screen.
    let mut dx = (-view.tilt.y / MAX_TILT_DEG * 2.0).round() as i32;
    let dy = (view.tilt.x / MAX_TILT_DEG).round() as i32;
    let mut dimmed = false;
    if let Some((progress, direction)) = view.transition {
        let travel = (progress * home.width as f32) as i32;
        dx = match direction {
            Direction::Next => -travel,
            Direction::Prev => travel,
        };
        dimmed = progress > 0.5;
    }

    let panel = offset_within(home, dx, dy, area);
    if panel.is_empty() {
        return panel;
    }

    let border = if dimmed { Color::DarkGray } else { Color::Magenta };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut paragraph = Paragraph::new(card_lines(view))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    if dimmed {
        paragraph = paragraph.style(Style::default().fg(Color::DarkGray));
    }
    frame.render_widget(paragraph, inner);

    if let Some((term, meaning)) = view.definition {
        render_definition(frame, inner, term, meaning);
    }

    render_ripples(frame, panel, view);
    panel
}

fn card_lines(view: &CardView) -> Vec<Line<'static>> {
    let card = view.card;
    let mut lines = Vec::new();

    if let Some(emoji) = card.emoji {
        lines.push(Line::from(emoji));
    }
    lines.push(Line::from(Span::styled(
        card.title,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        card.subtitle,
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::default());

    if let Some(message) = card.message {
        lines.push(Line::from(message));
        lines.push(Line::default());
    }

    for item in card.items.iter().take(revealed(view.elapsed, view.timing.item_stagger)) {
        if item.starts_with('“') {
            lines.push(Line::from(Span::styled(
                *item,
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled("✦ ", Style::default().fg(Color::Magenta)),
                Span::raw(*item),
            ]));
        }
    }

    for time in card
        .prep_times
        .iter()
        .take(revealed(view.elapsed, view.timing.prep_stagger))
    {
        lines.push(Line::from(Span::styled(
            time.label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(time.value));
        lines.push(Line::default());
    }

    if !card.definitions.is_empty() && view.definition.is_none() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "[D] definitions",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

/// How many staggered rows are visible `elapsed` after arrival.
fn revealed(elapsed: Duration, stagger: Duration) -> usize {
    if stagger.is_zero() {
        return usize::MAX;
    }
    (elapsed.as_millis() / stagger.as_millis()) as usize + 1
}

fn render_definition(frame: &mut Frame, inner: Rect, term: &str, meaning: &str) {
    let height = inner.height.min(4);
    let popover = Rect {
        y: inner.bottom().saturating_sub(height),
        height,
        ..inner
    };
    frame.render_widget(Clear, popover);
    frame.render_widget(
        Paragraph::new(meaning)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {term} "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
        popover,
    );
}

fn render_ripples(frame: &mut Frame, panel: Rect, view: &CardView) {
    let buffer = frame.buffer_mut();
    for ripple in view.ripples {
        let position = Position::new(ripple.x, ripple.y);
        if !panel.contains(position) {
            continue;
        }
        let age = ripple.age(view.now, view.timing.ripple_lifetime);
        let symbol = match age {
            a if a < 0.33 => "●",
            a if a < 0.66 => "○",
            _ => "·",
        };
        buffer[position]
            .set_symbol(symbol)
            .set_fg(Color::LightMagenta);
    }
}

/// Shift `rect` by (dx, dy) and clip it to `bounds`.
fn offset_within(rect: Rect, dx: i32, dy: i32, bounds: Rect) -> Rect {
    let left = (rect.x as i32 + dx).max(bounds.x as i32);
    let right = (rect.right() as i32 + dx).min(bounds.right() as i32);
    let top = (rect.y as i32 + dy).max(bounds.y as i32);
    let bottom = (rect.bottom() as i32 + dy).min(bounds.bottom() as i32);

    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_reveal_one_stagger_apart() {
        let stagger = Duration::from_millis(120);
        assert_eq!(revealed(Duration::ZERO, stagger), 1);
        assert_eq!(revealed(Duration::from_millis(119), stagger), 1);
        assert_eq!(revealed(Duration::from_millis(240), stagger), 3);
    }

    #[test]
    fn offset_is_clipped_to_bounds() {
        let bounds = Rect::new(0, 0, 80, 20);
        let rect = Rect::new(10, 2, 40, 10);

        assert_eq!(offset_within(rect, -20, 0, bounds), Rect::new(0, 2, 30, 10));
        assert_eq!(offset_within(rect, 2, 1, bounds), Rect::new(12, 3, 40, 10));
        assert!(offset_within(rect, -60, 0, bounds).is_empty());
    }
}
