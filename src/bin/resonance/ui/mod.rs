//! TUI module for resonance
//!
//! One loop drives everything: commit due transitions, drain audio events,
//! draw, then wait up to one frame for input.

mod card;
mod footer;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tracing::warn;

use resonance::{
    audio::{AudioBackend, AudioEngine, Cue},
    config::Timing,
    nav::{command_for_key, NavCommand, Navigator, SwipeTracker},
    Card, CARDS,
};

use card::{render_card, CardView};
use footer::{render_footer, render_status, FooterHits, FooterView};

/// Approximate pointer units per terminal column, for the swipe threshold.
const PX_PER_COLUMN: f32 = 8.0;

const FRAME: Duration = Duration::from_millis(16);

/// Clickable regions from the last frame.
#[derive(Default)]
struct HitAreas {
    card: Rect,
    footer: FooterHits,
}

/// UI application state
pub struct UiApp<B: AudioBackend> {
    navigator: Navigator,
    engine: AudioEngine<B>,
    timing: Timing,
    swipe: SwipeTracker,
    /// When the current card finished arriving, for the staggered reveal.
    shown_at: Instant,
    hits: HitAreas,
    should_quit: bool,
}

impl<B: AudioBackend> UiApp<B> {
    pub fn new(navigator: Navigator, engine: AudioEngine<B>, timing: Timing) -> Self {
        Self {
            navigator,
            engine,
            swipe: SwipeTracker::new(timing.swipe_threshold),
            timing,
            shown_at: Instant::now(),
            hits: HitAreas::default(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.update(now);

            terminal.draw(|frame| self.render(frame, now))?;

            if event::poll(FRAME)? {
                let event = event::read()?;
                self.handle_event(event, Instant::now());
            }
        }

        self.navigator.cancel();
        self.engine.shutdown();
        Ok(())
    }

    fn current_card(&self) -> &'static Card {
        &CARDS[self.navigator.current_index()]
    }

    fn update(&mut self, now: Instant) {
        if self.navigator.tick(now).is_some() {
            self.shown_at = now;
        }
        if let Some(err) = self.engine.poll() {
            self.navigator.interaction_mut().show_error(err.to_string());
        }
        self.navigator
            .interaction_mut()
            .expire_ripples(now, self.timing.ripple_lifetime);
    }

    /// Start or resume audio. Called on every user interaction.
    fn wake_audio(&mut self) {
        if let Err(err) = self.engine.ensure_started() {
            warn!(%err, "audio unavailable");
            self.navigator.interaction_mut().show_error(err.to_string());
        }
    }

    fn navigate(&mut self, command: NavCommand, now: Instant) {
        self.wake_audio();
        self.navigator.apply(command, now, &mut self.engine);
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::FocusLost => {
                if let Err(err) = self.engine.suspend() {
                    warn!(%err, "failed to suspend audio");
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => {
                self.navigator.interaction_mut().dismiss();
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.wake_audio();
                self.engine.toggle_muted();
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.wake_audio();
                if self.navigator.is_transitioning() {
                    return;
                }
                let card = self.current_card();
                if let Err(err) = self.engine.narrate(card) {
                    self.navigator.interaction_mut().show_error(err.to_string());
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                let available = self.current_card().definitions.len();
                self.navigator.interaction_mut().cycle_definition(available);
            }
            other => {
                if let Some(command) = command_for_key(other) {
                    self.navigate(command, now);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let position = Position::new(mouse.column, mouse.row);
        let x = mouse.column as f32 * PX_PER_COLUMN;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(command) = self.hits.footer.command_at(position) {
                    self.navigate(command, now);
                } else if self.hits.card.contains(position) {
                    self.wake_audio();
                    self.navigator
                        .interaction_mut()
                        .add_ripple(mouse.column, mouse.row, now);
                    self.engine.play_cue(Cue::Tap);
                    self.swipe.begin(x);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.swipe.update(x),
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(command) = self.swipe.end() {
                    self.navigate(command, now);
                }
            }
            MouseEventKind::Moved => {
                let card = self.hits.card;
                if card.contains(position) && card.width > 1 && card.height > 1 {
                    let rel_x = (mouse.column - card.x) as f32 / (card.width - 1) as f32;
                    let rel_y = (mouse.row - card.y) as f32 / (card.height - 1) as f32;
                    self.navigator.pointer_moved(rel_x, rel_y);
                } else {
                    self.navigator.pointer_left();
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();

        // Main layout: card, navigation, status, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Card
                Constraint::Length(3), // Back / dots / Next
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let card = self.current_card();
        let interaction = self.navigator.interaction();
        let definition = interaction
            .active_definition
            .and_then(|i| card.definitions.get(i).copied());
        let transition = self
            .navigator
            .transition_progress(now)
            .map(|progress| (progress, self.navigator.direction()));

        let view = CardView {
            card,
            elapsed: now.saturating_duration_since(self.shown_at),
            transition,
            tilt: interaction.tilt,
            ripples: &interaction.ripples,
            definition,
            now,
            timing: &self.timing,
        };
        self.hits.card = render_card(frame, chunks[0], &view);

        let index = self.navigator.current_index();
        self.hits.footer = render_footer(
            frame,
            chunks[1],
            &FooterView {
                current: index,
                count: self.navigator.card_count(),
                transitioning: self.navigator.is_transitioning(),
            },
        );

        render_status(
            frame,
            chunks[2],
            &self.engine.session(),
            interaction.error.as_deref(),
        );

        let help = Paragraph::new(
            " [←/→] Navigate  [1-9] Jump  [M] Mute  [N] Narrate  [D] Define  [Esc] Dismiss  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
