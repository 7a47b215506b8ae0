//! Navigation state and key handling

use std::time::Duration;

use clickfx::{output::AudioBackend, ClickSynth};
use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

use super::ui;

pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        path: "/dashboard",
        label: "Intro Context",
    },
    NavItem {
        path: "/case-studies",
        label: "Case Studies",
    },
    NavItem {
        path: "/evidence-metrics",
        label: "Evidence & Metrics",
    },
    NavItem {
        path: "/contact",
        label: "Contact",
    },
];

const VOLUME_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct App<B: AudioBackend> {
    synth: ClickSynth<B>,
    pub location: String,
    pub focused: usize,
    pub theme: Theme,
    pub status: Option<String>,
    should_quit: bool,
}

impl<B: AudioBackend> App<B> {
    pub fn new(synth: ClickSynth<B>) -> Self {
        Self {
            synth,
            location: "/".to_string(),
            focused: 0,
            theme: Theme::Dark,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let sound = self.synth.prefs().snapshot();
        ui::render(frame, self, sound);
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        self.location == item.path
    }

    pub fn active_label(&self) -> Option<&'static str> {
        NAV_ITEMS
            .iter()
            .find(|item| self.is_active(item))
            .map(|item| item.label)
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Up => {
                self.focused = (self.focused + NAV_ITEMS.len() - 1) % NAV_ITEMS.len();
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                self.focused = (self.focused + 1) % NAV_ITEMS.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.navigate(self.focused),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.focused = index;
                self.navigate(index);
            }
            KeyCode::Char('m') => self.toggle_sound(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_volume(VOLUME_STEP),
            KeyCode::Char('-') => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Char('t') => {
                self.theme = match self.theme {
                    Theme::Dark => Theme::Light,
                    Theme::Light => Theme::Dark,
                };
            }
            _ => {}
        }
    }

    fn navigate(&mut self, index: usize) {
        let Some(item) = NAV_ITEMS.get(index) else {
            return;
        };

        self.synth.trigger();
        self.location = item.path.to_string();
    }

    fn toggle_sound(&mut self) {
        self.status = match self.synth.prefs().toggle_sound() {
            Ok(true) => Some("Sound on".to_string()),
            Ok(false) => Some("Sound off".to_string()),
            Err(e) => Some(format!("Could not save preference: {}", e)),
        };
    }

    fn nudge_volume(&mut self, step: f32) {
        let prefs = self.synth.prefs();
        // Snap to tenths so repeated steps don't drift.
        let target = ((prefs.volume() + step) * 10.0).round() / 10.0;

        self.status = match prefs.set_volume(target) {
            Ok(volume) => Some(format!("Volume {:.0}%", volume * 100.0)),
            Err(e) => Some(format!("Could not save preference: {}", e)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickfx::{output::OfflineBackend, prefs::MemoryStore, SoundPreferences};
    use std::sync::Arc;

    fn app(backend: &OfflineBackend) -> App<OfflineBackend> {
        let prefs = Arc::new(SoundPreferences::load(MemoryStore::new()));
        App::new(ClickSynth::new(backend.clone(), prefs))
    }

    #[test]
    fn enter_navigates_to_focused_item() {
        let backend = OfflineBackend::new(48_000.0);
        let mut app = app(&backend);
        assert_eq!(app.active_label(), None);

        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.location, "/case-studies");
        assert!(app.is_active(&NAV_ITEMS[1]));
        assert!(!app.is_active(&NAV_ITEMS[0]));
    }

    #[test]
    fn focus_wraps_around() {
        let backend = OfflineBackend::new(48_000.0);
        let mut app = app(&backend);

        app.handle_key(KeyCode::Left);
        assert_eq!(app.focused, NAV_ITEMS.len() - 1);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.focused, 0);
    }

    #[test]
    fn muted_navigation_stays_silent() {
        let backend = OfflineBackend::new(48_000.0);
        let mut app = app(&backend);

        app.handle_key(KeyCode::Char('m'));
        app.handle_key(KeyCode::Char('4'));

        assert_eq!(app.active_label(), Some("Contact"));
        assert_eq!(app.status.as_deref(), Some("Sound off"));
        assert_eq!(backend.opened(), 0);
    }

    #[test]
    fn volume_steps_snap_and_clamp() {
        let backend = OfflineBackend::new(48_000.0);
        let mut app = app(&backend);

        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.synth.prefs().volume(), 1.0);

        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert!((app.synth.prefs().volume() - 0.8).abs() < 1e-6);
        assert_eq!(app.status.as_deref(), Some("Volume 80%"));
    }
}
