use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};
use tachyonfx::{Effect, Interpolation, fx};

use crate::presentation::widgets::Spinner;

const LOGO_TEXT: &str = "
                 ░██    ░██
                 ░██
░██░████  ░███████  ░████████ ░██░████████   ░██████
░███     ░██    ░██    ░██    ░██░██    ░██       ░██
░██      ░██    ░██    ░██    ░██░██    ░██  ░███████
░██      ░██    ░██    ░██    ░██░██    ░██ ░██   ░██
░██       ░███████      ░████ ░██░██    ░██  ░█████░██";

#[derive(Debug, Default)]
pub struct LoadingState {
    pub data_ready: bool,
    pub animation_complete: bool,
    pub intro_finished: bool,
}

/// Shown while the startup session check runs.
pub struct SplashScreen {
    intro_effect: Effect,
    outro_effect: Effect,
    animated: bool,
    pub state: LoadingState,
    pending_duration: Duration,
    tick: u64,
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SplashScreen {
    #[must_use]
    pub fn new(animated: bool) -> Self {
        Self {
            intro_effect: fx::coalesce((800, Interpolation::CircOut)),
            outro_effect: fx::dissolve((600, Interpolation::CircIn)),
            animated,
            state: LoadingState {
                intro_finished: !animated,
                ..LoadingState::default()
            },
            pending_duration: Duration::ZERO,
            tick: 0,
        }
    }

    pub fn tick(&mut self, duration: Duration) {
        self.pending_duration = self.pending_duration.saturating_add(duration);
        self.tick = self.tick.wrapping_add(1);
    }

    /// Marks the session check as done. Without animations the screen is
    /// complete right away.
    pub fn set_data_ready(&mut self) {
        self.state.data_ready = true;
        if !self.animated {
            self.state.animation_complete = true;
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.state.data_ready && self.state.animation_complete
    }
}

impl Widget for &mut SplashScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(LOGO_TEXT.trim_matches('\n')).centered();

        let text_width = u16::try_from(text.lines.iter().map(Line::width).max().unwrap_or(0))
            .unwrap_or(0);
        let text_height = u16::try_from(text.lines.len()).unwrap_or(0);

        let x = area.x + (area.width.saturating_sub(text_width)) / 2;
        let y = area.y + (area.height.saturating_sub(text_height)) / 2;
        let center_area = Rect::new(
            x,
            y,
            text_width.min(area.width),
            text_height.min(area.height),
        );

        Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .render(center_area, buf);

        let status_y = center_area.bottom().saturating_add(1);
        if status_y < area.bottom() {
            let status_area = Rect::new(area.x, status_y, area.width, 1);
            Paragraph::new(Line::from(format!(
                "{} Checking session...",
                Spinner::frame(self.tick)
            )))
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .render(status_area, buf);
        }

        let duration = self.pending_duration;
        self.pending_duration = Duration::ZERO;

        if !self.animated {
            return;
        }

        if !self.state.intro_finished {
            let overflow = self.intro_effect.process(duration.into(), buf, center_area);
            if overflow.is_some() {
                self.state.intro_finished = true;
            }
        } else if self.state.data_ready {
            let overflow = self.outro_effect.process(duration.into(), buf, center_area);
            if overflow.is_some() {
                self.state.animation_complete = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_splash_completes_when_data_ready() {
        let mut splash = SplashScreen::new(false);
        assert!(!splash.is_complete());

        splash.set_data_ready();

        assert!(splash.is_complete());
    }

    #[test]
    fn test_animated_splash_waits_for_outro() {
        let mut splash = SplashScreen::new(true);
        splash.set_data_ready();

        assert!(!splash.is_complete());
    }

    #[test]
    fn test_render_shows_status() {
        let mut splash = SplashScreen::new(false);
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        (&mut splash).render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("Checking session..."));
    }
}
