use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::{
    action::{Action, NoticeLevel},
    components::Component,
    tui::Frame,
};

/// Wie lange eine Meldung stehen bleibt.
const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct Notice {
    level: NoticeLevel,
    message: String,
    created_at: Instant,
}

/// Statuszeile für Erfolgs- und Fehlermeldungen. Eine neue Meldung ersetzt
/// die alte und startet die Anzeigedauer neu.
#[derive(Debug, Default)]
pub struct NoticeBar {
    current: Option<Notice>,
}

impl Component for NoticeBar {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ShowNotice(level, message) => {
                self.current = Some(Notice {
                    level,
                    message,
                    created_at: Instant::now(),
                });
            }
            Action::Tick => {
                if let Some(notice) = &self.current {
                    if notice.created_at.elapsed() >= NOTICE_TTL {
                        self.current = None;
                    }
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let Some(notice) = &self.current else {
            return Ok(());
        };
        let style = match notice.level {
            NoticeLevel::Success => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::default().fg(Color::Red),
        };
        f.render_widget(
            Paragraph::new(notice.message.as_str()).centered().style(style),
            area,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shown(bar: &NoticeBar) -> Option<&str> {
        bar.current.as_ref().map(|n| n.message.as_str())
    }

    #[test]
    fn notice_survives_ticks_until_its_ttl_elapses() {
        let mut bar = NoticeBar::default();
        bar.update(Action::ShowNotice(
            NoticeLevel::Success,
            "Customer added successfully!".to_string(),
        ))
        .unwrap();

        bar.update(Action::Tick).unwrap();
        assert_eq!(shown(&bar), Some("Customer added successfully!"));

        // künstlich altern lassen
        bar.current.as_mut().unwrap().created_at = Instant::now() - NOTICE_TTL;
        bar.update(Action::Tick).unwrap();
        assert_eq!(shown(&bar), None);
    }

    #[test]
    fn replacement_restarts_the_clock() {
        let mut bar = NoticeBar::default();
        bar.update(Action::ShowNotice(
            NoticeLevel::Error,
            "Error saving customer. Please try again.".to_string(),
        ))
        .unwrap();
        // die erste Meldung ist längst abgelaufen
        bar.current.as_mut().unwrap().created_at = Instant::now() - NOTICE_TTL;

        bar.update(Action::ShowNotice(
            NoticeLevel::Success,
            "Customer updated successfully!".to_string(),
        ))
        .unwrap();
        bar.update(Action::Tick).unwrap();
        assert_eq!(shown(&bar), Some("Customer updated successfully!"));
    }

    #[test]
    fn ticks_without_a_notice_do_nothing() {
        let mut bar = NoticeBar::default();
        bar.update(Action::Tick).unwrap();
        assert_eq!(shown(&bar), None);
    }
}
