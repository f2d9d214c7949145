use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    widgets::{Block, Paragraph},
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    components::{is_global_chord, Component},
    tui::{EventResponse, Frame},
};

/// Suchfeld über der Tabelle. Jeder Tastendruck filtert die Liste neu.
#[derive(Debug, Default)]
pub struct SearchBar {
    input: Input,
    focused: bool,
}

impl Component for SearchBar {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if !self.focused || is_global_chord(&key) {
            return Ok(None);
        }
        match key.code {
            // Fokuswechsel und Tabellen-Navigation laufen über die globale Belegung
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Enter
            | KeyCode::Esc => Ok(None),
            _ => match self.input.handle_event(&crossterm::event::Event::Key(key)) {
                Some(change) if change.value => Ok(Some(EventResponse::Stop(
                    Action::SearchChanged(self.input.value().to_string()),
                ))),
                _ => Ok(Some(EventResponse::Stop(Action::Update))),
            },
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        // keep 2 for borders and 1 for cursor
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);

        let title_style = if self.focused {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input = if self.input.value().is_empty() {
            Paragraph::new("Search by name or email...").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.input.value()).scroll((0, scroll as u16))
        };
        f.render_widget(
            input.block(
                Block::bordered()
                    .title("Search")
                    .title_style(title_style)
                    .border_set(border::ROUNDED)
                    .border_style(border_style),
            ),
            area,
        );

        if self.focused {
            // Ratatui hides the cursor unless it's explicitly set. Position it past the end
            // of the input text, one line down from the border
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            f.set_cursor_position((area.x + x as u16, area.y + 1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn typing_emits_the_new_term() {
        let mut search = SearchBar::default();
        search.set_focused(true);
        let response = search.handle_key_events(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(
            response,
            Some(EventResponse::Stop(Action::SearchChanged("l".to_string())))
        );
    }

    #[test]
    fn backspace_shortens_the_term() {
        let mut search = SearchBar::default();
        search.set_focused(true);
        search.handle_key_events(key(KeyCode::Char('l'))).unwrap();
        search.handle_key_events(key(KeyCode::Char('e'))).unwrap();
        let response = search.handle_key_events(key(KeyCode::Backspace)).unwrap();
        assert_eq!(
            response,
            Some(EventResponse::Stop(Action::SearchChanged("l".to_string())))
        );
    }

    #[test]
    fn unfocused_search_ignores_keys() {
        let mut search = SearchBar::default();
        let response = search.handle_key_events(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(response, None);
    }

    #[test]
    fn navigation_and_quit_chords_fall_through() {
        let mut search = SearchBar::default();
        search.set_focused(true);
        assert_eq!(search.handle_key_events(key(KeyCode::Tab)).unwrap(), None);
        assert_eq!(search.handle_key_events(key(KeyCode::Down)).unwrap(), None);
        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(search.handle_key_events(quit).unwrap(), None);
    }

    #[test]
    fn cursor_movement_is_consumed_without_a_new_term() {
        let mut search = SearchBar::default();
        search.set_focused(true);
        search.handle_key_events(key(KeyCode::Char('l'))).unwrap();
        let response = search.handle_key_events(key(KeyCode::Left)).unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Update)));
    }
}
