use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use customers::Customer;
use ratatui::{
    layout::{Constraint, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::{is_global_chord, Component},
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Delete,
    Cancel,
}

/// Sicherheitsabfrage vor dem Löschen. Solange der Dialog offen ist,
/// erreichen nur die globalen Akkorde die restliche Oberfläche.
pub struct DeleteConfirmPopup {
    customer: Customer,
    selected: Choice,
    last_dialog: Rect,
}

impl DeleteConfirmPopup {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            selected: Choice::Delete,
            last_dialog: Rect::default(),
        }
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            Choice::Delete => Choice::Cancel,
            Choice::Cancel => Choice::Delete,
        };
    }

    fn confirm_action(&self) -> Action {
        match self.selected {
            Choice::Delete => Action::DeleteRequested(self.customer.id),
            Choice::Cancel => Action::ClosePopup,
        }
    }

    fn inner_rect(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }
}

impl Component for DeleteConfirmPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(MIN_HEIGHT)
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if is_global_chord(&key) {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                Action::Update
            }
            KeyCode::Enter => self.confirm_action(),
            KeyCode::Esc => Action::ClosePopup,
            _ => Action::Update,
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<EventResponse<Action>>> {
        if let MouseEventKind::Down(_) = mouse.kind {
            // vor dem ersten Zeichnen ist die Dialogfläche noch unbekannt
            if self.last_dialog.width > 0
                && !self
                    .last_dialog
                    .contains(Position::new(mouse.column, mouse.row))
            {
                return Ok(Some(EventResponse::Stop(Action::ClosePopup)));
            }
        }
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let w = MIN_WIDTH.min(area.width);
        let h = MIN_HEIGHT.min(area.height);
        let dialog = centered_rect_fixed(area, w, h);
        self.last_dialog = dialog;

        let _ = draw_popup_frame(f, dialog, "Confirm Delete");
        let inner = Self::inner_rect(dialog);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::raw("Are you sure you want to delete this customer?"));
        lines.push(Line::from(Span::styled(
            self.customer.full_name(),
            Style::default().bold(),
        )));

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let selected_style = Style::default().fg(Color::Black).bg(Color::White).bold();
        let unselected_style = Style::default().fg(Color::White).bg(Color::Black);

        let delete_span = if self.selected == Choice::Delete {
            Span::styled("[ Delete ]", selected_style)
        } else {
            Span::styled("[ Delete ]", unselected_style)
        };
        let cancel_span = if self.selected == Choice::Cancel {
            Span::styled("[ Cancel ]", selected_style)
        } else {
            Span::styled("[ Cancel ]", unselected_style)
        };

        let spacing = "   ";
        let buttons_len = "[ Delete ]".len() + spacing.len() + "[ Cancel ]".len();
        let pad = (inner.width as usize).saturating_sub(buttons_len) / 2;
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            delete_span,
            Span::raw(spacing),
            cancel_span,
        ]));

        if inner.height >= 4 {
            lines.push(Line::raw(""));
            let hints = Line::from(vec![
                Span::styled("←/→/Tab", Style::default().fg(Color::White)),
                Span::raw(": Select   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Confirm   "),
                Span::styled("Esc", Style::default().fg(Color::White)),
                Span::raw(": Cancel"),
            ])
            .fg(Color::DarkGray);
            lines.push(hints);
        }

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, inner);

        Ok(())
    }
}
