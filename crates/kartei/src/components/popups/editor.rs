use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use customers::{Customer, CustomerDraft};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    action::Action,
    components::{form::FieldSet, is_global_chord, Component},
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

/// Modaler Editor für einen bestehenden Kunden. Die Felder starten mit den
/// aktuellen Werten; das Fenster schließt erst, wenn das Backend die
/// Änderung angenommen hat.
pub struct EditorPopup {
    id: i64,
    fields: FieldSet,
    last_dialog: Rect,
}

impl EditorPopup {
    pub fn new(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            fields: FieldSet::with_draft(&CustomerDraft::from(customer)),
            last_dialog: Rect::default(),
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

impl Component for EditorPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(MIN_HEIGHT)
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if is_global_chord(&key) {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Esc => Action::ClosePopup,
            KeyCode::Up | KeyCode::BackTab => {
                self.fields.focus_prev();
                Action::Update
            }
            KeyCode::Down | KeyCode::Tab => {
                self.fields.focus_next();
                Action::Update
            }
            KeyCode::Enter => {
                if self.fields.validate_and_mark() {
                    Action::SubmitUpdate(self.id, self.fields.draft().trimmed())
                } else {
                    Action::Update
                }
            }
            _ => {
                self.fields.edit_key(key);
                Action::Update
            }
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

        let _ = draw_popup_frame(f, dialog, "Edit Customer");
        let inner = Self::inner_rect(dialog);

        let [fields_area, hints_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        self.fields.draw_fields(f, fields_area, true);

        let hints = Line::from(vec![
            Span::styled("↑/↓/Tab", Style::default().fg(Color::White)),
            Span::raw(": Field   "),
            Span::styled("←/→", Style::default().fg(Color::White)),
            Span::raw(": Type   "),
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": Save   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Cancel"),
        ])
        .fg(Color::DarkGray);
        f.render_widget(Paragraph::new(hints), hints_area);

        Ok(())
    }
}
