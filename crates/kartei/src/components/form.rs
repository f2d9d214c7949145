use std::collections::HashMap;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use customers::{validate, CustomerDraft, Field, MEMBERSHIP_TYPES};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};
use strum::IntoEnumIterator;
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    components::{is_global_chord, Component},
    tui::{EventResponse, Frame},
};

fn is_text(field: Field) -> bool {
    field != Field::MembershipType
}

/// Gemeinsamer Bearbeitungskern des Anlege-Formulars und des Editors:
/// sieben Attribute, ein Fokus, Fehlermeldungen je Feld.
pub struct FieldSet {
    fields: Vec<Field>,
    inputs: HashMap<Field, Input>,
    membership: String,
    focused: usize,
    errors: HashMap<Field, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        let fields: Vec<Field> = Field::iter().collect();
        let inputs = fields
            .iter()
            .filter(|f| is_text(**f))
            .map(|f| (*f, Input::default()))
            .collect();
        Self {
            fields,
            inputs,
            membership: String::new(),
            focused: 0,
            errors: HashMap::new(),
        }
    }

    pub fn with_draft(draft: &CustomerDraft) -> Self {
        let mut set = Self::new();
        for (field, input) in set.inputs.iter_mut() {
            *input = input.clone().with_value(field.get(draft).to_string());
        }
        set.membership = draft.membership_type.clone();
        set
    }

    pub fn focused_field(&self) -> Field {
        self.fields[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        if self.focused == 0 {
            self.focused = self.fields.len() - 1;
        } else {
            self.focused -= 1;
        }
    }

    /// Tastendruck auf das fokussierte Feld. Eine Wertänderung nimmt die
    /// Fehlermeldung genau dieses Feldes zurück.
    pub fn edit_key(&mut self, key: KeyEvent) {
        let field = self.focused_field();
        if field == Field::MembershipType {
            match key.code {
                KeyCode::Left => self.cycle_membership(-1),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_membership(1),
                _ => {}
            }
        } else if let Some(input) = self.inputs.get_mut(&field) {
            let changed = input
                .handle_event(&crossterm::event::Event::Key(key))
                .map(|change| change.value)
                .unwrap_or(false);
            if changed {
                self.errors.remove(&field);
            }
        }
    }

    fn cycle_membership(&mut self, dir: i32) {
        let next = match MEMBERSHIP_TYPES
            .iter()
            .position(|tier| *tier == self.membership)
        {
            Some(idx) => (idx as i32 + dir).rem_euclid(MEMBERSHIP_TYPES.len() as i32) as usize,
            None => 0,
        };
        self.membership = MEMBERSHIP_TYPES[next].to_string();
        self.errors.remove(&Field::MembershipType);
    }

    pub fn draft(&self) -> CustomerDraft {
        let mut draft = CustomerDraft::default();
        for (field, input) in &self.inputs {
            field.set(&mut draft, input.value().to_string());
        }
        draft.membership_type = self.membership.clone();
        draft
    }

    /// Prüft den aktuellen Stand und merkt sich die Meldungen je Feld.
    pub fn validate_and_mark(&mut self) -> bool {
        self.errors = validate::validate(&self.draft());
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        for input in self.inputs.values_mut() {
            *input = Input::default();
        }
        self.membership.clear();
        self.errors.clear();
        self.focused = 0;
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Zeichnet die Feldzeilen im Stil `Label: Wert`, Fehlermeldungen in Rot
    /// direkt darunter. Setzt den Cursor in das fokussierte Textfeld.
    pub fn draw_fields(&self, f: &mut Frame<'_>, area: Rect, show_cursor: bool) {
        let mut lines: Vec<Line> = Vec::new();
        let mut cursor: Option<(u16, u16)> = None;

        for (idx, field) in self.fields.iter().enumerate() {
            let focused = idx == self.focused;
            let label = format!("{}: ", field);

            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let value = if is_text(*field) {
                self.inputs[field].value().to_string()
            } else {
                self.membership.clone()
            };

            let mut spans = vec![Span::styled(
                label.clone(),
                Style::default().fg(Color::White).add_modifier(if focused {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
            )];
            if *field == Field::MembershipType && value.is_empty() {
                let placeholder_style = if focused {
                    value_style
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled("Select Membership Type", placeholder_style));
            } else {
                spans.push(Span::styled(value, value_style));
            }

            if focused && show_cursor && is_text(*field) {
                let x = (label.len() + self.inputs[field].visual_cursor()) as u16;
                cursor = Some((x.min(area.width.saturating_sub(1)), lines.len() as u16));
            }
            lines.push(Line::from(spans));

            if let Some(err) = self.errors.get(field) {
                lines.push(Line::from(Span::styled(
                    err.clone(),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::raw(""));
        }

        f.render_widget(Paragraph::new(Text::from(lines)), area);

        if let Some((x, y)) = cursor {
            if y < area.height {
                f.set_cursor_position((area.x + x, area.y + y));
            }
        }
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Linkes Panel zum Anlegen neuer Kunden. Nach einer gültigen Eingabe leert
/// sich das Formular sofort; ob das Backend annimmt, meldet die Statuszeile.
#[derive(Default)]
pub struct CustomerForm {
    fields: FieldSet,
    focused: bool,
}

impl CustomerForm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for CustomerForm {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if !self.focused || is_global_chord(&key) {
            return Ok(None);
        }
        let action = match key.code {
            // Abschnittswechsel läuft über die globale Belegung
            KeyCode::Tab | KeyCode::BackTab => return Ok(None),
            KeyCode::Up => {
                self.fields.focus_prev();
                Action::Update
            }
            KeyCode::Down => {
                self.fields.focus_next();
                Action::Update
            }
            KeyCode::Enter => {
                if self.fields.validate_and_mark() {
                    let draft = self.fields.draft().trimmed();
                    self.fields.reset();
                    Action::SubmitCreate(draft)
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

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
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
        let block = Block::bordered()
            .title("Add New Customer")
            .title_style(title_style)
            .border_set(border::ROUNDED)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [fields_area, hints_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        self.fields.draw_fields(f, fields_area, self.focused);

        let hints = Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::White)),
            Span::raw(": Field   "),
            Span::styled("←/→", Style::default().fg(Color::White)),
            Span::raw(": Type   "),
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": Add"),
        ])
        .fg(Color::DarkGray);
        f.render_widget(Paragraph::new(hints), hints_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use customers::Customer;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(set: &mut FieldSet, text: &str) {
        for c in text.chars() {
            set.edit_key(key(KeyCode::Char(c)));
        }
    }

    fn filled_form() -> CustomerForm {
        let mut form = CustomerForm::new();
        form.set_focused(true);
        for text in [
            " Ann ",
            "Lee",
            "ann.lee@example.com",
            "555-0101",
            "1 Main St",
            "Springfield",
        ] {
            type_text(&mut form.fields, text);
            form.fields.focus_next();
        }
        form.fields.edit_key(key(KeyCode::Right));
        form
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut set = FieldSet::new();
        type_text(&mut set, "Ann");
        assert_eq!(set.draft().first_name, "Ann");
        set.focus_next();
        type_text(&mut set, "Lee");
        assert_eq!(set.draft().last_name, "Lee");
    }

    #[test]
    fn membership_cycles_through_the_known_tiers() {
        let mut set = FieldSet::new();
        while set.focused_field() != Field::MembershipType {
            set.focus_next();
        }
        set.edit_key(key(KeyCode::Right));
        assert_eq!(set.draft().membership_type, "Gold");
        set.edit_key(key(KeyCode::Right));
        assert_eq!(set.draft().membership_type, "Silver");
        set.edit_key(key(KeyCode::Left));
        assert_eq!(set.draft().membership_type, "Gold");
        set.edit_key(key(KeyCode::Left));
        assert_eq!(set.draft().membership_type, "Basic");
        set.edit_key(key(KeyCode::Char(' ')));
        assert_eq!(set.draft().membership_type, "Gold");
    }

    #[test]
    fn editing_a_field_clears_only_its_own_error() {
        let mut set = FieldSet::new();
        assert!(!set.validate_and_mark());
        assert!(set.error(Field::FirstName).is_some());
        assert!(set.error(Field::Email).is_some());

        type_text(&mut set, "Ann");
        assert_eq!(set.error(Field::FirstName), None);
        assert!(set.error(Field::Email).is_some());
        assert!(set.error(Field::LastName).is_some());
    }

    #[test]
    fn choosing_a_membership_clears_its_error() {
        let mut set = FieldSet::new();
        set.validate_and_mark();
        while set.focused_field() != Field::MembershipType {
            set.focus_next();
        }
        assert!(set.error(Field::MembershipType).is_some());
        set.edit_key(key(KeyCode::Right));
        assert_eq!(set.error(Field::MembershipType), None);
    }

    #[test]
    fn cursor_moves_do_not_clear_errors() {
        let mut set = FieldSet::new();
        type_text(&mut set, "Ann");
        set.validate_and_mark();
        assert!(set.error(Field::LastName).is_some());
        set.edit_key(key(KeyCode::Left));
        assert!(set.error(Field::LastName).is_some());
    }

    #[test]
    fn prefilled_set_carries_the_given_draft() {
        let customer = Customer {
            id: 9,
            first_name: "Bob".to_string(),
            last_name: "Stone".to_string(),
            email: "bob@example.com".to_string(),
            phone: "555-0102".to_string(),
            address: "2 Oak Ave".to_string(),
            city: "Shelbyville".to_string(),
            membership_type: "Silver".to_string(),
        };
        let set = FieldSet::with_draft(&CustomerDraft::from(&customer));
        assert_eq!(set.draft(), CustomerDraft::from(&customer));
    }

    #[test]
    fn submit_with_errors_keeps_values_and_marks_fields() {
        let mut form = CustomerForm::new();
        form.set_focused(true);
        type_text(&mut form.fields, "Ann");

        let response = form.handle_key_events(key(KeyCode::Enter)).unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Update)));
        assert_eq!(form.fields.draft().first_name, "Ann");
        assert!(form.fields.error(Field::LastName).is_some());
        assert!(form.fields.error(Field::MembershipType).is_some());
    }

    #[test]
    fn valid_submit_emits_a_trimmed_draft_and_empties_the_form() {
        let mut form = filled_form();
        let response = form.handle_key_events(key(KeyCode::Enter)).unwrap();

        let expected = CustomerDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann.lee@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            membership_type: "Gold".to_string(),
        };
        assert_eq!(
            response,
            Some(EventResponse::Stop(Action::SubmitCreate(expected)))
        );
        // sofort leer, ohne auf das Backend zu warten
        assert_eq!(form.fields.draft(), CustomerDraft::default());
        assert_eq!(form.fields.focused_field(), Field::FirstName);
    }

    #[test]
    fn unfocused_form_ignores_keys() {
        let mut form = CustomerForm::new();
        let response = form.handle_key_events(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(response, None);
        assert_eq!(form.fields.draft().first_name, "");
    }

    #[test]
    fn tab_falls_through_to_the_global_bindings() {
        let mut form = CustomerForm::new();
        form.set_focused(true);
        assert_eq!(form.handle_key_events(key(KeyCode::Tab)).unwrap(), None);
        assert_eq!(form.handle_key_events(key(KeyCode::BackTab)).unwrap(), None);
    }
}
