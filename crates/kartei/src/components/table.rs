use color_eyre::Result;
use customers::Customer;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Text},
    widgets::{Block, Paragraph, Row, Table, TableState},
};

use crate::{action::Action, components::Component, tui::Frame};

/// Kundenliste rechts. Zeigt immer das Ergebnis des aktuellen Suchbegriffs;
/// die Auswahl bleibt beim Umfiltern erhalten, soweit die Liste das hergibt.
pub struct CustomerTable {
    rows: Vec<Customer>,
    state: TableState,
    loading: bool,
    focused: bool,
}

impl CustomerTable {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            state: TableState::default(),
            // bis zur ersten Antwort des Backends
            loading: true,
            focused: false,
        }
    }

    fn selected(&self) -> Option<&Customer> {
        self.state.selected().and_then(|idx| self.rows.get(idx))
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            let idx = self
                .state
                .selected()
                .map_or(0, |idx| idx.min(self.rows.len() - 1));
            self.state.select(Some(idx));
        }
    }
}

impl Default for CustomerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CustomerTable {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // jeder Neuabruf zeigt den Ladehinweis erneut
            Action::Refresh => {
                self.loading = true;
            }
            Action::ListFiltered(rows) => {
                self.rows = rows;
                self.loading = false;
                self.clamp_selection();
            }
            Action::LoadFailed => {
                self.loading = false;
            }
            Action::SelectNext => {
                if let Some(idx) = self.state.selected() {
                    if idx + 1 < self.rows.len() {
                        self.state.select(Some(idx + 1));
                    }
                }
            }
            Action::SelectPrev => {
                if let Some(idx) = self.state.selected() {
                    self.state.select(Some(idx.saturating_sub(1)));
                }
            }
            Action::EditSelected => {
                return Ok(self.selected().cloned().map(Action::OpenEditor));
            }
            Action::DeleteSelected => {
                return Ok(self.selected().cloned().map(Action::ConfirmDelete));
            }
            _ => {}
        }
        Ok(None)
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
            .title("Customers List")
            .title_style(title_style)
            .border_set(border::ROUNDED)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.loading {
            let text = Text::from(vec![
                Line::raw(""),
                Line::styled("Loading customers...", Style::default().fg(Color::DarkGray)),
            ]);
            f.render_widget(Paragraph::new(text).centered(), inner);
            return Ok(());
        }
        if self.rows.is_empty() {
            let text = Text::from(vec![
                Line::raw(""),
                Line::styled(
                    "No customers found. Add one to get started!",
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            f.render_widget(Paragraph::new(text).centered(), inner);
            return Ok(());
        }

        let header = Row::new(vec![
            "ID",
            "First Name",
            "Last Name",
            "Email",
            "Phone",
            "Address",
            "City",
            "Membership",
        ])
        .style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, customer)| {
                let style = if i % 2 == 0 {
                    Style::default().bg(Color::Rgb(40, 40, 60))
                } else {
                    Style::default().bg(Color::Rgb(30, 30, 40))
                };
                Row::new(vec![
                    customer.id.to_string(),
                    customer.first_name.clone(),
                    customer.last_name.clone(),
                    customer.email.clone(),
                    customer.phone.clone(),
                    customer.address.clone(),
                    customer.city.clone(),
                    customer.membership_type.clone(),
                ])
                .style(style)
                .height(1)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Fill(2),
                Constraint::Length(12),
                Constraint::Fill(2),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

        f.render_stateful_widget(table, inner, &mut self.state);
        Ok(())
    }
}
