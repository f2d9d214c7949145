use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::{components::Component, tui::Frame};

/// Titelzeilen über der gesamten Oberfläche.
#[derive(Debug, Default)]
pub struct Header;

impl Component for Header {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(2)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let lines = vec![
            Line::from("Customer Management System").bold(),
            Line::from("Manage your customers efficiently")
                .style(Style::default().fg(Color::DarkGray)),
        ];
        f.render_widget(Paragraph::new(lines).centered(), area);
        Ok(())
    }
}
