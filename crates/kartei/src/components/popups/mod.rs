use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::tui::Frame;

pub mod confirm;
pub mod editor;

/// Abdunkelnder Hintergrund hinter einem modalen Dialog. Terminals kennen
/// keine echte Transparenz, darum eine volle Hintergrundfarbe.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Zentriertes Rechteck mit fester Breite und Höhe, begrenzt auf `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Zeichnet den Dialograhmen mit Titel und räumt die Fläche darunter frei.
/// Gibt `area` unverändert zurück.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(block, area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_rect_is_clamped_to_the_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(area, 60, 9);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 9);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn centered_rect_sits_in_the_middle() {
        let area = Rect::new(2, 1, 80, 24);
        let rect = centered_rect_fixed(area, 60, 9);
        assert_eq!(rect, Rect::new(12, 8, 60, 9));
    }
}
