use ratatui::{
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Style},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::content_view;
use crate::{model::ContentVariant, tui::Frame};

const WIDTH_PERCENT: u16 = 80;
const HEIGHT_PERCENT: u16 = 80;

/// Area of the popup, centred in `area`.
pub fn popup_area(area: Rect) -> Rect {
  let [vertical] = Layout::vertical([Constraint::Percentage(HEIGHT_PERCENT)]).flex(Flex::Center).areas(area);
  let [popup] = Layout::horizontal([Constraint::Percentage(WIDTH_PERCENT)]).flex(Flex::Center).areas(vertical);
  popup
}

/// Rows the body can scroll before its last wrapped row reaches the bottom of `body_area`.
pub fn max_scroll(body: &Paragraph<'_>, body_area: Rect) -> u16 {
  let rows = body.line_count(body_area.width);
  rows.saturating_sub(body_area.height as usize).min(u16::MAX as usize) as u16
}

/// Draws the popup and returns the scroll limit for the current size. The
/// requested scroll is clamped to that limit.
pub fn render(frame: &mut Frame<'_>, area: Rect, path: &str, content: &ContentVariant, scroll: u16) -> u16 {
  let popup = popup_area(area);
  let block = Block::default()
    .title(path.to_string())
    .title_bottom("Esc: Close | ↑↓: Scroll")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let body_area = block.inner(popup);
  let body = Paragraph::new(content_view::render(content).to_text(path)).wrap(Wrap { trim: false });
  let limit = max_scroll(&body, body_area);

  frame.render_widget(Clear, popup);
  frame.render_widget(block, popup);
  frame.render_widget(body.scroll((scroll.min(limit), 0)), body_area);
  limit
}

#[cfg(test)]
mod tests {
  use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

  use super::*;

  fn rows(buffer: &Buffer) -> Vec<String> {
    (0..buffer.area.height)
      .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
      .collect()
  }

  fn draw(content: &ContentVariant, scroll: u16) -> (u16, Vec<String>) {
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    let mut limit = 0;
    terminal
      .draw(|f| {
        let area = f.area();
        limit = render(f, area, "dist/app.min.js", content, scroll);
      })
      .unwrap();
    (limit, rows(terminal.backend().buffer()))
  }

  #[test]
  fn test_popup_is_centred() {
    let popup = popup_area(Rect::new(0, 0, 100, 50));

    assert_eq!(popup, Rect::new(10, 5, 80, 40));
  }

  #[test]
  fn test_short_text_does_not_scroll() {
    let (limit, rows) = draw(&ContentVariant::Text { content: "a\nb\nc".to_string() }, 5);

    assert_eq!(limit, 0);
    assert!(rows.iter().any(|row| row.contains('a')));
  }

  #[test]
  fn test_non_text_does_not_scroll() {
    let (limit, _) = draw(&ContentVariant::Loading, 0);

    assert_eq!(limit, 0);
  }

  #[test]
  fn test_single_long_line_scrolls_to_its_end() {
    let content = ContentVariant::Text { content: format!("{}END", "x".repeat(2997)) };

    // 80x40 terminal: popup body is 62 columns by 30 rows, 3000 chars wrap into 49 rows.
    let (limit, top) = draw(&content, 0);
    assert_eq!(limit, 19);
    assert!(!top.iter().any(|row| row.contains("END")));

    let (_, bottom) = draw(&content, limit);
    assert!(bottom.iter().any(|row| row.contains("END")));
  }

  #[test]
  fn test_many_lines_scroll_by_rows() {
    let content = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");

    let (limit, rows) = draw(&ContentVariant::Text { content }, u16::MAX);

    assert_eq!(limit, 70);
    assert!(rows.iter().any(|row| row.contains("line 99")));
  }
}
