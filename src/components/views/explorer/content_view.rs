use base64::{Engine, engine::general_purpose::STANDARD};
use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span, Text},
};

use crate::model::ContentVariant;

const LOADING_TEXT: &str = "Loading...";
const ERROR_PREFIX: &str = "Error loading file: ";
const SOURCE_PREVIEW_LEN: usize = 64;
const TAB: &str = "    ";

/// What the modal body shows for a content variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
  Loading,
  Error { message: String },
  Image { source: String, mime: String, size: Option<usize> },
  Text { content: String },
}

/// Maps a content variant to its display representation.
pub fn render(variant: &ContentVariant) -> Display {
  match variant {
    ContentVariant::Loading => Display::Loading,
    ContentVariant::Error { message } => Display::Error { message: message.clone() },
    ContentVariant::Image { base64, extension } => Display::Image {
      source: format!("data:image/{extension};base64,{base64}"),
      mime: format!("image/{extension}"),
      size: decoded_size(base64),
    },
    ContentVariant::Text { content } => Display::Text { content: content.clone() },
  }
}

/// Size of the decoded payload. The backend passes GitHub's base64 through,
/// which is wrapped with newlines.
fn decoded_size(base64: &str) -> Option<usize> {
  let compact: String = base64.chars().filter(|c| !c.is_whitespace()).collect();
  STANDARD.decode(compact).ok().map(|bytes| bytes.len())
}

/// Removes terminal escape sequences while keeping the layout of the text.
/// The stripper drops tabs and carriage returns, so each tab separated piece
/// is stripped on its own and tabs come back as spaces.
fn terminal_safe(content: &str) -> String {
  content.split('\t').map(strip_ansi_escapes::strip_str).collect::<Vec<_>>().join(TAB)
}

fn format_size(bytes: usize) -> String {
  if bytes < 1024 { format!("{bytes} B") } else { format!("{:.1} KiB", bytes as f64 / 1024.0) }
}

impl Display {
  /// Terminal rendering. Escape sequences are stripped from text content so
  /// the file cannot drive the terminal.
  pub fn to_text(&self, alt: &str) -> Text<'static> {
    match self {
      Display::Loading => Text::from(Line::styled(LOADING_TEXT, Style::default().add_modifier(Modifier::DIM))),
      Display::Error { message } => {
        Text::from(Line::styled(format!("{ERROR_PREFIX}{message}"), Style::default().fg(Color::Red)))
      },
      Display::Image { source, mime, size } => {
        let size = size.map(format_size).unwrap_or_else(|| String::from("unknown size"));
        let preview = if source.chars().count() > SOURCE_PREVIEW_LEN {
          format!("{}…", source.chars().take(SOURCE_PREVIEW_LEN).collect::<String>())
        } else {
          source.clone()
        };
        Text::from(vec![
          Line::from(vec![
            Span::styled(format!("[{mime}] "), Style::default().fg(Color::Cyan)),
            Span::raw(alt.to_string()),
            Span::styled(format!(" ({size})"), Style::default().add_modifier(Modifier::DIM)),
          ]),
          Line::default(),
          Line::styled(preview, Style::default().add_modifier(Modifier::DIM)),
        ])
      },
      Display::Text { content } => Text::raw(terminal_safe(content)),
    }
  }
}
