use ratatui::{
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};

/// One entry of the repository file list. The directory part of the path is
/// dimmed so file names line up visually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem<'a> {
  pub path: &'a str,
}

impl<'a> FileItem<'a> {
  pub fn new(path: &'a str) -> Self {
    FileItem { path }
  }

  fn split(&self) -> (&'a str, &'a str) {
    match self.path.rfind('/') {
      Some(index) => self.path.split_at(index + 1),
      None => ("", self.path),
    }
  }

  pub fn line(&self) -> Line<'a> {
    let (directory, name) = self.split();
    let mut parts = Vec::new();
    if !directory.is_empty() {
      parts.push(Span::styled(directory, Style::default().add_modifier(Modifier::DIM)));
    }
    parts.push(Span::raw(name));
    Line::from(parts)
  }

  pub fn render(&self) -> ListItem<'a> {
    ListItem::from(self.line())
  }
}
