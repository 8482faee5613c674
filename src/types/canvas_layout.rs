//! Canvas coordinates for rendered items.

use serde::{Deserialize, Serialize};

/// Horizontal ladder layout: every item sits `offset` further right than the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasLayout {
  pub x_base: f64,
  pub y_base: f64,
  pub offset: f64,
}

impl Default for CanvasLayout {
  fn default() -> Self {
    Self {
      x_base: 180.0,
      y_base: 110.0,
      offset: 20.0,
    }
  }
}

impl CanvasLayout {
  /// Position of the item at `ordinal`. Depends on nothing else.
  pub fn position(&self, ordinal: usize) -> Position {
    Position {
      x: self.x_base + self.offset * ordinal as f64,
      y: self.y_base,
    }
  }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub fn x_attr(&self) -> String {
    format_coordinate(self.x)
  }

  pub fn y_attr(&self) -> String {
    format_coordinate(self.y)
  }
}

/// Formats a coordinate with at least one decimal digit: `240.0`, `65.4`.
pub(crate) fn format_coordinate(v: f64) -> String {
  if v.fract() == 0.0 {
    format!("{:.1}", v)
  } else {
    format!("{}", v)
  }
}
