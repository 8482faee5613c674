//! Symbolic reference from one canvas item to another.

use std::fmt;

/// A target as written in the annotation, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetRef {
  /// Item name or method name.
  Named(String),
  /// Offset from the referring item's ordinal.
  Relative(i64),
}

impl TargetRef {
  /// Parses an annotation value.
  ///
  /// `next` and `previous` are offsets of +1 and -1; `+N` and `-N` are explicit
  /// offsets. Anything else names an item.
  pub fn parse(value: &str) -> Self {
    let value = value.trim();
    match value {
      "next" => return TargetRef::Relative(1),
      "previous" | "prev" => return TargetRef::Relative(-1),
      _ => {}
    }
    if let Some(offset) = parse_signed_offset(value) {
      return TargetRef::Relative(offset);
    }
    TargetRef::Named(value.to_string())
  }
}

/// Parses `+N` / `-N`. The sign is mandatory so that numeric item names stay names.
pub(crate) fn parse_signed_offset(s: &str) -> Option<i64> {
  let digits = s.strip_prefix('+').or_else(|| s.strip_prefix('-'))?;
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse().ok()
}

impl fmt::Display for TargetRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TargetRef::Named(name) => f.write_str(name),
      TargetRef::Relative(offset) => write!(f, "{:+}", offset),
    }
  }
}
