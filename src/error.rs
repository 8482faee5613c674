//! Typed failures raised while registering, resolving and rendering canvas items.

use std::fmt;

use crate::types::ItemKind;

/// Result alias used across the compiler core.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Every way a canvas compilation can fail.
///
/// None of these are recoverable at this layer: the compiler aborts the whole
/// workflow on the first one rather than emit a partially wired canvas.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
  #[error("item attribute '{attribute}' is not supported for {kind} item")]
  UnsupportedAttribute { kind: ItemKind, attribute: String },

  #[error("item attribute '{attribute}' is given more than once for {kind} item")]
  DuplicateAttribute { kind: ItemKind, attribute: String },

  #[error("invalid value '{value}' for attribute '{attribute}' of {kind} item")]
  InvalidAttributeValue {
    kind: ItemKind,
    attribute: String,
    value: String,
  },

  #[error("{kind} item '{item}' requires attribute '{attribute}'")]
  MissingAttribute {
    kind: ItemKind,
    item: String,
    attribute: String,
  },

  #[error("{kind} item '{item}' requires binding '{binding}'")]
  MissingBinding {
    kind: ItemKind,
    item: String,
    binding: String,
  },

  #[error("{kind} item '{item}' has no target")]
  MissingTarget { kind: ItemKind, item: String },

  #[error("unable to find target item '{target}' for {kind} item '{item}'")]
  TargetNotFound {
    kind: ItemKind,
    item: String,
    target: String,
  },

  #[error("no canvas strategy registered for item kind '{0}'")]
  UnknownKind(String),

  #[error("item '{0}' is declared more than once")]
  DuplicateItem(String),

  #[error("{expected} strategy was handed a {actual} item")]
  KindMismatch { expected: ItemKind, actual: ItemKind },
}

impl CanvasError {
  pub fn unsupported(kind: ItemKind, attribute: impl Into<String>) -> Self {
    Self::UnsupportedAttribute {
      kind,
      attribute: attribute.into(),
    }
  }

  pub fn missing_target(kind: ItemKind, item: impl Into<String>) -> Self {
    Self::MissingTarget {
      kind,
      item: item.into(),
    }
  }

  pub fn target_not_found(
    kind: ItemKind,
    item: impl Into<String>,
    target: impl fmt::Display,
  ) -> Self {
    Self::TargetNotFound {
      kind,
      item: item.into(),
      target: target.to_string(),
    }
  }

  /// True for failures caused by registry setup or strategy wiring rather
  /// than by the workflow author.
  pub fn is_contract_violation(&self) -> bool {
    matches!(self, Self::UnknownKind(_) | Self::KindMismatch { .. })
  }
}
