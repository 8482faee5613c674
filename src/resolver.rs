//! Resolution of symbolic targets into concrete item names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{CanvasError, CanvasResult};
use crate::types::{ItemDescriptor, TargetRef};

/// How a relative offset maps onto ordinals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeAddressing {
  /// `next` / `+1` is the item declared after the referring one.
  #[default]
  Forward,
  /// `next` / `+1` is the item declared before the referring one.
  Backward,
}

impl RelativeAddressing {
  /// Referenced ordinal, or `None` when the arithmetic leaves `0..`.
  pub fn apply(self, ordinal: usize, offset: i64) -> Option<usize> {
    let delta = match self {
      RelativeAddressing::Forward => offset,
      RelativeAddressing::Backward => offset.checked_neg()?,
    };
    let ordinal = i64::try_from(ordinal).ok()?;
    usize::try_from(ordinal.checked_add(delta)?).ok()
  }
}

impl FromStr for RelativeAddressing {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "forward" => Ok(RelativeAddressing::Forward),
      "backward" => Ok(RelativeAddressing::Backward),
      other => Err(format!(
        "unknown relative addressing '{}' (expected forward or backward)",
        other
      )),
    }
  }
}

impl fmt::Display for RelativeAddressing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RelativeAddressing::Forward => write!(f, "forward"),
      RelativeAddressing::Backward => write!(f, "backward"),
    }
  }
}

/// Maps a [TargetRef] to the name of an item in the current batch.
///
/// Pure: the same inputs always give the same answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetResolver {
  addressing: RelativeAddressing,
}

impl TargetResolver {
  pub fn new(addressing: RelativeAddressing) -> Self {
    Self { addressing }
  }

  pub fn addressing(&self) -> RelativeAddressing {
    self.addressing
  }

  /// Resolves `target` for `item` sitting at `ordinal`.
  ///
  /// A name matches an item's own name first and its method name second.
  /// Offsets are bounds-checked against `items`, never clamped.
  #[instrument(
    level = "trace",
    skip(self, item, items),
    fields(item = item.name(), addressing = %self.addressing)
  )]
  pub fn resolve<'a>(
    &self,
    item: &ItemDescriptor,
    target: &TargetRef,
    ordinal: usize,
    items: &'a [ItemDescriptor],
  ) -> CanvasResult<&'a str> {
    let found = match target {
      TargetRef::Named(name) => items
        .iter()
        .find(|i| i.name() == name)
        .or_else(|| items.iter().find(|i| i.display_name() == name)),
      TargetRef::Relative(offset) => self
        .addressing
        .apply(ordinal, *offset)
        .and_then(|idx| items.get(idx)),
    };
    found
      .map(|i| i.name())
      .ok_or_else(|| CanvasError::target_not_found(item.kind(), item.name(), target))
  }
}
