//! The closed set of canvas item kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::CanvasError;

/// Kind of a canvas item, as declared by the method's annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
  /// Scriptable task running the method body.
  Item,
  /// Custom condition branching on the method's boolean result.
  Decision,
  /// Sleeps until the date bound to its single input.
  WaitingTimer,
  /// Terminates the workflow, normally or by throwing.
  End,
  /// Workflow-wide error handler paired with an end item.
  DefaultErrorHandler,
  /// Calls a library action.
  ActionItem,
  /// Calls another workflow.
  WorkflowItem,
}

impl ItemKind {
  pub const ALL: [ItemKind; 7] = [
    ItemKind::Item,
    ItemKind::Decision,
    ItemKind::WaitingTimer,
    ItemKind::End,
    ItemKind::DefaultErrorHandler,
    ItemKind::ActionItem,
    ItemKind::WorkflowItem,
  ];

  /// Annotation identifier, e.g. `DefaultErrorHandler`.
  pub fn identifier(self) -> &'static str {
    match self {
      ItemKind::Item => "Item",
      ItemKind::Decision => "Decision",
      ItemKind::WaitingTimer => "WaitingTimer",
      ItemKind::End => "End",
      ItemKind::DefaultErrorHandler => "DefaultErrorHandler",
      ItemKind::ActionItem => "ActionItem",
      ItemKind::WorkflowItem => "WorkflowItem",
    }
  }

  /// Kebab-case alias accepted in place of the identifier.
  pub fn alias(self) -> &'static str {
    match self {
      ItemKind::Item => "scriptable-task",
      ItemKind::Decision => "decision",
      ItemKind::WaitingTimer => "waiting-timer",
      ItemKind::End => "end",
      ItemKind::DefaultErrorHandler => "error-handler",
      ItemKind::ActionItem => "action-call",
      ItemKind::WorkflowItem => "workflow-call",
    }
  }
}

impl fmt::Display for ItemKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.identifier())
  }
}

impl FromStr for ItemKind {
  type Err = CanvasError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    ItemKind::ALL
      .into_iter()
      .find(|k| k.identifier() == s || k.alias() == s)
      .ok_or_else(|| CanvasError::UnknownKind(s.to_string()))
  }
}
