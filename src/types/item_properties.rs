//! Kind-specific extension properties, one shape per item kind.
//!
//! A descriptor carries exactly the variant matching its kind, so a strategy can
//! only reach the fields of the kind it owns.

use std::fmt;
use std::str::FromStr;

use super::{ItemKind, TargetRef};

/// How an end item terminates the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndMode {
  #[default]
  Normal,
  /// Ends by throwing the bound exception.
  Error,
}

impl EndMode {
  /// Value of the `end-mode` attribute.
  pub fn code(self) -> &'static str {
    match self {
      EndMode::Normal => "0",
      EndMode::Error => "1",
    }
  }
}

impl FromStr for EndMode {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "0" | "normal" => Ok(EndMode::Normal),
      "1" | "error" => Ok(EndMode::Error),
      _ => Err(()),
    }
  }
}

impl fmt::Display for EndMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

/// Action reference written as `module/action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptModule {
  pub module: String,
  pub action: String,
}

impl ScriptModule {
  /// Splits on the last `/`; both halves must be non-empty.
  pub fn parse(value: &str) -> Option<Self> {
    let (module, action) = value.trim().rsplit_once('/')?;
    if module.is_empty() || action.is_empty() {
      return None;
    }
    Some(Self {
      module: module.to_string(),
      action: action.to_string(),
    })
  }
}

impl fmt::Display for ScriptModule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.module, self.action)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskProperties;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionProperties {
  /// Branch taken when the condition is false.
  pub else_target: Option<TargetRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitingTimerProperties;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndProperties {
  pub end_mode: EndMode,
  pub exception_variable: Option<String>,
  pub business_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorHandlerProperties {
  pub exception_variable: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCallProperties {
  pub script_module: Option<ScriptModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowCallProperties {
  pub linked_workflow_id: Option<String>,
}

/// Extension properties of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemProperties {
  Task(TaskProperties),
  Decision(DecisionProperties),
  WaitingTimer(WaitingTimerProperties),
  End(EndProperties),
  DefaultErrorHandler(ErrorHandlerProperties),
  ActionCall(ActionCallProperties),
  WorkflowCall(WorkflowCallProperties),
}

impl ItemProperties {
  /// Empty properties for `kind`.
  pub fn for_kind(kind: ItemKind) -> Self {
    match kind {
      ItemKind::Item => ItemProperties::Task(TaskProperties),
      ItemKind::Decision => ItemProperties::Decision(DecisionProperties::default()),
      ItemKind::WaitingTimer => ItemProperties::WaitingTimer(WaitingTimerProperties),
      ItemKind::End => ItemProperties::End(EndProperties::default()),
      ItemKind::DefaultErrorHandler => {
        ItemProperties::DefaultErrorHandler(ErrorHandlerProperties::default())
      }
      ItemKind::ActionItem => ItemProperties::ActionCall(ActionCallProperties::default()),
      ItemKind::WorkflowItem => ItemProperties::WorkflowCall(WorkflowCallProperties::default()),
    }
  }

  pub fn kind(&self) -> ItemKind {
    match self {
      ItemProperties::Task(_) => ItemKind::Item,
      ItemProperties::Decision(_) => ItemKind::Decision,
      ItemProperties::WaitingTimer(_) => ItemKind::WaitingTimer,
      ItemProperties::End(_) => ItemKind::End,
      ItemProperties::DefaultErrorHandler(_) => ItemKind::DefaultErrorHandler,
      ItemProperties::ActionCall(_) => ItemKind::ActionItem,
      ItemProperties::WorkflowCall(_) => ItemKind::WorkflowItem,
    }
  }
}

macro_rules! properties_accessors {
  ($($variant:ident => $props:ty, $get:ident, $get_mut:ident;)*) => {
    impl ItemProperties {
      $(
        pub fn $get(&self) -> Option<&$props> {
          match self {
            ItemProperties::$variant(p) => Some(p),
            _ => None,
          }
        }

        pub(crate) fn $get_mut(&mut self) -> Option<&mut $props> {
          match self {
            ItemProperties::$variant(p) => Some(p),
            _ => None,
          }
        }
      )*
    }
  };
}

properties_accessors! {
  Task => TaskProperties, as_task, as_task_mut;
  Decision => DecisionProperties, as_decision, as_decision_mut;
  WaitingTimer => WaitingTimerProperties, as_waiting_timer, as_waiting_timer_mut;
  End => EndProperties, as_end, as_end_mut;
  DefaultErrorHandler => ErrorHandlerProperties, as_error_handler, as_error_handler_mut;
  ActionCall => ActionCallProperties, as_action_call, as_action_call_mut;
  WorkflowCall => WorkflowCallProperties, as_workflow_call, as_workflow_call_mut;
}
