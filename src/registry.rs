//! Kind → strategy lookup.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::error::{CanvasError, CanvasResult};
use crate::strategies::{
  ActionCallStrategy, CanvasStrategy, DecisionStrategy, DefaultErrorHandlerStrategy, EndStrategy,
  ScriptableTaskStrategy, WaitingTimerStrategy, WorkflowCallStrategy,
};
use crate::types::ItemKind;

static STANDARD: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::standard);

/// Process-wide registry holding every built-in strategy. Immutable.
pub fn standard_registry() -> &'static StrategyRegistry {
  &STANDARD
}

/// Built-in strategy for `kind`. Adding a kind without a strategy fails to compile here.
pub fn builtin_strategy(kind: ItemKind) -> Box<dyn CanvasStrategy> {
  match kind {
    ItemKind::Item => Box::new(ScriptableTaskStrategy),
    ItemKind::Decision => Box::new(DecisionStrategy),
    ItemKind::WaitingTimer => Box::new(WaitingTimerStrategy),
    ItemKind::End => Box::new(EndStrategy),
    ItemKind::DefaultErrorHandler => Box::new(DefaultErrorHandlerStrategy),
    ItemKind::ActionItem => Box::new(ActionCallStrategy),
    ItemKind::WorkflowItem => Box::new(WorkflowCallStrategy),
  }
}

/// Maps item kinds to the strategy compiling them.
#[derive(Default)]
pub struct StrategyRegistry {
  strategies: HashMap<ItemKind, Box<dyn CanvasStrategy>>,
}

impl StrategyRegistry {
  /// Registry with no strategies.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Registry with the built-in strategy of every kind.
  pub fn standard() -> Self {
    let mut registry = Self::empty();
    for kind in ItemKind::ALL {
      registry.register(builtin_strategy(kind));
    }
    registry
  }

  /// Registers `strategy` under its own kind, returning the one it replaces.
  pub fn register(
    &mut self,
    strategy: Box<dyn CanvasStrategy>,
  ) -> Option<Box<dyn CanvasStrategy>> {
    self.strategies.insert(strategy.kind(), strategy)
  }

  pub fn get(&self, kind: ItemKind) -> CanvasResult<&dyn CanvasStrategy> {
    self
      .strategies
      .get(&kind)
      .map(|s| s.as_ref())
      .ok_or_else(|| CanvasError::UnknownKind(kind.to_string()))
  }

  /// Parses a kind identifier and looks up its strategy.
  pub fn lookup(&self, identifier: &str) -> CanvasResult<&dyn CanvasStrategy> {
    self.get(identifier.parse()?)
  }

  pub fn kinds(&self) -> Vec<ItemKind> {
    let mut kinds: Vec<ItemKind> = self.strategies.keys().copied().collect();
    kinds.sort();
    kinds
  }

  pub fn len(&self) -> usize {
    self.strategies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strategies.is_empty()
  }
}

impl fmt::Debug for StrategyRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StrategyRegistry")
      .field("kinds", &self.kinds())
      .finish()
  }
}
