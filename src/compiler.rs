//! Compile a workflow's annotated methods into canvas items.
//!
//! Two strictly sequential phases:
//!
//! 1. populate: one descriptor per method in declaration order; the kind's
//!    strategy registers the annotation arguments and emits the script;
//! 2. render: with every descriptor frozen, each strategy resolves targets and
//!    renders its item at its ordinal.
//!
//! Any failure aborts the whole workflow; no partial canvas is returned.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{CanvasError, CanvasResult};
use crate::registry::{StrategyRegistry, standard_registry};
use crate::resolver::{RelativeAddressing, TargetResolver};
use crate::strategies::Canvas;
use crate::types::{Bindings, CanvasLayout, ItemDescriptor, ItemKind, WorkflowSource};

/// Settings of a compilation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
  pub layout: CanvasLayout,
  pub addressing: RelativeAddressing,
  /// Item names are `{item_prefix}1`, `{item_prefix}2`, ...
  pub item_prefix: String,
}

impl Default for CompilerConfig {
  fn default() -> Self {
    Self {
      layout: CanvasLayout::default(),
      addressing: RelativeAddressing::default(),
      item_prefix: "item".to_string(),
    }
  }
}

/// One rendered canvas item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledItem {
  pub name: String,
  pub display_name: String,
  #[serde(serialize_with = "serialize_kind")]
  pub kind: ItemKind,
  pub script: String,
  pub xml: String,
}

fn serialize_kind<S: serde::Serializer>(kind: &ItemKind, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(kind.identifier())
}

/// Every item of a workflow, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledCanvas {
  pub workflow: String,
  pub items: Vec<CompiledItem>,
}

impl CompiledCanvas {
  /// The canvas body: all item fragments concatenated in order.
  pub fn canvas_xml(&self) -> String {
    self.items.iter().map(|i| i.xml.as_str()).collect()
  }

  pub fn item(&self, name: &str) -> Option<&CompiledItem> {
    self.items.iter().find(|i| i.name == name)
  }
}

/// Drives the strategies over one workflow at a time.
#[derive(Debug, Clone)]
pub struct WorkflowCompiler<'r> {
  registry: &'r StrategyRegistry,
  config: CompilerConfig,
}

impl WorkflowCompiler<'static> {
  /// Compiler over the built-in strategies.
  pub fn new(config: CompilerConfig) -> Self {
    Self::with_registry(standard_registry(), config)
  }
}

impl<'r> WorkflowCompiler<'r> {
  pub fn with_registry(registry: &'r StrategyRegistry, config: CompilerConfig) -> Self {
    Self { registry, config }
  }

  pub fn config(&self) -> &CompilerConfig {
    &self.config
  }

  /// Populates then renders every method of `source`.
  #[instrument(level = "trace", skip_all, fields(workflow = %source.name))]
  pub fn compile(&self, source: &WorkflowSource) -> CanvasResult<CompiledCanvas> {
    info!(
      workflow = %source.name,
      methods = source.methods.len(),
      "compiling workflow canvas"
    );
    let items = self.populate(source)?;
    let rendered = self.render(&items)?;
    info!(
      workflow = %source.name,
      item_count = rendered.len(),
      "canvas compilation complete"
    );
    Ok(CompiledCanvas {
      workflow: source.name.clone(),
      items: rendered,
    })
  }

  /// Phase 1: one populated descriptor per method, scripts included.
  #[instrument(level = "trace", skip_all)]
  pub fn populate(&self, source: &WorkflowSource) -> CanvasResult<Vec<ItemDescriptor>> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(source.methods.len());
    for (ordinal, annotated) in source.methods.iter().enumerate() {
      let method = &annotated.method;
      if !seen.insert(method.name.as_str()) {
        return Err(CanvasError::DuplicateItem(method.name.clone()));
      }
      let strategy = self.registry.lookup(&annotated.kind)?;
      let name = format!("{}{}", self.config.item_prefix, ordinal + 1);
      let mut item = ItemDescriptor::new(name, strategy.kind())
        .with_display_name(method.name.clone())
        .with_bindings(Bindings::from_parameters(&method.parameters));
      strategy.register_arguments(&mut item, &annotated.arguments)?;
      let script = strategy.emit_source(method, &source.file, &item);
      item.set_script(script);
      debug!(item = item.name(), method = %method.name, kind = %item.kind(), "populated item");
      items.push(item);
    }
    Ok(items)
  }

  /// Phase 2: renders `items` against each other. `items` must be fully populated.
  #[instrument(level = "trace", skip_all, fields(item_count = items.len()))]
  pub fn render(&self, items: &[ItemDescriptor]) -> CanvasResult<Vec<CompiledItem>> {
    let canvas = Canvas::new(
      items,
      self.config.layout,
      TargetResolver::new(self.config.addressing),
    );
    items
      .iter()
      .enumerate()
      .map(|(ordinal, item)| {
        let strategy = self.registry.get(item.kind())?;
        let xml = strategy.render_item(item, ordinal, &canvas)?;
        debug!(item = item.name(), ordinal, "rendered item");
        Ok(CompiledItem {
          name: item.name().to_string(),
          display_name: item.display_name().to_string(),
          kind: item.kind(),
          script: item.script().to_string(),
          xml,
        })
      })
      .collect()
  }
}

/// Compiles `source` with the built-in strategies.
pub fn compile_workflow(
  source: &WorkflowSource,
  config: &CompilerConfig,
) -> CanvasResult<CompiledCanvas> {
  WorkflowCompiler::new(config.clone()).compile(source)
}
