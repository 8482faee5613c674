//! Canvas strategies: one implementation of [CanvasStrategy] per item kind.
//!
//! Each strategy owns the annotation arguments, the emitted source and the XML
//! rendering of its kind. The compiler only ever talks to the trait.

mod action_call;
#[cfg(test)]
mod action_call_test;
mod decision;
mod default_error_handler;
mod end;
mod scriptable_task;
mod waiting_timer;
mod workflow_call;
#[cfg(test)]
mod workflow_call_test;

use std::collections::HashSet;

use crate::error::{CanvasError, CanvasResult};
use crate::resolver::TargetResolver;
use crate::types::{
  AnnotationArg, Binding, Bindings, CanvasLayout, ItemDescriptor, ItemKind, ItemProperties,
  MethodDeclaration, Position, SourceFile, TargetRef,
};
use crate::xml::XmlWriter;

pub use action_call::ActionCallStrategy;
pub use decision::DecisionStrategy;
pub use default_error_handler::DefaultErrorHandlerStrategy;
pub use end::EndStrategy;
pub use scriptable_task::ScriptableTaskStrategy;
pub use waiting_timer::WaitingTimerStrategy;
pub use workflow_call::WorkflowCallStrategy;

/// Tag shared by every kind except the error handler.
pub(crate) const WORKFLOW_ITEM_TAG: &str = "workflow-item";

/// Compilation contract of one canvas item kind.
pub trait CanvasStrategy: Send + Sync {
  /// Kind handled by this strategy; the registry key.
  fn kind(&self) -> ItemKind;

  /// XML element name of the rendered item.
  fn canvas_tag(&self) -> &'static str;

  /// Maps annotation arguments onto `item`.
  ///
  /// Fails with [CanvasError::UnsupportedAttribute] on any name this kind does
  /// not know. On failure `item` is left unchanged.
  fn register_arguments(
    &self,
    item: &mut ItemDescriptor,
    args: &[AnnotationArg],
  ) -> CanvasResult<()>;

  /// Script body of the item. Kinds without one return an empty string.
  fn emit_source(
    &self,
    method: &MethodDeclaration,
    file: &SourceFile,
    item: &ItemDescriptor,
  ) -> String;

  /// XML fragment of `item` placed at `ordinal` on `canvas`.
  fn render_item(
    &self,
    item: &ItemDescriptor,
    ordinal: usize,
    canvas: &Canvas<'_>,
  ) -> CanvasResult<String>;
}

/// Read-only view of one rendering pass: every descriptor of the batch plus
/// the layout and target resolution rules.
#[derive(Debug, Clone, Copy)]
pub struct Canvas<'a> {
  items: &'a [ItemDescriptor],
  layout: CanvasLayout,
  resolver: TargetResolver,
}

impl<'a> Canvas<'a> {
  pub fn new(items: &'a [ItemDescriptor], layout: CanvasLayout, resolver: TargetResolver) -> Self {
    Self {
      items,
      layout,
      resolver,
    }
  }

  /// Canvas with the default layout and forward addressing.
  pub fn with_defaults(items: &'a [ItemDescriptor]) -> Self {
    Self::new(items, CanvasLayout::default(), TargetResolver::default())
  }

  pub fn items(&self) -> &'a [ItemDescriptor] {
    self.items
  }

  pub fn position(&self, ordinal: usize) -> Position {
    self.layout.position(ordinal)
  }

  pub fn find(&self, name: &str) -> Option<&'a ItemDescriptor> {
    self.items.iter().find(|i| i.name() == name)
  }

  pub fn resolve(
    &self,
    item: &ItemDescriptor,
    target: &TargetRef,
    ordinal: usize,
  ) -> CanvasResult<&'a str> {
    self.resolver.resolve(item, target, ordinal, self.items)
  }

  /// Resolves a target the kind cannot do without.
  pub fn resolve_required(
    &self,
    item: &ItemDescriptor,
    target: Option<&TargetRef>,
    ordinal: usize,
  ) -> CanvasResult<&'a str> {
    let target = target.ok_or_else(|| CanvasError::missing_target(item.kind(), item.name()))?;
    self.resolve(item, target, ordinal)
  }

  /// Resolves the item's target, falling through to the next item when absent.
  pub fn resolve_or_next(&self, item: &ItemDescriptor, ordinal: usize) -> CanvasResult<&'a str> {
    match item.target() {
      Some(target) => self.resolve(item, target, ordinal),
      None => self.resolve(item, &TargetRef::Relative(1), ordinal),
    }
  }
}

pub(crate) fn expect_kind(expected: ItemKind, item: &ItemDescriptor) -> CanvasResult<()> {
  if item.kind() == expected {
    Ok(())
  } else {
    Err(CanvasError::KindMismatch {
      expected,
      actual: item.kind(),
    })
  }
}

/// Rejects arguments named twice; otherwise the outcome would depend on their order.
pub(crate) fn check_unique(kind: ItemKind, args: &[AnnotationArg]) -> CanvasResult<()> {
  let mut seen = HashSet::new();
  for arg in args {
    if !seen.insert(arg.name.as_str()) {
      return Err(CanvasError::DuplicateAttribute {
        kind,
        attribute: arg.name.clone(),
      });
    }
  }
  Ok(())
}

pub(crate) fn invalid_value(kind: ItemKind, arg: &AnnotationArg) -> CanvasError {
  CanvasError::InvalidAttributeValue {
    kind,
    attribute: arg.name.clone(),
    value: arg.value.clone(),
  }
}

/// Shared registration loop: applies every argument to a draft of `item` and
/// commits only if all of them were accepted.
pub(crate) fn register_with<P, F>(
  kind: ItemKind,
  item: &mut ItemDescriptor,
  args: &[AnnotationArg],
  project: fn(&mut ItemProperties) -> Option<&mut P>,
  apply: F,
) -> CanvasResult<()>
where
  F: FnMut(&mut Option<TargetRef>, &mut P, &AnnotationArg) -> CanvasResult<()>,
{
  register_checked(kind, item, args, project, apply, |_| Ok(()))
}

/// [register_with], then `check` on the drafted properties before committing.
///
/// Failures surface in a fixed order: unknown names and bad values, repeated
/// names, then whatever `check` requires of the result.
pub(crate) fn register_checked<P, F, C>(
  kind: ItemKind,
  item: &mut ItemDescriptor,
  args: &[AnnotationArg],
  project: fn(&mut ItemProperties) -> Option<&mut P>,
  mut apply: F,
  check: C,
) -> CanvasResult<()>
where
  F: FnMut(&mut Option<TargetRef>, &mut P, &AnnotationArg) -> CanvasResult<()>,
  C: FnOnce(&P) -> CanvasResult<()>,
{
  expect_kind(kind, item)?;
  let mut draft = item.draft();
  {
    let actual = draft.properties.kind();
    let props = project(&mut draft.properties)
      .ok_or(CanvasError::KindMismatch { expected: kind, actual })?;
    for arg in args {
      apply(&mut draft.target, props, arg)?;
    }
    check_unique(kind, args)?;
    check(props)?;
  }
  item.commit(draft);
  Ok(())
}

/// Reads the properties of `item`, checking it belongs to `kind`.
pub(crate) fn properties_of<'a, P>(
  kind: ItemKind,
  item: &'a ItemDescriptor,
  project: fn(&ItemProperties) -> Option<&P>,
) -> CanvasResult<&'a P> {
  expect_kind(kind, item)?;
  project(item.properties()).ok_or(CanvasError::KindMismatch {
    expected: kind,
    actual: item.properties().kind(),
  })
}

pub(crate) fn write_position(w: &mut XmlWriter, position: Position) {
  let (x, y) = (position.x_attr(), position.y_attr());
  w.empty("position", &[("x", x.as_str()), ("y", y.as_str())]);
}

pub(crate) fn write_display_name(w: &mut XmlWriter, item: &ItemDescriptor) {
  w.cdata_element("display-name", &[], item.display_name());
}

pub(crate) fn write_script(w: &mut XmlWriter, script: &str) {
  w.cdata_element("script", &[("encoded", "false")], script);
}

/// One `<bind/>` row.
pub(crate) struct BindRow<'a> {
  pub name: &'a str,
  pub type_name: &'a str,
  pub export_name: &'a str,
}

/// Writes `<tag>` with one `<bind/>` per row. Nothing is written for no rows.
pub(crate) fn write_binding_group(
  w: &mut XmlWriter,
  tag: &str,
  rows: &[BindRow<'_>],
) -> CanvasResult<()> {
  if rows.is_empty() {
    return Ok(());
  }
  w.element(tag, &[], |w| {
    for row in rows {
      w.empty(
        "bind",
        &[
          ("name", row.name),
          ("type", row.type_name),
          ("export-name", row.export_name),
        ],
      );
    }
    Ok(())
  })
}

pub(crate) fn bind_rows(list: &[Binding]) -> Vec<BindRow<'_>> {
  list
    .iter()
    .map(|b| BindRow {
      name: &b.name,
      type_name: &b.type_name,
      export_name: &b.name,
    })
    .collect()
}

/// Writes in/out bindings exporting each parameter to the variable of the same name.
pub(crate) fn write_bindings(w: &mut XmlWriter, bindings: &Bindings) -> CanvasResult<()> {
  write_binding_group(w, "in-binding", &bind_rows(&bindings.inputs))?;
  write_binding_group(w, "out-binding", &bind_rows(&bindings.outputs))
}

/// Method body as script text: surrounding blank lines dropped, common
/// indentation removed, trailing whitespace trimmed.
pub(crate) fn method_script(method: &MethodDeclaration) -> String {
  let lines: Vec<&str> = method.body.lines().map(str::trim_end).collect();
  let first = lines.iter().position(|l| !l.is_empty());
  let last = lines.iter().rposition(|l| !l.is_empty());
  let (Some(first), Some(last)) = (first, last) else {
    return String::new();
  };
  let lines = &lines[first..=last];
  let indent = lines
    .iter()
    .filter(|l| !l.is_empty())
    .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
    .min()
    .unwrap_or(0);
  lines
    .iter()
    .map(|l| if l.is_empty() { "" } else { &l[indent..] })
    .collect::<Vec<_>>()
    .join("\n")
}
