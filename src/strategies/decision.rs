//! Decision: a custom condition whose script returns a boolean. `target` is
//! followed when it returns true, `else` when it returns false.

use tracing::instrument;

use super::{
  Canvas, CanvasStrategy, WORKFLOW_ITEM_TAG, method_script, properties_of, register_with,
  write_bindings, write_display_name, write_position, write_script,
};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, SourceFile,
  TargetRef,
};
use crate::xml::XmlWriter;

/// Strategy for [ItemKind::Decision].
#[derive(Debug, Default, Clone, Copy)]
pub struct DecisionStrategy;

impl CanvasStrategy for DecisionStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::Decision
  }

  fn canvas_tag(&self) -> &'static str {
    WORKFLOW_ITEM_TAG
  }

  #[instrument(level = "trace", skip_all, fields(item = item.name()))]
  fn register_arguments(
    &self,
    item: &mut ItemDescriptor,
    args: &[AnnotationArg],
  ) -> CanvasResult<()> {
    register_with(
      self.kind(),
      item,
      args,
      ItemProperties::as_decision_mut,
      |target, props, arg| {
        match arg.name.as_str() {
          "target" => *target = Some(TargetRef::parse(&arg.value)),
          "else" => props.else_target = Some(TargetRef::parse(&arg.value)),
          other => return Err(CanvasError::unsupported(ItemKind::Decision, other)),
        }
        Ok(())
      },
    )
  }

  fn emit_source(
    &self,
    method: &MethodDeclaration,
    _file: &SourceFile,
    _item: &ItemDescriptor,
  ) -> String {
    method_script(method)
  }

  #[instrument(level = "trace", skip_all, fields(item = item.name(), ordinal = ordinal))]
  fn render_item(
    &self,
    item: &ItemDescriptor,
    ordinal: usize,
    canvas: &Canvas<'_>,
  ) -> CanvasResult<String> {
    let props = properties_of(self.kind(), item, ItemProperties::as_decision)?;
    let out_name = canvas.resolve_or_next(item, ordinal)?;
    let alt_out_name = canvas.resolve_required(item, props.else_target.as_ref(), ordinal)?;

    let attrs = [
      ("name", item.name()),
      ("out-name", out_name),
      ("alt-out-name", alt_out_name),
      ("type", "custom-condition"),
      ("comparator", "0"),
    ];
    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_display_name(w, item);
      write_script(w, item.script());
      write_bindings(w, item.bindings())?;
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    Ok(w.finish())
  }
}
