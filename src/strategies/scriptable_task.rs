//! Scriptable task: runs the method body as the item's script.

use tracing::{instrument, trace};

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

/// Strategy for [ItemKind::Item].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptableTaskStrategy;

impl CanvasStrategy for ScriptableTaskStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::Item
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
      ItemProperties::as_task_mut,
      |target, _props, arg| match arg.name.as_str() {
        "target" => {
          *target = Some(TargetRef::parse(&arg.value));
          Ok(())
        }
        other => Err(CanvasError::unsupported(ItemKind::Item, other)),
      },
    )
  }

  fn emit_source(
    &self,
    method: &MethodDeclaration,
    file: &SourceFile,
    _item: &ItemDescriptor,
  ) -> String {
    trace!(method = %method.name, file = %file.path, "emitting task script");
    method_script(method)
  }

  #[instrument(level = "trace", skip_all, fields(item = item.name(), ordinal = ordinal))]
  fn render_item(
    &self,
    item: &ItemDescriptor,
    ordinal: usize,
    canvas: &Canvas<'_>,
  ) -> CanvasResult<String> {
    properties_of(self.kind(), item, ItemProperties::as_task)?;
    let out_name = canvas.resolve_or_next(item, ordinal)?;

    let attrs = [
      ("name", item.name()),
      ("out-name", out_name),
      ("type", "task"),
      ("launched-from-workflow", "false"),
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
