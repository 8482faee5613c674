//! End item: terminates the workflow normally or by throwing.

use tracing::instrument;

use super::{
  Canvas, CanvasStrategy, WORKFLOW_ITEM_TAG, invalid_value, properties_of, register_with,
  write_position,
};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, EndMode, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, SourceFile,
};
use crate::xml::XmlWriter;

/// Strategy for [ItemKind::End].
#[derive(Debug, Default, Clone, Copy)]
pub struct EndStrategy;

impl CanvasStrategy for EndStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::End
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
      ItemProperties::as_end_mut,
      |_target, props, arg| {
        match arg.name.as_str() {
          "endMode" => {
            props.end_mode = arg
              .value
              .parse::<EndMode>()
              .map_err(|_| invalid_value(ItemKind::End, arg))?;
          }
          "exceptionVariable" => props.exception_variable = Some(arg.value.clone()),
          "businessStatus" => props.business_status = Some(arg.value.clone()),
          other => return Err(CanvasError::unsupported(ItemKind::End, other)),
        }
        Ok(())
      },
    )
  }

  fn emit_source(
    &self,
    _method: &MethodDeclaration,
    _file: &SourceFile,
    _item: &ItemDescriptor,
  ) -> String {
    String::new()
  }

  #[instrument(level = "trace", skip_all, fields(item = item.name(), ordinal = ordinal))]
  fn render_item(
    &self,
    item: &ItemDescriptor,
    ordinal: usize,
    canvas: &Canvas<'_>,
  ) -> CanvasResult<String> {
    let props = properties_of(self.kind(), item, ItemProperties::as_end)?;

    let mut attrs = vec![
      ("name", item.name()),
      ("type", "end"),
      ("end-mode", props.end_mode.code()),
    ];
    if let Some(var) = props.exception_variable.as_deref().filter(|v| !v.is_empty()) {
      attrs.push(("throw-bind-name", var));
    }
    if let Some(status) = props.business_status.as_deref().filter(|v| !v.is_empty()) {
      attrs.push(("business-status", status));
    }

    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    Ok(w.finish())
  }
}
