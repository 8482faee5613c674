//! Workflow call: links another workflow by id, passing bindings through.

use tracing::instrument;

use super::{
  Canvas, CanvasStrategy, WORKFLOW_ITEM_TAG, properties_of, register_checked, write_bindings,
  write_display_name, write_position,
};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, SourceFile,
  TargetRef,
};
use crate::xml::XmlWriter;

const LINKED_ITEM: &str = "linkedItem";

/// Strategy for [ItemKind::WorkflowItem].
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowCallStrategy;

impl WorkflowCallStrategy {
  fn missing_link(&self, item: impl Into<String>) -> CanvasError {
    CanvasError::MissingAttribute {
      kind: self.kind(),
      item: item.into(),
      attribute: LINKED_ITEM.to_string(),
    }
  }
}

impl CanvasStrategy for WorkflowCallStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::WorkflowItem
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
    let name = item.name().to_string();
    register_checked(
      self.kind(),
      item,
      args,
      ItemProperties::as_workflow_call_mut,
      |target, props, arg| {
        match arg.name.as_str() {
          "target" => *target = Some(TargetRef::parse(&arg.value)),
          LINKED_ITEM => {
            let id = arg.value.trim();
            props.linked_workflow_id = (!id.is_empty()).then(|| id.to_string());
          }
          other => return Err(CanvasError::unsupported(ItemKind::WorkflowItem, other)),
        }
        Ok(())
      },
      |props| match props.linked_workflow_id {
        Some(_) => Ok(()),
        None => Err(self.missing_link(name)),
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
    let props = properties_of(self.kind(), item, ItemProperties::as_workflow_call)?;
    let linked = props
      .linked_workflow_id
      .as_deref()
      .ok_or_else(|| self.missing_link(item.name()))?;
    let out_name = canvas.resolve_or_next(item, ordinal)?;

    let attrs = [
      ("name", item.name()),
      ("out-name", out_name),
      ("type", "link"),
      ("linked-workflow-id", linked),
    ];
    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_display_name(w, item);
      write_bindings(w, item.bindings())?;
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    Ok(w.finish())
  }
}
