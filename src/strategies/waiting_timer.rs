//! Waiting timer: sleeps until the date bound to its only input.

use tracing::instrument;

use super::{
  BindRow, Canvas, CanvasStrategy, WORKFLOW_ITEM_TAG, properties_of, register_with,
  write_binding_group, write_display_name, write_position,
};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, SourceFile,
  TargetRef,
};
use crate::xml::XmlWriter;

const TIMER_DATE: &str = "timer.date";

/// Strategy for [ItemKind::WaitingTimer].
#[derive(Debug, Default, Clone, Copy)]
pub struct WaitingTimerStrategy;

impl CanvasStrategy for WaitingTimerStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::WaitingTimer
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
      ItemProperties::as_waiting_timer_mut,
      |target, _props, arg| match arg.name.as_str() {
        "target" => {
          *target = Some(TargetRef::parse(&arg.value));
          Ok(())
        }
        other => Err(CanvasError::unsupported(ItemKind::WaitingTimer, other)),
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
    properties_of(self.kind(), item, ItemProperties::as_waiting_timer)?;
    let [date] = item.bindings().inputs.as_slice() else {
      return Err(CanvasError::MissingBinding {
        kind: self.kind(),
        item: item.name().to_string(),
        binding: TIMER_DATE.to_string(),
      });
    };
    let out_name = canvas.resolve_or_next(item, ordinal)?;

    let attrs = [
      ("name", item.name()),
      ("out-name", out_name),
      ("type", "waiting-timer"),
    ];
    let rows = [BindRow {
      name: TIMER_DATE,
      type_name: "Date",
      export_name: &date.name,
    }];
    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_display_name(w, item);
      write_binding_group(w, "in-binding", &rows)?;
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    Ok(w.finish())
  }
}
