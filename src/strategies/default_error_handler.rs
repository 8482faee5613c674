//! Default error handler: the workflow-wide handler paired with an end item.
//!
//! The handler's `name` in the rendered canvas is the name of the item it
//! targets, not its own:
//!
//! ```xml
//! <error-handler name="item1" throw-bind-name="errorMessage">
//!   <position x="200.0" y="110.0"/>
//! </error-handler>
//! <workflow-item name="item1" type="end" end-mode="1" throw-bind-name="errorMessage">
//!   <position x="180.0" y="110.0"/>
//! </workflow-item>
//! ```

use tracing::{debug, instrument, warn};

use super::{Canvas, CanvasStrategy, properties_of, register_with, write_position};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, SourceFile,
  TargetRef,
};
use crate::xml::XmlWriter;

/// Strategy for [ItemKind::DefaultErrorHandler].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorHandlerStrategy;

impl CanvasStrategy for DefaultErrorHandlerStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::DefaultErrorHandler
  }

  fn canvas_tag(&self) -> &'static str {
    "error-handler"
  }

  /// Only `target` and `exceptionVariable` are supported.
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
      ItemProperties::as_error_handler_mut,
      |target, props, arg| {
        match arg.name.as_str() {
          "target" => *target = Some(TargetRef::parse(&arg.value)),
          "exceptionVariable" => props.exception_variable = Some(arg.value.clone()),
          other => return Err(CanvasError::unsupported(ItemKind::DefaultErrorHandler, other)),
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
    let props = properties_of(self.kind(), item, ItemProperties::as_error_handler)?;
    let target_ref = item
      .target()
      .ok_or_else(|| CanvasError::missing_target(self.kind(), item.name()))?;
    let target = canvas.resolve(item, target_ref, ordinal)?;
    // A handler cannot pair with itself.
    if target == item.name() {
      return Err(CanvasError::target_not_found(self.kind(), item.name(), target_ref));
    }
    if let Some(paired) = canvas.find(target) {
      if paired.kind() != ItemKind::End {
        warn!(
          item = item.name(),
          target,
          target_kind = %paired.kind(),
          "error handler does not target an end item"
        );
      }
    }

    // The handler carries the target's name so the engine pairs the two.
    let mut attrs = vec![("name", target)];
    if let Some(var) = props.exception_variable.as_deref().filter(|v| !v.is_empty()) {
      attrs.push(("throw-bind-name", var));
    }

    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    debug!(item = item.name(), target, "rendered error handler");
    Ok(w.finish())
  }
}
