//! Action call: a task whose script invokes a library action.
//!
//! The script is generated rather than taken from the method body:
//!
//! ```text
//! actionResult = System.getModule("com.acme.net").getIp(vm, nic);
//! ```

use tracing::instrument;

use super::{
  BindRow, Canvas, CanvasStrategy, WORKFLOW_ITEM_TAG, bind_rows, invalid_value, properties_of,
  register_checked, write_binding_group, write_display_name, write_position, write_script,
};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{
  AnnotationArg, ItemDescriptor, ItemKind, ItemProperties, MethodDeclaration, ScriptModule,
  SourceFile, TargetRef,
};
use crate::xml::XmlWriter;

const ACTION_RESULT: &str = "actionResult";
const SCRIPT_MODULE: &str = "scriptModule";

/// Strategy for [ItemKind::ActionItem].
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionCallStrategy;

impl ActionCallStrategy {
  fn missing_module(&self, item: impl Into<String>) -> CanvasError {
    CanvasError::MissingAttribute {
      kind: self.kind(),
      item: item.into(),
      attribute: SCRIPT_MODULE.to_string(),
    }
  }
}

impl CanvasStrategy for ActionCallStrategy {
  fn kind(&self) -> ItemKind {
    ItemKind::ActionItem
  }

  fn canvas_tag(&self) -> &'static str {
    WORKFLOW_ITEM_TAG
  }

  /// `scriptModule` is required and must read `module/action`.
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
      ItemProperties::as_action_call_mut,
      |target, props, arg| {
        match arg.name.as_str() {
          "target" => *target = Some(TargetRef::parse(&arg.value)),
          SCRIPT_MODULE => {
            let module = ScriptModule::parse(&arg.value)
              .ok_or_else(|| invalid_value(ItemKind::ActionItem, arg))?;
            props.script_module = Some(module);
          }
          other => return Err(CanvasError::unsupported(ItemKind::ActionItem, other)),
        }
        Ok(())
      },
      |props| match props.script_module {
        Some(_) => Ok(()),
        None => Err(self.missing_module(name)),
      },
    )
  }

  fn emit_source(
    &self,
    _method: &MethodDeclaration,
    _file: &SourceFile,
    item: &ItemDescriptor,
  ) -> String {
    let Some(module) = item
      .properties()
      .as_action_call()
      .and_then(|p| p.script_module.as_ref())
    else {
      return String::new();
    };
    let args = item
      .bindings()
      .inputs
      .iter()
      .map(|b| b.name.as_str())
      .collect::<Vec<_>>()
      .join(", ");
    let call = format!(
      "System.getModule(\"{}\").{}({});",
      module.module, module.action, args
    );
    format!("{} = {}", ACTION_RESULT, call)
  }

  #[instrument(level = "trace", skip_all, fields(item = item.name(), ordinal = ordinal))]
  fn render_item(
    &self,
    item: &ItemDescriptor,
    ordinal: usize,
    canvas: &Canvas<'_>,
  ) -> CanvasResult<String> {
    let props = properties_of(self.kind(), item, ItemProperties::as_action_call)?;
    let module = props
      .script_module
      .as_ref()
      .ok_or_else(|| self.missing_module(item.name()))?
      .to_string();
    let out_name = canvas.resolve_or_next(item, ordinal)?;

    let attrs = [
      ("name", item.name()),
      ("out-name", out_name),
      ("type", "task"),
      ("script-module", module.as_str()),
    ];
    let bindings = item.bindings();
    let inputs = bind_rows(&bindings.inputs);
    let outputs: Vec<BindRow<'_>> = bindings
      .outputs
      .first()
      .map(|b| BindRow {
        name: ACTION_RESULT,
        type_name: &b.type_name,
        export_name: &b.name,
      })
      .into_iter()
      .collect();

    let mut w = XmlWriter::new();
    w.element(self.canvas_tag(), &attrs, |w| {
      write_display_name(w, item);
      write_script(w, item.script());
      write_binding_group(w, "in-binding", &inputs)?;
      write_binding_group(w, "out-binding", &outputs)?;
      write_position(w, canvas.position(ordinal));
      Ok(())
    })?;
    Ok(w.finish())
  }
}
