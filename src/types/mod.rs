//! Data model of the canvas compiler: item kinds, descriptors, targets, layout and
//! the already-parsed method input.

mod canvas_layout;
mod item_descriptor;
mod item_kind;
mod item_properties;
mod method;
mod target_ref;

pub use canvas_layout::{CanvasLayout, Position};
pub(crate) use item_descriptor::ItemDraft;
pub use item_descriptor::{Binding, Bindings, ItemDescriptor};
pub use item_kind::ItemKind;
pub use item_properties::{
  ActionCallProperties, DecisionProperties, EndMode, EndProperties, ErrorHandlerProperties,
  ItemProperties, ScriptModule, TaskProperties, WaitingTimerProperties, WorkflowCallProperties,
};
pub use method::{
  AnnotatedMethod, AnnotationArg, MethodDeclaration, MethodParameter, ParameterDirection,
  SourceFile, WorkflowSource,
};
pub use target_ref::TargetRef;
