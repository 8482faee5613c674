//! # workflow-canvas
//!
//! Compiles annotated workflow methods into the XML items of a workflow canvas.
//!
//! ## Architecture
//!
//! Every item kind is handled by a [strategies::CanvasStrategy] looked up in a
//! [registry::StrategyRegistry]. The [compiler::WorkflowCompiler] drives two
//! phases over a workflow:
//!
//! - populate: each strategy maps its annotation arguments onto an
//!   [types::ItemDescriptor] and emits the item's script;
//! - render: with all descriptors known, each strategy resolves its targets
//!   through [resolver::TargetResolver] and renders its XML fragment.
//!
//! The default error handler is the one item rendered under its target's name
//! rather than its own, pairing the workflow's failure path with that item.

pub mod compiler;
#[cfg(test)]
mod compiler_test;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod strategies;
pub mod types;
pub mod workflow_io;
pub mod xml;

pub use compiler::{CompiledCanvas, CompiledItem, CompilerConfig, WorkflowCompiler, compile_workflow};
pub use error::{CanvasError, CanvasResult};
pub use registry::{StrategyRegistry, standard_registry};
pub use resolver::{RelativeAddressing, TargetResolver};
pub use strategies::{Canvas, CanvasStrategy};
pub use types::{ItemDescriptor, ItemKind, TargetRef, WorkflowSource};
