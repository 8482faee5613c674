//! The in-memory record of one canvas item.

use super::{ItemKind, ItemProperties, MethodParameter, ParameterDirection, TargetRef};

/// A workflow variable bound to an item input or output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
  pub name: String,
  pub type_name: String,
}

/// Input and output bindings of an item, in parameter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
  pub inputs: Vec<Binding>,
  pub outputs: Vec<Binding>,
}

impl Bindings {
  pub fn from_parameters(parameters: &[MethodParameter]) -> Self {
    let mut bindings = Bindings::default();
    for p in parameters {
      let binding = Binding {
        name: p.name.clone(),
        type_name: p.type_name.clone(),
      };
      match p.direction {
        ParameterDirection::In => bindings.inputs.push(binding),
        ParameterDirection::Out => bindings.outputs.push(binding),
      }
    }
    bindings
  }

  pub fn is_empty(&self) -> bool {
    self.inputs.is_empty() && self.outputs.is_empty()
  }
}

/// The fields a strategy may change while registering arguments.
///
/// Strategies edit a draft and commit it only when every argument was accepted,
/// so a rejected registration leaves the descriptor as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemDraft {
  pub target: Option<TargetRef>,
  pub properties: ItemProperties,
}

/// One canvas item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
  name: String,
  display_name: String,
  kind: ItemKind,
  target: Option<TargetRef>,
  properties: ItemProperties,
  bindings: Bindings,
  script: String,
}

impl ItemDescriptor {
  /// Creates an empty descriptor. The display name defaults to `name`.
  pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
    let name = name.into();
    Self {
      display_name: name.clone(),
      name,
      kind,
      target: None,
      properties: ItemProperties::for_kind(kind),
      bindings: Bindings::default(),
      script: String::new(),
    }
  }

  pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
    self.display_name = display_name.into();
    self
  }

  pub fn with_target(mut self, target: TargetRef) -> Self {
    self.target = Some(target);
    self
  }

  pub fn with_bindings(mut self, bindings: Bindings) -> Self {
    self.bindings = bindings;
    self
  }

  /// Stores the source emitted for this item.
  pub fn set_script(&mut self, script: impl Into<String>) {
    self.script = script.into();
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  pub fn kind(&self) -> ItemKind {
    self.kind
  }

  pub fn target(&self) -> Option<&TargetRef> {
    self.target.as_ref()
  }

  pub fn properties(&self) -> &ItemProperties {
    &self.properties
  }

  pub fn bindings(&self) -> &Bindings {
    &self.bindings
  }

  pub fn script(&self) -> &str {
    &self.script
  }

  pub(crate) fn draft(&self) -> ItemDraft {
    ItemDraft {
      target: self.target.clone(),
      properties: self.properties.clone(),
    }
  }

  pub(crate) fn commit(&mut self, draft: ItemDraft) {
    debug_assert_eq!(draft.properties.kind(), self.kind);
    self.target = draft.target;
    self.properties = draft.properties;
  }
}
