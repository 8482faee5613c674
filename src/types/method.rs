//! Already-parsed source input: annotated methods and their containing file.

use serde::{Deserialize, Serialize};

/// One `(name, value)` pair extracted from a method annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationArg {
  pub name: String,
  pub value: String,
}

impl AnnotationArg {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

/// Whether a parameter feeds the item or receives its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterDirection {
  #[default]
  In,
  Out,
}

fn default_parameter_type() -> String {
  "Any".to_string()
}

/// A method parameter bound to a workflow variable of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameter {
  pub name: String,
  #[serde(rename = "type", default = "default_parameter_type")]
  pub type_name: String,
  #[serde(default)]
  pub direction: ParameterDirection,
}

impl MethodParameter {
  pub fn input(name: impl Into<String>, type_name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_name: type_name.into(),
      direction: ParameterDirection::In,
    }
  }

  pub fn output(name: impl Into<String>, type_name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_name: type_name.into(),
      direction: ParameterDirection::Out,
    }
  }
}

/// Handle on a method declaration as produced by the parsing layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
  pub name: String,
  #[serde(default)]
  pub parameters: Vec<MethodParameter>,
  /// Method body, already printed as procedural script text.
  #[serde(default)]
  pub body: String,
}

/// File the methods were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
  pub path: String,
}

/// A method together with its classified annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedMethod {
  /// Item kind identifier, e.g. `Item` or `DefaultErrorHandler`.
  pub kind: String,
  #[serde(default)]
  pub arguments: Vec<AnnotationArg>,
  #[serde(flatten)]
  pub method: MethodDeclaration,
}

/// All annotated methods of one workflow class, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSource {
  pub name: String,
  #[serde(default)]
  pub file: SourceFile,
  #[serde(default)]
  pub methods: Vec<AnnotatedMethod>,
}
