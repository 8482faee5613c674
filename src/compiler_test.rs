//! Tests for the two-phase workflow compiler.

use crate::compiler::{CompilerConfig, WorkflowCompiler, compile_workflow};
use crate::error::CanvasError;
use crate::registry::StrategyRegistry;
use crate::resolver::RelativeAddressing;
use crate::strategies::EndStrategy;
use crate::types::{
  AnnotatedMethod, AnnotationArg, ItemKind, MethodDeclaration, MethodParameter, WorkflowSource,
};

fn method(kind: &str, name: &str, args: &[(&str, &str)]) -> AnnotatedMethod {
  AnnotatedMethod {
    kind: kind.to_string(),
    arguments: args.iter().map(|(n, v)| AnnotationArg::new(*n, *v)).collect(),
    method: MethodDeclaration {
      name: name.to_string(),
      parameters: vec![],
      body: String::new(),
    },
  }
}

fn workflow(methods: Vec<AnnotatedMethod>) -> WorkflowSource {
  WorkflowSource {
    name: "Provision".into(),
    methods,
    ..Default::default()
  }
}

#[test]
fn compiles_items_in_declaration_order() {
  let mut prepare = method("Item", "prepare", &[]);
  prepare.method.body = "  System.log('prep');".into();
  prepare.method.parameters = vec![MethodParameter::input("vm", "string")];
  let source = workflow(vec![
    prepare,
    method("End", "finish", &[]),
    method("DefaultErrorHandler", "onError", &[("target", "finish")]),
  ]);

  let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
  assert_eq!(canvas.workflow, "Provision");
  let names: Vec<_> = canvas.items.iter().map(|i| i.name.as_str()).collect();
  assert_eq!(names, ["item1", "item2", "item3"]);
  let kinds: Vec<_> = canvas.items.iter().map(|i| i.kind).collect();
  assert_eq!(kinds, [ItemKind::Item, ItemKind::End, ItemKind::DefaultErrorHandler]);

  let prepare = canvas.item("item1").unwrap();
  assert_eq!(prepare.display_name, "prepare");
  assert_eq!(prepare.script, "System.log('prep');");
  assert!(prepare.xml.contains("out-name=\"item2\""));
  assert!(prepare.xml.contains("<bind name=\"vm\" type=\"string\" export-name=\"vm\"/>"));

  let handler = canvas.item("item3").unwrap();
  assert!(handler.xml.starts_with("<error-handler name=\"item2\">"));
  assert!(handler.xml.contains("<position x=\"220.0\" y=\"110.0\"/>"));
}

#[test]
fn forward_reference_resolves() {
  let source = workflow(vec![
    method("Decision", "check", &[("target", "ok"), ("else", "fail")]),
    method("Item", "ok", &[("target", "done")]),
    method("End", "fail", &[("endMode", "error")]),
    method("End", "done", &[]),
  ]);
  let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
  let check = &canvas.items[0].xml;
  assert!(check.contains("out-name=\"item2\""));
  assert!(check.contains("alt-out-name=\"item3\""));
  assert!(canvas.items[1].xml.contains("out-name=\"item4\""));
}

#[test]
fn kinds_accept_aliases() {
  let source = workflow(vec![
    method("scriptable-task", "a", &[]),
    method("end", "b", &[]),
  ]);
  let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
  assert_eq!(canvas.items[0].kind, ItemKind::Item);
  assert_eq!(canvas.items[1].kind, ItemKind::End);
}

#[test]
fn any_failure_aborts_the_workflow() {
  let source = workflow(vec![
    method("Item", "a", &[]),
    method("End", "b", &[]),
    method("DefaultErrorHandler", "onError", &[("target", "missing")]),
  ]);
  let err = compile_workflow(&source, &CompilerConfig::default()).unwrap_err();
  assert_eq!(err, CanvasError::target_not_found(ItemKind::DefaultErrorHandler, "item3", "missing"));
}

#[test]
fn registration_failure_names_the_attribute() {
  let source = workflow(vec![method("End", "b", &[("color", "red")])]);
  let err = compile_workflow(&source, &CompilerConfig::default()).unwrap_err();
  assert_eq!(err.to_string(), "item attribute 'color' is not supported for End item");
}

#[test]
fn duplicate_method_name() {
  let source = workflow(vec![method("End", "b", &[]), method("End", "b", &[])]);
  assert_eq!(
    compile_workflow(&source, &CompilerConfig::default()).unwrap_err(),
    CanvasError::DuplicateItem("b".to_string())
  );
}

#[test]
fn unknown_kind() {
  let source = workflow(vec![method("Polling", "p", &[])]);
  let err = compile_workflow(&source, &CompilerConfig::default()).unwrap_err();
  assert_eq!(err, CanvasError::UnknownKind("Polling".to_string()));
  assert!(err.is_contract_violation());
}

#[test]
fn registry_without_kind_rejects_it() {
  let mut registry = StrategyRegistry::empty();
  registry.register(Box::new(EndStrategy));
  let compiler = WorkflowCompiler::with_registry(&registry, CompilerConfig::default());
  let err = compiler
    .compile(&workflow(vec![method("End", "e", &[]), method("Item", "i", &[])]))
    .unwrap_err();
  assert_eq!(err, CanvasError::UnknownKind("Item".to_string()));
}

#[test]
fn backward_addressing_flips_relative_targets() {
  let config = CompilerConfig {
    addressing: RelativeAddressing::Backward,
    ..Default::default()
  };
  let source = workflow(vec![
    method("End", "done", &[]),
    method("Item", "work", &[("target", "next")]),
  ]);
  let canvas = compile_workflow(&source, &config).unwrap();
  assert!(canvas.items[1].xml.contains("out-name=\"item1\""));
}

#[test]
fn custom_prefix_and_layout() {
  let mut config = CompilerConfig {
    item_prefix: "node".into(),
    ..Default::default()
  };
  config.layout.offset = 50.0;
  let source = workflow(vec![method("End", "a", &[]), method("End", "b", &[])]);
  let canvas = compile_workflow(&source, &config).unwrap();
  assert_eq!(canvas.items[1].name, "node2");
  assert!(canvas.items[1].xml.contains("<position x=\"230.0\" y=\"110.0\"/>"));
}

#[test]
fn canvas_xml_concatenates_in_order() {
  let source = workflow(vec![method("End", "a", &[]), method("End", "b", &[])]);
  let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
  let xml = canvas.canvas_xml();
  let first = xml.find("name=\"item1\"").unwrap();
  let second = xml.find("name=\"item2\"").unwrap();
  assert!(first < second);
  assert_eq!(xml, format!("{}{}", canvas.items[0].xml, canvas.items[1].xml));
}

#[test]
fn populate_exposes_descriptors() {
  let compiler = WorkflowCompiler::new(CompilerConfig::default());
  let items = compiler
    .populate(&workflow(vec![method("WorkflowItem", "sub", &[("linkedItem", "abc")])]))
    .unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].name(), "item1");
  assert_eq!(items[0].display_name(), "sub");
  assert_eq!(
    items[0]
      .properties()
      .as_workflow_call()
      .unwrap()
      .linked_workflow_id
      .as_deref(),
    Some("abc")
  );
}

#[test]
fn empty_workflow_compiles_to_nothing() {
  let canvas = compile_workflow(&workflow(vec![]), &CompilerConfig::default()).unwrap();
  assert!(canvas.items.is_empty());
  assert_eq!(canvas.canvas_xml(), "");
}

#[test]
fn json_output_uses_kind_identifiers() {
  let canvas =
    compile_workflow(&workflow(vec![method("end", "a", &[])]), &CompilerConfig::default())
      .unwrap();
  let value = serde_json::to_value(&canvas).unwrap();
  assert_eq!(value["items"][0]["kind"], "End");
  assert_eq!(value["workflow"], "Provision");
}
