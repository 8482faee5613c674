//! Property tests over whole workflows compiled through the public API.

use proptest::prelude::*;
use workflow_canvas::types::{AnnotatedMethod, AnnotationArg, MethodDeclaration, MethodParameter};
use workflow_canvas::{CompilerConfig, ItemKind, WorkflowSource, compile_workflow};

const KINDS: [&str; 3] = ["Item", "End", "WaitingTimer"];

fn annotated(kind: &str, name: String, args: Vec<AnnotationArg>) -> AnnotatedMethod {
  let mut method = MethodDeclaration {
    name,
    ..Default::default()
  };
  if kind == "WaitingTimer" {
    method.parameters = vec![MethodParameter::input("at", "Date")];
  }
  AnnotatedMethod {
    kind: kind.to_string(),
    arguments: args,
    method,
  }
}

/// `kinds` items followed by an End, then an error handler targeting `target`.
fn workflow(kinds: &[usize], target: usize, by_method_name: bool) -> WorkflowSource {
  let mut methods: Vec<AnnotatedMethod> = kinds
    .iter()
    .enumerate()
    .map(|(i, k)| annotated(KINDS[*k], format!("step{}", i), vec![]))
    .collect();
  methods.push(annotated("End", "finish".to_string(), vec![]));
  let total = methods.len();
  let target = target % total;
  let reference = if by_method_name {
    methods[target].method.name.clone()
  } else {
    format!("item{}", target + 1)
  };
  methods.push(annotated(
    "DefaultErrorHandler",
    "onError".to_string(),
    vec![AnnotationArg::new("target", reference)],
  ));
  WorkflowSource {
    name: "Generated".into(),
    methods,
    ..Default::default()
  }
}

proptest! {
  #[test]
  fn error_handler_carries_its_target_name(
    kinds in prop::collection::vec(0usize..KINDS.len(), 0..8),
    target in 0usize..16,
    by_method_name in any::<bool>(),
  ) {
    let source = workflow(&kinds, target, by_method_name);
    let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
    let handler = canvas.items.last().unwrap();
    prop_assert_eq!(handler.kind, ItemKind::DefaultErrorHandler);

    let expected = format!("item{}", target % (kinds.len() + 1) + 1);
    let head = format!("<error-handler name=\"{}\">", expected);
    prop_assert!(handler.xml.starts_with(&head), "{}", handler.xml);
  }

  #[test]
  fn compilation_is_deterministic(
    kinds in prop::collection::vec(0usize..KINDS.len(), 0..8),
    target in 0usize..16,
  ) {
    let source = workflow(&kinds, target, false);
    let first = compile_workflow(&source, &CompilerConfig::default()).unwrap();
    let second = compile_workflow(&source, &CompilerConfig::default()).unwrap();
    prop_assert_eq!(first, second);
  }

  #[test]
  fn positions_depend_only_on_ordinal(kinds in prop::collection::vec(0usize..KINDS.len(), 0..8)) {
    let source = workflow(&kinds, 0, false);
    let canvas = compile_workflow(&source, &CompilerConfig::default()).unwrap();
    for (ordinal, item) in canvas.items.iter().enumerate() {
      let position = format!("<position x=\"{:.1}\" y=\"110.0\"/>", 180.0 + 20.0 * ordinal as f64);
      prop_assert!(item.xml.contains(&position), "{}", item.xml);
    }
  }
}
