//! Tests for `WorkflowCallStrategy`.

use super::{Canvas, CanvasStrategy, WorkflowCallStrategy};
use crate::error::CanvasError;
use crate::types::{AnnotationArg, Bindings, ItemDescriptor, ItemKind, MethodParameter};

const LINKED_ID: &str = "f2a1c5e0-4c1b-4a57-9a41-0c9f6d9b0e11";

#[test]
fn renders_link() {
  let mut d = ItemDescriptor::new("item1", ItemKind::WorkflowItem)
    .with_display_name("provision")
    .with_bindings(Bindings::from_parameters(&[MethodParameter::input("vm", "string")]));
  WorkflowCallStrategy
    .register_arguments(
      &mut d,
      &[
        AnnotationArg::new("linkedItem", format!(" {} ", LINKED_ID)),
        AnnotationArg::new("target", "end"),
      ],
    )
    .unwrap();
  let items = vec![
    d,
    ItemDescriptor::new("item2", ItemKind::Item),
    ItemDescriptor::new("item3", ItemKind::End).with_display_name("end"),
  ];
  let xml = WorkflowCallStrategy
    .render_item(&items[0], 0, &Canvas::with_defaults(&items))
    .unwrap();
  let expected = format!(
    "\
<workflow-item name=\"item1\" out-name=\"item3\" type=\"link\" linked-workflow-id=\"{}\">
  <display-name><![CDATA[provision]]></display-name>
  <in-binding>
    <bind name=\"vm\" type=\"string\" export-name=\"vm\"/>
  </in-binding>
  <position x=\"180.0\" y=\"110.0\"/>
</workflow-item>
",
    LINKED_ID
  );
  assert_eq!(xml, expected);
}

#[test]
fn linked_item_is_required() {
  for args in [vec![], vec![AnnotationArg::new("linkedItem", "  ")]] {
    let mut d = ItemDescriptor::new("item1", ItemKind::WorkflowItem);
    let err = WorkflowCallStrategy
      .register_arguments(&mut d, &args)
      .unwrap_err();
    assert_eq!(
      err,
      CanvasError::MissingAttribute {
        kind: ItemKind::WorkflowItem,
        item: "item1".to_string(),
        attribute: "linkedItem".to_string(),
      }
    );
  }
}

#[test]
fn unknown_argument_is_reported_before_missing_link() {
  let mut d = ItemDescriptor::new("item1", ItemKind::WorkflowItem);
  let err = WorkflowCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("colour", "blue")])
    .unwrap_err();
  assert_eq!(err, CanvasError::unsupported(ItemKind::WorkflowItem, "colour"));
}

#[test]
fn second_registration_keeps_link() {
  let mut d = ItemDescriptor::new("item1", ItemKind::WorkflowItem);
  WorkflowCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("linkedItem", "wf-1")])
    .unwrap();
  WorkflowCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("target", "next")])
    .unwrap();
  assert_eq!(
    d.properties().as_workflow_call().unwrap().linked_workflow_id.as_deref(),
    Some("wf-1")
  );
}

#[test]
fn unregistered_descriptor_cannot_render() {
  let items = vec![
    ItemDescriptor::new("item1", ItemKind::WorkflowItem),
    ItemDescriptor::new("item2", ItemKind::End),
  ];
  let err = WorkflowCallStrategy
    .render_item(&items[0], 0, &Canvas::with_defaults(&items))
    .unwrap_err();
  assert!(matches!(err, CanvasError::MissingAttribute { .. }));
}
