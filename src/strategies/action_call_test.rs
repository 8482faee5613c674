//! Tests for `ActionCallStrategy`.

use super::{ActionCallStrategy, Canvas, CanvasStrategy};
use crate::error::CanvasError;
use crate::types::{
  AnnotationArg, Bindings, ItemDescriptor, ItemKind, MethodDeclaration, MethodParameter,
  ScriptModule, SourceFile, TargetRef,
};

fn method() -> MethodDeclaration {
  MethodDeclaration {
    name: "lookupIp".into(),
    parameters: vec![
      MethodParameter::input("vm", "VC:VirtualMachine"),
      MethodParameter::input("nic", "number"),
      MethodParameter::output("ip", "string"),
    ],
    body: String::new(),
  }
}

fn action(args: &[AnnotationArg]) -> ItemDescriptor {
  let m = method();
  let mut d = ItemDescriptor::new("item1", ItemKind::ActionItem)
    .with_display_name(m.name.clone())
    .with_bindings(Bindings::from_parameters(&m.parameters));
  ActionCallStrategy.register_arguments(&mut d, args).unwrap();
  let script = ActionCallStrategy.emit_source(&m, &SourceFile::default(), &d);
  d.set_script(script);
  d
}

#[test]
fn registers_script_module() {
  let d = action(&[AnnotationArg::new("scriptModule", "com.acme.net/getIp")]);
  assert_eq!(
    d.properties().as_action_call().unwrap().script_module,
    ScriptModule::parse("com.acme.net/getIp")
  );
}

#[test]
fn generates_call_script() {
  let d = action(&[AnnotationArg::new("scriptModule", "com.acme.net/getIp")]);
  assert_eq!(
    d.script(),
    "actionResult = System.getModule(\"com.acme.net\").getIp(vm, nic);"
  );
}

#[test]
fn script_module_is_required() {
  let mut d = ItemDescriptor::new("item1", ItemKind::ActionItem);
  let err = ActionCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("target", "next")])
    .unwrap_err();
  assert_eq!(
    err,
    CanvasError::MissingAttribute {
      kind: ItemKind::ActionItem,
      item: "item1".to_string(),
      attribute: "scriptModule".to_string(),
    }
  );
  assert!(d.target().is_none());
}

#[test]
fn unknown_argument_is_reported_before_missing_script_module() {
  let mut d = ItemDescriptor::new("item1", ItemKind::ActionItem);
  let err = ActionCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("colour", "blue")])
    .unwrap_err();
  assert_eq!(err, CanvasError::unsupported(ItemKind::ActionItem, "colour"));
}

#[test]
fn second_registration_keeps_script_module() {
  let mut d = action(&[AnnotationArg::new("scriptModule", "com.acme.net/getIp")]);
  ActionCallStrategy
    .register_arguments(&mut d, &[AnnotationArg::new("target", "item3")])
    .unwrap();
  assert_eq!(d.target(), Some(&TargetRef::Named("item3".into())));
  assert_eq!(
    d.properties().as_action_call().unwrap().script_module,
    ScriptModule::parse("com.acme.net/getIp")
  );
}

#[test]
fn malformed_script_module() {
  for value in ["getIp", "com.acme.net/", "/getIp"] {
    let mut d = ItemDescriptor::new("item1", ItemKind::ActionItem);
    let err = ActionCallStrategy
      .register_arguments(&mut d, &[AnnotationArg::new("scriptModule", value)])
      .unwrap_err();
    assert!(
      matches!(err, CanvasError::InvalidAttributeValue { .. }),
      "{}: {:?}",
      value,
      err
    );
  }
}

#[test]
fn renders_action_result_binding() {
  let items = vec![
    action(&[AnnotationArg::new("scriptModule", "com.acme.net/getIp")]),
    ItemDescriptor::new("item2", ItemKind::End),
  ];
  let xml = ActionCallStrategy
    .render_item(&items[0], 0, &Canvas::with_defaults(&items))
    .unwrap();
  let expected = "\
<workflow-item name=\"item1\" out-name=\"item2\" type=\"task\" script-module=\"com.acme.net/getIp\">
  <display-name><![CDATA[lookupIp]]></display-name>
  <script encoded=\"false\"><![CDATA[actionResult = System.getModule(\"com.acme.net\").getIp(vm, nic);]]></script>
  <in-binding>
    <bind name=\"vm\" type=\"VC:VirtualMachine\" export-name=\"vm\"/>
    <bind name=\"nic\" type=\"number\" export-name=\"nic\"/>
  </in-binding>
  <out-binding>
    <bind name=\"actionResult\" type=\"string\" export-name=\"ip\"/>
  </out-binding>
  <position x=\"180.0\" y=\"110.0\"/>
</workflow-item>
";
  assert_eq!(xml, expected);
}
