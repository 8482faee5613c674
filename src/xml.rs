//! Indented XML fragment writer.
//!
//! Elements are written through closures, so every opened element is closed by
//! the same call that opened it. A writer whose closure failed is dropped by the
//! caller together with the error; no half-written fragment escapes.

use quick_xml::escape::escape;

use crate::error::CanvasResult;

const INDENT: &str = "  ";

/// Builds one XML fragment, tracking nesting depth internally.
#[derive(Debug, Default)]
pub struct XmlWriter {
  buf: String,
  depth: usize,
}

impl XmlWriter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Writes `<tag attrs>`, the children written by `body`, then `</tag>`.
  /// An element whose body writes nothing collapses to `<tag attrs/>`.
  pub fn element<F>(&mut self, tag: &str, attrs: &[(&str, &str)], body: F) -> CanvasResult<()>
  where
    F: FnOnce(&mut Self) -> CanvasResult<()>,
  {
    self.write_indent();
    self.write_open(tag, attrs);
    self.buf.push_str(">\n");
    let after_open = self.buf.len();

    self.depth += 1;
    let result = body(self);
    self.depth -= 1;
    result?;

    if self.buf.len() == after_open {
      self.buf.truncate(after_open - 2);
      self.buf.push_str("/>\n");
    } else {
      self.write_indent();
      self.buf.push_str("</");
      self.buf.push_str(tag);
      self.buf.push_str(">\n");
    }
    Ok(())
  }

  /// Writes `<tag attrs/>`.
  pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
    self.write_indent();
    self.write_open(tag, attrs);
    self.buf.push_str("/>\n");
  }

  /// Writes `<tag attrs><![CDATA[text]]></tag>` on one line.
  pub fn cdata_element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
    self.write_indent();
    self.write_open(tag, attrs);
    self.buf.push_str("><![CDATA[");
    self.buf.push_str(&cdata_safe(text));
    self.buf.push_str("]]></");
    self.buf.push_str(tag);
    self.buf.push_str(">\n");
  }

  pub fn finish(self) -> String {
    self.buf
  }

  fn write_indent(&mut self) {
    for _ in 0..self.depth {
      self.buf.push_str(INDENT);
    }
  }

  fn write_open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
    self.buf.push('<');
    self.buf.push_str(tag);
    for (name, value) in attrs {
      self.buf.push(' ');
      self.buf.push_str(name);
      self.buf.push_str("=\"");
      self.buf.push_str(&escape(*value));
      self.buf.push('"');
    }
  }
}

/// Splits any `]]>` so the text cannot terminate its CDATA section early.
pub(crate) fn cdata_safe(text: &str) -> String {
  text.replace("]]>", "]]]]><![CDATA[>")
}
