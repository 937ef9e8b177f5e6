// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! A small indenting XML stream emitter, hand-rolled rather than built on a
//! general-purpose XML crate because it needs a split attribute-writing API: one
//! attribute value may interleave an entity reference (`&prefix;`) with literal text,
//! which event-based writers such as `quick_xml` have no way to express (their
//! attribute API takes one fully-formed string per attribute).

use std::fmt::{self, Write};

/// Whether an element currently open on the stack has written any child content
/// (element, text, or comment) yet, which decides how its closing tag is laid out.
struct OpenElement {
    qname: String,
    has_content: bool,
}

pub struct XmlWriter<'o, W: Write> {
    out: &'o mut W,
    indent: String,
    line_end: String,
    stack: Vec<OpenElement>,
    /// `true` between `start_element`/`start_attribute` and the matching
    /// `finish_start_tag`/`end_attribute` call.
    tag_open: bool,
    in_attribute: bool,
}

impl<'o, W: Write> XmlWriter<'o, W> {
    pub fn new(out: &'o mut W, indent: impl Into<String>, line_end: impl Into<String>) -> Self {
        Self {
            out,
            indent: indent.into(),
            line_end: line_end.into(),
            stack: Vec::new(),
            tag_open: false,
            in_attribute: false,
        }
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.stack.len() {
            self.out.write_str(&self.indent)?;
        }
        Ok(())
    }

    fn mark_parent_has_content(&mut self) {
        if let Some(parent) = self.stack.last_mut() {
            parent.has_content = true;
        }
    }

    pub fn write_decl(&mut self) -> fmt::Result {
        write!(self.out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>{}", self.line_end)
    }

    /// Emits `<!DOCTYPE rdf:RDF [ <!ENTITY prefix "namespace"> ... ]>`.
    pub fn write_doctype(&mut self, root: &str, entities: &[(String, String)]) -> fmt::Result {
        if entities.is_empty() {
            return Ok(());
        }
        write!(self.out, "<!DOCTYPE {root} [{}", self.line_end)?;
        for (name, value) in entities {
            writeln!(self.out, "  <!ENTITY {name} \"{value}\">")?;
        }
        write!(self.out, "]>{}", self.line_end)
    }

    /// Begins a start tag; call `write_attribute*` calls, then `finish_start_tag`.
    pub fn start_element(&mut self, qname: &str) -> fmt::Result {
        self.mark_parent_has_content();
        self.write_indent()?;
        write!(self.out, "<{qname}")?;
        self.tag_open = true;
        self.stack.push(OpenElement {
            qname: qname.to_string(),
            has_content: false,
        });
        Ok(())
    }

    /// One-shot attribute with a single fully-escaped value.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> fmt::Result {
        debug_assert!(self.tag_open);
        write!(self.out, " {name}=\"")?;
        escape_attribute_value(value, self.out)?;
        write!(self.out, "\"")
    }

    /// Begins an attribute value that will be written across several calls, mixing
    /// `write_attribute_entity_ref` and `write_attribute_characters`.
    pub fn start_attribute(&mut self, name: &str) -> fmt::Result {
        debug_assert!(self.tag_open && !self.in_attribute);
        write!(self.out, " {name}=\"")?;
        self.in_attribute = true;
        Ok(())
    }

    pub fn write_attribute_entity_ref(&mut self, entity: &str) -> fmt::Result {
        debug_assert!(self.in_attribute);
        write!(self.out, "&{entity};")
    }

    pub fn write_attribute_characters(&mut self, text: &str) -> fmt::Result {
        debug_assert!(self.in_attribute);
        escape_attribute_value(text, self.out)
    }

    pub fn end_attribute(&mut self) -> fmt::Result {
        debug_assert!(self.in_attribute);
        self.in_attribute = false;
        write!(self.out, "\"")
    }

    /// Closes the currently open start tag. `self_closing` writes `/>` and pops the
    /// element immediately, for elements known to have no content.
    pub fn finish_start_tag(&mut self, self_closing: bool) -> fmt::Result {
        debug_assert!(self.tag_open);
        self.tag_open = false;
        if self_closing {
            write!(self.out, "/>{}", self.line_end)?;
            self.stack.pop();
        } else {
            write!(self.out, ">")?;
        }
        Ok(())
    }

    /// Closes the innermost open element, laying its closing tag on its own indented
    /// line if it gained element children, or inline if it only got text (or none).
    pub fn end_element(&mut self) -> fmt::Result {
        let element = self.stack.pop().expect("end_element with no open element");
        if element.has_content {
            self.write_indent()?;
        }
        write!(self.out, "</{}>{}", element.qname, self.line_end)
    }

    pub fn text(&mut self, value: &str) -> fmt::Result {
        self.mark_parent_has_content();
        escape_text(value, self.out)
    }

    /// Writes `value` as-is, without escaping. Used for literal text content the
    /// caller has already decided not to XML-escape (trimmed literal text is still
    /// escaped; this exists for e.g. embedding already-rendered sub-XML).
    pub fn raw_text(&mut self, value: &str) -> fmt::Result {
        self.mark_parent_has_content();
        self.out.write_str(value)
    }

    pub fn comment(&mut self, text: &str) -> fmt::Result {
        self.mark_parent_has_content();
        self.write_indent()?;
        write!(self.out, "<!--{}-->{}", escape_comment(text), self.line_end)
    }

    pub fn newline(&mut self) -> fmt::Result {
        self.out.write_str(&self.line_end)
    }
}

fn escape_text(value: &str, out: &mut impl Write) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

fn escape_attribute_value(value: &str, out: &mut impl Write) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '"' => out.write_str("&quot;")?,
            '\n' => out.write_str("&#10;")?,
            '\t' => out.write_str("&#9;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

/// `--` is not legal inside an XML comment; rewrite each hyphen pair's hyphens to
/// numeric character references to keep the comment well-formed.
fn escape_comment(value: &str) -> String {
    value.replace("--", "&#x2D;&#x2D;")
}
