// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Turtle format hooks: header, subject/predicate/object layout, literal and
//! collection rendering.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::LazyLock;

use oxrdf::vocab::{rdf, xsd};
use regex::Regex;

use crate::collection::Collections;
use crate::error::SerializeResult;
use crate::index::SortedIndex;
use crate::namespace::NamespaceTable;
use crate::options::{SerializerOptions, ShortIriPriority, StringDataType};
use crate::relabel::InlinePlan;
use crate::term::{BlankNode, Literal, NamedNode, Subject, Term};

/// Matches the Turtle `DOUBLE` production, which is not equivalent to every legal
/// `xsd:double` lexical form (e.g. `"1"^^xsd:double` has no exponent and so isn't one).
static RE_TURTLE_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[+-]?(([0-9]+([.][0-9]*)?)|([.][0-9]+))[eE][+-]?[0-9]+$").unwrap());

fn is_turtle_integer(value: &str) -> bool {
    let mut value = value.as_bytes();
    if value.starts_with(b"+") || value.starts_with(b"-") {
        value = &value[1..];
    }
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn is_turtle_decimal(value: &str) -> bool {
    let mut value = value.as_bytes();
    if value.starts_with(b"+") || value.starts_with(b"-") {
        value = &value[1..];
    }
    while value.first().is_some_and(u8::is_ascii_digit) {
        value = &value[1..];
    }
    if !value.starts_with(b".") {
        return false;
    }
    value = &value[1..];
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

/// Escapes and quotes `value`, matching [`oxrdf::Literal`]'s own (private)
/// `print_quoted_str` routine.
fn print_quoted_str(value: &str, out: &mut impl Write) -> fmt::Result {
    out.write_char('"')?;
    for c in value.chars() {
        match c {
            '\u{08}' => out.write_str("\\b"),
            '\t' => out.write_str("\\t"),
            '\n' => out.write_str("\\n"),
            '\u{0C}' => out.write_str("\\f"),
            '\r' => out.write_str("\\r"),
            '"' => out.write_str("\\\""),
            '\\' => out.write_str("\\\\"),
            '\0'..='\u{1F}' | '\u{7F}' => write!(out, "\\u{:04X}", u32::from(c)),
            _ => out.write_char(c),
        }?;
    }
    out.write_char('"')
}

/// Triple-quotes `value` verbatim, escaping only runs of three-or-more quote chars.
fn print_triple_quoted_str(value: &str, out: &mut impl Write) -> fmt::Result {
    out.write_str("\"\"\"")?;
    let mut run = 0u8;
    for c in value.chars() {
        if c == '"' {
            run += 1;
            if run == 3 {
                out.write_char('\\')?;
                run = 0;
            }
        } else {
            run = 0;
        }
        out.write_char(c)?;
    }
    out.write_str("\"\"\"")
}

fn fmt_string(value: &str, out: &mut impl Write) -> fmt::Result {
    // A lone "\n\r" can't be represented inside a triple-quoted string.
    if value.contains('\n') && !value.contains("\n\r") {
        print_triple_quoted_str(value, out)
    } else {
        print_quoted_str(value, out)
    }
}

pub struct Renderer<'a> {
    options: &'a SerializerOptions,
    namespaces: NamespaceTable,
    labels: &'a HashMap<BlankNode, String>,
    inline_plan: &'a InlinePlan,
    collections: &'a Collections,
    /// Predicate lists of blank-node subjects, keyed by node, so an inlined blank
    /// node's own content can be rendered at its one referencing site.
    blank_node_predicates: HashMap<BlankNode, Vec<crate::index::SortedPredicate>>,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(
        options: &'a SerializerOptions,
        prefixes: &std::collections::BTreeMap<String, String>,
        labels: &'a HashMap<BlankNode, String>,
        inline_plan: &'a InlinePlan,
        collections: &'a Collections,
        index: &SortedIndex,
    ) -> Self {
        let blank_node_predicates = index
            .subjects
            .iter()
            .filter_map(|s| match &s.subject {
                Subject::BlankNode(b) => Some((b.clone(), s.predicates.clone())),
                Subject::NamedNode(_) => None,
            })
            .collect();
        Self {
            options,
            namespaces: NamespaceTable::new(prefixes, false),
            labels,
            inline_plan,
            collections,
            blank_node_predicates,
        }
    }

    pub fn write_document(
        &mut self,
        out: &mut String,
        index: &SortedIndex,
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        // Rendered first, into its own buffer: the header can only list the
        // prefixes actually resolved while rendering subjects, so it is written
        // last and prepended.
        let mut body = String::new();
        let mut first = true;
        for subject in &index.subjects {
            if let Subject::BlankNode(b) = &subject.subject {
                if self.inline_plan.is_inlineable(b) {
                    continue;
                }
            }
            if !first {
                body.write_str(&self.options.line_end)?;
            }
            first = false;
            self.write_subject(&mut body, &subject.subject, &subject.predicates, base_iri)?;
        }
        for comment in &self.options.trailing_comments {
            self.write_comment(&mut body, comment)?;
        }

        self.write_header(out, base_iri)?;
        out.push_str(&body);
        Ok(())
    }

    fn write_comment(&self, out: &mut String, comment: &str) -> SerializeResult<()> {
        for line in comment.lines() {
            write!(out, "# {line}")?;
            out.write_str(&self.options.line_end)?;
        }
        Ok(())
    }

    fn write_header(&mut self, out: &mut String, base_iri: Option<&str>) -> SerializeResult<()> {
        for comment in &self.options.leading_comments {
            self.write_comment(out, comment)?;
        }
        if let Some(base) = base_iri {
            write!(out, "@base <{base}> .")?;
            out.write_str(&self.options.line_end)?;
        }
        let used_prefixes = self.namespaces.used_prefixes();
        for (prefix, namespace) in &used_prefixes {
            write!(out, "@prefix {prefix}: <{namespace}> .")?;
            out.write_str(&self.options.line_end)?;
        }
        let had_header =
            base_iri.is_some() || !used_prefixes.is_empty() || !self.options.leading_comments.is_empty();
        if had_header {
            out.write_str(&self.options.line_end)?;
        }
        Ok(())
    }

    fn write_named_node(&mut self, out: &mut String, node: &NamedNode, base_iri: Option<&str>) -> SerializeResult<()> {
        if node.as_str() == rdf::TYPE.as_str() {
            out.write_str("a")?;
            return Ok(());
        }
        if matches!(self.options.short_iri_priority, ShortIriPriority::BaseIri) {
            if let Some(base) = base_iri {
                if let Some(rest) = node.as_str().strip_prefix(base) {
                    write!(out, "<{rest}>")?;
                    return Ok(());
                }
            }
        }
        if let Some(qname) = self.namespaces.resolve(node.as_str()) {
            if qname.local_name.is_empty() {
                write!(out, "{}:", qname.prefix)?;
            } else {
                write!(out, "{}:{}", qname.prefix, qname.local_name)?;
            }
            return Ok(());
        }
        if let Some(base) = base_iri {
            if let Some(rest) = node.as_str().strip_prefix(base) {
                write!(out, "<{rest}>")?;
                return Ok(());
            }
        }
        write!(out, "<{}>", node.as_str())?;
        Ok(())
    }

    fn write_blank_node_ref(&self, out: &mut String, node: &BlankNode) -> SerializeResult<()> {
        let label = self
            .labels
            .get(node)
            .expect("every blank node in the sorted index has an assigned label");
        out.write_str(label)?;
        Ok(())
    }

    fn write_literal(&mut self, out: &mut String, literal: &Literal, base_iri: Option<&str>) -> SerializeResult<()> {
        let datatype = literal.datatype();
        match datatype {
            _ if datatype == xsd::STRING => {
                fmt_string(literal.value(), out)?;
                if let Some(lang) = &self.options.override_string_language {
                    write!(out, "@{lang}")?;
                } else if matches!(self.options.string_data_type, StringDataType::Explicit) {
                    out.write_str("^^xsd:string")?;
                }
            }
            _ if datatype == rdf::LANG_STRING => {
                fmt_string(literal.value(), out)?;
                let lang = literal
                    .language()
                    .expect("a rdf:langString literal always carries a language tag");
                write!(out, "@{}", super::normalize_language_tag(lang))?;
            }
            _ if datatype == xsd::BOOLEAN || datatype == xsd::INTEGER => {
                if is_turtle_integer(literal.value()) || matches!(literal.value(), "true" | "false") {
                    out.write_str(literal.value())?;
                } else {
                    self.write_typed_literal(out, literal, base_iri)?;
                }
            }
            _ if datatype == xsd::DOUBLE => {
                if RE_TURTLE_DOUBLE.is_match(literal.value()) {
                    out.write_str(literal.value())?;
                } else {
                    if self.options.warn_unsupported_numbers {
                        tracing::warn!(
                            value = literal.value(),
                            "xsd:double literal has no Turtle DOUBLE form, falling back to a typed literal"
                        );
                    }
                    self.write_typed_literal(out, literal, base_iri)?;
                }
            }
            _ if datatype == xsd::DECIMAL => {
                if literal.value().contains('.') && !literal.value().ends_with('.') && is_turtle_decimal(literal.value())
                {
                    out.write_str(literal.value())?;
                } else {
                    if self.options.warn_unsupported_numbers {
                        tracing::warn!(
                            value = literal.value(),
                            "xsd:decimal literal has no Turtle DECIMAL form, falling back to a typed literal"
                        );
                    }
                    self.write_typed_literal(out, literal, base_iri)?;
                }
            }
            _ => self.write_typed_literal(out, literal, base_iri)?,
        }
        Ok(())
    }

    fn write_typed_literal(&mut self, out: &mut String, literal: &Literal, base_iri: Option<&str>) -> SerializeResult<()> {
        fmt_string(literal.value(), out)?;
        out.write_str("^^")?;
        let datatype = literal.datatype().into_owned();
        self.write_named_node(out, &datatype, base_iri)
    }

    fn write_collection(&mut self, out: &mut String, members: &[Term], base_iri: Option<&str>) -> SerializeResult<()> {
        out.write_char('(')?;
        for member in members {
            out.write_char(' ')?;
            self.write_object(out, member, base_iri)?;
        }
        out.write_str(" )")?;
        Ok(())
    }

    fn write_object(&mut self, out: &mut String, object: &Term, base_iri: Option<&str>) -> SerializeResult<()> {
        match object {
            Term::NamedNode(n) => self.write_named_node(out, n, base_iri)?,
            Term::Literal(l) => self.write_literal(out, l, base_iri)?,
            Term::BlankNode(b) => {
                if let Some(collection) = self.collections.get(b) {
                    let members = collection.members.clone();
                    self.write_collection(out, &members, base_iri)?;
                } else if self.inline_plan.is_inlineable(b) {
                    let predicates = self.blank_node_predicates.get(b).cloned().unwrap_or_default();
                    if predicates.is_empty() {
                        out.write_str("[]")?;
                    } else {
                        out.write_str("[ ")?;
                        self.write_predicates_inline(out, &predicates, base_iri)?;
                        out.write_str(" ]")?;
                    }
                } else {
                    self.write_blank_node_ref(out, b)?;
                }
            }
        }
        Ok(())
    }

    /// Renders one non-inlined subject and its predicates, terminated by `" .\n"`.
    /// Blank-node subjects eligible for inlining are filtered out by the caller
    /// before reaching here; they're rendered at their one referencing site instead.
    fn write_subject(
        &mut self,
        out: &mut String,
        subject: &Subject,
        predicates: &[crate::index::SortedPredicate],
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        match subject {
            Subject::NamedNode(n) => self.write_named_node(out, n, base_iri)?,
            Subject::BlankNode(b) => self.write_blank_node_ref(out, b)?,
        }
        out.write_str(&self.options.line_end)?;
        self.write_predicates(out, predicates, base_iri)?;
        Ok(())
    }

    fn write_predicates(
        &mut self,
        out: &mut String,
        predicates: &[crate::index::SortedPredicate],
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        let last = predicates.len().saturating_sub(1);
        for (i, predicate) in predicates.iter().enumerate() {
            out.write_str(&self.options.indent)?;
            self.write_named_node(out, &predicate.predicate, base_iri)?;
            out.write_char(' ')?;
            let last_object = predicate.objects.len().saturating_sub(1);
            for (j, object) in predicate.objects.iter().enumerate() {
                self.write_object(out, object, base_iri)?;
                if j != last_object {
                    out.write_str(" ,")?;
                    out.write_str(&self.options.line_end)?;
                    out.write_str(&self.options.indent)?;
                    out.write_str("    ")?;
                }
            }
            if i == last {
                out.write_str(" .")?;
            } else {
                out.write_str(" ;")?;
            }
            out.write_str(&self.options.line_end)?;
        }
        Ok(())
    }

    /// Renders a blank node's predicates on a single line, for `[ p o ; p2 o2 ]`
    /// inline bracket syntax: no trailing `.`, `;`-separated with no newlines.
    fn write_predicates_inline(
        &mut self,
        out: &mut String,
        predicates: &[crate::index::SortedPredicate],
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        for (i, predicate) in predicates.iter().enumerate() {
            if i > 0 {
                out.write_str(" ; ")?;
            }
            self.write_named_node(out, &predicate.predicate, base_iri)?;
            out.write_char(' ')?;
            for (j, object) in predicate.objects.iter().enumerate() {
                if j > 0 {
                    out.write_str(" , ")?;
                }
                self.write_object(out, object, base_iri)?;
            }
        }
        Ok(())
    }
}
