// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The configuration record accepted by [`crate::to_turtle`] and [`crate::to_rdf_xml`].

/// Whether a short-IRI form prefers a prefix-qualified name or a base-relative form,
/// when both are available for the same IRI. Turtle only; RDF/XML always uses QNames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortIriPriority {
    #[default]
    Prefix,
    BaseIri,
}

/// How to render `xsd:string`-typed literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringDataType {
    /// Omit the `^^xsd:string` suffix; this is the only datatype Turtle/RDF-XML
    /// readers infer for an untyped literal anyway.
    #[default]
    Implicit,
    /// Always write `^^xsd:string` explicitly.
    Explicit,
}

/// Output syntax produced by the base writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFormat {
    #[default]
    Turtle,
    RdfXml,
}

/// Configuration accepted by the serialization entry points.
///
/// Mirrors the option table of the system this crate replaces: every field has a
/// deterministic default so that `SerializerOptions::default()` alone reproduces the
/// canonical output for a graph with no base IRI and no ontology subjects.
#[derive(Debug, Clone)]
pub struct SerializerOptions {
    /// Explicit base IRI for relativization. Takes priority over `infer_base_iri`.
    pub base_iri: Option<String>,
    /// If no explicit base is set, adopt the first `owl:Ontology` subject (in sorted
    /// order) as the base IRI.
    pub infer_base_iri: bool,
    /// Indent unit; one level of nesting is this string repeated `depth` times.
    pub indent: String,
    /// Line terminator.
    pub line_end: String,
    /// Render blank nodes inline (`[ ... ]` in Turtle, nested elements in RDF/XML)
    /// rather than by canonical label, wherever the graph shape allows it.
    pub inline_blank_nodes: bool,
    /// RDF/XML only: emit a DTD subset with one `<!ENTITY>` per used namespace prefix,
    /// and use `&prefix;localName` entity references for IRI-valued attributes.
    pub use_dtd_subset: bool,
    /// How to render `xsd:string`-typed literals.
    pub string_data_type: StringDataType,
    /// If set, applied to every plain (`xsd:string`) literal as its language tag.
    /// Never touches literals that already carry `rdf:langString`.
    pub override_string_language: Option<String>,
    /// Whether the prefixed form or the base-relative form wins when both are
    /// available for the same IRI (Turtle only).
    pub short_iri_priority: ShortIriPriority,
    /// Emitted verbatim, once, immediately after the document/root opens.
    pub leading_comments: Vec<String>,
    /// Emitted verbatim, once, immediately before the document/root closes.
    pub trailing_comments: Vec<String>,
    /// Output syntax.
    pub target_format: TargetFormat,
    /// Warn (via `tracing::warn!`) when a numeric literal's lexical form cannot be
    /// written in Turtle's bare numeric syntax and falls back to a quoted, data-typed
    /// literal.
    pub warn_unsupported_numbers: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            base_iri: None,
            infer_base_iri: false,
            indent: "\t".to_string(),
            line_end: "\n".to_string(),
            inline_blank_nodes: true,
            use_dtd_subset: false,
            string_data_type: StringDataType::default(),
            override_string_language: None,
            short_iri_priority: ShortIriPriority::default(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            target_format: TargetFormat::default(),
            warn_unsupported_numbers: true,
        }
    }
}
