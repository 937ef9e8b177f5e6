// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The base writer: wires the sorted index, blank-node relabeling/inlining, and
//! collection detection together, then hands the result to the Turtle or RDF/XML
//! format hooks. [`to_turtle`] and [`to_rdf_xml`] are the only entry points a caller
//! needs.

pub mod rdfxml;
pub mod turtle;
pub mod xml_emitter;

use crate::collection;
use crate::error::SerializeResult;
use crate::graph::Graph;
use crate::index::{self, SortedIndex};
use crate::options::{SerializerOptions, TargetFormat};
use crate::relabel;
use crate::term::Subject;

/// Normalizes a language tag to a lowercase primary subtag and an uppercase region
/// subtag (`"en-us"` -> `"en-US"`), the conventional BCP 47 casing; any further
/// subtags are passed through unchanged.
pub(crate) fn normalize_language_tag(tag: &str) -> String {
    let mut parts = tag.split('-');
    let mut out = String::with_capacity(tag.len());
    if let Some(primary) = parts.next() {
        out.push_str(&primary.to_ascii_lowercase());
    }
    for (i, part) in parts.enumerate() {
        out.push('-');
        if i == 0 && part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
            out.push_str(&part.to_ascii_uppercase());
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Resolves the base IRI per `inferBaseIri`'s priority: an explicit `options.base_iri`
/// wins outright; otherwise, if `infer_base_iri` is set, the first ontology subject (in
/// canonical order) is adopted; otherwise there is no base.
fn resolve_base_iri<'a>(
    graph: &'a Graph,
    options: &'a SerializerOptions,
    index: &'a SortedIndex,
) -> Option<&'a str> {
    if let Some(base) = &options.base_iri {
        return Some(base.as_str());
    }
    if let Some(base) = graph.base() {
        return Some(base);
    }
    if options.infer_base_iri {
        if let Some(subject) = index.subjects.iter().find(|s| s.is_ontology) {
            if let Subject::NamedNode(n) = &subject.subject {
                return Some(n.as_str());
            }
        }
    }
    None
}

/// Builds the shared preparation state every format hook renders from: the sorted
/// index, the canonical blank-node labels, the inlining plan, and the detected
/// collections.
struct Prepared {
    index: SortedIndex,
    labels: std::collections::HashMap<crate::term::BlankNode, String>,
    inline_plan: relabel::InlinePlan,
    collections: collection::Collections,
}

fn prepare(graph: &Graph, options: &SerializerOptions) -> SerializeResult<Prepared> {
    let statements = graph.statements();
    let index = index::build(statements);
    let labels = relabel::assign_labels(&index.blank_nodes);
    let inline_plan = relabel::plan_inlining(statements, options.inline_blank_nodes)?;
    let collections = collection::detect_collections(statements);
    Ok(Prepared {
        index,
        labels,
        inline_plan,
        collections,
    })
}

/// Serializes `graph` to canonical Turtle.
///
/// The output is a pure function of `graph`'s abstract content and `options`: neither
/// statement insertion order nor the identity of blank-node labels on `graph` affects
/// the result.
pub fn to_turtle(graph: &Graph, options: &SerializerOptions) -> SerializeResult<String> {
    let prepared = prepare(graph, options)?;
    let base_iri = resolve_base_iri(graph, options, &prepared.index);

    let mut renderer = turtle::Renderer::new(
        options,
        graph.prefixes(),
        &prepared.labels,
        &prepared.inline_plan,
        &prepared.collections,
        &prepared.index,
    );
    let mut out = String::new();
    renderer.write_document(&mut out, &prepared.index, base_iri)?;
    Ok(out)
}

/// Serializes `graph` to canonical RDF/XML.
///
/// Same determinism guarantee as [`to_turtle`]; see its docs.
pub fn to_rdf_xml(graph: &Graph, options: &SerializerOptions) -> SerializeResult<String> {
    let prepared = prepare(graph, options)?;
    let base_iri = resolve_base_iri(graph, options, &prepared.index);

    let mut renderer = rdfxml::Renderer::new(
        options,
        graph.prefixes(),
        &prepared.labels,
        &prepared.inline_plan,
        &prepared.collections,
        &prepared.index,
    );
    let mut out = String::new();
    renderer.write_document(&mut out, &prepared.index, base_iri)?;
    Ok(out)
}

/// Dispatches to [`to_turtle`] or [`to_rdf_xml`] according to `options.target_format`.
pub fn serialize(graph: &Graph, options: &SerializerOptions) -> SerializeResult<String> {
    match options.target_format {
        TargetFormat::Turtle => to_turtle(graph, options),
        TargetFormat::RdfXml => to_rdf_xml(graph, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{BlankNode, Literal, NamedNode, Term};
    use oxrdf::vocab::rdf;
    use pretty_assertions::assert_eq;

    fn nn(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn empty_graph_serializes_to_an_empty_string_in_both_formats() {
        let graph = Graph::new();
        let options = SerializerOptions::default();
        assert_eq!(to_turtle(&graph, &options).unwrap(), "");
        let xml = to_rdf_xml(&graph, &options).unwrap();
        assert!(xml.contains("<rdf:RDF"));
        assert!(xml.trim_end().ends_with("/>"));
    }

    #[test]
    fn a_single_statement_round_trips_in_turtle() {
        let mut graph = Graph::new();
        graph.set_prefix("ex", "http://ex/");
        graph.insert(
            nn("http://ex/a"),
            nn("http://ex/name"),
            Literal::new_simple_literal("hello"),
        );
        let turtle = to_turtle(&graph, &SerializerOptions::default()).unwrap();
        assert!(turtle.contains("@prefix ex: <http://ex/> ."));
        assert!(turtle.contains("ex:a"));
        assert!(turtle.contains("ex:name \"hello\""));
    }

    #[test]
    fn inferred_base_iri_comes_from_the_first_ontology_subject() {
        let mut graph = Graph::new();
        graph.insert(
            nn("http://ex/onto"),
            nn(rdf::TYPE.as_str()),
            Term::NamedNode(nn(crate::vocab::owl::ONTOLOGY.as_str())),
        );
        graph.insert(
            nn("http://ex/onto#Widget"),
            nn(rdf::TYPE.as_str()),
            Term::NamedNode(nn(crate::vocab::owl::CLASS.as_str())),
        );
        let mut options = SerializerOptions::default();
        options.infer_base_iri = true;
        let turtle = to_turtle(&graph, &options).unwrap();
        assert!(turtle.contains("@base <http://ex/onto> ."));
    }

    #[test]
    fn a_blank_node_collection_renders_as_parens_in_turtle() {
        let mut graph = Graph::new();
        let list = BlankNode::new("l0").unwrap();
        let rest = BlankNode::new("l1").unwrap();
        graph.insert(
            nn("http://ex/s"),
            nn("http://ex/items"),
            Term::BlankNode(list.clone()),
        );
        graph.insert(
            list.clone(),
            nn(rdf::FIRST.as_str()),
            Literal::new_simple_literal("x"),
        );
        graph.insert(list, nn(rdf::REST.as_str()), Term::BlankNode(rest.clone()));
        graph.insert(
            rest.clone(),
            nn(rdf::FIRST.as_str()),
            Literal::new_simple_literal("y"),
        );
        graph.insert(rest, nn(rdf::REST.as_str()), Term::NamedNode(nn(rdf::NIL.as_str())));
        let turtle = to_turtle(&graph, &SerializerOptions::default()).unwrap();
        assert!(turtle.contains("( \"x\" \"y\" )"));
    }
}
