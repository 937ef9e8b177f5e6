// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use oxrdf::vocab::rdf;
use pretty_assertions::assert_eq;
use rdfsort::{BlankNode, Graph, Literal, NamedNode, SerializerOptions, StringDataType, Term};

fn nn(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

fn owl(local: &str) -> NamedNode {
    nn(&format!("http://www.w3.org/2002/07/owl#{local}"))
}

#[test]
fn an_empty_graph_is_a_self_closing_root_element() {
    let graph = Graph::new();
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("<rdf:RDF"));
    assert!(xml.trim_end().ends_with("/>"));
    assert!(!xml.contains("rdf:Description"));
}

#[test]
fn a_subject_with_no_type_falls_back_to_rdf_description() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(nn("http://ex/a"), nn("http://ex/name"), Literal::new_simple_literal("hello"));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("<rdf:Description rdf:about=\"http://ex/a\">"));
    assert!(xml.contains("<ex:name>hello</ex:name>"));
    assert!(xml.contains("</rdf:Description>"));
}

#[test]
fn a_sole_typed_subject_is_named_after_its_type() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.set_prefix("owl", "http://www.w3.org/2002/07/owl#");
    graph.insert(nn("http://ex/Widget"), nn(rdf::TYPE.as_str()), Term::NamedNode(owl("Class")));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("<owl:Class rdf:about=\"http://ex/Widget\">"));
    assert!(xml.contains("</owl:Class>"));
    // the winning type must not be re-emitted as a child rdf:type element
    assert!(!xml.contains("rdf:type"));
}

#[test]
fn owl_thing_is_discarded_before_naming_a_dually_typed_subject() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.set_prefix("owl", "http://www.w3.org/2002/07/owl#");
    graph.insert(nn("http://ex/Widget"), nn(rdf::TYPE.as_str()), Term::NamedNode(owl("Thing")));
    graph.insert(nn("http://ex/Widget"), nn(rdf::TYPE.as_str()), Term::NamedNode(owl("Class")));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("<owl:Class rdf:about=\"http://ex/Widget\">"));
    assert!(xml.contains("</owl:Class>"));
    assert!(!xml.contains("rdf:Description"));
}

#[test]
fn a_blank_node_collection_renders_as_parse_type_collection() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    let list = BlankNode::new("l0").unwrap();
    let rest = BlankNode::new("l1").unwrap();
    graph.insert(nn("http://ex/s"), nn("http://ex/items"), Term::BlankNode(list.clone()));
    graph.insert(list.clone(), nn(rdf::FIRST.as_str()), Term::NamedNode(nn("http://ex/x")));
    graph.insert(list, nn(rdf::REST.as_str()), Term::BlankNode(rest.clone()));
    graph.insert(rest.clone(), nn(rdf::FIRST.as_str()), Term::NamedNode(nn("http://ex/y")));
    graph.insert(rest, nn(rdf::REST.as_str()), Term::NamedNode(nn(rdf::NIL.as_str())));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("rdf:parseType=\"Collection\""));
    assert!(xml.contains("rdf:about=\"http://ex/x\""));
    assert!(xml.contains("rdf:about=\"http://ex/y\""));
    assert!(!xml.contains("rdf:first"));
    assert!(!xml.contains("rdf:rest"));
}

#[test]
fn a_collection_with_a_literal_member_falls_back_to_the_long_form() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    let list = BlankNode::new("l0").unwrap();
    graph.insert(nn("http://ex/s"), nn("http://ex/items"), Term::BlankNode(list.clone()));
    graph.insert(list.clone(), nn(rdf::FIRST.as_str()), Literal::new_simple_literal("x"));
    graph.insert(list, nn(rdf::REST.as_str()), Term::NamedNode(nn(rdf::NIL.as_str())));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(!xml.contains("parseType=\"Collection\""));
    assert!(xml.contains("rdf:first"));
    assert!(xml.contains(">x</"));
}

#[test]
fn a_language_tagged_literal_gets_a_normalized_xml_lang() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(
        nn("http://ex/a"),
        nn("http://ex/label"),
        Literal::new_language_tagged_literal("hi", "en-us").unwrap(),
    );
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("xml:lang=\"en-US\""));
}

#[test]
fn a_typed_literal_other_than_string_gets_an_rdf_datatype_attribute() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(
        nn("http://ex/a"),
        nn("http://ex/count"),
        Literal::new_typed_literal("3", nn("http://www.w3.org/2001/XMLSchema#integer")),
    );
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.contains("rdf:datatype=\"http://www.w3.org/2001/XMLSchema#integer\""));
}

#[test]
fn explicit_string_data_type_adds_an_rdf_datatype_attribute() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(nn("http://ex/a"), nn("http://ex/name"), Literal::new_simple_literal("hello"));
    let mut options = SerializerOptions::default();
    options.string_data_type = StringDataType::Explicit;
    let xml = rdfsort::to_rdf_xml(&graph, &options).unwrap();
    assert!(xml.contains("rdf:datatype=\"http://www.w3.org/2001/XMLSchema#string\""));
}

#[test]
fn the_dtd_subset_declares_an_entity_per_used_prefix() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(nn("http://ex/a"), nn("http://ex/p"), Literal::new_simple_literal("x"));
    let mut options = SerializerOptions::default();
    options.use_dtd_subset = true;
    let xml = rdfsort::to_rdf_xml(&graph, &options).unwrap();
    assert!(xml.contains("<!DOCTYPE rdf:RDF ["));
    assert!(xml.contains("<!ENTITY ex \"http://ex/\">"));
    assert!(xml.contains("&ex;a"));
}

#[test]
fn serialization_is_deterministic_across_repeated_calls() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(nn("http://ex/b"), nn("http://ex/p"), Literal::new_simple_literal("x"));
    graph.insert(nn("http://ex/a"), nn("http://ex/p"), Literal::new_simple_literal("y"));
    let options = SerializerOptions::default();
    let first = rdfsort::to_rdf_xml(&graph, &options).unwrap();
    let second = rdfsort::to_rdf_xml(&graph, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn subjects_are_emitted_in_sorted_order_regardless_of_insertion_order() {
    let mut graph = Graph::new();
    graph.set_prefix("ex", "http://ex/");
    graph.insert(nn("http://ex/b"), nn("http://ex/p"), Literal::new_simple_literal("x"));
    graph.insert(nn("http://ex/a"), nn("http://ex/p"), Literal::new_simple_literal("y"));
    let xml = rdfsort::to_rdf_xml(&graph, &SerializerOptions::default()).unwrap();
    assert!(xml.find("http://ex/a").unwrap() < xml.find("http://ex/b").unwrap());
}
