// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Deterministic, git-friendly serialization of RDF graphs to Turtle and RDF/XML.
//!
//! The output of [`to_turtle`] and [`to_rdf_xml`] is a pure function of the graph's
//! abstract content: statement insertion order, the identity of blank-node labels on
//! input, and prior serialization history never affect the emitted bytes. This makes
//! the output suitable for storing ontology/vocabulary sources under line-oriented
//! version control, where two semantically equivalent graphs should diff as empty.
//!
//! Parsing Turtle/RDF-XML/N-Triples into a [`Graph`] and any command-line surface are
//! left to the embedding application; this crate only serializes an already-built graph.

pub mod collection;
pub mod compare;
pub mod error;
pub mod graph;
pub mod index;
pub mod namespace;
pub mod options;
pub mod relabel;
pub mod term;
pub mod vocab;
pub mod writer;

pub use error::SerializeError;
pub use graph::Graph;
pub use options::{SerializerOptions, ShortIriPriority, StringDataType, TargetFormat};
pub use term::{BlankNode, Literal, NamedNode, Statement, Subject, Term};
pub use writer::{to_rdf_xml, to_turtle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_round_trips_through_the_public_api() {
        let graph = Graph::new();
        let options = SerializerOptions::default();
        assert_eq!(to_turtle(&graph, &options).unwrap(), "");
    }
}
