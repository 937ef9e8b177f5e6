// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The in-memory graph the serializer consumes: a set of statements plus a prefix
//! table. Building one is the caller's job (typically by running an external parser);
//! this module only provides a plain insertion API.

use std::collections::BTreeMap;

use crate::term::{NamedNode, Statement, Subject, Term};

/// A default-graph-only RDF graph: a multiset of statements and a prefix table.
///
/// Named graphs / quads are out of scope; every statement lives in the one default
/// graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    statements: Vec<Statement>,
    /// Prefix to namespace IRI, e.g. `"rdf" -> "http://www.w3.org/1999/02/22-rdf-syntax-ns#"`.
    /// The empty string is the default (no-prefix) namespace.
    prefixes: BTreeMap<String, String>,
    base: Option<String>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: impl Into<Subject>, predicate: NamedNode, object: impl Into<Term>) {
        self.statements
            .push(Statement::new(subject.into(), predicate, object.into()));
    }

    pub fn insert_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn set_base(&mut self, base_iri: impl Into<String>) {
        self.base = Some(base_iri.into());
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;
    use oxrdf::{vocab::rdf, Literal};

    #[test]
    fn insert_and_read_back_a_statement() {
        let mut graph = Graph::new();
        let s = NamedNode::new("http://ex/a").unwrap();
        graph.insert(
            s.clone(),
            NamedNode::new(rdf::TYPE.as_str()).unwrap(),
            NamedNode::new(vocab::owl::CLASS.as_str()).unwrap(),
        );
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.statements()[0].subject, Subject::NamedNode(s));
    }

    #[test]
    fn literal_objects_are_accepted() {
        let mut graph = Graph::new();
        graph.insert(
            NamedNode::new("http://ex/a").unwrap(),
            NamedNode::new(vocab::rdfs::LABEL.as_str()).unwrap(),
            Literal::new_simple_literal("hello"),
        );
        assert_eq!(graph.len(), 1);
    }
}
