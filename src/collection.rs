// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Detection of RDF collections (`rdf:first`/`rdf:rest`/`rdf:nil` chains) so they can
//! be rendered as `( a b c )` / `rdf:parseType="Collection"` instead of the raw list
//! primitives.

use std::collections::{HashMap, HashSet};

use oxrdf::vocab::rdf;

use crate::term::{BlankNode, NamedNode, Statement, Subject, Term};

/// A validated, non-empty RDF collection: its members in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub members: Vec<Term>,
}

/// Every detected collection in a graph, keyed by its start node, plus the set of
/// blank nodes that are internal list cells (and so must never be rendered as
/// ordinary subjects).
#[derive(Debug, Default)]
pub struct Collections {
    pub by_start: HashMap<BlankNode, Collection>,
    pub list_cells: HashSet<BlankNode>,
}

impl Collections {
    #[must_use]
    pub fn get(&self, start: &BlankNode) -> Option<&Collection> {
        self.by_start.get(start)
    }
}

/// Groups every statement by subject, preserving (predicate, object) pairs in
/// insertion order, for the chain-walking below.
fn index_by_subject(statements: &[Statement]) -> HashMap<&Subject, Vec<(&NamedNode, &Term)>> {
    let mut by_subject: HashMap<&Subject, Vec<(&NamedNode, &Term)>> = HashMap::new();
    for statement in statements {
        by_subject
            .entry(&statement.subject)
            .or_default()
            .push((&statement.predicate, &statement.object));
    }
    by_subject
}

fn walk_chain<'g>(
    by_subject: &HashMap<&'g Subject, Vec<(&'g NamedNode, &'g Term)>>,
    start: &'g BlankNode,
) -> Option<(Vec<Term>, HashSet<BlankNode>)> {
    let mut members = Vec::new();
    let mut cells = HashSet::new();
    let mut current = start.clone();
    loop {
        let subject = Subject::BlankNode(current.clone());
        let entries = by_subject.get(&subject)?;

        let firsts: Vec<&Term> = entries
            .iter()
            .filter(|(p, _)| p.as_str() == rdf::FIRST.as_str())
            .map(|(_, o)| *o)
            .collect();
        let rests: Vec<&Term> = entries
            .iter()
            .filter(|(p, _)| p.as_str() == rdf::REST.as_str())
            .map(|(_, o)| *o)
            .collect();
        if firsts.len() != 1 || rests.len() != 1 {
            return None;
        }
        let extra_predicates = entries
            .iter()
            .filter(|(p, _)| p.as_str() != rdf::FIRST.as_str() && p.as_str() != rdf::REST.as_str())
            .count();
        if extra_predicates != 0 {
            return None;
        }

        members.push(firsts[0].clone());
        cells.insert(current.clone());

        match rests[0] {
            Term::NamedNode(n) if n.as_str() == rdf::NIL.as_str() => break,
            Term::BlankNode(next) => current = next.clone(),
            _ => return None,
        }
    }
    Some((members, cells))
}

/// Finds every maximal `rdf:first`/`rdf:rest` chain in `statements` that terminates in
/// `rdf:nil` and has no extraneous outbound predicates on any of its cells.
///
/// A chain is only recognized from its start (a blank node never itself pointed to by
/// another cell's `rdf:rest`), so sub-chains of a larger collection are not
/// double-counted.
#[must_use]
pub fn detect_collections(statements: &[Statement]) -> Collections {
    let by_subject = index_by_subject(statements);

    let rest_targets: HashSet<&BlankNode> = statements
        .iter()
        .filter(|s| s.predicate.as_str() == rdf::REST.as_str())
        .filter_map(|s| s.object.as_blank_node())
        .collect();

    let mut candidate_starts: Vec<&BlankNode> = statements
        .iter()
        .filter(|s| s.predicate.as_str() == rdf::FIRST.as_str())
        .filter_map(|s| match &s.subject {
            Subject::BlankNode(b) if !rest_targets.contains(b) => Some(b),
            _ => None,
        })
        .collect();
    candidate_starts.sort();
    candidate_starts.dedup();

    let mut collections = Collections::default();
    for start in candidate_starts {
        if let Some((members, cells)) = walk_chain(&by_subject, start) {
            collections.list_cells.extend(cells);
            collections
                .by_start
                .insert(start.clone(), Collection { members });
        }
    }
    collections
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode as OxNamedNode;

    fn nn(iri: &str) -> NamedNode {
        OxNamedNode::new(iri).unwrap()
    }

    #[test]
    fn detects_a_two_element_collection() {
        let list = BlankNode::new("l0").unwrap();
        let rest = BlankNode::new("l1").unwrap();
        let statements = vec![
            Statement::new(
                Subject::BlankNode(list.clone()),
                nn(rdf::FIRST.as_str()),
                Term::NamedNode(nn("http://ex/x")),
            ),
            Statement::new(
                Subject::BlankNode(list.clone()),
                nn(rdf::REST.as_str()),
                Term::BlankNode(rest.clone()),
            ),
            Statement::new(
                Subject::BlankNode(rest.clone()),
                nn(rdf::FIRST.as_str()),
                Term::NamedNode(nn("http://ex/y")),
            ),
            Statement::new(
                Subject::BlankNode(rest),
                nn(rdf::REST.as_str()),
                Term::NamedNode(nn(rdf::NIL.as_str())),
            ),
        ];
        let collections = detect_collections(&statements);
        let found = collections.get(&list).unwrap();
        assert_eq!(
            found.members,
            vec![
                Term::NamedNode(nn("http://ex/x")),
                Term::NamedNode(nn("http://ex/y"))
            ]
        );
        assert_eq!(collections.list_cells.len(), 2);
    }

    #[test]
    fn a_cell_with_an_extra_predicate_is_not_a_collection() {
        let list = BlankNode::new("l0").unwrap();
        let statements = vec![
            Statement::new(
                Subject::BlankNode(list.clone()),
                nn(rdf::FIRST.as_str()),
                Term::NamedNode(nn("http://ex/x")),
            ),
            Statement::new(
                Subject::BlankNode(list.clone()),
                nn(rdf::REST.as_str()),
                Term::NamedNode(nn(rdf::NIL.as_str())),
            ),
            Statement::new(
                Subject::BlankNode(list),
                nn("http://ex/extra"),
                Term::NamedNode(nn("http://ex/z")),
            ),
        ];
        assert!(detect_collections(&statements).by_start.is_empty());
    }
}
