// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Builds the sorted graph index: the subject -> predicate -> object tree in
//! canonical order, the sorted ontology subset, and the sorted blank-node list the
//! relabeler walks.
//!
//! This is also where the comparator/relabeler circularity of `compare.rs` is
//! resolved: blank-node structural signatures are computed here, before any
//! sorting happens, and handed to the comparator as read-only context.

use std::collections::{BTreeMap, HashMap, HashSet};

use oxrdf::vocab::rdf;

use crate::compare::{self, CompareContext};
use crate::term::{BlankNode, NamedNode, Statement, Subject, Term};
use crate::vocab::owl;

/// One subject's sorted predicate/object tree.
#[derive(Debug, Clone)]
pub struct SortedSubject {
    pub subject: Subject,
    pub predicates: Vec<SortedPredicate>,
    /// Whether this subject carries `(s, rdf:type, owl:Ontology)`; ontology subjects
    /// sort before all others and are the `inferBaseIri` candidate.
    pub is_ontology: bool,
}

#[derive(Debug, Clone)]
pub struct SortedPredicate {
    pub predicate: NamedNode,
    pub objects: Vec<Term>,
}

/// The fully sorted view of a graph, ready for the base writer.
#[derive(Debug)]
pub struct SortedIndex {
    /// Ontology subjects (`rdf:type owl:Ontology`) first, then every other subject;
    /// each in canonical order throughout.
    pub subjects: Vec<SortedSubject>,
    /// Every blank node reachable as subject or object, in canonical order.
    pub blank_nodes: Vec<BlankNode>,
}

type Adjacency = HashMap<Subject, Vec<(NamedNode, Term)>>;

fn build_adjacency(statements: &[Statement]) -> Adjacency {
    let mut adjacency: Adjacency = HashMap::new();
    for statement in statements {
        adjacency
            .entry(statement.subject.clone())
            .or_default()
            .push((statement.predicate.clone(), statement.object.clone()));
    }
    adjacency
}

fn all_blank_nodes(statements: &[Statement]) -> HashSet<BlankNode> {
    let mut nodes = HashSet::new();
    for statement in statements {
        if let Subject::BlankNode(b) = &statement.subject {
            nodes.insert(b.clone());
        }
        if let Term::BlankNode(b) = &statement.object {
            nodes.insert(b.clone());
        }
    }
    nodes
}

fn term_signature(
    term: &Term,
    adjacency: &Adjacency,
    memo: &mut HashMap<BlankNode, String>,
    visiting: &mut HashSet<BlankNode>,
) -> String {
    match term {
        Term::NamedNode(n) => format!("I:{}", n.as_str()),
        Term::Literal(l) => format!(
            "L:{}\u{1}{}\u{1}{}",
            l.value(),
            l.language().unwrap_or_default(),
            l.datatype().as_str()
        ),
        Term::BlankNode(b) => format!("B:{}", blank_node_signature(b, adjacency, memo, visiting)),
    }
}

/// Computes a canonical string signature for `node`'s outbound content, recursing
/// into blank-node objects. Nodes already on the recursion stack (a blank-node cycle)
/// are rendered as a fixed sentinel rather than recursed into again.
fn blank_node_signature(
    node: &BlankNode,
    adjacency: &Adjacency,
    memo: &mut HashMap<BlankNode, String>,
    visiting: &mut HashSet<BlankNode>,
) -> String {
    if let Some(sig) = memo.get(node) {
        return sig.clone();
    }
    if visiting.contains(node) {
        return "<cycle>".to_string();
    }
    visiting.insert(node.clone());

    let mut by_predicate: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(entries) = adjacency.get(&Subject::BlankNode(node.clone())) {
        for (predicate, object) in entries {
            by_predicate
                .entry(predicate.as_str().to_string())
                .or_default()
                .push(term_signature(object, adjacency, memo, visiting));
        }
    }
    let mut parts = Vec::with_capacity(by_predicate.len());
    for (predicate, mut object_sigs) in by_predicate {
        object_sigs.sort();
        parts.push(format!("{predicate}=[{}]", object_sigs.join(",")));
    }
    let signature = format!("{{{}}}", parts.join(";"));

    visiting.remove(node);
    memo.insert(node.clone(), signature.clone());
    signature
}

fn compute_signatures(statements: &[Statement], adjacency: &Adjacency) -> HashMap<BlankNode, String> {
    let mut memo = HashMap::new();
    let mut visiting = HashSet::new();
    for node in all_blank_nodes(statements) {
        blank_node_signature(&node, adjacency, &mut memo, &mut visiting);
    }
    memo
}

fn is_ontology(predicates: &[SortedPredicate]) -> bool {
    predicates.iter().any(|p| {
        p.predicate.as_str() == rdf::TYPE.as_str()
            && p.objects
                .iter()
                .any(|o| matches!(o, Term::NamedNode(n) if n.as_str() == owl::ONTOLOGY.as_str()))
    })
}

/// Builds the sorted index for `statements`. Any size mismatch between the input
/// triple count and the sorted triple count is logged as a non-fatal diagnostic
/// rather than failing the whole serialization.
#[must_use]
pub fn build(statements: &[Statement]) -> SortedIndex {
    let adjacency = build_adjacency(statements);
    let signatures = compute_signatures(statements, &adjacency);
    let ctx = CompareContext::new(&signatures);

    let mut subjects: Vec<SortedSubject> = adjacency
        .iter()
        .map(|(subject, entries)| {
            let mut by_predicate: HashMap<NamedNode, Vec<Term>> = HashMap::new();
            for (predicate, object) in entries {
                by_predicate
                    .entry(predicate.clone())
                    .or_default()
                    .push(object.clone());
            }
            let mut predicates: Vec<SortedPredicate> = by_predicate
                .into_iter()
                .map(|(predicate, mut objects)| {
                    objects.sort_by(|a, b| compare::term_cmp(&ctx, a, b));
                    SortedPredicate { predicate, objects }
                })
                .collect();
            predicates.sort_by(|a, b| compare::predicate_cmp(&a.predicate, &b.predicate));
            let is_ontology = is_ontology(&predicates);
            SortedSubject {
                subject: subject.clone(),
                predicates,
                is_ontology,
            }
        })
        .collect();
    subjects.sort_by(|a, b| compare::subject_cmp(&ctx, &a.subject, &b.subject));

    let sorted_triples: usize = subjects
        .iter()
        .map(|s| s.predicates.iter().map(|p| p.objects.len()).sum::<usize>())
        .sum();
    if sorted_triples != statements.len() {
        tracing::warn!(
            input_triples = statements.len(),
            sorted_triples,
            "sorted graph index has a different statement count than the input graph"
        );
    }

    let (ontologies, rest): (Vec<_>, Vec<_>) = subjects.into_iter().partition(|s| s.is_ontology);
    subjects = ontologies.into_iter().chain(rest).collect();

    let mut blank_nodes: Vec<BlankNode> = all_blank_nodes(statements).into_iter().collect();
    blank_nodes.sort_by(|a, b| compare::blank_node_cmp(&ctx, a, b));

    SortedIndex {
        subjects,
        blank_nodes,
    }
}
