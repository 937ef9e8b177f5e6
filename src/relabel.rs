// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical blank-node label assignment, and the inline-eligibility analysis that
//! decides which blank nodes get nested inline (`[ ... ]` in Turtle, a child element
//! in RDF/XML) instead of a label.

use std::collections::{HashMap, HashSet};

use crate::error::SerializeError;
use crate::term::{BlankNode, Statement, Subject, Term};

/// `_:a<k>` labels assigned strictly by position in the already-sorted blank-node
/// list; this pass performs no further comparisons.
#[must_use]
pub fn assign_labels(sorted_blank_nodes: &[BlankNode]) -> HashMap<BlankNode, String> {
    sorted_blank_nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.clone(), format!("_:a{}", index + 1)))
        .collect()
}

/// Which blank nodes are eligible to be rendered inline (nested at their one
/// referencing occurrence) rather than by label, plus the validation that
/// `inline_blank_nodes` requires: no cycles, and no blank-node subject that is never
/// an object (such a node would have nowhere to be nested).
#[derive(Debug, Default)]
pub struct InlinePlan {
    pub inlineable: HashSet<BlankNode>,
}

impl InlinePlan {
    #[must_use]
    pub fn is_inlineable(&self, node: &BlankNode) -> bool {
        self.inlineable.contains(node)
    }
}

fn blank_node_adjacency(statements: &[Statement]) -> HashMap<BlankNode, Vec<BlankNode>> {
    let mut adjacency: HashMap<BlankNode, Vec<BlankNode>> = HashMap::new();
    for statement in statements {
        if let Subject::BlankNode(subject) = &statement.subject {
            if let Term::BlankNode(object) = &statement.object {
                adjacency.entry(subject.clone()).or_default().push(object.clone());
            }
        }
    }
    adjacency
}

fn find_cycle(adjacency: &HashMap<BlankNode, Vec<BlankNode>>) -> Option<BlankNode> {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();

    fn visit(
        node: &BlankNode,
        adjacency: &HashMap<BlankNode, Vec<BlankNode>>,
        visited: &mut HashSet<BlankNode>,
        on_stack: &mut HashSet<BlankNode>,
    ) -> Option<BlankNode> {
        if on_stack.contains(node) {
            return Some(node.clone());
        }
        if visited.contains(node) {
            return None;
        }
        visited.insert(node.clone());
        on_stack.insert(node.clone());
        if let Some(children) = adjacency.get(node) {
            for child in children {
                if let Some(cycle) = visit(child, adjacency, visited, on_stack) {
                    return Some(cycle);
                }
            }
        }
        on_stack.remove(node);
        None
    }

    let mut starts: Vec<&BlankNode> = adjacency.keys().collect();
    starts.sort();
    for start in starts {
        if let Some(cycle) = visit(start, adjacency, &mut visited, &mut on_stack) {
            return Some(cycle);
        }
    }
    None
}

/// Builds the inline plan for `statements`, or fails per the `inline_blank_nodes`
/// invariants of the option it backs.
pub fn plan_inlining(statements: &[Statement], enabled: bool) -> Result<InlinePlan, SerializeError> {
    if !enabled {
        return Ok(InlinePlan::default());
    }

    let adjacency = blank_node_adjacency(statements);
    if let Some(cycle) = find_cycle(&adjacency) {
        return Err(SerializeError::BlankNodeCycle(cycle.to_string()));
    }

    let mut object_occurrences: HashMap<BlankNode, usize> = HashMap::new();
    let mut subject_blank_nodes: HashSet<BlankNode> = HashSet::new();
    for statement in statements {
        if let Subject::BlankNode(subject) = &statement.subject {
            subject_blank_nodes.insert(subject.clone());
        }
        if let Term::BlankNode(object) = &statement.object {
            *object_occurrences.entry(object.clone()).or_insert(0) += 1;
        }
    }

    let mut unreferenced: Vec<&BlankNode> = subject_blank_nodes
        .iter()
        .filter(|b| !object_occurrences.contains_key(*b))
        .collect();
    unreferenced.sort();
    if let Some(first) = unreferenced.first() {
        return Err(SerializeError::UnreferencedBlankNodeSubject(
            first.to_string(),
        ));
    }

    let inlineable = object_occurrences
        .into_iter()
        .filter(|(_, count)| *count == 1)
        .map(|(node, _)| node)
        .collect();

    Ok(InlinePlan { inlineable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn nn(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn labels_follow_sorted_position() {
        let a = BlankNode::new("a").unwrap();
        let b = BlankNode::new("b").unwrap();
        let labels = assign_labels(&[a.clone(), b.clone()]);
        assert_eq!(labels[&a], "_:a1");
        assert_eq!(labels[&b], "_:a2");
    }

    #[test]
    fn a_blank_node_subject_never_used_as_an_object_is_rejected() {
        let parent = BlankNode::new("p").unwrap();
        let child = BlankNode::new("c").unwrap();
        let statements = vec![Statement::new(
            Subject::BlankNode(parent),
            nn("http://ex/p"),
            Term::BlankNode(child),
        )];
        assert!(matches!(
            plan_inlining(&statements, true),
            Err(SerializeError::UnreferencedBlankNodeSubject(_))
        ));
    }

    #[test]
    fn singly_referenced_blank_node_is_inlineable() {
        let parent = BlankNode::new("p").unwrap();
        let child = BlankNode::new("c").unwrap();
        let statements = vec![
            Statement::new(
                Subject::NamedNode(nn("http://ex/root")),
                nn("http://ex/has"),
                Term::BlankNode(parent.clone()),
            ),
            Statement::new(
                Subject::BlankNode(parent),
                nn("http://ex/p"),
                Term::BlankNode(child.clone()),
            ),
        ];
        let plan = plan_inlining(&statements, true).unwrap();
        assert!(plan.is_inlineable(&child));
    }

    #[test]
    fn a_cycle_is_rejected_when_inlining_is_requested() {
        let a = BlankNode::new("a").unwrap();
        let b = BlankNode::new("b").unwrap();
        let statements = vec![
            Statement::new(
                Subject::BlankNode(a.clone()),
                nn("http://ex/next"),
                Term::BlankNode(b.clone()),
            ),
            Statement::new(
                Subject::BlankNode(b),
                nn("http://ex/next"),
                Term::BlankNode(a),
            ),
        ];
        assert!(matches!(
            plan_inlining(&statements, true),
            Err(SerializeError::BlankNodeCycle(_))
        ));
    }

    #[test]
    fn multiply_referenced_blank_nodes_are_not_inlined() {
        let shared = BlankNode::new("s").unwrap();
        let statements = vec![
            Statement::new(
                Subject::NamedNode(nn("http://ex/a")),
                nn("http://ex/p"),
                Term::BlankNode(shared.clone()),
            ),
            Statement::new(
                Subject::NamedNode(nn("http://ex/b")),
                nn("http://ex/p"),
                Term::BlankNode(shared.clone()),
            ),
            Statement::new(
                Subject::BlankNode(shared.clone()),
                nn("http://ex/q"),
                Term::Literal(oxrdf::Literal::new_simple_literal("x")),
            ),
        ];
        let plan = plan_inlining(&statements, true).unwrap();
        assert!(!plan.is_inlineable(&shared));
    }
}
