// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The total order over terms, predicates and subjects that makes serialization
//! deterministic. Fixing a variant rank (IRI < BlankNode < Literal) and comparing
//! everything else structurally is what makes the sorted output independent of
//! insertion order and of any particular blank-node labelling scheme.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::term::{BlankNode, Literal, NamedNode, Subject, Term};
use crate::vocab::{owl, rdfs};
use oxrdf::vocab::rdf;

/// Predicates that sort before every other predicate under a given subject, in this
/// order; anything not on this list sorts after all of them, by IRI.
fn first_predicates() -> [&'static str; 9] {
    [
        rdf::TYPE.as_str(),
        rdfs::SUB_CLASS_OF.as_str(),
        rdfs::SUB_PROPERTY_OF.as_str(),
        owl::EQUIVALENT_CLASS.as_str(),
        owl::EQUIVALENT_PROPERTY.as_str(),
        rdfs::DOMAIN.as_str(),
        rdfs::RANGE.as_str(),
        rdfs::LABEL.as_str(),
        rdfs::COMMENT.as_str(),
    ]
}

fn predicate_priority(iri: &str) -> Option<usize> {
    first_predicates().iter().position(|p| *p == iri)
}

/// Carries the memoized blank-node structural signatures that break the
/// comparator/relabeler circularity (see [`crate::index`]): during sorting, two blank
/// nodes are compared by the sorted rendering of their own outbound content rather
/// than by a label that doesn't exist yet.
pub struct CompareContext<'a> {
    pub signatures: &'a HashMap<BlankNode, String>,
}

impl<'a> CompareContext<'a> {
    #[must_use]
    pub const fn new(signatures: &'a HashMap<BlankNode, String>) -> Self {
        Self { signatures }
    }

    fn signature(&self, node: &BlankNode) -> &str {
        self.signatures
            .get(node)
            .map_or("", std::string::String::as_str)
    }
}

/// Lexicographic IRI comparison (spec rule: no special-casing here; `rdf:type`'s
/// priority is a predicate-ordering concern, not a generic term-ordering one).
#[must_use]
pub fn named_node_cmp(a: &NamedNode, b: &NamedNode) -> Ordering {
    a.as_str().cmp(b.as_str())
}

/// Predicates sort by [`first_predicates`] priority, then by IRI.
#[must_use]
pub fn predicate_cmp(a: &NamedNode, b: &NamedNode) -> Ordering {
    match (predicate_priority(a.as_str()), predicate_priority(b.as_str())) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => named_node_cmp(a, b),
    }
}

/// Lexical form, then language tag (absent before present, else lexicographic), then
/// datatype IRI.
#[must_use]
pub fn literal_cmp(a: &Literal, b: &Literal) -> Ordering {
    let value_cmp = a.value().cmp(b.value());
    if value_cmp != Ordering::Equal {
        return value_cmp;
    }
    let lang_cmp = match (a.language(), b.language()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    };
    if lang_cmp != Ordering::Equal {
        return lang_cmp;
    }
    a.datatype().as_str().cmp(b.datatype().as_str())
}

/// Structural blank-node comparison by memoized signature, with a stable-order
/// fallback (first-encounter order is preserved by the caller's sort) for genuinely
/// isomorphic nodes whose signatures are identical.
#[must_use]
pub fn blank_node_cmp(ctx: &CompareContext, a: &BlankNode, b: &BlankNode) -> Ordering {
    ctx.signature(a).cmp(ctx.signature(b))
}

fn term_rank(term: &Term) -> u8 {
    match term {
        Term::NamedNode(_) => 0,
        Term::BlankNode(_) => 1,
        Term::Literal(_) => 2,
    }
}

#[must_use]
pub fn term_cmp(ctx: &CompareContext, a: &Term, b: &Term) -> Ordering {
    match (a, b) {
        (Term::NamedNode(a), Term::NamedNode(b)) => named_node_cmp(a, b),
        (Term::BlankNode(a), Term::BlankNode(b)) => blank_node_cmp(ctx, a, b),
        (Term::Literal(a), Term::Literal(b)) => literal_cmp(a, b),
        _ => term_rank(a).cmp(&term_rank(b)),
    }
}

fn subject_rank(subject: &Subject) -> u8 {
    match subject {
        Subject::NamedNode(_) => 0,
        Subject::BlankNode(_) => 1,
    }
}

#[must_use]
pub fn subject_cmp(ctx: &CompareContext, a: &Subject, b: &Subject) -> Ordering {
    match (a, b) {
        (Subject::NamedNode(a), Subject::NamedNode(b)) => named_node_cmp(a, b),
        (Subject::BlankNode(a), Subject::BlankNode(b)) => blank_node_cmp(ctx, a, b),
        _ => subject_rank(a).cmp(&subject_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode as OxNamedNode;

    #[test]
    fn rdf_type_sorts_before_other_predicates() {
        let type_pred = OxNamedNode::new(rdf::TYPE.as_str()).unwrap();
        let other = OxNamedNode::new("http://ex/p").unwrap();
        assert_eq!(predicate_cmp(&type_pred, &other), Ordering::Less);
    }

    #[test]
    fn named_node_before_blank_node_before_literal() {
        let ctx = CompareContext::new(&HashMap::new());
        let iri = Term::NamedNode(OxNamedNode::new("http://ex/a").unwrap());
        let bnode = Term::BlankNode(BlankNode::new("b0").unwrap());
        let lit = Term::Literal(Literal::new_simple_literal("x"));
        assert_eq!(term_cmp(&ctx, &iri, &bnode), Ordering::Less);
        assert_eq!(term_cmp(&ctx, &bnode, &lit), Ordering::Less);
    }

    #[test]
    fn literal_without_language_sorts_before_one_with() {
        let plain = Literal::new_simple_literal("x");
        let tagged = Literal::new_language_tagged_literal("x", "en").unwrap();
        assert_eq!(literal_cmp(&plain, &tagged), Ordering::Less);
    }
}
