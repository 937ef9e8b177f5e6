// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The RDF value taxonomy: IRIs, blank nodes, literals, and the statements built from
//! them. All three term kinds are re-exported from [`oxrdf`] rather than reinvented;
//! this module only adds the owned [`Subject`]/[`Term`] variant wrappers and the
//! [`Statement`] record the rest of the crate is built around.

pub use oxrdf::{BlankNode, Literal, NamedNode};

/// A subject of a statement: either an IRI or a blank node.
///
/// Named graphs are out of scope, so unlike [`oxrdf::Subject`] this has no
/// quoted-triple variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl From<NamedNode> for Subject {
    fn from(value: NamedNode) -> Self {
        Self::NamedNode(value)
    }
}

impl From<BlankNode> for Subject {
    fn from(value: BlankNode) -> Self {
        Self::BlankNode(value)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamedNode(n) => write!(f, "{n}"),
            Self::BlankNode(b) => write!(f, "{b}"),
        }
    }
}

/// An RDF term: an IRI, a blank node, or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl From<NamedNode> for Term {
    fn from(value: NamedNode) -> Self {
        Self::NamedNode(value)
    }
}

impl From<BlankNode> for Term {
    fn from(value: BlankNode) -> Self {
        Self::BlankNode(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<Subject> for Term {
    fn from(value: Subject) -> Self {
        match value {
            Subject::NamedNode(n) => Self::NamedNode(n),
            Subject::BlankNode(b) => Self::BlankNode(b),
        }
    }
}

impl Term {
    #[must_use]
    pub const fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Self::BlankNode(b) => Some(b),
            Self::NamedNode(_) | Self::Literal(_) => None,
        }
    }

    #[must_use]
    pub const fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Self::NamedNode(n) => Some(n),
            Self::BlankNode(_) | Self::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamedNode(n) => write!(f, "{n}"),
            Self::BlankNode(b) => write!(f, "{b}"),
            Self::Literal(l) => write!(f, "{l}"),
        }
    }
}

/// One `(subject, predicate, object)` assertion in the default graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Subject,
    pub predicate: NamedNode,
    pub object: Term,
}

impl Statement {
    #[must_use]
    pub const fn new(subject: Subject, predicate: NamedNode, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}
