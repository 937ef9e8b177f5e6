// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ready to use [`NamedNodeRef`]s for the Web Ontology Language (OWL) vocabulary.

use const_format::formatcp;
use oxrdf::NamedNodeRef;
use std::sync::LazyLock;

pub const NS: &str = "http://www.w3.org/2002/07/owl#";
pub const PREFIX: &str = "owl";

pub static ONTOLOGY: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}Ontology")));
pub static CLASS: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}Class")));
pub static OBJECT_PROPERTY: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}ObjectProperty")));
pub static DATATYPE_PROPERTY: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}DatatypeProperty")));
pub static ANNOTATION_PROPERTY: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}AnnotationProperty")));
pub static NAMED_INDIVIDUAL: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}NamedIndividual")));
pub static THING: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}Thing")));
pub static EQUIVALENT_CLASS: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}equivalentClass")));
pub static EQUIVALENT_PROPERTY: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}equivalentProperty")));

/// Preference order used to pick the `rdf:type` that becomes the enclosing element
/// name in RDF/XML, and the order remaining types are listed in.
#[must_use]
pub fn preferred_type_rank(type_iri: &str) -> Option<usize> {
    [
        NAMED_INDIVIDUAL.as_str(),
        CLASS.as_str(),
        OBJECT_PROPERTY.as_str(),
        DATATYPE_PROPERTY.as_str(),
        ANNOTATION_PROPERTY.as_str(),
        ONTOLOGY.as_str(),
    ]
    .iter()
    .position(|iri| *iri == type_iri)
}
