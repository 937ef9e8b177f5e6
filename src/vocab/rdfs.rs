// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ready to use [`NamedNodeRef`]s for the RDF Schema vocabulary.

use const_format::formatcp;
use oxrdf::NamedNodeRef;
use std::sync::LazyLock;

pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const PREFIX: &str = "rdfs";

pub static SUB_CLASS_OF: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}subClassOf")));
pub static SUB_PROPERTY_OF: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}subPropertyOf")));
pub static DOMAIN: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}domain")));
pub static RANGE: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}range")));
pub static LABEL: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}label")));
pub static COMMENT: LazyLock<NamedNodeRef> =
    LazyLock::new(|| NamedNodeRef::new_unchecked(formatcp!("{NS}comment")));
