// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed vocabulary terms beyond what [`oxrdf::vocab`] already provides (`rdf`, `xsd`),
//! needed for predicate-priority ordering, preferred-type resolution, and collection
//! detection.

pub mod owl;
pub mod rdfs;
