// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The error taxonomy raised by the serializer: input defects, writer I/O failures,
//! and configuration errors are fatal; sort anomalies are logged and swallowed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    /// A blank-node cycle was found while `inline_blank_nodes` is enabled. Inlining
    /// requires acyclicity; the writer refuses to guess at a tie-breaking order.
    #[error("Blank node '{0}' participates in a cycle, which can not be inlined")]
    BlankNodeCycle(String),

    /// A blank node appears only as a subject, never as an object, while
    /// `inline_blank_nodes` is enabled. Such a node has no parent to nest under.
    #[error("Blank node '{0}' is a subject but never an object, so it can not be inlined")]
    UnreferencedBlankNodeSubject(String),

    /// Raised before any bytes are written: conflicting or unsupported option values.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Failure while writing into the (in-memory) output sink.
    #[error(transparent)]
    Write(#[from] std::fmt::Error),
}

pub type SerializeResult<T> = std::result::Result<T, SerializeError>;
