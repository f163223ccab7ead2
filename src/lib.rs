//! Iggy confronts signed influence graphs with observations of changes between two states.
//!
//! Networks and observation profiles are turned into canonical facts ([graph]),
//! which are evaluated by an answer set solver ([asp]) using rule modules selected from the consistency semantics ([encodings]).
//! The [query] engine checks consistency, computes labelings, predictions and minimal inconsistent cores, and repairs networks,
//! while the [repair] module implements a greedy search for edges to add under the elementary path semantics.

#![warn(missing_docs)]

pub mod asp;

pub mod encodings;

pub mod graph;

pub mod io;

pub mod query;

pub mod repair;
