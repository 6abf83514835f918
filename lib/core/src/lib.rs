//! # paymo Core
//!
//! Core library for the paymo payment trust classifier.
//!
//! This crate provides the graph structures and algorithms:
//!
//! - [`RelationshipGraph`] - Undirected graph of parties built from batch payments
//! - [`distance`] - Bounded shortest-path query between two parties
//! - [`Classifier`] - Per-transaction `trusted` / `unverified` verdicts for a [`PolicyTier`]
//! - [`SharedGraph`] - Atomically swappable graph snapshot
//!
//! Malformed records never abort a run; they are collected in [`Diagnostics`].
//!
//! ## Example
//!
//! ```rust
//! use paymo_core::{Classifier, Diagnostics, PolicyTier, RelationshipGraph, Verdict};
//!
//! let batch = [
//!     "time, id1, id2, amount, message",
//!     "2016-11-02 09:49:29, 1, 2, 25.32, rent",
//!     "2016-11-02 09:49:29, 2, 3, 19.45, pizza",
//! ];
//! let mut diagnostics = Diagnostics::new();
//! let graph = RelationshipGraph::from_lines(batch, true, &mut diagnostics);
//!
//! let stream = ["2016-11-02 09:50:00, 1, 3, 5.00, tickets"];
//! let verdicts = Classifier::new(&graph, PolicyTier::Feature2)
//!     .classify(stream, false, &mut diagnostics);
//! assert_eq!(verdicts, vec![Verdict::Trusted]);
//! ```

pub mod classifier;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod oracle;
pub mod record;
pub mod snapshot;
pub mod tier;

pub use classifier::{classify_tiers, ClassifyOptions, Classifier, TierVerdicts};
pub use diagnostics::{Diagnostic, Diagnostics, RecordSource};
pub use error::{Error, ParseError, Result};
pub use graph::{BuildStats, GraphBuilder, RelationshipGraph};
pub use oracle::{distance, is_connected_within};
pub use record::{PartyId, Transaction};
pub use snapshot::SharedGraph;
pub use tier::{PolicyTier, Verdict};
