//! # paymo
//!
//! Classifies streamed payments as `trusted` or `unverified` depending on
//! whether the two parties are already connected, within a small number of
//! hops, in the graph of historical payments.
//!
//! ## Quick Start
//!
//! ### As a Command
//!
//! ```bash
//! antifraud paymo_input/batch_payment.txt paymo_input/stream_payment.txt paymo_output
//! ```
//!
//! This writes `output1.txt`, `output2.txt` and `output3.txt`, one verdict
//! per stream line, for the three policy tiers (1, 2 and 4 hops).
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use paymo::prelude::*;
//!
//! let inputs = RunInputs::new("batch_payment.txt", "stream_payment.txt", "paymo_output");
//! let runner = Runner::new(RunConfig::default()).unwrap();
//! let report = runner.run(&inputs).unwrap();
//! for tier in &report.tiers {
//!     println!("{}: {} trusted", tier.tier, tier.trusted);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `paymo-core` - Relationship graph, bounded distance oracle, classifier
//! - `paymo-io` - Line readers, atomic verdict files, run reports and the runner

// Re-export core types
pub use paymo_core::{
    classify_tiers, distance, is_connected_within,
    Classifier, ClassifyOptions, TierVerdicts,
    Diagnostic, Diagnostics, RecordSource,
    RelationshipGraph, GraphBuilder, BuildStats, SharedGraph,
    PartyId, Transaction, PolicyTier, Verdict,
    Error, ParseError, Result,
};

// Re-export I/O
pub use paymo_io::{RunConfig, RunInputs, RunReport, Runner, TierReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Classifier, Diagnostics, PolicyTier, RelationshipGraph, Verdict,
        RunConfig, RunInputs, Runner,
        Error, Result,
    };
}
