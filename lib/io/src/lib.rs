pub mod layout;
pub mod reader;
pub mod report;
pub mod runner;
pub mod writer;

pub use layout::RunInputs;
pub use reader::LineReader;
pub use report::{BatchReport, RunReport, TierReport};
pub use runner::{RunConfig, Runner};
pub use writer::VerdictWriter;
