use paymo_core::PolicyTier;
use std::path::{Path, PathBuf};

/// Suite root used when only a test case name is given
pub const DEFAULT_SUITE_DIR: &str = "../insight_testsuite/tests";

const INPUT_DIR: &str = "paymo_input";
const OUTPUT_DIR: &str = "paymo_output";
const BATCH_FILE: &str = "batch_payment.txt";
const STREAM_FILE: &str = "stream_payment.txt";

/// Where a run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInputs {
    pub batch: PathBuf,
    pub stream: PathBuf,
    pub output_dir: PathBuf,
}

impl RunInputs {
    pub fn new(batch: impl Into<PathBuf>, stream: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            batch: batch.into(),
            stream: stream.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Resolve a named case of the test suite:
    /// `<suite>/<name>/paymo_input/{batch,stream}_payment.txt` in,
    /// `<suite>/<name>/paymo_output/` out.
    pub fn from_test_case<P: AsRef<Path>>(suite_dir: P, name: &str) -> Self {
        let case = suite_dir.as_ref().join(name);
        let input = case.join(INPUT_DIR);
        Self {
            batch: input.join(BATCH_FILE),
            stream: input.join(STREAM_FILE),
            output_dir: case.join(OUTPUT_DIR),
        }
    }

    /// Output file for one tier: `output1.txt`, `output2.txt`, `output3.txt`
    pub fn tier_output(&self, tier: PolicyTier) -> PathBuf {
        self.output_dir.join(format!("output{}.txt", tier.number()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_layout() {
        let inputs = RunInputs::from_test_case("suite", "test-2-graph-search");
        let case = Path::new("suite").join("test-2-graph-search");
        assert_eq!(inputs.batch, case.join("paymo_input").join("batch_payment.txt"));
        assert_eq!(inputs.stream, case.join("paymo_input").join("stream_payment.txt"));
        assert_eq!(inputs.output_dir, case.join("paymo_output"));
    }

    #[test]
    fn test_tier_output_names() {
        let inputs = RunInputs::new("b.txt", "s.txt", "out");
        let names: Vec<PathBuf> = PolicyTier::ALL.iter().map(|&t| inputs.tier_output(t)).collect();
        assert_eq!(
            names,
            vec![
                Path::new("out").join("output1.txt"),
                Path::new("out").join("output2.txt"),
                Path::new("out").join("output3.txt"),
            ]
        );
    }
}
