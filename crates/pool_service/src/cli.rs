//! Input handling for the `pool_match` batch CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use pool_core::cost::CostMode;
use pool_core::matching::MatchMode;
use serde_json::Value;

use crate::contract::{parse_match_batch, MatchBatch};

/// Read the batch text from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read batch from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Parse and validate a batch, then let command-line modes win over the file's.
pub fn load_batch(
    raw: &str,
    mode: Option<MatchMode>,
    cost_mode: Option<CostMode>,
) -> anyhow::Result<MatchBatch> {
    let body: Value = serde_json::from_str(raw).context("batch is not valid JSON")?;
    let mut batch = parse_match_batch(&body)?;
    apply_overrides(&mut batch, mode, cost_mode);
    Ok(batch)
}

pub fn apply_overrides(
    batch: &mut MatchBatch,
    mode: Option<MatchMode>,
    cost_mode: Option<CostMode>,
) {
    if let Some(mode) = mode {
        batch.options.mode = mode;
    }
    if let Some(cost_mode) = cost_mode {
        batch.options.cost_mode = cost_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch_text() -> String {
        json!({
            "vehicles": [{"id": "d1", "lat": 28.7, "lng": 77.1, "etaMin": 5, "capacity": 2}],
            "requests": [{
                "id": "r1",
                "src": {"lat": 28.705, "lng": 77.11},
                "dst": {"lat": 28.72, "lng": 77.12}
            }],
            "mode": "greedy",
            "costMode": "real"
        })
        .to_string()
    }

    #[test]
    fn flags_override_file_modes() {
        let (mode, cost_mode) = (Some(MatchMode::Mcmf), Some(CostMode::Approx));
        let batch = load_batch(&batch_text(), mode, cost_mode).expect("batch");
        assert_eq!(batch.options.mode, MatchMode::Mcmf);
        assert_eq!(batch.options.cost_mode, CostMode::Approx);
        assert_eq!(batch.vehicles.len(), 1);
    }

    #[test]
    fn file_modes_stand_without_flags() {
        let batch = load_batch(&batch_text(), None, None).expect("batch");
        assert_eq!(batch.options.mode, MatchMode::Greedy);
        assert_eq!(batch.options.cost_mode, CostMode::Real);
    }

    #[test]
    fn single_override_leaves_the_other_mode() {
        let mut batch = load_batch(&batch_text(), None, None).expect("batch");
        apply_overrides(&mut batch, None, Some(CostMode::Approx));
        assert_eq!(batch.options.mode, MatchMode::Greedy);
        assert_eq!(batch.options.cost_mode, CostMode::Approx);
    }

    #[test]
    fn malformed_json_names_the_batch() {
        let error = load_batch("{not json", None, None).expect_err("should fail");
        let chain = format!("{error:#}");
        assert!(chain.starts_with("batch is not valid JSON: "), "{chain}");
    }

    #[test]
    fn invalid_batch_surfaces_validation_message() {
        let raw = r#"{"vehicles": 1, "requests": []}"#;
        let error = load_batch(raw, None, None).expect_err("should fail");
        assert_eq!(error.to_string(), "drivers and requests must be arrays");
    }

    #[test]
    fn reads_batch_files_and_names_missing_ones() {
        let file_name = format!("pool_match_{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        fs::write(&path, batch_text()).expect("write batch");
        let raw = read_input(&path).expect("read batch");
        fs::remove_file(&path).expect("remove batch");
        assert_eq!(raw, batch_text());

        let error = read_input(&path).expect_err("file is gone");
        let expected = format!("failed to read '{}'", path.display());
        assert_eq!(error.to_string(), expected);
    }
}
