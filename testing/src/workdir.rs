use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::negotiation_record::NegotiationRecord;

fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("test-workdir")
}

pub fn prepare_test_dir(dir_name: &str) -> anyhow::Result<PathBuf> {
    // Windows can't handle colons
    let test_dir = test_data_dir().join(dir_name.replace("::", "_"));

    if test_dir.exists() {
        fs::remove_dir_all(&test_dir)
            .with_context(|| format!("Removing test directory: {}", test_dir.display()))?;
    }
    fs::create_dir_all(&test_dir)
        .with_context(|| format!("Creating test directory: {}", test_dir.display()))?;
    Ok(test_dir)
}

/// Dumps conversation transcript, so failed tests can be inspected later.
pub fn save_record(test_dir: &Path, record: &NegotiationRecord) -> anyhow::Result<()> {
    let path = test_dir.join("negotiation.json");
    fs::write(&path, serde_json::to_string_pretty(record)?)
        .with_context(|| format!("Writing negotiation record: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barter_negotiator_component::{Action, Event, ItemMap};

    #[test]
    fn test_save_record_with_agent_messages() {
        let test_dir = prepare_test_dir("workdir::test_save_record_with_agent_messages").unwrap();

        let mut record = NegotiationRecord::new(10);
        record.agent(Action::message("How about I get 1 book?"));
        record.opponent(Event::Select);
        record.agent(Action::Select(ItemMap::new(1, 0, 0)));

        save_record(&test_dir, &record).unwrap();

        let saved = fs::read_to_string(test_dir.join("negotiation.json")).unwrap();
        let stages: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(stages["stages"].as_array().map(Vec::len), Some(3));
        assert!(saved.contains("How about I get 1 book?"));
    }
}
