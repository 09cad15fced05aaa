use super::router::{SinkError, SinkRouter};
use super::routing::RoutingTable;
use crate::rules::RuleId;
use serde::Deserialize;
use serde_json::Value;
use std::io::BufRead;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct MatchingRule {
    id: RuleId,
}

/// One recorded stream item and the rules it matched
#[derive(Debug, Deserialize)]
pub struct CaptureRecord {
    pub data: Value,
    #[serde(default)]
    matching_rules: Vec<MatchingRule>,
}

impl CaptureRecord {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn matched_ids(&self) -> impl Iterator<Item = &str> {
        self.matching_rules.iter().map(|rule| rule.id.as_str())
    }
}

/// Counters from one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub records: usize,
    pub writes: usize,
    pub skipped: usize,
}

/// Route every record of a JSON-lines capture through `table`
///
/// Blank lines are ignored and lines that are not capture records are
/// counted as skipped. Stops after `limit` records when given.
pub fn replay<R: BufRead>(
    reader: R,
    source: &str,
    table: &RoutingTable,
    router: &mut dyn SinkRouter,
    limit: Option<usize>,
) -> Result<ReplayStats, SinkError> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|limit| stats.records >= limit) {
            break;
        }

        let line = line.map_err(|source_err| SinkError::Capture {
            path: source.to_string(),
            source: source_err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match CaptureRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping capture line");
                stats.skipped += 1;
                continue;
            }
        };

        let data = record.data.to_string();
        stats.writes += table.route(router, &data, record.matched_ids())?;
        stats.records += 1;
    }

    info!(
        records = stats.records,
        writes = stats.writes,
        skipped = stats.skipped,
        "replay finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{HandleId, HandleRegistry, RuleRegistry};

    #[derive(Default)]
    struct Recorder {
        writes: Vec<(HandleId, String)>,
    }

    impl SinkRouter for Recorder {
        fn write(&mut self, sink: HandleId, record: &str) -> Result<(), SinkError> {
            self.writes.push((sink, record.to_string()));
            Ok(())
        }

        fn close(&mut self, _sink: HandleId) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn table() -> RoutingTable {
        let mut rules = RuleRegistry::default();
        rules.insert(Some("cats"), Some("1".into()), "cat", "...");
        let mut handles = HandleRegistry::new();
        handles.add("cats", "cats.jsonl", vec!["1".into()]);
        RoutingTable::build(&rules, &handles)
    }

    #[test]
    fn test_replay_routes_data_payload() {
        let capture = concat!(
            r#"{"data": {"text": "a cat"}, "matching_rules": [{"id": "1"}]}"#,
            "\n\n",
            r#"{"data": {"text": "a dog"}, "matching_rules": [{"id": "2"}]}"#,
            "\n",
            "garbage\n",
        );
        let mut recorder = Recorder::default();

        let stats = replay(capture.as_bytes(), "test", &table(), &mut recorder, None).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                records: 2,
                writes: 1,
                skipped: 1
            }
        );
        assert_eq!(recorder.writes, vec![(0, r#"{"text":"a cat"}"#.to_string())]);
    }

    #[test]
    fn test_replay_respects_limit() {
        let capture = concat!(
            r#"{"data": 1, "matching_rules": [{"id": "1"}]}"#,
            "\n",
            r#"{"data": 2, "matching_rules": [{"id": "1"}]}"#,
            "\n",
        );
        let mut recorder = Recorder::default();
        let stats = replay(capture.as_bytes(), "test", &table(), &mut recorder, Some(1)).unwrap();
        assert_eq!(stats.records, 1);
        assert_eq!(recorder.writes.len(), 1);
    }
}
