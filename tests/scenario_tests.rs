use std::io::Write;

use sssp_engine::{EngineError, EngineResult, QueryPolicy, Scenario};

const SAMPLE: &str = r#"{
    "num_entries": 6,
    "edges": [[0,1],[1,2],[1,3],[2,3],[2,1],[3,1],[3,4],[4,5],[4,1]],
    "queries": [[0,5],[0,4],[5,0],[1,1],[2,4]]
}"#;

#[test]
fn test_scenario_runs_each_query_on_restored_graph() {
    let scenario = Scenario::from_json(SAMPLE).unwrap();
    assert_eq!(scenario.query_policy, QueryPolicy::Defer);
    let report = scenario.run(false).unwrap();
    let summary: Vec<(usize, usize, EngineResult, u64)> = report
        .outcomes
        .iter()
        .map(|o| (o.src, o.dst, o.result, o.latency))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 5, EngineResult::found(4), 25),
            (0, 4, EngineResult::found(3), 19),
            (5, 0, EngineResult::unreachable(), 11),
            (1, 1, EngineResult::found(2), 13),
            (2, 4, EngineResult::found(2), 17),
        ]
    );
    assert_eq!(report.stats.cycles, 124);
    assert_eq!(report.stats.queries_started, 5);
    assert!(report.traces.is_empty());
}

#[test]
fn test_scenario_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let scenario = Scenario::from_path(file.path()).unwrap();
    assert_eq!(scenario.edges.len(), 9);
    assert_eq!(scenario.queries.len(), 5);
}

#[test]
fn test_scenario_rejects_out_of_range_edge() {
    let err = Scenario::from_json(r#"{"num_entries": 3, "edges": [[0, 3]]}"#).unwrap_err();
    assert!(matches!(err, EngineError::Scenario(_)));
    let err = Scenario::from_json(r#"{"num_entries": 3, "queries": [[4, 0]]}"#).unwrap_err();
    assert!(matches!(err, EngineError::Scenario(_)));
    let err = Scenario::from_json(r#"{"num_entries": 0}"#).unwrap_err();
    assert!(matches!(err, EngineError::InvalidCapacity(_)));
    let err = Scenario::from_json("not json").unwrap_err();
    assert!(matches!(err, EngineError::Json(_)));
}

#[test]
fn test_scenario_cycle_bound() {
    let mut scenario = Scenario::from_json(SAMPLE).unwrap();
    scenario.max_cycles = Some(5);
    assert!(matches!(scenario.run(false), Err(EngineError::Timeout(5))));
}

#[test]
fn test_scenario_report_serializes() {
    let scenario = Scenario::from_json(SAMPLE).unwrap();
    let report = scenario.run(false).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["outcomes"][0]["result"]["hops"], 4);
    assert_eq!(value["outcomes"][2]["result"]["found"], false);
    assert!(value.get("traces").is_none());
}
