use sssp_engine::{
    EngineConfig, EngineError, EngineMsg, EngineResult, Harness, QueryPolicy, SsspEngine,
    bench_utils::{GraphShape, generate_graph},
};

fn sample_events() -> Vec<EngineMsg> {
    vec![
        EngineMsg::edge(0, 1),
        EngineMsg::edge(1, 2),
        EngineMsg::edge(1, 3),
        EngineMsg::edge(2, 3),
        EngineMsg::edge(2, 1),
        EngineMsg::edge(3, 1),
        EngineMsg::edge(3, 4),
        EngineMsg::edge(4, 5),
        EngineMsg::edge(4, 1),
        EngineMsg::query(0, 5),
    ]
}

#[test]
fn test_sink_receives_expected_word() {
    let engine = SsspEngine::with_entries(6).unwrap();
    let mut harness = Harness::new(engine, sample_events()).expect([4]);
    let report = harness.run(100).expect("run");
    assert_eq!(report.outputs, vec![(25, EngineResult::found(4))]);
    assert_eq!(report.cycles, 26);
}

#[test]
fn test_run_without_sink_stops_when_idle() {
    let engine = SsspEngine::with_entries(6).unwrap();
    let mut harness = Harness::new(engine, sample_events());
    let report = harness.run(100).expect("run");
    assert_eq!(report.results(), vec![EngineResult::found(4)]);
    assert_eq!(report.cycles, 29);
    assert!(harness.engine().is_idle());
}

#[test]
fn test_sink_mismatch_is_reported() {
    let engine = SsspEngine::with_entries(6).unwrap();
    let mut harness = Harness::new(engine, sample_events()).expect([3]);
    let err = harness.run(100).unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedOutput(_)));
}

#[test]
fn test_cycle_bound_times_out() {
    let engine = SsspEngine::with_entries(6).unwrap();
    let mut harness = Harness::new(engine, sample_events()).expect([4]);
    let err = harness.run(10).unwrap_err();
    assert!(matches!(err, EngineError::Timeout(10)));
}

#[test]
fn test_rejected_query_is_retried_by_source() {
    let config = EngineConfig::new(6).with_query_policy(QueryPolicy::Reject);
    let engine = SsspEngine::new(config).unwrap();
    let events = vec![
        EngineMsg::edge(0, 1),
        EngineMsg::edge(1, 2),
        EngineMsg::edge(2, 3),
        EngineMsg::query(0, 3),
        EngineMsg::query(0, 1),
    ];
    let mut harness = Harness::new(engine, events);
    let report = harness.run(100).expect("run");
    assert_eq!(
        report.outputs,
        vec![(8, EngineResult::found(3)), (14, EngineResult::unreachable())]
    );
    assert_eq!(harness.engine().stats().queries_deferred, 0);
}

#[test]
fn test_trace_lines_follow_cycles() {
    let engine = SsspEngine::with_entries(6).unwrap();
    let mut harness = Harness::new(engine, sample_events())
        .expect([4])
        .with_trace(true);
    let report = harness.run(100).expect("run");
    assert_eq!(report.traces.len() as u64, report.cycles);
    assert!(report.traces[0].starts_with("0:\n010000\n"));
    assert!(report.traces[25].contains("step: 4"));
}

#[test]
fn test_generated_shapes() {
    let line = generate_graph(GraphShape::Line, 8, 0);
    let engine = SsspEngine::with_entries(line.nodes()).unwrap();
    let report = Harness::new(engine, line.events(0, 7)).run(1_000).unwrap();
    assert_eq!(report.results(), vec![EngineResult::found(7)]);

    let star = generate_graph(GraphShape::Star, 8, 0);
    let engine = SsspEngine::with_entries(star.nodes()).unwrap();
    let report = Harness::new(engine, star.events(0, 5)).run(1_000).unwrap();
    assert_eq!(report.results(), vec![EngineResult::found(1)]);
    let engine = SsspEngine::with_entries(star.nodes()).unwrap();
    let report = Harness::new(engine, star.events(5, 0)).run(1_000).unwrap();
    assert_eq!(report.results(), vec![EngineResult::unreachable()]);

    let grid = generate_graph(GraphShape::Grid2D { width: 3, height: 3 }, 9, 0);
    let engine = SsspEngine::with_entries(grid.nodes()).unwrap();
    let report = Harness::new(engine, grid.events(0, 8)).run(1_000).unwrap();
    assert_eq!(report.results(), vec![EngineResult::found(4)]);
}

#[test]
fn test_push_events_extends_source() {
    let engine = SsspEngine::with_entries(3).unwrap();
    let mut harness = Harness::new(engine, [EngineMsg::edge(0, 1)]);
    harness.push_events([EngineMsg::edge(1, 2), EngineMsg::query(0, 2)]);
    let report = harness.run(100).unwrap();
    assert_eq!(report.results(), vec![EngineResult::found(2)]);
}
