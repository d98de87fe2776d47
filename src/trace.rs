use crate::{adjacency::AdjacencyStore, engine::SsspEngine};

/// Renders the adjacency matrix as rows of `0`/`1`.
pub fn render_matrix(store: &AdjacencyStore) -> String {
    let mut out = String::with_capacity(store.num_entries() * (store.num_entries() + 1));
    for node in 0..store.num_entries() {
        for &bit in store.row(node) {
            out.push(if bit { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// One-cycle snapshot: matrix, frontier contents and the registers the last
/// cycle committed.
pub fn line_trace(engine: &SsspEngine) -> String {
    let mut out = String::from("\n");
    out.push_str(&render_matrix(engine.store()));
    let frontier: Vec<String> = engine.queue().iter().map(|n| n.to_string()).collect();
    let last = engine.last_decision();
    let enq = last
        .enqueue
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        " -> [{}]; cur_node: {}; queue.count: {}; iter: {}; step: {}; cur_count: {}; enq: {}; deq: {}",
        frontier.join(","),
        engine.resume().node,
        engine.queue().occupancy(),
        engine.levels().iter(),
        engine.levels().step(),
        engine.levels().cur_count(),
        enq,
        u8::from(last.dequeue),
    ));
    out
}
