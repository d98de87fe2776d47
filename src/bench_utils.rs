use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::message::EngineMsg;

#[derive(Clone, Debug)]
pub struct GraphDataset {
    pub num_entries: usize,
    pub edges: Vec<(usize, usize)>,
}

impl GraphDataset {
    pub fn nodes(&self) -> usize {
        self.num_entries
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn out_degrees(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_entries];
        for &(from, _) in &self.edges {
            counts[from] += 1;
        }
        counts
    }

    pub fn hub_index(&self) -> usize {
        let mut best = (0usize, 0usize);
        for (idx, deg) in self.out_degrees().into_iter().enumerate() {
            if deg > best.0 {
                best = (deg, idx);
            }
        }
        best.1
    }

    /// Registration events for every edge followed by the query `src -> dst`.
    pub fn events(&self, src: usize, dst: usize) -> Vec<EngineMsg> {
        let mut events: Vec<EngineMsg> = self
            .edges
            .iter()
            .map(|&(from, to)| EngineMsg::edge(from, to))
            .collect();
        events.push(EngineMsg::query(src, dst));
        events
    }
}

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    Grid2D { width: usize, height: usize },
    RandomErdosRenyi { edges: usize },
}

pub fn generate_graph(shape: GraphShape, node_count: usize, seed: u64) -> GraphDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut edges = match shape {
        GraphShape::Line => generate_line_edges(node_count),
        GraphShape::Star => generate_star_edges(node_count),
        GraphShape::Grid2D { width, height } => generate_grid_edges(width, height, node_count),
        GraphShape::RandomErdosRenyi { edges } => generate_random_edges(node_count, edges, seed),
    };
    edges.sort_unstable();
    GraphDataset {
        num_entries: node_count,
        edges,
    }
}

fn generate_line_edges(count: usize) -> Vec<(usize, usize)> {
    (0..count - 1).map(|idx| (idx, idx + 1)).collect()
}

fn generate_star_edges(count: usize) -> Vec<(usize, usize)> {
    (1..count).map(|leaf| (0, leaf)).collect()
}

fn generate_grid_edges(width: usize, height: usize, node_count: usize) -> Vec<(usize, usize)> {
    assert_eq!(
        width * height,
        node_count,
        "grid dimensions must match node count"
    );
    let mut edges = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let base = grid_index(x, y, width);
            if x + 1 < width {
                edges.push((base, grid_index(x + 1, y, width)));
            }
            if y + 1 < height {
                edges.push((base, grid_index(x, y + 1, width)));
            }
        }
    }
    edges
}

/// Directed G(n, m) without self-loops, sampled by geometric skips over the
/// ordered pair index space.
fn generate_random_edges(node_count: usize, edge_count: usize, seed: u64) -> Vec<(usize, usize)> {
    let total_pairs = pair_count(node_count);
    assert!(
        edge_count as u64 <= total_pairs,
        "edge_count exceeds possible pairs"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(edge_count);
    let mut idx = 0u64;
    let mut remaining_edges = edge_count as u64;
    while remaining_edges > 0 && idx < total_pairs {
        let remaining_pairs = total_pairs - idx;
        let p = remaining_edges as f64 / remaining_pairs as f64;
        let skip = sample_geometric(&mut rng, p);
        idx += skip;
        if idx >= total_pairs {
            break;
        }
        edges.push(pair_from_index(idx, node_count as u64));
        idx += 1;
        remaining_edges -= 1;
    }
    edges
}

fn grid_index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

fn pair_count(nodes: usize) -> u64 {
    let n = nodes as u64;
    n * (n - 1)
}

fn sample_geometric(rng: &mut StdRng, p: f64) -> u64 {
    if p >= 1.0 {
        return 0;
    }
    let u = rng.r#gen::<f64>().max(f64::MIN_POSITIVE);
    ((u.ln() / (1.0 - p).ln()).floor().max(0.0)) as u64
}

fn pair_from_index(idx: u64, nodes: u64) -> (usize, usize) {
    let from = idx / (nodes - 1);
    let offset = idx % (nodes - 1);
    let to = if offset >= from { offset + 1 } else { offset };
    (from as usize, to as usize)
}
