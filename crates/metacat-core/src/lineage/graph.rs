//! Lineage graph analysis: topological order, cycle recovery, traversal.
//!
//! Nodes are interned to indices in first-appearance order, so every result
//! is deterministic for a given edge list. All walks use explicit stacks or
//! queues; nothing recurses.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, trace};

use super::edge::LineageEdge;

/// Result of [`LineageGraph::analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphAnalysis {
    /// Topological order; only a partial order when `cycles` is non-empty.
    pub sorted: Vec<String>,
    /// Closed paths (first element repeated at the end), one per walk that
    /// found a back edge.
    pub cycles: Vec<Vec<String>>,
}

impl GraphAnalysis {
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Adjacency view over a set of lineage edges.
///
/// Parallel edges between the same ordered pair collapse into one.
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(from, to)` identifier pairs.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::new();
        let mut seen = HashSet::new();
        for (from, to) in pairs {
            let f = graph.intern(from.as_ref());
            let t = graph.intern(to.as_ref());
            if seen.insert((f, t)) {
                graph.successors[f].push(t);
                graph.predecessors[t].push(f);
                graph.edge_count += 1;
            }
        }
        graph
    }

    pub fn from_edges(edges: &[LineageEdge]) -> Self {
        Self::from_pairs(edges.iter().map(|e| (e.from.as_str(), e.to.as_str())))
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), i);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        i
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct ordered pairs.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node identifiers in first-appearance order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Kahn's algorithm, then one explicit cycle per unsorted component walk.
    pub fn analyze(&self) -> GraphAnalysis {
        let n = self.nodes.len();
        let mut in_degree = vec![0usize; n];
        for targets in &self.successors {
            for &t in targets {
                in_degree[t] += 1;
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut sorted_flags = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            sorted_flags[node] = true;
            order.push(node);
            for &next in &self.successors[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        let cycles = if order.len() < n {
            self.recover_cycles(&sorted_flags)
        } else {
            Vec::new()
        };

        debug!(
            nodes = n,
            edges = self.edge_count,
            sorted = order.len(),
            cycles = cycles.len(),
            "analyzed lineage graph"
        );

        GraphAnalysis {
            sorted: order.into_iter().map(|i| self.nodes[i].clone()).collect(),
            cycles: cycles
                .into_iter()
                .map(|c| c.into_iter().map(|i| self.nodes[i].clone()).collect())
                .collect(),
        }
    }

    fn recover_cycles(&self, sorted: &[bool]) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut cycles = Vec::new();

        for root in 0..n {
            if sorted[root] || visited[root] {
                continue;
            }
            if let Some(cycle) = self.walk_for_cycle(root, sorted, &mut visited, &mut on_stack) {
                trace!(root = %self.nodes[root], len = cycle.len() - 1, "cycle recovered");
                cycles.push(cycle);
            }
        }

        cycles
    }

    /// Iterative DFS from `root` over unsorted nodes. Returns the first back
    /// edge found as a closed path; keeps walking so every reachable node is
    /// marked visited.
    fn walk_for_cycle(
        &self,
        root: usize,
        sorted: &[bool],
        visited: &mut [bool],
        on_stack: &mut [bool],
    ) -> Option<Vec<usize>> {
        let mut found = None;
        // (node, index of next successor to try)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        visited[root] = true;
        on_stack[root] = true;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let Some(&next) = self.successors[node].get(cursor) else {
                on_stack[node] = false;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if sorted[next] {
                continue;
            }
            if on_stack[next] {
                if found.is_none() {
                    if let Some(start) = stack.iter().position(|&(n, _)| n == next) {
                        let mut cycle: Vec<usize> =
                            stack[start..].iter().map(|&(n, _)| n).collect();
                        cycle.push(next);
                        found = Some(cycle);
                    }
                }
                continue;
            }
            if !visited[next] {
                visited[next] = true;
                on_stack[next] = true;
                stack.push((next, 0));
            }
        }

        found
    }

    /// Everything reachable from `id`, breadth-first, excluding `id`.
    pub fn downstream(&self, id: &str) -> Vec<String> {
        self.reachable(id, &self.successors)
    }

    /// Everything that reaches `id`, breadth-first, excluding `id`.
    pub fn upstream(&self, id: &str) -> Vec<String> {
        self.reachable(id, &self.predecessors)
    }

    fn reachable(&self, id: &str, adjacency: &[Vec<usize>]) -> Vec<String> {
        let Some(&start) = self.index.get(id) else {
            return Vec::new();
        };
        let mut seen = vec![false; self.nodes.len()];
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();

        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if !seen[next] {
                    seen[next] = true;
                    out.push(self.nodes[next].clone());
                    queue.push_back(next);
                }
            }
        }

        out
    }
}

/// Shorthand for `LineageGraph::from_edges(edges).analyze()`.
pub fn analyze_edges(edges: &[LineageEdge]) -> GraphAnalysis {
    LineageGraph::from_edges(edges).analyze()
}
