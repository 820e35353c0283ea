use crate::cost::Cost;
use crate::error::{Error, Result};
use crate::graph::{validate_non_negative, Graph};
use hashbrown::{HashMap, HashSet};
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct State<N, C> {
    cost: C,
    node: N,
}

// Min-heap by cost. Nodes don't take part in the order, so equal-cost entries
// pop in whatever order the heap yields them.
impl<N, C: Ord> PartialEq for State<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<N, C: Ord> Eq for State<N, C> {}

impl<N, C: Ord> Ord for State<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other.cost.cmp(&self.cost)
    }
}

impl<N, C: Ord> PartialOrd for State<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A shortest path, nodes ordered from the source to the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<N, C> {
    pub cost: C,
    pub nodes: Vec<N>,
}

/// Result of a full search: the shortest-path tree rooted at `source`.
///
/// Only reachable nodes have a distance; the source has no predecessor.
#[derive(Clone, Debug)]
pub struct ShortestPaths<N, C> {
    source: N,
    predecessors: HashMap<N, N>,
    distances: HashMap<N, C>,
}

impl<N, C> ShortestPaths<N, C>
where
    N: Eq + Hash + Clone,
    C: Cost,
{
    pub fn source(&self) -> &N {
        &self.source
    }

    /// `None` means unreachable (infinite distance).
    pub fn distance(&self, node: &N) -> Option<C> {
        self.distances.get(node).copied()
    }

    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.predecessors.get(node)
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distances.contains_key(node)
    }

    pub fn distances(&self) -> &HashMap<N, C> {
        &self.distances
    }

    pub fn predecessors(&self) -> &HashMap<N, N> {
        &self.predecessors
    }

    /// Walk the predecessor map back from `target` to the source.
    pub fn path_to(&self, target: &N) -> Option<Path<N, C>> {
        let cost = self.distance(target)?;
        Some(Path {
            cost,
            nodes: walk_back(&self.predecessors, target),
        })
    }

    pub fn into_parts(self) -> (HashMap<N, N>, HashMap<N, C>) {
        (self.predecessors, self.distances)
    }
}

fn walk_back<N: Eq + Hash + Clone>(predecessors: &HashMap<N, N>, target: &N) -> Vec<N> {
    let mut route = vec![target.clone()];
    let mut current = target;
    while let Some(previous) = predecessors.get(current) {
        route.push(previous.clone());
        current = previous;
    }
    route.reverse();
    route
}

/// Search state over one invocation. Distances hold tentative costs until a node
/// is popped unvisited from the frontier, at which point its cost is final.
struct Search<'g, N, C> {
    graph: &'g Graph<N, C>,
    source: N,
    frontier: BinaryHeap<State<N, C>>,
    visited: HashSet<N>,
    predecessors: HashMap<N, N>,
    distances: HashMap<N, C>,
    stale: usize,
}

impl<'g, N, C> Search<'g, N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    fn new(graph: &'g Graph<N, C>, source: &N) -> Result<Self> {
        if !graph.contains_key(source) {
            return Err(Error::NodeNotFound(format!("{:?}", source)));
        }
        let mut distances = HashMap::new();
        distances.insert(source.clone(), C::ZERO);
        let mut frontier = BinaryHeap::new();
        frontier.push(State {
            cost: C::ZERO,
            node: source.clone(),
        });
        Ok(Self {
            graph,
            source: source.clone(),
            frontier,
            visited: HashSet::new(),
            predecessors: HashMap::new(),
            distances,
            stale: 0,
        })
    }

    /// Finalize the next node and relax its outgoing edges. Returns `None` once the
    /// frontier is exhausted.
    fn settle_next(&mut self) -> Option<N> {
        while let Some(State { cost, node }) = self.frontier.pop() {
            if !self.visited.insert(node.clone()) {
                // Lazy deletion: an older, more expensive entry for a visited node.
                self.stale += 1;
                continue;
            }
            // Targets that never appear as keys have no outgoing edges.
            if let Some(adjacent) = self.graph.get(&node) {
                for (neighbor, &weight) in adjacent {
                    if self.visited.contains(neighbor) {
                        continue;
                    }
                    let candidate = cost + weight;
                    let improves = match self.distances.get(neighbor) {
                        Some(&known) => candidate < known,
                        None => true,
                    };
                    if improves {
                        self.distances.insert(neighbor.clone(), candidate);
                        self.predecessors.insert(neighbor.clone(), node.clone());
                        self.frontier.push(State {
                            cost: candidate,
                            node: neighbor.clone(),
                        });
                    }
                }
            }
            return Some(node);
        }
        None
    }

    fn log_summary(&self) {
        debug!(
            "dijkstra from {:?}: {} nodes finalized, {} stale frontier entries skipped",
            self.source,
            self.visited.len(),
            self.stale
        );
    }

    fn finish(self) -> ShortestPaths<N, C> {
        self.log_summary();
        ShortestPaths {
            source: self.source,
            predecessors: self.predecessors,
            distances: self.distances,
        }
    }
}

/// Dijkstra from `source` to every reachable node.
///
/// Weights must be non-negative; this is not checked (see [`dijkstra_checked`]).
/// Fails with [`Error::NodeNotFound`] when `source` is not a key of `graph`.
pub fn dijkstra<N, C>(graph: &Graph<N, C>, source: &N) -> Result<ShortestPaths<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let mut search = Search::new(graph, source)?;
    while search.settle_next().is_some() {}
    Ok(search.finish())
}

/// [`dijkstra`] preceded by a full scan for negative weights.
pub fn dijkstra_checked<N, C>(graph: &Graph<N, C>, source: &N) -> Result<ShortestPaths<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    validate_non_negative(graph)?;
    dijkstra(graph, source)
}

/// Shortest path from `source` to `target`, stopping as soon as `target` is
/// finalized. `Ok(None)` means `target` is unreachable.
pub fn dijkstra_to<N, C>(graph: &Graph<N, C>, source: &N, target: &N) -> Result<Option<Path<N, C>>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let mut search = Search::new(graph, source)?;
    while let Some(node) = search.settle_next() {
        if node == *target {
            search.log_summary();
            let cost = search.distances[target];
            return Ok(Some(Path {
                cost,
                nodes: walk_back(&search.predecessors, target),
            }));
        }
    }
    search.log_summary();
    Ok(None)
}

/// [`dijkstra`] with an upper bound on the number of finalized nodes. Fails with
/// [`Error::ExpansionLimit`] instead of returning a partial tree.
pub fn dijkstra_with_limit<N, C>(
    graph: &Graph<N, C>,
    source: &N,
    max_expansions: usize,
) -> Result<ShortestPaths<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: Cost,
{
    let mut search = Search::new(graph, source)?;
    while search.settle_next().is_some() {
        if search.visited.len() > max_expansions {
            search.log_summary();
            return Err(Error::ExpansionLimit(max_expansions));
        }
    }
    Ok(search.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::from_edges;

    fn map<K: Eq + Hash, V>(entries: Vec<(K, V)>) -> HashMap<K, V> {
        entries.into_iter().collect()
    }

    #[test]
    fn single_node() {
        let mut graph: Graph<char, u32> = Graph::new();
        graph.insert('A', HashMap::new());

        let (predecessors, distances) = dijkstra(&graph, &'A').unwrap().into_parts();
        assert_eq!(distances, map(vec![('A', 0)]));
        assert!(predecessors.is_empty());
    }

    #[test]
    fn linear_chain() {
        let graph = from_edges([('A', 'B', 1u32), ('B', 'C', 1)]);

        let (predecessors, distances) = dijkstra(&graph, &'A').unwrap().into_parts();
        assert_eq!(distances, map(vec![('A', 0), ('B', 1), ('C', 2)]));
        assert_eq!(predecessors, map(vec![('B', 'A'), ('C', 'B')]));
    }

    #[test]
    fn disjoint_pairs_are_unreachable() {
        let graph = from_edges([('A', 'B', 1u32), ('C', 'D', 1)]);

        let paths = dijkstra(&graph, &'A').unwrap();
        assert_eq!(paths.distances(), &map(vec![('A', 0), ('B', 1)]));
        assert!(!paths.is_reachable(&'C'));
        assert_eq!(paths.distance(&'D'), None);
        assert_eq!(paths.predecessor(&'D'), None);
        assert_eq!(paths.path_to(&'C'), None);
    }

    #[test]
    fn triangle_prefers_cheaper_detour() {
        let graph = from_edges([('A', 'B', 5u32), ('A', 'C', 2), ('C', 'B', 1)]);

        let paths = dijkstra(&graph, &'A').unwrap();
        assert_eq!(paths.distances(), &map(vec![('A', 0), ('C', 2), ('B', 3)]));
        assert_eq!(paths.predecessors(), &map(vec![('C', 'A'), ('B', 'C')]));
        assert_eq!(
            paths.path_to(&'B'),
            Some(Path {
                cost: 3,
                nodes: vec!['A', 'C', 'B']
            })
        );
    }

    #[test]
    fn unit_grid_distance_is_manhattan() {
        let mut graph: Graph<(i32, i32), u32> = Graph::new();
        for x in 0..3 {
            for y in 0..3 {
                let adjacent = graph.entry((x, y)).or_default();
                for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if (0..3).contains(&nx) && (0..3).contains(&ny) {
                        adjacent.insert((nx, ny), 1);
                    }
                }
            }
        }

        let paths = dijkstra(&graph, &(0, 0)).unwrap();
        assert_eq!(paths.distance(&(2, 2)), Some(4));
        assert_eq!(paths.distances().len(), 9);
        assert_eq!(paths.path_to(&(2, 2)).unwrap().nodes.len(), 5);
    }

    #[test]
    fn missing_source_fails() {
        let graph = from_edges([('A', 'B', 1u32)]);
        match dijkstra(&graph, &'Z') {
            Err(Error::NodeNotFound(node)) => assert_eq!(node, "'Z'"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            dijkstra_checked(&graph, &'Z'),
            Err(Error::NodeNotFound(_))
        ));
    }

    #[test]
    fn missing_source_fails_for_targeted_and_capped_searches() {
        let graph = from_edges([('A', 'B', 1u32)]);
        match dijkstra_to(&graph, &'Z', &'B') {
            Err(Error::NodeNotFound(node)) => assert_eq!(node, "'Z'"),
            other => panic!("unexpected result {:?}", other),
        }
        match dijkstra_with_limit(&graph, &'Z', 10) {
            Err(Error::NodeNotFound(node)) => assert_eq!(node, "'Z'"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn target_only_nodes_have_no_outgoing_edges() {
        let mut graph: Graph<&str, u32> = Graph::new();
        graph.entry("a").or_default().insert("b", 4);

        let paths = dijkstra(&graph, &"a").unwrap();
        assert_eq!(paths.distance(&"b"), Some(4));
    }

    #[test]
    fn improved_entries_leave_stale_duplicates_behind() {
        // C is first reached at cost 10, then improved to 3 via B; the stale
        // (10, C) entry must not re-open C.
        let graph = from_edges([
            ('A', 'C', 10u32),
            ('A', 'B', 1),
            ('B', 'C', 2),
            ('C', 'D', 1),
        ]);

        let paths = dijkstra(&graph, &'A').unwrap();
        assert_eq!(paths.distance(&'C'), Some(3));
        assert_eq!(paths.distance(&'D'), Some(4));
        assert_eq!(paths.predecessor(&'C'), Some(&'B'));
    }

    #[test]
    fn zero_weight_edges() {
        let graph = from_edges([(0, 1, 0u32), (1, 2, 0), (0, 2, 1)]);

        let paths = dijkstra(&graph, &0).unwrap();
        assert_eq!(paths.distance(&2), Some(0));
        assert_eq!(paths.path_to(&2).unwrap().nodes, vec![0, 1, 2]);
    }

    #[test]
    fn float_weights() {
        use ordered_float::OrderedFloat;
        let graph = from_edges([
            (0, 1, OrderedFloat(0.5f64)),
            (1, 2, OrderedFloat(0.25)),
            (0, 2, OrderedFloat(1.0)),
        ]);

        let paths = dijkstra(&graph, &0).unwrap();
        assert_eq!(paths.distance(&2), Some(OrderedFloat(0.75)));
    }

    #[test]
    fn checked_rejects_negative_weights() {
        let graph = from_edges([('A', 'B', 1i64), ('B', 'C', -5)]);
        assert!(matches!(
            dijkstra_checked(&graph, &'A'),
            Err(Error::NegativeWeight { .. })
        ));
    }

    #[test]
    fn early_exit_to_target() {
        let graph = from_edges([('A', 'B', 5u32), ('A', 'C', 2), ('C', 'B', 1), ('B', 'D', 1)]);

        let path = dijkstra_to(&graph, &'A', &'B').unwrap().unwrap();
        assert_eq!(path.cost, 3);
        assert_eq!(path.nodes, vec!['A', 'C', 'B']);

        let source_only = dijkstra_to(&graph, &'A', &'A').unwrap().unwrap();
        assert_eq!(source_only.cost, 0);
        assert_eq!(source_only.nodes, vec!['A']);

        assert_eq!(dijkstra_to(&graph, &'D', &'A').unwrap(), None);
        assert_eq!(dijkstra_to(&graph, &'A', &'Q').unwrap(), None);
    }

    #[test]
    fn expansion_limit() {
        let graph = from_edges([(0, 1, 1u32), (1, 2, 1), (2, 3, 1)]);

        assert!(matches!(
            dijkstra_with_limit(&graph, &0, 2),
            Err(Error::ExpansionLimit(2))
        ));
        let paths = dijkstra_with_limit(&graph, &0, 4).unwrap();
        assert_eq!(paths.distance(&3), Some(3));
    }
}
