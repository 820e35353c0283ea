use crate::cost::Cost;
use crate::error::{Error, Result};
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Adjacency map: node -> (neighbour -> weight of the edge node -> neighbour).
pub type Graph<N, C> = HashMap<N, HashMap<N, C>>;

/// Add the directed edge `from -> to`. Both endpoints become keys of the graph;
/// an existing edge has its weight replaced.
pub fn add_edge<N, C>(graph: &mut Graph<N, C>, from: N, to: N, weight: C)
where
    N: Eq + Hash + Clone,
{
    graph.entry(to.clone()).or_default();
    graph.entry(from).or_default().insert(to, weight);
}

pub fn add_undirected_edge<N, C>(graph: &mut Graph<N, C>, a: N, b: N, weight: C)
where
    N: Eq + Hash + Clone,
    C: Copy,
{
    add_edge(graph, a.clone(), b.clone(), weight);
    add_edge(graph, b, a, weight);
}

pub fn from_edges<N, C, I>(edges: I) -> Graph<N, C>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = (N, N, C)>,
{
    let mut graph = Graph::new();
    for (from, to, weight) in edges {
        add_edge(&mut graph, from, to, weight);
    }
    graph
}

pub fn edge_count<N, C>(graph: &Graph<N, C>) -> usize {
    graph.values().map(HashMap::len).sum()
}

/// Reject graphs that break Dijkstra's precondition. Reports the first negative
/// edge encountered (iteration order is unspecified).
pub fn validate_non_negative<N, C>(graph: &Graph<N, C>) -> Result<()>
where
    N: Debug,
    C: Cost,
{
    for (from, adjacent) in graph {
        if let Some((to, _)) = adjacent.iter().find(|(_, w)| w.is_negative()) {
            return Err(Error::NegativeWeight {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
            });
        }
    }
    Ok(())
}
