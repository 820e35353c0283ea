use crate::dijkstra::ShortestPaths;
use crate::error::{Error, Result};
use crate::graph::{add_edge, add_undirected_edge, Graph};
use csv::{ReaderBuilder, Trim, Writer};
use std::io;
use std::path::Path;

pub type NodeId = String;
pub type Weight = u64;

/// Build a graph from a CSV with a `from,to,weight` header and one edge per row.
pub fn read_edge_list<R: io::Read>(reader: R, undirected: bool) -> Result<Graph<NodeId, Weight>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut graph = Graph::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 3 {
            return Err(Error::MissingFields {
                line,
                found: record.len(),
            });
        }
        let weight: Weight = record[2].parse().map_err(|_| Error::InvalidWeight {
            line,
            value: record[2].to_string(),
        })?;
        let (from, to) = (record[0].to_string(), record[1].to_string());
        if undirected {
            add_undirected_edge(&mut graph, from, to, weight);
        } else {
            add_edge(&mut graph, from, to, weight);
        }
    }
    Ok(graph)
}

pub fn read_edge_list_path<P: AsRef<Path>>(path: P, undirected: bool) -> Result<Graph<NodeId, Weight>> {
    let file = std::fs::File::open(path)?;
    read_edge_list(io::BufReader::new(file), undirected)
}

/// Write `node_id,distance,predecessor` rows ordered by distance, then node id.
/// Unreachable nodes get distance `inf` and are only written on request.
pub fn write_distances<W: io::Write>(
    writer: W,
    graph: &Graph<NodeId, Weight>,
    paths: &ShortestPaths<NodeId, Weight>,
    include_unreachable: bool,
) -> Result<usize> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["node_id", "distance", "predecessor"])?;

    let mut rows: Vec<(&NodeId, Option<Weight>)> = graph
        .keys()
        .map(|node| (node, paths.distance(node)))
        .filter(|(_, d)| d.is_some() || include_unreachable)
        .collect();
    // None (unreachable) sorts after every finite distance.
    rows.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.0.cmp(b.0)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(b.0),
    });

    for (node, distance) in &rows {
        let distance = match distance {
            Some(d) => d.to_string(),
            None => String::from("inf"),
        };
        let predecessor = paths.predecessor(node).map(String::as_str).unwrap_or("");
        wtr.write_record([node.as_str(), distance.as_str(), predecessor])?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::dijkstra;

    const EDGES: &str = "from,to,weight
a,b,4
a,c,1
c,b,2
x,y,1
";

    #[test]
    fn reads_directed_edges() {
        let graph = read_edge_list(EDGES.as_bytes(), false).unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph["a"]["b"], 4);
        assert!(graph["b"].is_empty());
    }

    #[test]
    fn reads_undirected_edges() {
        let graph = read_edge_list(EDGES.as_bytes(), true).unwrap();
        assert_eq!(graph["b"]["c"], 2);
        assert_eq!(graph["y"]["x"], 1);
    }

    #[test]
    fn rejects_bad_weights() {
        let text = "from,to,weight\na,b,1\na,c,-3\n";
        match read_edge_list(text.as_bytes(), false) {
            Err(Error::InvalidWeight { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "-3");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn rejects_short_rows() {
        let text = "from,to\na,b\n";
        assert!(matches!(
            read_edge_list(text.as_bytes(), false),
            Err(Error::MissingFields { line: 2, found: 2 })
        ));
    }

    #[test]
    fn writes_sorted_distances() {
        let graph = read_edge_list(EDGES.as_bytes(), false).unwrap();
        let paths = dijkstra(&graph, &"a".to_string()).unwrap();

        let mut out = Vec::new();
        let written = write_distances(&mut out, &graph, &paths, false).unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "node_id,distance,predecessor\na,0,\nc,1,a\nb,3,c\n"
        );

        let mut out = Vec::new();
        let written = write_distances(&mut out, &graph, &paths, true).unwrap();
        assert_eq!(written, 5);
        assert!(String::from_utf8(out).unwrap().ends_with("x,inf,\ny,inf,\n"));
    }
}
