use std::{fs, io::Read};

use serde::Deserialize;

use crate::{Error, Result, node::Point, options::SolverOptions};

const NODE_ID_PREFIX: &str = "pt_";

/// An unordered pair of node indices representing a direct link.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arc {
    pub a: usize,
    pub b: usize,
}

impl Arc {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Runtime input for the sparse tour solver.
#[derive(Clone, Debug)]
pub struct SolverInput {
    pub points: Vec<Point>,
    pub arcs: Vec<Arc>,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    points: Vec<RawPoint>,
    arcs: Vec<[String; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

impl SolverInput {
    pub fn new(points: &[Point], arcs: &[Arc]) -> Self {
        Self {
            points: points.to_vec(),
            arcs: arcs.to_vec(),
        }
    }

    /// Reads the graph description from `--input` or stdin.
    pub fn load(options: &SolverOptions) -> Result<Self> {
        let raw = match options.input_path() {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::invalid_input(format!("failed to read {}: {e}", path.display()))
            })?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let graph: RawGraph = serde_json::from_str(raw)
            .map_err(|e| Error::invalid_input(format!("malformed graph description: {e}")))?;

        let points: Vec<Point> = graph
            .points
            .iter()
            .map(|p| Point::new(p.x, p.y))
            .collect();
        if points.is_empty() {
            return Err(Error::invalid_input("Graph description has no points."));
        }
        if graph.arcs.is_empty() {
            return Err(Error::invalid_input("Graph description has no arcs."));
        }

        let mut arcs = Vec::with_capacity(graph.arcs.len());
        for (idx, [from, to]) in graph.arcs.iter().enumerate() {
            let a = parse_node_id(from)
                .map_err(|e| Error::invalid_input(format!("Arc {}: {e}", idx + 1)))?;
            let b = parse_node_id(to)
                .map_err(|e| Error::invalid_input(format!("Arc {}: {e}", idx + 1)))?;

            if a >= points.len() || b >= points.len() {
                return Err(Error::invalid_input(format!(
                    "Arc {}: endpoint out of range for {} points: {from},{to}",
                    idx + 1,
                    points.len()
                )));
            }
            if a == b {
                return Err(Error::invalid_input(format!(
                    "Arc {}: self-loop on {from}",
                    idx + 1
                )));
            }
            arcs.push(Arc::new(a, b));
        }

        Ok(Self { points, arcs })
    }

    pub fn n(&self) -> usize {
        self.points.len()
    }
}

/// Maps an external `pt_N` identifier to its dense node index.
fn parse_node_id(raw: &str) -> std::result::Result<usize, String> {
    let Some(suffix) = raw.strip_prefix(NODE_ID_PREFIX) else {
        return Err(format!("invalid node identifier: {raw}"));
    };
    suffix
        .parse::<usize>()
        .map_err(|_| format!("invalid node identifier: {raw}"))
}

/// Maps a dense node index back to its external `pt_N` identifier.
pub fn format_node_id(id: usize) -> String {
    format!("{NODE_ID_PREFIX}{id}")
}
