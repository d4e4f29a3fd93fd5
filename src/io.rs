//! Text adapters around the engines: the `n m` + `tail head weight` edge-list
//! loader and writers for computed results. Nothing in the engines depends
//! on this module.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{ApspError, Result};
use crate::graph::{Edge, Graph};
use crate::result::{PathEntry, ShortestPaths};
use crate::weight::Weight;

fn parse_err(line: usize, message: impl Into<String>) -> ApspError {
    ApspError::Parse { line, message: message.into() }
}

fn field<T: std::str::FromStr>(tok: Option<&str>, line: usize, what: &str) -> Result<T> {
    let tok = tok.ok_or_else(|| parse_err(line, format!("missing {}", what)))?;
    tok.parse().map_err(|_| parse_err(line, format!("bad {} '{}'", what, tok)))
}

/// Reads a graph: first line `n m`, then `m` lines `tail head weight`.
/// Blank lines are skipped; an edge count other than `m` is an error.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Graph<i64>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, l)| l.map(|s| (i + 1, s)))
        .filter(|r| r.as_ref().map_or(true, |(_, s)| !s.trim().is_empty()));

    let (line_no, header) = lines.next().transpose()?.ok_or_else(|| parse_err(1, "empty input"))?;
    let mut toks = header.split_whitespace();
    let n: usize = field(toks.next(), line_no, "vertex count")?;
    let m: usize = field(toks.next(), line_no, "edge count")?;

    let mut edges = Vec::with_capacity(m);
    for entry in lines {
        let (line_no, text) = entry?;
        if edges.len() == m {
            return Err(parse_err(line_no, format!("more than {} edges", m)));
        }
        let mut toks = text.split_whitespace();
        let tail = field(toks.next(), line_no, "tail")?;
        let head = field(toks.next(), line_no, "head")?;
        let weight = field(toks.next(), line_no, "weight")?;
        if toks.next().is_some() {
            return Err(parse_err(line_no, "trailing fields"));
        }
        edges.push(Edge::new(tail, head, weight));
    }
    if edges.len() != m {
        return Err(parse_err(line_no, format!("header promises {} edges, found {}", m, edges.len())));
    }
    Graph::new(n, edges)
}

pub fn load_edge_list(path: impl AsRef<Path>) -> Result<Graph<i64>> {
    read_edge_list(BufReader::new(File::open(path)?))
}

fn format_path<W: Weight>(entry: &PathEntry<W>) -> String {
    match entry {
        PathEntry::Path(edges) => {
            let parts: Vec<String> = edges.iter().map(|e| e.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
        PathEntry::NoPath | PathEntry::UnboundedBelow => "None".to_string(),
        PathEntry::Unavailable => "unavailable".to_string(),
    }
}

/// Two lines per ordered pair, row-major: the distance, then the path edges.
pub fn write_pairs<W: Weight, O: Write>(out: &mut O, result: &ShortestPaths<W>) -> Result<()> {
    for q in result.iter_pairs() {
        writeln!(out, "{}", q.distance)?;
        writeln!(out, "{}", format_path(&q.path))?;
    }
    Ok(())
}

/// One row per source, distances separated by spaces.
pub fn write_distance_matrix<W: Weight, O: Write>(out: &mut O, result: &ShortestPaths<W>) -> Result<()> {
    let n = result.vertex_count();
    for source in 1..=n {
        let row: Vec<String> = result.distances().row(source)?.iter().map(|d| d.to_string()).collect();
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// JSON document with strategy, stats, the distance matrix and every path.
pub fn to_json<W: Weight>(result: &ShortestPaths<W>) -> serde_json::Value {
    let pairs: Vec<_> = result.iter_pairs().collect();
    serde_json::json!({
        "strategy": result.strategy(),
        "n": result.vertex_count(),
        "stats": result.stats(),
        "distances": result.distances(),
        "pairs": pairs,
    })
}
