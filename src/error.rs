/*
    Error taxonomy.

    Construction errors (GraphError) latch on the GraphStore: the first one
    wins, and subsequent Add* calls become no-ops, matching the Go original's
    fatalErr/ThrowErr behavior. Decode errors (DecodeError) latch the same
    way on the Decoder. Internal invariant violations (contradictory
    comparator results, interleaved depths) are not represented here at all:
    they panic, since spec class 3 treats them as bugs, not input problems.
*/

use crate::types::{EdgeColor, VtxLabel};
use thiserror::Error;

/// Errors that can occur while building a graph or fetching a subgraph.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphError {
    /// `AddVertex` was called with label 0.
    #[error("vertex label must be nonzero (0 is the end-of-stream sentinel)")]
    BadLabel,

    /// `AddVertex` was called with a label already present.
    #[error("vertex {0} already added")]
    DuplicateVertex(VtxLabel),

    /// `AddEdge` was called with a (Va, Vb, color) triple already present.
    #[error("edge between {0} and {1} with color {2} already exists")]
    DuplicateEdge(VtxLabel, VtxLabel, EdgeColor),

    /// `EndGraph` found an edge referencing a label that was never added.
    #[error("edge references vertex {0}, which was never added")]
    DanglingEdge(VtxLabel),

    /// `FetchSubGraph` was asked to remove an edge not present in the
    /// source edge set (either never in the graph, or already removed).
    #[error("edge not found (absent from graph, or already removed from this subgraph)")]
    EdgeNotFound,
}

/// Errors surfaced by the stream decoder. Sticky: once one occurs, all
/// subsequent reads on that `Decoder` are no-ops.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("bad encoding at byte offset {offset}: {reason}")]
pub struct DecodeError {
    pub offset: usize,
    pub reason: &'static str,
}
