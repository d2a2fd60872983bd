/*
    Core value types shared by the graph store, DAG builder, and decoder.

    VtxLabel is 1-based; 0 is the sentinel used both for "no vertex" and as
    the end-of-stream marker on the vertex/edge channels (see channel.rs).
*/

use serde::{Deserialize, Serialize};

/// Identifies a vertex. Valid labels are `1..=Nv`; `0` is the sentinel for
/// "no vertex" / end-of-stream.
pub type VtxLabel = u32;

/// Client-chosen vertex flavor/class. Must be non-negative by convention;
/// this crate does not enforce it since negative colors don't break any
/// invariant the canonizer relies on.
pub type VtxColor = i64;

/// Client-chosen edge flavor/class.
pub type EdgeColor = i64;

/// A zero-based index into a `GraphStore`'s edge table.
pub type EdgeIdx = u32;

/// Names a stored graph in the decoder's dictionary. Positive, 1-based.
pub type EncodingID = i64;

/// A byte-serialized canonical encoding.
pub type GraphEncoding = Vec<u8>;

/// A vertex with its label and color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vtx {
    pub label: VtxLabel,
    pub color: VtxColor,
}

/// An edge as supplied by a caller: undirected, but stored with whichever
/// endpoint order the caller used. Use [`Edge::canonical`] to normalize.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub va: VtxLabel,
    pub vb: VtxLabel,
    pub color: EdgeColor,
}

impl Edge {
    pub fn canonical(self) -> CanonicalEdge {
        if self.va < self.vb {
            CanonicalEdge { va: self.va, vb: self.vb, color: self.color }
        } else {
            CanonicalEdge { va: self.vb, vb: self.va, color: self.color }
        }
    }
}

/// The normalized form of an [`Edge`]: `va < vb` always holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CanonicalEdge {
    pub va: VtxLabel,
    pub vb: VtxLabel,
    pub color: EdgeColor,
}

impl From<CanonicalEdge> for Edge {
    fn from(e: CanonicalEdge) -> Self {
        Edge { va: e.va, vb: e.vb, color: e.color }
    }
}
