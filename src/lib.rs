/*
    Canonical labeling and encoding of vertex- and edge-colored undirected
    graphs: given a graph, produces a byte encoding that depends only on its
    structure, not on how the caller happened to label its vertices.
    Isomorphic graphs (under color- and structure-preserving relabelings)
    always produce the same encoding; non-isomorphic graphs (almost always)
    produce different ones.

    Typical use:

        let mut c = Canonizer::new(CanonizerOpts::default());
        c.build_graph_from(&vtx, &edges)?;
        let form = c.canonize_to_vecs()?;
*/

pub mod block;
pub mod canonical_sort;
pub mod channel;
pub mod dag;
pub mod debug_counter;
pub mod decoder;
pub mod driver;
pub mod edge_set;
pub mod error;
pub mod graph;
pub mod ranker;
pub mod subgraph;
pub mod types;
pub mod varint;

pub use channel::{new_graph_in, new_graph_out, GraphIn, GraphInSender, GraphItem, GraphOut, GraphOutReceiver};
pub use decoder::{Decoder, GraphCanvas};
pub use driver::{CanonicalForm, Canonizer, CanonizerOpts};
pub use error::{DecodeError, GraphError};
pub use types::{CanonicalEdge, Edge, EdgeColor, EdgeIdx, EncodingID, GraphEncoding, Vtx, VtxColor, VtxLabel};
