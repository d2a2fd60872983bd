/*
    The Block Encoder: turns one depth slice of a grown Dag into bytes. The
    same routine is reused both for per-depth ranking blocks (Ranker, root
    finder) and for the final full-graph encoding (driver::canonize), which
    just calls it with the whole vertex range.

    Grounded on original_source/orca-encode.go's encodeCanonicBlock.
*/

use crate::dag::{Dag, DagEdgeType};
use crate::varint::{write_uvarint, write_varint};

/// Encodes `dag.vtx[l..r]`: a uvarint vertex count, a varint color per
/// vertex in slice order, then one (fromIdx, edgeColor, toIdx) triple per
/// In/Co edge whose target lies earlier in the slice.
pub(crate) fn encode_depth_block(dag: &Dag, l: usize, r: usize) -> Vec<u8> {
    let slice = &dag.vtx[l..r];
    let mut out = Vec::new();

    write_uvarint(&mut out, slice.len() as u64);
    for v in slice {
        write_varint(&mut out, v.color);
    }

    for v in slice {
        let from_idx = dag.vtx_index[&v.label] as u64;
        for e in &v.edges {
            if !matches!(e.edge_type, DagEdgeType::In | DagEdgeType::Co) {
                continue;
            }
            let to_idx = dag.vtx_index[&e.to_vtx] as u64;
            if to_idx < from_idx {
                write_uvarint(&mut out, from_idx + 1);
                write_varint(&mut out, e.edge_color);
                write_uvarint(&mut out, to_idx + 1);
            }
        }
    }

    out
}
