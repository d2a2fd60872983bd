/*
    The BFS-DAG grown from a single root vertex within one subgraph. Each
    call to canonize_next_depth advances the frontier by exactly one depth:
    it classifies every edge out of the current frontier as In (discovers a
    new vertex), Co (links two vertices already at this depth), or a skip
    (an edge back to an already-canonized earlier depth, already represented
    by that depth's own In/Out pair) -- see canonical_sort::canonize_vtx_order
    for how ties within a depth get resolved before the next depth is grown.

    Grounded on original_source/dag.go's dag/dagVtx/canonizeNextDepth.
*/

use crate::canonical_sort::canonize_vtx_order;
use crate::graph::GraphStore;
use crate::subgraph::Subgraph;
use crate::types::{EdgeColor, Edge, VtxColor, VtxLabel};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum DagEdgeType {
    In,
    Co,
    Out,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DagEdge {
    pub edge_type: DagEdgeType,
    pub edge_color: EdgeColor,
    pub to_vtx: VtxLabel,
    pub to_vtx_color: VtxColor,
}

#[derive(Clone, Debug)]
pub struct DagVtx {
    pub label: VtxLabel,
    pub color: VtxColor,
    pub edges: Vec<DagEdge>,
    /// Tracked only so canonical_sort can assert it never compares vertices
    /// from two different depths against each other.
    pub depth: u32,
}

#[derive(Debug)]
pub struct Dag {
    pub root: VtxLabel,
    pub canonic_complete: bool,
    pub vtx_index: HashMap<VtxLabel, u32>,
    pub vtx: Vec<DagVtx>,
    /// depth_pos[d] is one-past-the-last index of depth d in `vtx`.
    pub depth_pos: Vec<u32>,
}

impl Dag {
    pub fn new(root: VtxLabel, store: &GraphStore) -> Self {
        let mut vtx_index = HashMap::new();
        vtx_index.insert(root, 0u32);
        Dag {
            root,
            canonic_complete: false,
            vtx_index,
            vtx: vec![DagVtx { label: root, color: store.vtx_color(root), edges: Vec::new(), depth: 0 }],
            depth_pos: Vec::new(),
        }
    }
}

/// Grows `dag` by exactly one depth: classifies every edge out of the
/// current frontier, canonically sorts and (where tied) ranks that frontier,
/// then records its boundary in `depth_pos`.
pub(crate) fn canonize_next_depth(store: &GraphStore, subgraph: &Rc<Subgraph>, dag: &mut Dag) {
    let cur_depth = dag.depth_pos.len();
    let cur_depth_l = if cur_depth > 0 { dag.depth_pos[cur_depth - 1] as usize } else { 0 };
    let cur_depth_r = dag.vtx.len();

    for v_from in cur_depth_l..cur_depth_r {
        let from_label = dag.vtx[v_from].label;
        let from_color = dag.vtx[v_from].color;

        for i in 0..store.adjacency(from_label).len() {
            let adj = store.adjacency(from_label)[i];
            let canon = Edge { va: from_label, vb: adj.to_vtx, color: adj.edge_color }.canonical();
            if !store.is_edge_present(&subgraph.edge_set, canon) {
                continue;
            }

            let existing = dag.vtx_index.get(&adj.to_vtx).copied();
            let (v_to, edge_type) = match existing {
                Some(v_to) if (v_to as usize) < cur_depth_l => continue,
                Some(v_to) if (v_to as usize) < cur_depth_r => (v_to, DagEdgeType::Co),
                Some(v_to) => (v_to, DagEdgeType::In),
                None => {
                    let v_to = dag.vtx.len() as u32;
                    dag.vtx.push(DagVtx {
                        label: adj.to_vtx,
                        color: adj.to_vtx_color,
                        edges: Vec::new(),
                        depth: (cur_depth + 1) as u32,
                    });
                    dag.vtx_index.insert(adj.to_vtx, v_to);
                    (v_to, DagEdgeType::In)
                }
            };

            dag.vtx[v_to as usize].edges.push(DagEdge {
                edge_type,
                edge_color: adj.edge_color,
                to_vtx: from_label,
                to_vtx_color: from_color,
            });
            if edge_type == DagEdgeType::In {
                dag.vtx[v_from].edges.push(DagEdge {
                    edge_type: DagEdgeType::Out,
                    edge_color: adj.edge_color,
                    to_vtx: adj.to_vtx,
                    to_vtx_color: adj.to_vtx_color,
                });
            }
        }
    }

    canonize_vtx_order(store, subgraph, dag, cur_depth_l, cur_depth_r);

    // With this depth now in canonic order, re-sort each of its vertices'
    // edges by (edgeType, edgeColor, toVtxColor), breaking remaining ties on
    // the now-finalized vtx_index of the target -- this is what makes two
    // tied back-edges to different same-depth siblings come out in a fixed
    // order instead of discovery order. See README notes in the original for
    // why this pass alone is not sufficient to determine canonicity (that's
    // the Ranker's job); it's a cheap determinizer applied on top.
    for vi in cur_depth_l..cur_depth_r {
        let vtx_index = &dag.vtx_index;
        dag.vtx[vi].edges.sort_by(|a, b| {
            crate::canonical_sort::dag_edge_canonic_compare(a, b).then_with(|| vtx_index[&a.to_vtx].cmp(&vtx_index[&b.to_vtx]))
        });
    }

    dag.depth_pos.push(cur_depth_r as u32);
    if cur_depth_r == dag.vtx.len() {
        dag.canonic_complete = true;
    }
    debug!(
        root = dag.root,
        depth = cur_depth,
        frontier = cur_depth_r - cur_depth_l,
        new_vtx = dag.vtx.len() - cur_depth_r,
        canonic_complete = dag.canonic_complete,
        "grew DAG to next depth"
    );
}

/// Grows (or fetches the cached) Dag rooted at `root` within `subgraph` up
/// to `depth`, and returns the byte block for that depth alone (empty if the
/// Dag terminated before reaching `depth` -- i.e. `root` has nothing left to
/// distinguish it at that depth).
pub(crate) fn export_canonic_block(
    store: &GraphStore,
    subgraph: &Rc<Subgraph>,
    root: VtxLabel,
    depth: usize,
) -> Vec<u8> {
    let mut dag = subgraph.take_dag(root).unwrap_or_else(|| Dag::new(root, store));

    while !dag.canonic_complete && depth >= dag.depth_pos.len() {
        canonize_next_depth(store, subgraph, &mut dag);
    }

    let block = if depth >= dag.depth_pos.len() {
        Vec::new()
    } else {
        let l = if depth > 0 { dag.depth_pos[depth - 1] as usize } else { 0 };
        let r = dag.depth_pos[depth] as usize;
        crate::block::encode_depth_block(&dag, l, r)
    };

    subgraph.put_dag(root, dag);
    block
}

/// Grows `dag` (rooted at its own root) to completion.
pub(crate) fn grow_to_completion(store: &GraphStore, subgraph: &Rc<Subgraph>, dag: &mut Dag) {
    while !dag.canonic_complete {
        canonize_next_depth(store, subgraph, dag);
    }
}
