/*
    The Ranker: breaks ties between structurally-equal DAG rows by growing
    each tied candidate's own elimination subgraph deeper and deeper until
    their canonical blocks diverge (or one runs out first, which makes it
    the winner -- a vertex whose subgraph has nothing left to say about it
    retires before one that still does).

    Two call sites, kept distinct rather than merged into one generalized
    routine, matching the Go original's own rankVtx (used within a growing
    depth, against each candidate's elimination subgraph) and
    findCanonicRoot (used once at the top level, against the *same*
    self-subgraph for every candidate, since there's nothing to eliminate
    yet). See original_source/dag.go (rankVtx) and orca-encode.go
    (findCanonicRoot).
*/

use crate::canonical_sort::smallest_tied_run;
use crate::dag::{export_canonic_block, DagVtx};
use crate::graph::GraphStore;
use crate::subgraph::Subgraph;
use crate::types::{Edge, VtxLabel};
use std::rc::Rc;
use tracing::debug;

fn fetch_subgraph_for_vtx(store: &GraphStore, parent: &Rc<Subgraph>, vtx: &DagVtx) -> Rc<Subgraph> {
    let remove: Vec<Edge> = vtx
        .edges
        .iter()
        .filter(|e| e.edge_type == crate::dag::DagEdgeType::In)
        .map(|e| Edge { va: vtx.label, vb: e.to_vtx, color: e.edge_color })
        .collect();
    store
        .fetch_subgraph(&parent.edge_set, &remove)
        .expect("an In-edge recorded on a DAG vertex must be present in its parent subgraph")
}

/// Resolves a tied run `dag.vtx[start..end]` in place, replacing it with the
/// same vertices in final canonical order.
pub(crate) fn rank_tied_run(
    store: &GraphStore,
    parent_subgraph: &Rc<Subgraph>,
    dag: &mut crate::dag::Dag,
    start: usize,
    end: usize,
) {
    struct Cand {
        vtx: DagVtx,
        subgraph: Rc<Subgraph>,
        block: Vec<u8>,
    }

    let mut items: Vec<Cand> = (start..end)
        .map(|i| {
            let vtx = dag.vtx[i].clone();
            let subgraph = fetch_subgraph_for_vtx(store, parent_subgraph, &vtx);
            Cand { vtx, subgraph, block: Vec::new() }
        })
        .collect();

    let mut l = 0usize;
    let mut r = items.len() - 1;
    let mut rank_depth = 0usize;
    while l < r {
        for item in items[l..=r].iter_mut() {
            item.block = export_canonic_block(store, &item.subgraph, item.vtx.label, rank_depth);
        }
        items[l..=r].sort_by(|a, b| a.block.cmp(&b.block));

        while l < r && (items[l].block.is_empty() || items[l].block != items[l + 1].block) {
            l += 1;
        }
        while l + 1 < r && items[r - 1].block != items[r].block {
            r -= 1;
        }
        debug!(rank_depth, remaining = r - l + 1, "rank_tied_run: narrowed tied window");
        rank_depth += 1;
    }

    for (offset, cand) in items.into_iter().enumerate() {
        dag.vtx[start + offset] = cand.vtx;
    }
}

/// Narrows an initial run of tied root candidates (all compared against the
/// whole graph's self-subgraph) down to a single winner.
pub(crate) fn find_canonic_root(store: &GraphStore, self_subgraph: &Rc<Subgraph>, candidates: &[VtxLabel]) -> VtxLabel {
    if candidates.len() == 1 {
        return candidates[0];
    }

    struct Cand {
        label: VtxLabel,
        block: Vec<u8>,
    }
    let mut items: Vec<Cand> = candidates.iter().map(|&label| Cand { label, block: Vec::new() }).collect();

    let mut l = 0usize;
    let mut r = items.len() - 1;
    let mut rank_depth = 0usize;
    while l < r {
        for item in items[l..=r].iter_mut() {
            item.block = export_canonic_block(store, self_subgraph, item.label, rank_depth);
        }
        items[l..=r].sort_by(|a, b| a.block.cmp(&b.block));

        if items[l].block.is_empty() {
            return items[l].label;
        }

        // Narrow to the smallest run of still-tied candidates, preferring
        // the earliest such run.
        let window = r - l + 1;
        let (start, len) = smallest_tied_run(window, |i, j| items[l + i].block == items[l + j].block);
        l += start;
        r = l + len - 1;
        debug!(rank_depth, remaining = r - l + 1, "find_canonic_root: narrowed tied window");
        rank_depth += 1;
    }

    items[l].label
}
