/*
    Canonical ordering of DAG rows, used both within a single growing depth
    and (via GraphStore::root_level_dag_vtx) for the initial root-candidate
    sort. Grounded on original_source/dag.go's dagEdgeCanonicCompare /
    dagVtxCanonicCompare / canonicSort / canonizeVtxOrder.

    dag_vtx_canonic_compare asserts both rows are at the same depth: comparing
    across depths is a bug in the caller, not a possible input condition, so
    it panics rather than returning a `Result`.
*/

use crate::dag::{Dag, DagEdge, DagVtx};
use crate::graph::GraphStore;
use crate::subgraph::Subgraph;
use std::cmp::Ordering;
use std::rc::Rc;

pub(crate) fn dag_edge_canonic_compare(a: &DagEdge, b: &DagEdge) -> Ordering {
    a.edge_type
        .cmp(&b.edge_type)
        .then(a.edge_color.cmp(&b.edge_color))
        .then(a.to_vtx_color.cmp(&b.to_vtx_color))
}

pub(crate) fn dag_vtx_canonic_compare(a: &DagVtx, b: &DagVtx) -> Ordering {
    assert_eq!(
        a.depth, b.depth,
        "dag_vtx_canonic_compare called across depths ({} vs {})",
        a.depth, b.depth
    );
    // Higher out-degree sorts first.
    b.edges
        .len()
        .cmp(&a.edges.len())
        .then(a.color.cmp(&b.color))
        .then_with(|| {
            for (ae, be) in a.edges.iter().zip(b.edges.iter()) {
                let c = dag_edge_canonic_compare(ae, be);
                if c != Ordering::Equal {
                    return c;
                }
            }
            Ordering::Equal
        })
}

pub(crate) fn canonic_sort(vtx: &mut [DagVtx]) {
    for v in vtx.iter_mut() {
        v.edges.sort_by(dag_edge_canonic_compare);
    }
    vtx.sort_by(dag_vtx_canonic_compare);
}

/// Scans `eq(i, i+1)` for `i` in `0..n-1` and returns the `(start, len)` of
/// the first minimal-length run of mutually-equal adjacent elements,
/// short-circuiting as soon as a singleton (already-unique) run is found.
///
/// Shared by canonize_vtx_order, the Ranker's root-candidate narrowing, and
/// the driver's initial root-candidate selection -- all three need the same
/// "find the smallest run of ties, preferring the earliest" scan.
pub(crate) fn smallest_tied_run(n: usize, eq: impl Fn(usize, usize) -> bool) -> (usize, usize) {
    let mut best = (0, n);
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && eq(j, j + 1) {
            j += 1;
        }
        let len = j - i + 1;
        if len < best.1 {
            best = (i, len);
        }
        if len == 1 {
            return (i, 1);
        }
        i = j + 1;
    }
    best
}

/// Canonically sorts `dag.vtx[l..r]`, resolving any locally-tied run by
/// handing it to the Ranker, then brings `dag.vtx_index` back in sync with
/// the new positions.
pub(crate) fn canonize_vtx_order(
    store: &GraphStore,
    subgraph: &Rc<Subgraph>,
    dag: &mut Dag,
    l: usize,
    r: usize,
) {
    if r - l <= 1 {
        return;
    }
    canonic_sort(&mut dag.vtx[l..r]);

    let n = r - l;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && dag_vtx_canonic_compare(&dag.vtx[l + j], &dag.vtx[l + j + 1]) == Ordering::Equal {
            j += 1;
        }
        if j > i {
            crate::ranker::rank_tied_run(store, subgraph, dag, l + i, l + j + 1);
        }
        i = j + 1;
    }

    for i in l..r {
        dag.vtx_index.insert(dag.vtx[i].label, i as u32);
    }
}
