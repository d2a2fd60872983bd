/*
    The Canonizer: the public entry point tying GraphStore, the DAG builder,
    canonical_sort, and the Ranker together. `build_graph`/`canonize` mirror
    the Go original's channel-based `BuildGraph(GraphIn) error` /
    `Canonize(GraphOut)`; `build_graph_from`/`canonize_to_vecs`/
    `canonize_encoding` are slice-based convenience wrappers over the same
    core, since most Rust callers have their vertices and edges in memory
    already rather than behind channels.

    Grounded on original_source/orca-encode.go's encoderCtx/Canonize/
    findCanonicRoot and original_source/types.go's CanonizerOpts.
*/

use crate::canonical_sort::{canonic_sort, smallest_tied_run};
use crate::channel::{GraphIn, GraphOut};
use crate::dag::Dag;
use crate::error::GraphError;
use crate::graph::{GraphStore, SubGraphLimits};
use crate::ranker::find_canonic_root;
use crate::types::{Edge, GraphEncoding, Vtx, VtxLabel};
use tracing::instrument;

/// Caps placed on subgraph interning. `sub_graph_limit` bounds how many
/// distinct subgraphs the store will intern before falling back to
/// uninterned (but still correct) `Subgraph` values; `soft_infinity`
/// controls whether exceeding that cap is silent (`true`, the default,
/// matching the Go original) or logged via `tracing::warn!` (`false`).
#[derive(Clone, Copy, Debug)]
pub struct CanonizerOpts {
    pub sub_graph_limit: usize,
    pub soft_infinity: bool,
}

impl Default for CanonizerOpts {
    fn default() -> Self {
        CanonizerOpts { sub_graph_limit: 3_000_000_000, soft_infinity: true }
    }
}

/// A graph's canonical form: vertices relabeled `1..=Nv` in canonical order,
/// and edges expressed over those new labels.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CanonicalForm {
    pub vtx: Vec<Vtx>,
    pub edges: Vec<Edge>,
}

pub struct Canonizer {
    store: GraphStore,
}

impl Canonizer {
    pub fn new(opts: CanonizerOpts) -> Self {
        Canonizer {
            store: GraphStore::new(SubGraphLimits {
                sub_graph_limit: opts.sub_graph_limit,
                soft_infinity: opts.soft_infinity,
            }),
        }
    }

    pub fn error(&self) -> Option<&GraphError> {
        self.store.error()
    }

    pub fn num_verts(&self) -> usize {
        self.store.num_verts()
    }

    pub fn num_edges(&self) -> usize {
        self.store.num_edges()
    }

    /// Drains `gin` to completion (its forwarder threads run until both the
    /// vertex and edge channels close), feeding every item into the store.
    #[instrument(skip(self, gin), level = "debug")]
    pub fn build_graph(&mut self, gin: GraphIn) -> Result<(), GraphError> {
        self.store.begin_graph(32, 32);
        for item in gin {
            match item {
                crate::channel::GraphItem::Vtx(v) => {
                    let _ = self.store.add_vertex(v);
                }
                crate::channel::GraphItem::Edge(e) => {
                    let _ = self.store.add_edge(e);
                }
            }
        }
        self.store.end_graph()
    }

    /// Slice-based convenience wrapper around `build_graph`.
    #[instrument(skip(self, vtx, edges), fields(num_vtx = vtx.len(), num_edges = edges.len()), level = "debug")]
    pub fn build_graph_from(&mut self, vtx: &[Vtx], edges: &[Edge]) -> Result<(), GraphError> {
        self.store.begin_graph(vtx.len(), edges.len());
        for &v in vtx {
            self.store.add_vertex(v)?;
        }
        for &e in edges {
            self.store.add_edge(e)?;
        }
        self.store.end_graph()
    }

    /// Picks the canonic root and streams the canonical vertex/edge sequence
    /// to `gout`, matching the Go original's `Canonize(GraphOut)`.
    #[instrument(skip(self, gout), level = "debug")]
    pub fn canonize(&mut self, gout: GraphOut) -> Result<(), GraphError> {
        let form = self.canonize_to_vecs()?;
        for v in form.vtx {
            gout.send_vtx(v);
        }
        for e in form.edges {
            gout.send_edge(e);
        }
        gout.finish();
        Ok(())
    }

    /// Runs canonization and returns the canonical vertex/edge lists
    /// directly, without going through channels.
    #[instrument(skip(self), level = "debug")]
    pub fn canonize_to_vecs(&mut self) -> Result<CanonicalForm, GraphError> {
        if let Some(e) = self.store.error() {
            return Err(e.clone());
        }

        let self_subgraph = self.store.self_sub_graph();
        if self.store.num_verts() == 0 {
            return Ok(CanonicalForm::default());
        }

        let mut vtx = self.store.root_level_dag_vtx();
        canonic_sort(&mut vtx);

        let nv = vtx.len();
        let (start, len) = smallest_tied_run(nv, |i, j| {
            crate::canonical_sort::dag_vtx_canonic_compare(&vtx[i], &vtx[j]) == std::cmp::Ordering::Equal
        });
        let candidates: Vec<VtxLabel> = vtx[start..start + len].iter().map(|v| v.label).collect();

        let root = find_canonic_root(&self.store, &self_subgraph, &candidates);

        let mut dag = Dag::new(root, &self.store);
        crate::dag::grow_to_completion(&self.store, &self_subgraph, &mut dag);

        Ok(export_canonical(&dag))
    }

    /// Runs canonization and returns the single canonical byte encoding
    /// (the same routine the per-depth Ranker blocks are built from, just
    /// applied to the whole DAG at once).
    #[instrument(skip(self), level = "debug")]
    pub fn canonize_encoding(&mut self) -> Result<GraphEncoding, GraphError> {
        if let Some(e) = self.store.error() {
            return Err(e.clone());
        }
        if self.store.num_verts() == 0 {
            return Ok(Vec::new());
        }

        let self_subgraph = self.store.self_sub_graph();
        let mut vtx = self.store.root_level_dag_vtx();
        canonic_sort(&mut vtx);
        let nv = vtx.len();
        let (start, len) = smallest_tied_run(nv, |i, j| {
            crate::canonical_sort::dag_vtx_canonic_compare(&vtx[i], &vtx[j]) == std::cmp::Ordering::Equal
        });
        let candidates: Vec<VtxLabel> = vtx[start..start + len].iter().map(|v| v.label).collect();
        let root = find_canonic_root(&self.store, &self_subgraph, &candidates);

        let mut dag = Dag::new(root, &self.store);
        crate::dag::grow_to_completion(&self.store, &self_subgraph, &mut dag);

        Ok(crate::block::encode_depth_block(&dag, 0, dag.vtx.len()))
    }

    pub fn debug_space(&self) -> usize {
        self.store.debug_space()
    }

    pub fn debug_time(&self) -> usize {
        self.store.debug_time()
    }
}

/// Reads a fully-grown Dag into canonical vertex/edge lists: vertex `i`
/// (zero-based, in DAG order) becomes label `i+1`; an edge is emitted once,
/// from its later-discovered endpoint to its earlier one.
fn export_canonical(dag: &Dag) -> CanonicalForm {
    let mut vtx = Vec::with_capacity(dag.vtx.len());
    let mut edges = Vec::new();
    for (i, v) in dag.vtx.iter().enumerate() {
        let canonic_from = (i + 1) as VtxLabel;
        vtx.push(Vtx { label: canonic_from, color: v.color });
        for e in &v.edges {
            if matches!(e.edge_type, crate::dag::DagEdgeType::In | crate::dag::DagEdgeType::Co) {
                let canonic_to = dag.vtx_index[&e.to_vtx] + 1;
                if canonic_to < canonic_from {
                    edges.push(Edge { va: canonic_to, vb: canonic_from, color: e.edge_color });
                }
            }
        }
    }
    CanonicalForm { vtx, edges }
}
