/*
    GraphStore: the input-side half of the canonizer. Vertices and edges are
    staged through BeginGraph/AddVertex/AddEdge/EndGraph (the same sticky-
    latched shape as the Go original's graph.BeginGraph/AddVertex/AddEdge/
    EndGraph: the first error wins and every later mutator becomes a no-op),
    then EndGraph seals the adjacency lists and the store becomes read-only
    except for subgraph interning, which is a cache and uses interior
    mutability (see subgraph.rs) so it can be driven through `&self`.

    Half-edges at each vertex are sorted by (edgeColor, toVtxLabel) so that
    canonic_sort's output only depends on color and reachable structure, not
    on caller-supplied vertex order.
*/

use crate::debug_counter::DebugCounter;
use crate::edge_set::EdgeSet;
use crate::error::GraphError;
use crate::subgraph::Subgraph;
use crate::types::{CanonicalEdge, Edge, EdgeIdx, Vtx, VtxColor, VtxLabel};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::warn;

#[derive(Clone, Copy, Debug)]
pub(crate) struct AdjEdge {
    pub edge_color: crate::types::EdgeColor,
    pub to_vtx: VtxLabel,
    pub to_vtx_color: VtxColor,
}

#[derive(Clone, Debug)]
pub(crate) struct AdjVtx {
    pub label: VtxLabel,
    pub color: VtxColor,
    pub half_edges: Vec<AdjEdge>,
}

/// Limits placed on subgraph interning. See [`crate::driver::CanonizerOpts`].
#[derive(Clone, Copy, Debug)]
pub struct SubGraphLimits {
    pub sub_graph_limit: usize,
    pub soft_infinity: bool,
}

impl Default for SubGraphLimits {
    fn default() -> Self {
        SubGraphLimits { sub_graph_limit: usize::MAX, soft_infinity: true }
    }
}

#[derive(Debug)]
pub struct GraphStore {
    error: Option<GraphError>,
    vtx_index: HashMap<VtxLabel, u32>,
    vtx: Vec<AdjVtx>,
    edge_map: HashMap<CanonicalEdge, EdgeIdx>,
    edges: Vec<CanonicalEdge>,
    subgraphs: RefCell<BTreeMap<EdgeSet, Rc<Subgraph>>>,
    limits: SubGraphLimits,
    space: DebugCounter,
    time: DebugCounter,
}

impl GraphStore {
    pub fn new(limits: SubGraphLimits) -> Self {
        GraphStore {
            error: None,
            vtx_index: HashMap::new(),
            vtx: Vec::new(),
            edge_map: HashMap::new(),
            edges: Vec::new(),
            subgraphs: RefCell::new(BTreeMap::new()),
            limits,
            space: DebugCounter::new(),
            time: DebugCounter::new(),
        }
    }

    pub fn error(&self) -> Option<&GraphError> {
        self.error.as_ref()
    }

    fn throw(&mut self, err: GraphError) -> Result<(), GraphError> {
        if self.error.is_none() {
            self.error = Some(err.clone());
        }
        Err(err)
    }

    pub fn begin_graph(&mut self, num_vtx_hint: usize, num_edges_hint: usize) {
        self.error = None;
        self.vtx_index.clear();
        self.vtx.clear();
        self.vtx.reserve(num_vtx_hint);
        self.edge_map.clear();
        self.edges.clear();
        self.edges.reserve(num_edges_hint);
        self.subgraphs.borrow_mut().clear();
        self.space = DebugCounter::new();
        self.time = DebugCounter::new();
    }

    pub fn add_vertex(&mut self, v: Vtx) -> Result<(), GraphError> {
        self.time.inc();
        if self.error.is_some() {
            return Err(self.error.clone().unwrap());
        }
        if v.label < 1 {
            return self.throw(GraphError::BadLabel);
        }
        if self.vtx_index.contains_key(&v.label) {
            return self.throw(GraphError::DuplicateVertex(v.label));
        }
        self.space.inc();
        self.vtx_index.insert(v.label, self.vtx.len() as u32);
        self.vtx.push(AdjVtx { label: v.label, color: v.color, half_edges: Vec::new() });
        Ok(())
    }

    pub fn add_edge(&mut self, e: Edge) -> Result<(), GraphError> {
        self.time.inc();
        if self.error.is_some() {
            return Err(self.error.clone().unwrap());
        }
        let canon = e.canonical();
        if self.edge_map.contains_key(&canon) {
            return self.throw(GraphError::DuplicateEdge(canon.va, canon.vb, canon.color));
        }
        self.space.inc();
        self.edge_map.insert(canon, self.edges.len() as EdgeIdx);
        self.edges.push(canon);
        Ok(())
    }

    /// Seals adjacency. No-op (and returns the latched error) once `error`
    /// is already set.
    pub fn end_graph(&mut self) -> Result<(), GraphError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }

        let mut half_edges: Vec<Vec<AdjEdge>> = vec![Vec::new(); self.vtx.len()];
        for &edge in &self.edges {
            self.time.inc();
            let ia = match self.vtx_index.get(&edge.va) {
                Some(&idx) => idx,
                None => {
                    let err = GraphError::DanglingEdge(edge.va);
                    self.error = Some(err.clone());
                    return Err(err);
                }
            };
            let ib = match self.vtx_index.get(&edge.vb) {
                Some(&idx) => idx,
                None => {
                    let err = GraphError::DanglingEdge(edge.vb);
                    self.error = Some(err.clone());
                    return Err(err);
                }
            };
            half_edges[ia as usize].push(AdjEdge {
                edge_color: edge.color,
                to_vtx: edge.vb,
                to_vtx_color: self.vtx[ib as usize].color,
            });
            half_edges[ib as usize].push(AdjEdge {
                edge_color: edge.color,
                to_vtx: edge.va,
                to_vtx_color: self.vtx[ia as usize].color,
            });
        }

        for (i, edges) in half_edges.into_iter().enumerate() {
            let mut edges = edges;
            edges.sort_by(|a, b| a.edge_color.cmp(&b.edge_color).then(a.to_vtx.cmp(&b.to_vtx)));
            self.vtx[i].half_edges = edges;
        }

        Ok(())
    }

    pub fn num_verts(&self) -> usize {
        self.vtx.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn adjacency(&self, label: VtxLabel) -> &[AdjEdge] {
        self.time.inc();
        let idx = self.vtx_index[&label];
        &self.vtx[idx as usize].half_edges
    }

    pub(crate) fn vtx_color(&self, label: VtxLabel) -> VtxColor {
        let idx = self.vtx_index[&label];
        self.vtx[idx as usize].color
    }

    /// The base graph's vertices, expressed as zero-edge-depth DAG rows, for
    /// use as the initial root-candidate set. See canonical_sort.rs.
    pub(crate) fn root_level_dag_vtx(&self) -> Vec<crate::dag::DagVtx> {
        self.vtx
            .iter()
            .map(|v| crate::dag::DagVtx {
                label: v.label,
                color: v.color,
                depth: 0,
                edges: v
                    .half_edges
                    .iter()
                    .map(|e| crate::dag::DagEdge {
                        edge_type: crate::dag::DagEdgeType::Out,
                        edge_color: e.edge_color,
                        to_vtx: e.to_vtx,
                        to_vtx_color: e.to_vtx_color,
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn self_sub_graph(&self) -> Rc<Subgraph> {
        let all = EdgeSet::all_present(self.edges.len());
        self.fetch_subgraph(&all, &[]).expect("SelfSubGraph never removes an edge")
    }

    /// Returns the (interned, when possible) subgraph obtained by removing
    /// `remove` from `from`. Fails with `EdgeNotFound` if any edge in
    /// `remove` is unknown or already absent from `from`.
    pub fn fetch_subgraph(
        &self,
        from: &EdgeSet,
        remove: &[Edge],
    ) -> Result<Rc<Subgraph>, GraphError> {
        self.time.inc();
        let mut candidate = from.clone();
        candidate.ensure_capacity(self.edges.len());
        for e in remove {
            let idx = *self.edge_map.get(&e.canonical()).ok_or(GraphError::EdgeNotFound)?;
            if !candidate.remove(idx) {
                return Err(GraphError::EdgeNotFound);
            }
        }

        let mut subgraphs = self.subgraphs.borrow_mut();
        if let Some(existing) = subgraphs.get(&candidate) {
            return Ok(Rc::clone(existing));
        }

        if subgraphs.len() >= self.limits.sub_graph_limit {
            if !self.limits.soft_infinity {
                warn!(
                    limit = self.limits.sub_graph_limit,
                    "subgraph intern table at capacity; returning an uninterned subgraph"
                );
            }
            return Ok(Rc::new(Subgraph::new(candidate)));
        }

        self.space.inc();
        let sub = Rc::new(Subgraph::new(candidate.clone()));
        subgraphs.insert(candidate, Rc::clone(&sub));
        Ok(sub)
    }

    /// Panics if `edge` isn't a real edge of this graph: callers only ever
    /// probe edges discovered by walking the base adjacency, so an unknown
    /// edge here means the DAG builder is broken, not that the input was bad.
    pub(crate) fn is_edge_present(&self, edge_set: &EdgeSet, edge: CanonicalEdge) -> bool {
        self.time.inc();
        let idx = *self.edge_map.get(&edge).unwrap_or_else(|| {
            panic!("is_edge_present: {:?} is not a known edge of this graph", edge)
        });
        edge_set.is_present(idx)
    }

    pub fn debug_space(&self) -> usize {
        self.space.get()
    }

    pub fn debug_time(&self) -> usize {
        self.time.get()
    }
}
