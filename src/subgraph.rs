/*
    A Subgraph is an interned (EdgeSet, cached per-root Dag map) pair. Two
    FetchSubGraph calls that land on the same edge set return the same `Rc`,
    which is what makes subgraph interning an identity property and not just
    a cache: the Ranker and root finder rely on being able to reuse work
    already done for an elimination subgraph encountered again via a
    different path.

    The per-root Dag cache uses a RefCell rather than requiring `&mut` access
    to the whole GraphStore: growing one root's Dag may recursively fetch and
    grow a *different* subgraph's Dag (an elimination subgraph always removes
    at least one more edge than its parent, so this never reenters the same
    RefCell), but never touches its own cache while already borrowing it --
    see dag::export_canonic_block, which takes the Dag out, grows it, and
    puts it back before returning.
*/

use crate::dag::Dag;
use crate::edge_set::EdgeSet;
use crate::types::VtxLabel;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug)]
pub struct Subgraph {
    pub edge_set: EdgeSet,
    dag_from_vtx: RefCell<HashMap<VtxLabel, Dag>>,
}

impl Subgraph {
    pub fn new(edge_set: EdgeSet) -> Self {
        Subgraph { edge_set, dag_from_vtx: RefCell::new(HashMap::new()) }
    }

    pub(crate) fn take_dag(&self, root: VtxLabel) -> Option<Dag> {
        self.dag_from_vtx.borrow_mut().remove(&root)
    }

    pub(crate) fn put_dag(&self, root: VtxLabel, dag: Dag) {
        self.dag_from_vtx.borrow_mut().insert(root, dag);
    }
}
