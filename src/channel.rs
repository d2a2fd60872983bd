/*
    Channel-based graph I/O, mirroring the Go original's GraphIn/GraphOut
    (a pair of Vtx/Edge channels, terminated by a zero-label/zero-Va
    sentinel on each). Go's BuildGraph drains both channels concurrently
    with a `select` and a dual `v.Label != 0 || e.Va != 0` exit condition;
    Rust has no multi-channel select on stable `std::sync::mpsc`, so each
    side is fanned into one tagged-union channel through a small forwarder
    thread per source channel (the substitution the spec explicitly allows:
    "iterators that yield a tagged union Vtx | Edge | End").

    Each forwarder thread owns one clone of the fan-in Sender and exits (and
    so drops its clone) once it sees its own stream's sentinel; GraphIn's
    Iterator then naturally ends once *both* forwarders have exited and
    dropped their clones, which is exactly the "stop only once both streams
    are done" rule the original enforces by hand with its dual condition.
*/

use crate::types::{Edge, Vtx};
use std::sync::mpsc;
use std::thread;

#[derive(Clone, Copy, Debug)]
pub enum GraphItem {
    Vtx(Vtx),
    Edge(Edge),
}

/// The receiving half passed to `Canonizer::build_graph`.
pub struct GraphIn {
    rx: mpsc::Receiver<GraphItem>,
}

impl Iterator for GraphIn {
    type Item = GraphItem;
    fn next(&mut self) -> Option<GraphItem> {
        self.rx.recv().ok()
    }
}

/// The sending half a caller uses to push vertices and edges in, from
/// whatever thread(s) produce them.
pub struct GraphInSender {
    vtx_tx: mpsc::Sender<Vtx>,
    edge_tx: mpsc::Sender<Edge>,
}

impl GraphInSender {
    pub fn send_vtx(&self, v: Vtx) {
        let _ = self.vtx_tx.send(v);
    }

    pub fn send_edge(&self, e: Edge) {
        let _ = self.edge_tx.send(e);
    }

    /// Signals end-of-stream on both channels. Dropping the sender without
    /// calling this has the same effect, since a closed channel also ends
    /// the corresponding forwarder thread's loop.
    pub fn finish(self) {
        let _ = self.vtx_tx.send(Vtx::default());
        let _ = self.edge_tx.send(Edge::default());
    }
}

pub fn new_graph_in() -> (GraphInSender, GraphIn) {
    let (vtx_tx, vtx_rx) = mpsc::channel::<Vtx>();
    let (edge_tx, edge_rx) = mpsc::channel::<Edge>();
    let (tx, rx) = mpsc::channel::<GraphItem>();

    let tx_vtx = tx.clone();
    thread::spawn(move || {
        for v in vtx_rx {
            if v.label == 0 || tx_vtx.send(GraphItem::Vtx(v)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        for e in edge_rx {
            if e.va == 0 || tx.send(GraphItem::Edge(e)).is_err() {
                break;
            }
        }
    });

    (GraphInSender { vtx_tx, edge_tx }, GraphIn { rx })
}

/// The receiving half of a `Canonizer::canonize` call. The producer always
/// sends every vertex, then every edge, then finishes (it never interleaves
/// the two, unlike the original's concurrent builder side), so draining one
/// channel fully before the other is enough: no fan-in thread is needed here.
pub struct GraphOutReceiver {
    vtx_rx: mpsc::Receiver<Vtx>,
    edge_rx: mpsc::Receiver<Edge>,
}

impl GraphOutReceiver {
    pub fn recv_all(self) -> (Vec<Vtx>, Vec<Edge>) {
        let mut vtx = Vec::new();
        for v in self.vtx_rx {
            if v.label == 0 {
                break;
            }
            vtx.push(v);
        }
        let mut edges = Vec::new();
        for e in self.edge_rx {
            if e.va == 0 {
                break;
            }
            edges.push(e);
        }
        (vtx, edges)
    }
}

pub struct GraphOut {
    vtx_tx: mpsc::Sender<Vtx>,
    edge_tx: mpsc::Sender<Edge>,
}

impl GraphOut {
    pub fn send_vtx(&self, v: Vtx) {
        let _ = self.vtx_tx.send(v);
    }

    pub fn send_edge(&self, e: Edge) {
        let _ = self.edge_tx.send(e);
    }

    pub fn finish(self) {
        let _ = self.vtx_tx.send(Vtx::default());
        let _ = self.edge_tx.send(Edge::default());
    }
}

pub fn new_graph_out() -> (GraphOut, GraphOutReceiver) {
    let (vtx_tx, vtx_rx) = mpsc::channel::<Vtx>();
    let (edge_tx, edge_rx) = mpsc::channel::<Edge>();
    (GraphOut { vtx_tx, edge_tx }, GraphOutReceiver { vtx_rx, edge_rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_in_fans_in_both_streams_and_stops_at_sentinels() {
        let (sender, gin) = new_graph_in();
        sender.send_vtx(Vtx { label: 1, color: 0 });
        sender.send_edge(Edge { va: 1, vb: 2, color: 0 });
        sender.send_vtx(Vtx { label: 2, color: 0 });
        sender.finish();

        let items: Vec<GraphItem> = gin.collect();
        let vtx_count = items.iter().filter(|i| matches!(i, GraphItem::Vtx(_))).count();
        let edge_count = items.iter().filter(|i| matches!(i, GraphItem::Edge(_))).count();
        assert_eq!(vtx_count, 2);
        assert_eq!(edge_count, 1);
    }

    #[test]
    fn graph_out_stops_each_stream_at_its_own_sentinel() {
        let (gout, recv) = new_graph_out();
        gout.send_vtx(Vtx { label: 1, color: 5 });
        gout.send_edge(Edge { va: 1, vb: 2, color: 0 });
        gout.finish();

        let (vtx, edges) = recv.recv_all();
        assert_eq!(vtx, vec![Vtx { label: 1, color: 5 }]);
        assert_eq!(edges, vec![Edge { va: 1, vb: 2, color: 0 }]);
    }
}
