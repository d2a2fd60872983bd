/*
    The stream decoder: a mirror of the emitter. Reads a command stream of
    NextGraphDef / Inflate commands, each Inflate splicing in either literal
    (vertex, color) pairs or a reference to a previously-stored graph
    (identified by a negative color ID, `-id` referring to dict entry `id`),
    with referenced vertex labels offset to land after whatever's already in
    the graph under construction.

    Latches like GraphStore: the first DecodeError wins and every later read
    becomes a no-op. Grounded on original_source/decoder.go.

    One deliberate deviation from the original: `inflateEncoding` there
    looks a dict entry up by the *negative* color ID directly, but entries
    are stored under positive IDs (`len(defs)+1`), so the lookup can never
    hit -- dead code, never exercised by its own test suite. EncodingID's
    doc comment makes the intent plain ("negative EncodingIDs map to a
    ... dict lookup ID"), so this negates the ID before the lookup.
*/

use crate::error::DecodeError;
use crate::types::{Edge, EncodingID, GraphEncoding, Vtx, VtxLabel};
use crate::varint::{read_uvarint, read_varint};
use std::collections::HashMap;

const CMD_NEXT_GRAPH_DEF: u64 = 1;
const CMD_INFLATE: u64 = 2;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphCanvas {
    pub vtx: Vec<Vtx>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Default)]
pub struct Decoder {
    defs: HashMap<EncodingID, GraphCanvas>,
    cur_graph: GraphCanvas,
    error: Option<DecodeError>,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder::default()
    }

    pub fn error(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// The graph under construction since the last (or absent)
    /// NextGraphDef command.
    pub fn current_graph(&self) -> &GraphCanvas {
        &self.cur_graph
    }

    fn fail(&mut self, pos: usize, reason: &'static str) -> DecodeError {
        let err = DecodeError { offset: pos, reason };
        self.error.get_or_insert_with(|| err.clone());
        err
    }

    /// Processes every command in `genc`. A clean end-of-stream between
    /// commands is not an error; a truncated field mid-command is.
    pub fn inflate_encoding(&mut self, genc: &GraphEncoding) -> Result<(), DecodeError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }

        let mut pos = 0usize;
        while pos < genc.len() {
            let cmd_pos = pos;
            let cmd = match read_uvarint(genc, &mut pos) {
                Some(c) => c,
                None => return Err(self.fail(cmd_pos, "truncated decoder command")),
            };
            match cmd {
                CMD_NEXT_GRAPH_DEF => {
                    if !self.cur_graph.vtx.is_empty() {
                        let new_id = (self.defs.len() + 1) as EncodingID;
                        let finished = std::mem::take(&mut self.cur_graph);
                        self.defs.insert(new_id, finished);
                    } else {
                        self.cur_graph = GraphCanvas::default();
                    }
                }
                CMD_INFLATE => {
                    self.inflate_vtx(genc, &mut pos)?;
                    self.read_edges(genc, &mut pos)?;
                }
                _ => return Err(self.fail(cmd_pos, "unrecognized decoder command")),
            }
            if self.error.is_some() {
                return Err(self.error.clone().unwrap());
            }
        }
        Ok(())
    }

    fn inflate_vtx(&mut self, buf: &[u8], pos: &mut usize) -> Result<(), DecodeError> {
        let count = read_uvarint(buf, pos).ok_or_else(|| self.fail(*pos, "truncated vertex count"))?;
        for _ in 0..count {
            let color_pos = *pos;
            let color_id =
                read_varint(buf, pos).ok_or_else(|| self.fail(color_pos, "truncated color ID"))?;
            if color_id == 0 {
                return Err(self.fail(color_pos, "nil color ID"));
            } else if color_id > 0 {
                let label = (self.cur_graph.vtx.len() + 1) as VtxLabel;
                self.cur_graph.vtx.push(Vtx { label, color: color_id });
            } else {
                self.splice_encoding(-color_id, color_pos)?;
            }
        }
        Ok(())
    }

    fn splice_encoding(&mut self, encoding_id: EncodingID, pos: usize) -> Result<(), DecodeError> {
        let def = self
            .defs
            .get(&encoding_id)
            .ok_or_else(|| DecodeError { offset: pos, reason: "referenced encoding not found" })
            .map_err(|e| {
                self.error.get_or_insert_with(|| e.clone());
                e
            })?
            .clone();

        let label_offset = self.cur_graph.vtx.len() as VtxLabel;
        self.cur_graph.vtx.extend_from_slice(&def.vtx);
        for e in &def.edges {
            self.cur_graph.edges.push(Edge {
                va: e.va + label_offset,
                vb: e.vb + label_offset,
                color: e.color,
            });
        }
        Ok(())
    }

    fn read_edges(&mut self, buf: &[u8], pos: &mut usize) -> Result<(), DecodeError> {
        let count = read_uvarint(buf, pos).ok_or_else(|| self.fail(*pos, "truncated edge count"))?;
        for _ in 0..count {
            let p = *pos;
            let color = read_varint(buf, pos).ok_or_else(|| self.fail(p, "truncated edge color"))?;
            let va = read_uvarint(buf, pos).ok_or_else(|| self.fail(p, "truncated edge Va"))?;
            let vb = read_uvarint(buf, pos).ok_or_else(|| self.fail(p, "truncated edge Vb"))?;
            self.cur_graph.edges.push(Edge { va: va as VtxLabel, vb: vb as VtxLabel, color });
        }
        Ok(())
    }
}
