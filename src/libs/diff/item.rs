use crate::libs::delta::{Axis, Graph, Node};

/// What an [`Item`] stands for. The two boundaries bound every walk and
/// belong to no edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Head,
    Tail,
    Aln { edge: usize, idx: usize },
}

/// One alignment as seen from the walked sequence, or a boundary.
///
/// `lo`/`hi` are on the walked axis, `o_lo`/`o_hi` on the partner axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub mark: Mark,
    pub lo: i64,
    pub hi: i64,
    pub o_lo: i64,
    pub o_hi: i64,
    /// partner node index, `None` for boundaries
    pub partner: Option<usize>,
    /// member of the walked axis chain
    pub on_chain: bool,
    /// member of the partner axis chain
    pub o_chain: bool,
    pub slope: i64,
}

impl Item {
    pub fn head() -> Self {
        Self {
            mark: Mark::Head,
            lo: 0,
            hi: 0,
            o_lo: 0,
            o_hi: 0,
            partner: None,
            on_chain: true,
            o_chain: true,
            slope: 1,
        }
    }

    /// Right boundary of a sequence of length `len`; the partner coordinate
    /// is pinned past every real alignment.
    pub fn tail(len: i64) -> Self {
        Self {
            mark: Mark::Tail,
            lo: len + 1,
            hi: len + 1,
            o_lo: i64::MAX,
            o_hi: i64::MAX,
            partner: None,
            on_chain: true,
            o_chain: true,
            slope: 1,
        }
    }

    pub fn edge(&self) -> Option<usize> {
        match self.mark {
            Mark::Aln { edge, .. } => Some(edge),
            _ => None,
        }
    }

    /// Position of the mark in a walk: head, alignments, tail.
    pub(crate) fn mark_key(&self) -> (u8, usize, usize) {
        match self.mark {
            Mark::Head => (0, 0, 0),
            Mark::Aln { edge, idx } => (1, edge, idx),
            Mark::Tail => (2, 0, 0),
        }
    }
}

/// Gathers every alignment touching `node` on `axis`, plus both boundaries.
/// The head is always first and the tail always last.
pub fn collect_items(graph: &Graph, axis: Axis, node: &Node) -> Vec<Item> {
    let o_axis = axis.other();

    let mut items = vec![Item::head()];
    for &edge_idx in &node.edges {
        let edge = &graph.edges[edge_idx];
        for (idx, e) in edge.edgelets.iter().enumerate() {
            if axis.hi(e) > node.len {
                log::warn!(
                    "Alignment {}-{} runs past the end of a {} sequence of length {}",
                    axis.lo(e),
                    axis.hi(e),
                    axis.name(),
                    node.len
                );
            }
            items.push(Item {
                mark: Mark::Aln {
                    edge: edge_idx,
                    idx,
                },
                lo: axis.lo(e),
                hi: axis.hi(e),
                o_lo: o_axis.lo(e),
                o_hi: o_axis.hi(e),
                partner: Some(o_axis.node_of(edge)),
                on_chain: axis.in_chain(e),
                o_chain: o_axis.in_chain(e),
                slope: e.slope(),
            });
        }
    }
    items.push(Item::tail(node.len));

    items
}
