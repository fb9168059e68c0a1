use crate::libs::delta::graph::{Edge, Edgelet, Graph, Node};
use indexmap::IndexMap;

/// A coordinate space: the reference or the query side of every alignment.
///
/// Algorithms that run once per side are written against an `Axis` instead
/// of being duplicated for reference and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Ref,
    Qry,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Ref => Axis::Qry,
            Axis::Qry => Axis::Ref,
        }
    }

    pub fn lo(self, e: &Edgelet) -> i64 {
        match self {
            Axis::Ref => e.lo_r,
            Axis::Qry => e.lo_q,
        }
    }

    pub fn hi(self, e: &Edgelet) -> i64 {
        match self {
            Axis::Ref => e.hi_r,
            Axis::Qry => e.hi_q,
        }
    }

    /// Membership in the best chain of this coordinate space.
    pub fn in_chain(self, e: &Edgelet) -> bool {
        match self {
            Axis::Ref => e.is_rlis,
            Axis::Qry => e.is_qlis,
        }
    }

    pub fn set_chain(self, e: &mut Edgelet, flag: bool) {
        match self {
            Axis::Ref => e.is_rlis = flag,
            Axis::Qry => e.is_qlis = flag,
        }
    }

    pub fn nodes(self, graph: &Graph) -> &IndexMap<String, Node> {
        match self {
            Axis::Ref => &graph.ref_nodes,
            Axis::Qry => &graph.qry_nodes,
        }
    }

    /// Index of the node on this side of `edge`.
    pub fn node_of(self, edge: &Edge) -> usize {
        match self {
            Axis::Ref => edge.ref_node,
            Axis::Qry => edge.qry_node,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Ref => "reference",
            Axis::Qry => "query",
        }
    }
}
