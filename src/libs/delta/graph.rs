use crate::libs::delta::record::{DeltaAlign, DeltaHeader, DeltaReader, DeltaRecord};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

/// A local alignment between an interval of a reference sequence and an
/// interval of a query sequence.
///
/// `lo_*`/`hi_*` are 1-based inclusive bounds, always `lo <= hi`; strands are
/// kept separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edgelet {
    pub lo_r: i64,
    pub hi_r: i64,
    pub lo_q: i64,
    pub hi_q: i64,
    pub dir_r: Strand,
    pub dir_q: Strand,
    /// percent identity
    pub idy: f64,
    /// member of the best chain in reference space
    pub is_rlis: bool,
    /// member of the best chain in query space
    pub is_qlis: bool,
    pub errors: i64,
    pub sim_errors: i64,
    pub stops: i64,
    pub deltas: Vec<i64>,
}

impl Edgelet {
    pub fn from_align(align: &DeltaAlign) -> Self {
        let (lo_r, hi_r, dir_r) = normalize(align.s_r, align.e_r);
        let (lo_q, hi_q, dir_q) = normalize(align.s_q, align.e_q);

        // gaps opened in the reference lengthen the alignment
        let aln_len = hi_r - lo_r + 1 + align.deltas.iter().filter(|&&d| d < 0).count() as i64;
        let idy = (aln_len - align.errors) as f64 / aln_len as f64 * 100.0;

        Self {
            lo_r,
            hi_r,
            lo_q,
            hi_q,
            dir_r,
            dir_q,
            idy,
            is_rlis: false,
            is_qlis: false,
            errors: align.errors,
            sim_errors: align.sim_errors,
            stops: align.stops,
            deltas: align.deltas.clone(),
        }
    }

    pub fn to_align(&self) -> DeltaAlign {
        let (s_r, e_r) = denormalize(self.lo_r, self.hi_r, self.dir_r);
        let (s_q, e_q) = denormalize(self.lo_q, self.hi_q, self.dir_q);
        DeltaAlign {
            s_r,
            e_r,
            s_q,
            e_q,
            errors: self.errors,
            sim_errors: self.sim_errors,
            stops: self.stops,
            deltas: self.deltas.clone(),
        }
    }

    /// `+1` when reference and query run in the same direction, `-1` otherwise.
    pub fn slope(&self) -> i64 {
        if self.dir_r == self.dir_q {
            1
        } else {
            -1
        }
    }

    pub fn is_positive(&self) -> bool {
        self.slope() > 0
    }

    pub fn len_r(&self) -> i64 {
        self.hi_r - self.lo_r + 1
    }
}

fn normalize(s: i64, e: i64) -> (i64, i64, Strand) {
    if s <= e {
        (s, e, Strand::Forward)
    } else {
        (e, s, Strand::Reverse)
    }
}

fn denormalize(lo: i64, hi: i64, dir: Strand) -> (i64, i64) {
    match dir {
        Strand::Forward => (lo, hi),
        Strand::Reverse => (hi, lo),
    }
}

/// A reference or query sequence.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub len: i64,
    /// indices into [`Graph::edges`]
    pub edges: Vec<usize>,
}

/// All alignments between one reference and one query sequence.
#[derive(Debug, Clone, Default)]
pub struct Edge {
    /// index into [`Graph::ref_nodes`]
    pub ref_node: usize,
    /// index into [`Graph::qry_nodes`]
    pub qry_node: usize,
    pub edgelets: Vec<Edgelet>,
}

/// Sequences and the alignments between them, as read from one delta file.
///
/// Both node maps are sorted by name, so node indices follow name order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub header: DeltaHeader,
    pub ref_nodes: IndexMap<String, Node>,
    pub qry_nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut delta = DeltaReader::new(reader)?;
        let header = delta.header().clone();
        let records = delta.by_ref().collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::from_records(header, &records))
    }

    pub fn from_records(header: DeltaHeader, records: &[DeltaRecord]) -> Self {
        let mut ref_nodes: IndexMap<String, Node> = IndexMap::new();
        let mut qry_nodes: IndexMap<String, Node> = IndexMap::new();
        for rec in records {
            ref_nodes.entry(rec.ref_name.clone()).or_default().len = rec.ref_len;
            qry_nodes.entry(rec.qry_name.clone()).or_default().len = rec.qry_len;
        }
        ref_nodes.sort_keys();
        qry_nodes.sort_keys();

        let mut edges: Vec<Edge> = vec![];
        let mut edge_of: HashMap<(usize, usize), usize> = HashMap::new();
        for rec in records {
            // Both names were inserted above
            let r = ref_nodes.get_index_of(&rec.ref_name).unwrap_or_default();
            let q = qry_nodes.get_index_of(&rec.qry_name).unwrap_or_default();

            let idx = *edge_of.entry((r, q)).or_insert_with(|| {
                edges.push(Edge {
                    ref_node: r,
                    qry_node: q,
                    edgelets: vec![],
                });
                edges.len() - 1
            });

            edges[idx]
                .edgelets
                .extend(rec.aligns.iter().map(Edgelet::from_align));
        }

        for (i, edge) in edges.iter().enumerate() {
            ref_nodes[edge.ref_node].edges.push(i);
            qry_nodes[edge.qry_node].edges.push(i);
        }

        let graph = Self {
            header,
            ref_nodes,
            qry_nodes,
            edges,
        };
        log::info!(
            "Read {} reference and {} query sequences, {} alignments",
            graph.ref_nodes.len(),
            graph.qry_nodes.len(),
            graph.edgelet_count()
        );

        graph
    }

    pub fn edgelet_count(&self) -> usize {
        self.edges.iter().map(|e| e.edgelets.len()).sum()
    }

    /// Keeps only the alignments for which `f` returns true.
    /// Edges and nodes stay, even when emptied.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Edgelet) -> bool,
    {
        for edge in self.edges.iter_mut() {
            edge.edgelets.retain(|e| f(e));
        }
    }

    /// Drops alignments that are in neither the reference nor the query chain.
    pub fn clean(&mut self) {
        let before = self.edgelet_count();
        self.retain(|e| e.is_rlis || e.is_qlis);
        log::info!(
            "Kept {} of {} alignments in the reference or query chain",
            self.edgelet_count(),
            before
        );
    }

    /// Writes the graph back in delta format, one header per non-empty edge.
    pub fn write_delta<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.header.write(writer)?;
        for edge in &self.edges {
            if edge.edgelets.is_empty() {
                continue;
            }
            let (ref_name, ref_node) = self.ref_nodes.get_index(edge.ref_node).unwrap_or_else(
                || unreachable!("edge points at reference node {}", edge.ref_node),
            );
            let (qry_name, qry_node) = self.qry_nodes.get_index(edge.qry_node).unwrap_or_else(
                || unreachable!("edge points at query node {}", edge.qry_node),
            );
            let record = DeltaRecord {
                ref_name: ref_name.clone(),
                qry_name: qry_name.clone(),
                ref_len: ref_node.len,
                qry_len: qry_node.len,
                aligns: edge.edgelets.iter().map(|e| e.to_align()).collect(),
            };
            record.write(writer)?;
        }
        Ok(())
    }
}
