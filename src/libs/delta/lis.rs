use crate::libs::delta::axis::Axis;
use crate::libs::delta::graph::Graph;

/// Options of the chain selection.
#[derive(Debug, Clone, Copy)]
pub struct LisOpts {
    /// Largest overlap between consecutive chain members, in percent of the
    /// shorter one. 100 only rules out containment.
    pub max_overlap: f64,
}

impl Default for LisOpts {
    fn default() -> Self {
        Self { max_overlap: 100.0 }
    }
}

#[derive(Debug, Clone, Copy)]
struct LisItem {
    edge: usize,
    idx: usize,
    lo: i64,
    hi: i64,
    idy: f64,
}

impl LisItem {
    fn len(&self) -> i64 {
        self.hi - self.lo + 1
    }
}

struct DpEntry {
    best_pred: Option<usize>,
    total_score: f64,
}

/// Flags the best chain in reference space of every reference sequence.
pub fn flag_rlis(graph: &mut Graph, opts: &LisOpts) {
    flag_lis(graph, Axis::Ref, opts);
}

/// Flags the best chain in query space of every query sequence.
pub fn flag_qlis(graph: &mut Graph, opts: &LisOpts) {
    flag_lis(graph, Axis::Qry, opts);
}

/// Flags both chains. Cleaning afterwards keeps their union.
pub fn flag_wga(graph: &mut Graph, opts: &LisOpts) {
    flag_rlis(graph, opts);
    flag_qlis(graph, opts);
}

/// Weighted longest increasing subsequence over all alignments touching each
/// sequence of `axis`, regardless of their partner sequences.
///
/// Alignments are weighted by `length * identity`; the overlapped part of a
/// chain member does not count twice.
pub fn flag_lis(graph: &mut Graph, axis: Axis, opts: &LisOpts) {
    for edge in graph.edges.iter_mut() {
        for e in edge.edgelets.iter_mut() {
            axis.set_chain(e, false);
        }
    }

    let mut members: Vec<LisItem> = vec![];
    for node in axis.nodes(graph).values() {
        let mut items: Vec<LisItem> = vec![];
        for &edge_idx in &node.edges {
            for (idx, e) in graph.edges[edge_idx].edgelets.iter().enumerate() {
                items.push(LisItem {
                    edge: edge_idx,
                    idx,
                    lo: axis.lo(e),
                    hi: axis.hi(e),
                    idy: e.idy,
                });
            }
        }

        members.extend(best_chain(&mut items, opts));
    }

    for item in &members {
        axis.set_chain(&mut graph.edges[item.edge].edgelets[item.idx], true);
    }

    log::debug!("{} alignments in the {} chains", members.len(), axis.name());
}

/// Returns the members of the best scoring chain, in coordinate order.
fn best_chain(items: &mut [LisItem], opts: &LisOpts) -> Vec<LisItem> {
    if items.is_empty() {
        return vec![];
    }

    items.sort_by_key(|x| (x.lo, x.hi, x.edge, x.idx));

    // 1. Create DP entries
    let mut dp_entries: Vec<DpEntry> = items
        .iter()
        .map(|x| DpEntry {
            best_pred: None,
            total_score: x.len() as f64 * x.idy / 100.0,
        })
        .collect();

    // 2. Find best predecessors
    for i in 0..items.len() {
        let target = &items[i];
        for j in 0..i {
            let cand = &items[j];
            if cand.lo >= target.lo || cand.hi >= target.hi {
                continue;
            }

            let olap = (cand.hi - target.lo + 1).max(0);
            let shorter = cand.len().min(target.len()) as f64;
            if olap as f64 > shorter * opts.max_overlap / 100.0 {
                continue;
            }

            let score =
                dp_entries[j].total_score + (target.len() - olap) as f64 * target.idy / 100.0;
            if score > dp_entries[i].total_score {
                dp_entries[i].total_score = score;
                dp_entries[i].best_pred = Some(j);
            }
        }
    }

    // 3. Back-track from the first best end
    let mut best = 0;
    for i in 1..dp_entries.len() {
        if dp_entries[i].total_score > dp_entries[best].total_score {
            best = i;
        }
    }

    let mut chain = vec![items[best]];
    let mut curr = best;
    while let Some(pred) = dp_entries[curr].best_pred {
        chain.push(items[pred]);
        curr = pred;
    }
    chain.reverse();

    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(idx: usize, lo: i64, hi: i64, idy: f64) -> LisItem {
        LisItem {
            edge: 0,
            idx,
            lo,
            hi,
            idy,
        }
    }

    fn idx_of(chain: &[LisItem]) -> Vec<usize> {
        chain.iter().map(|x| x.idx).collect()
    }

    #[test]
    fn test_best_chain_skips_contained() {
        let mut items = vec![
            item(0, 1, 500, 100.0),
            item(1, 100, 200, 100.0),
            item(2, 501, 1000, 100.0),
        ];
        let chain = best_chain(&mut items, &LisOpts::default());
        assert_eq!(idx_of(&chain), vec![0, 2]);
    }

    #[test]
    fn test_best_chain_prefers_weight() {
        // two overlapping candidates, the longer one wins
        let mut items = vec![
            item(0, 1, 400, 100.0),
            item(1, 300, 1000, 100.0),
            item(2, 350, 600, 100.0),
        ];
        let chain = best_chain(&mut items, &LisOpts::default());
        assert_eq!(idx_of(&chain), vec![0, 1]);

        // low identity makes the short one better
        let mut items = vec![item(0, 1, 400, 10.0), item(1, 350, 500, 100.0)];
        let chain = best_chain(&mut items, &LisOpts::default());
        assert_eq!(idx_of(&chain), vec![1]);
    }

    #[test]
    fn test_best_chain_max_overlap() {
        let mut items = vec![item(0, 1, 100, 100.0), item(1, 51, 150, 100.0)];
        let chain = best_chain(&mut items, &LisOpts { max_overlap: 10.0 });
        assert_eq!(chain.len(), 1);

        let chain = best_chain(&mut items, &LisOpts::default());
        assert_eq!(idx_of(&chain), vec![0, 1]);
    }

    #[test]
    fn test_flag_wga() {
        let input = "\
r.fa q.fa
NUCMER
>r1 q1 1000 1000
1 500 1 500 0 0 0
0
501 1000 501 1000 0 0 0
0
>r1 q2 1000 300
100 300 1 201 0 0 0
0
";
        let mut graph = Graph::from_reader(input.as_bytes()).unwrap();
        flag_wga(&mut graph, &LisOpts::default());

        let q1 = &graph.edges[0].edgelets;
        assert!(q1.iter().all(|e| e.is_rlis && e.is_qlis));

        // contained on r1, but the only alignment of q2
        let dup = &graph.edges[1].edgelets[0];
        assert!(!dup.is_rlis);
        assert!(dup.is_qlis);

        graph.clean();
        assert_eq!(graph.edgelet_count(), 3);
    }
}
