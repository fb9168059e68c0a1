use crate::libs::diff::item::Item;

/// Dense ranks of the partner chain members among `items`, `-1` for
/// everything else.
///
/// Items are grouped by partner sequence, boundaries first, and ordered by
/// their low partner coordinate inside each group; ties fall back to edge
/// and alignment indices. Within one partner the ranks follow the partner's
/// own coordinate, so two chain members are neighbours on the partner iff
/// their ranks differ by the slope of the first one.
///
/// The returned table is indexed like `items` and is only meaningful for
/// the walk it was computed for.
pub fn assign_ranks(items: &[Item]) -> Vec<i64> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| {
        let x = &items[i];
        (
            x.partner.map_or((0, 0), |p| (1, p)),
            x.o_lo,
            x.mark_key(),
        )
    });

    let mut ranks = vec![-1; items.len()];
    let mut next = 0;
    for i in order {
        if items[i].o_chain {
            ranks[i] = next;
            next += 1;
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::diff::item::Mark;

    fn aln(edge: usize, idx: usize, partner: usize, o_lo: i64, o_chain: bool) -> Item {
        Item {
            mark: Mark::Aln { edge, idx },
            lo: 1,
            hi: 1,
            o_lo,
            o_hi: o_lo,
            partner: Some(partner),
            on_chain: true,
            o_chain,
            slope: 1,
        }
    }

    #[test]
    fn test_assign_ranks() {
        let items = vec![
            Item::head(),
            aln(1, 0, 1, 500, true),
            aln(0, 0, 0, 900, true),
            aln(0, 1, 0, 100, true),
            aln(0, 2, 0, 300, false),
            aln(1, 1, 1, 50, true),
            Item::tail(1000),
        ];
        let ranks = assign_ranks(&items);

        // boundaries, then partner 0 by o_lo, then partner 1
        assert_eq!(ranks, vec![0, 5, 3, 2, -1, 4, 1]);
    }

    #[test]
    fn test_assign_ranks_ties() {
        let items = vec![
            Item::head(),
            aln(0, 1, 0, 100, true),
            aln(0, 0, 0, 100, true),
            Item::tail(10),
        ];
        assert_eq!(assign_ranks(&items), vec![0, 3, 2, 1]);
        assert_eq!(assign_ranks(&items), assign_ranks(&items));
    }
}
