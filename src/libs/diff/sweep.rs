use crate::libs::delta::{Axis, Graph};
use crate::libs::diff::event::Event;
use crate::libs::diff::item::{collect_items, Item, Mark};
use crate::libs::diff::rank::assign_ranks;
use anyhow::{anyhow, bail, ensure};

/// Walk order: head, alignments by low then high coordinate, tail.
fn sweep_order(items: &[Item]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| {
        let x = &items[i];
        let (m, edge, idx) = x.mark_key();
        (m, x.lo, x.hi, x.o_lo, edge, idx)
    });
    order
}

/// Classifies the breaks of the `node`-th sequence of `axis`.
///
/// Walks the chain members of `axis` from left to right. `pa` is the
/// previous chain member and `pga` the previous one that is also in the
/// partner's chain; an alignment missing from the partner's chain is a
/// duplication and never becomes `pga`.
pub fn sweep(graph: &Graph, axis: Axis, node: usize) -> anyhow::Result<Vec<Event>> {
    let (name, seq) = axis
        .nodes(graph)
        .get_index(node)
        .ok_or_else(|| anyhow!("No {} sequence with index {}", axis.name(), node))?;
    let o_nodes = axis.other().nodes(graph);

    let items = collect_items(graph, axis, seq);
    let ranks = assign_ranks(&items);
    let order = sweep_order(&items);

    let first = order[0];
    let last = order[order.len() - 1];
    ensure!(
        items[first].mark == Mark::Head && items[last].mark == Mark::Tail,
        "Walk of {} is not bounded by its boundaries",
        name
    );

    let mut events = vec![Event::NewSeq(name.clone())];
    let mut pa = first;
    let mut pga = first;
    for &i in &order[1..] {
        let a = &items[i];
        if !a.on_chain {
            continue;
        }
        let p = &items[pa];
        let pg = &items[pga];
        let (start, end) = (p.hi, a.lo);

        let edge = match a.mark {
            Mark::Tail => {
                events.push(Event::Gap { start, end });
                break;
            }
            Mark::Head => bail!("Head boundary met inside the walk of {}", name),
            Mark::Aln { edge, .. } => edge,
        };

        if a.o_chain && pg.edge() == Some(edge) {
            if a.slope != pg.slope {
                events.push(Event::Inversion { start, end });
            } else if ranks[i] != ranks[pga] + pg.slope {
                events.push(Event::ChainJump { start, end });
            } else if pa == pga {
                // lined up, nothing in between
                let o_gap = if a.slope > 0 {
                    a.o_lo - pg.o_hi - 1
                } else {
                    pg.o_lo - a.o_hi - 1
                };
                events.push(Event::Indel {
                    start,
                    end,
                    gap: end - start - 1,
                    o_gap,
                });
            } else {
                // lined up, a duplication in between
                events.push(Event::Gap { start, end });
            }
        } else if !a.o_chain {
            events.push(Event::Gap { start, end });
            events.push(Event::Dup {
                start: a.lo,
                end: a.hi,
            });
        } else {
            let partner = a
                .partner
                .and_then(|o| o_nodes.get_index(o))
                .map(|(n, _)| n.clone())
                .ok_or_else(|| anyhow!("Alignment on {} has no partner sequence", name))?;
            events.push(Event::SeqJump {
                start,
                end,
                partner,
            });
        }

        if a.o_chain {
            pga = i;
        }
        pa = i;
    }

    log::debug!(
        "{} {}: {} alignments, {} events",
        axis.name(),
        name,
        items.len() - 2,
        events.len() - 1
    );

    Ok(events)
}
