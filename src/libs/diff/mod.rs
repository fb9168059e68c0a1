//! Classification of the breaks between chain members.
//!
//! For every sequence, in its own coordinates, the members of its best chain
//! are walked from left to right and each transition becomes an [`Event`].
//!
//! * [`item`] - Alignments seen from one sequence, plus the two boundaries.
//! * [`rank`] - Positions of the alignments in the partner chains.
//! * [`sweep`] - The walk and its classification rules.
//! * [`event`] - Events and their plain / feature renderings.

pub mod event;
pub mod item;
pub mod rank;
pub mod sweep;

pub use event::{write_events, Event, IndelKind, Style};
pub use item::{collect_items, Item, Mark};
pub use rank::assign_ranks;
pub use sweep::sweep;

use crate::libs::delta::{Axis, Graph};
use rayon::prelude::*;

/// Events of every sequence of `axis`, in name order.
///
/// With `parallel` the sequences are walked on the global rayon pool. Each
/// walk owns its items and rank table, so the result is the same as the
/// sequential one.
pub fn diff_axis(graph: &Graph, axis: Axis, parallel: bool) -> anyhow::Result<Vec<Event>> {
    let nodes: Vec<usize> = (0..axis.nodes(graph).len()).collect();

    let per_seq: Vec<Vec<Event>> = if parallel {
        nodes
            .par_iter()
            .map(|&i| sweep(graph, axis, i))
            .collect::<anyhow::Result<_>>()?
    } else {
        nodes
            .iter()
            .map(|&i| sweep(graph, axis, i))
            .collect::<anyhow::Result<_>>()?
    };

    Ok(per_seq.into_iter().flatten().collect())
}
