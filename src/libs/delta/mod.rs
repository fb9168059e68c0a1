//! Delta alignment files and the alignment graph built from them.
//!
//! * [`record`] - Reading and writing the delta format.
//! * [`graph`] - Sequences (nodes), sequence pairs (edges) and their alignments (edgelets).
//! * [`axis`] - Reference or query coordinate space.
//! * [`lis`] - Selection of the best non-overlapping chain on each axis.

pub mod axis;
pub mod graph;
pub mod lis;
pub mod record;

pub use axis::Axis;
pub use graph::{Edge, Edgelet, Graph, Node, Strand};
pub use lis::{flag_lis, flag_qlis, flag_rlis, flag_wga, LisOpts};
pub use record::{DeltaAlign, DeltaHeader, DeltaKind, DeltaReader, DeltaRecord};
