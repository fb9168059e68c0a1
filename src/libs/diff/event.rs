use std::fmt;
use std::io::{self, Write};

/// A classified break between consecutive chain members of one sequence.
///
/// `start` and `end` are the flanking coordinates on the walked sequence:
/// the last base before the break and the first base after it, so the
/// break itself covers `end - start - 1` bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Marks the start of the events of a sequence
    NewSeq(String),
    /// Sequence not covered by any chain member
    Gap { start: i64, end: i64 },
    /// The chain continues on another partner sequence
    SeqJump {
        start: i64,
        end: i64,
        partner: String,
    },
    /// Same partner, but not the next position of the partner's chain
    ChainJump { start: i64, end: i64 },
    /// Same partner, opposite orientation
    Inversion { start: i64, end: i64 },
    /// Neighbours on both sequences; `gap` bases here against `o_gap` bases
    /// on the partner
    Indel {
        start: i64,
        end: i64,
        gap: i64,
        o_gap: i64,
    },
    /// An alignment outside the partner's chain, inclusive bounds
    Dup { start: i64, end: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelKind {
    Ins,
    Del,
}

impl Event {
    pub fn keyword(&self) -> &'static str {
        match self {
            Event::NewSeq(_) => ">",
            Event::Gap { .. } => "GAP",
            Event::SeqJump { .. } => "SEQ",
            Event::ChainJump { .. } => "JMP",
            Event::Inversion { .. } => "INV",
            Event::Indel { .. } => match self.indel_kind() {
                Some(IndelKind::Ins) => "INS",
                _ => "DEL",
            },
            Event::Dup { .. } => "DUP",
        }
    }

    pub fn span(&self) -> Option<(i64, i64)> {
        match *self {
            Event::NewSeq(_) => None,
            Event::Gap { start, end }
            | Event::SeqJump { start, end, .. }
            | Event::ChainJump { start, end }
            | Event::Inversion { start, end }
            | Event::Indel { start, end, .. }
            | Event::Dup { start, end } => Some((start, end)),
        }
    }

    /// Bases between the flanks, or the inclusive span of a duplication.
    /// Negative values mean the flanking alignments overlap.
    pub fn length(&self) -> Option<i64> {
        match self {
            Event::NewSeq(_) => None,
            Event::Dup { start, end } => Some(end - start + 1),
            _ => self.span().map(|(s, e)| e - s - 1),
        }
    }

    /// `gap - o_gap` of an indel
    pub fn len_delta(&self) -> Option<i64> {
        match self {
            Event::Indel { gap, o_gap, .. } => Some(gap - o_gap),
            _ => None,
        }
    }

    pub fn indel_kind(&self) -> Option<IndelKind> {
        self.len_delta().map(|d| {
            if d > 0 {
                IndelKind::Ins
            } else {
                IndelKind::Del
            }
        })
    }
}

/// The plain, tab separated line of an event.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::NewSeq(name) => write!(f, ">{}", name),
            Event::SeqJump {
                start,
                end,
                partner,
            } => write!(
                f,
                "{} {}\t{}\t{}\t{}",
                self.keyword(),
                start,
                end,
                end - start - 1,
                partner
            ),
            Event::Indel {
                start,
                end,
                gap,
                o_gap,
            } => write!(
                f,
                "{} {}\t{}\t{}\t{}\t{}",
                self.keyword(),
                start,
                end,
                gap,
                o_gap,
                gap - o_gap
            ),
            _ => {
                let (start, end) = self.span().unwrap_or_default();
                let length = self.length().unwrap_or_default();
                write!(f, "{} {}\t{}\t{}", self.keyword(), start, end, length)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// `>name` headers and one tab separated line per event
    #[default]
    Plain,
    /// AMOS `{FEA}` records
    Feature,
}

/// Writes the events of one or more sequences. Each sequence starts with
/// its [`Event::NewSeq`].
pub fn write_events<W: Write>(writer: &mut W, events: &[Event], style: Style) -> io::Result<()> {
    let mut seq = "";
    for event in events {
        match (event, style) {
            (Event::NewSeq(name), Style::Plain) => {
                seq = name;
                writeln!(writer, "{}", event)?;
            }
            (Event::NewSeq(name), Style::Feature) => {
                seq = name;
            }
            (_, Style::Plain) => writeln!(writer, "{}", event)?,
            (_, Style::Feature) => {
                let (start, end) = event.span().unwrap_or_default();
                write!(
                    writer,
                    "{{FEA\ntyp:A\nclr:{},{}\ncom:{}\nsrc:{},CTG\n}}\n",
                    start, end, event, seq
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let gap = Event::Gap { start: 0, end: 1 };
        assert_eq!(gap.to_string(), "GAP 0\t1\t0");

        let jump = Event::SeqJump {
            start: 500,
            end: 601,
            partner: "ctg2".to_string(),
        };
        assert_eq!(jump.to_string(), "SEQ 500\t601\t100\tctg2");

        let ins = Event::Indel {
            start: 100,
            end: 111,
            gap: 10,
            o_gap: 2,
        };
        assert_eq!(ins.indel_kind(), Some(IndelKind::Ins));
        assert_eq!(ins.to_string(), "INS 100\t111\t10\t2\t8");

        let del = Event::Indel {
            start: 100,
            end: 101,
            gap: 0,
            o_gap: 0,
        };
        assert_eq!(del.to_string(), "DEL 100\t101\t0\t0\t0");

        let dup = Event::Dup {
            start: 200,
            end: 299,
        };
        assert_eq!(dup.length(), Some(100));
        assert_eq!(dup.to_string(), "DUP 200\t299\t100");

        // overlapping flanks
        let inv = Event::Inversion {
            start: 510,
            end: 501,
        };
        assert_eq!(inv.to_string(), "INV 510\t501\t-10");
    }

    #[test]
    fn test_write_styles() {
        let events = vec![
            Event::NewSeq("chr1".to_string()),
            Event::ChainJump {
                start: 10,
                end: 20,
            },
        ];

        let mut out: Vec<u8> = vec![];
        write_events(&mut out, &events, Style::Plain).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">chr1\nJMP 10\t20\t9\n");

        let mut out: Vec<u8> = vec![];
        write_events(&mut out, &events, Style::Feature).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{FEA\ntyp:A\nclr:10,20\ncom:JMP 10\t20\t9\nsrc:chr1,CTG\n}\n"
        );
    }
}
