use anyhow::{anyhow, bail, Context};
use std::io::{self, BufRead, Write};

/// Which program produced the delta file. The coordinates are nucleotide
/// based for both, but PROMER alignments also carry stop codon counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaKind {
    #[default]
    Nucmer,
    Promer,
}

impl DeltaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaKind::Nucmer => "NUCMER",
            DeltaKind::Promer => "PROMER",
        }
    }
}

impl std::str::FromStr for DeltaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NUCMER" => Ok(DeltaKind::Nucmer),
            "PROMER" => Ok(DeltaKind::Promer),
            _ => Err(anyhow!("Unknown alignment data type: {}", s)),
        }
    }
}

/// The two leading lines of a delta file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaHeader {
    pub ref_path: String,
    pub qry_path: String,
    pub kind: DeltaKind,
}

impl DeltaHeader {
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{} {}", self.ref_path, self.qry_path)?;
        writeln!(writer, "{}", self.kind.as_str())?;
        Ok(())
    }
}

/// One alignment line and its indel list.
///
/// Start and end are 1-based and inclusive; `s_q > e_q` (or `s_r > e_r` for
/// PROMER) marks the reverse strand. Each entry of `deltas` is the distance
/// to the next indel, positive for an insertion in the reference and
/// negative for an insertion in the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaAlign {
    pub s_r: i64,
    pub e_r: i64,
    pub s_q: i64,
    pub e_q: i64,
    pub errors: i64,
    pub sim_errors: i64,
    pub stops: i64,
    pub deltas: Vec<i64>,
}

impl DeltaAlign {
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "{} {} {} {} {} {} {}",
            self.s_r, self.e_r, self.s_q, self.e_q, self.errors, self.sim_errors, self.stops
        )?;
        for d in &self.deltas {
            writeln!(writer, "{}", d)?;
        }
        writeln!(writer, "0")?;
        Ok(())
    }
}

/// A `>` header line and the alignments between the two sequences it names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaRecord {
    pub ref_name: String,
    pub qry_name: String,
    pub ref_len: i64,
    pub qry_len: i64,
    pub aligns: Vec<DeltaAlign>,
}

impl DeltaRecord {
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            ">{} {} {} {}",
            self.ref_name, self.qry_name, self.ref_len, self.qry_len
        )?;
        for align in &self.aligns {
            align.write(writer)?;
        }
        Ok(())
    }
}

/// Streaming reader for delta files.
///
/// ```
/// use dlt::libs::delta::DeltaReader;
/// let input = "ref.fa qry.fa\nNUCMER\n>r1 q1 100 80\n1 50 1 50 2 2 0\n10\n-3\n0\n";
/// let mut reader = DeltaReader::new(input.as_bytes()).unwrap();
/// assert_eq!(reader.header().ref_path, "ref.fa");
///
/// let record = reader.next_record().unwrap().unwrap();
/// assert_eq!(record.ref_name, "r1");
/// assert_eq!(record.aligns[0].deltas, vec![10, -3]);
/// assert!(reader.next_record().unwrap().is_none());
/// ```
pub struct DeltaReader<R: BufRead> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::io::Lines<R>>>,
    header: DeltaHeader,
}

impl<R: BufRead> DeltaReader<R> {
    pub fn new(reader: R) -> anyhow::Result<Self> {
        let mut lines = reader.lines().enumerate().peekable();

        let paths = next_content_line(&mut lines)?.ok_or_else(|| anyhow!("Empty delta file"))?;
        let parts: Vec<&str> = paths.1.split_whitespace().collect();
        if parts.len() != 2 {
            bail!(
                "Line {}: expected two sequence file paths, got `{}`",
                paths.0 + 1,
                paths.1
            );
        }
        let ref_path = parts[0].to_string();
        let qry_path = parts[1].to_string();

        let kind_line = next_content_line(&mut lines)?
            .ok_or_else(|| anyhow!("Missing alignment data type line"))?;
        let kind = kind_line
            .1
            .trim()
            .parse::<DeltaKind>()
            .with_context(|| format!("Line {}", kind_line.0 + 1))?;

        Ok(Self {
            lines,
            header: DeltaHeader {
                ref_path,
                qry_path,
                kind,
            },
        })
    }

    pub fn header(&self) -> &DeltaHeader {
        &self.header
    }

    pub fn next_record(&mut self) -> anyhow::Result<Option<DeltaRecord>> {
        let (no, line) = match next_content_line(&mut self.lines)? {
            Some(x) => x,
            None => return Ok(None),
        };

        let mut record = parse_record_header(&line).with_context(|| format!("Line {}", no + 1))?;

        // Alignments run until the next header or the end of input
        loop {
            let is_next_header = match self.lines.peek() {
                None => true,
                Some((_, Ok(l))) => l.starts_with('>'),
                Some((_, Err(_))) => false,
            };
            if is_next_header {
                break;
            }

            let (no, line) = match self.lines.next() {
                Some((no, l)) => (no, l?),
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            let mut align = parse_align_line(&line).with_context(|| format!("Line {}", no + 1))?;

            loop {
                let (no, line) = next_content_line(&mut self.lines)?.ok_or_else(|| {
                    anyhow!(
                        "Unexpected end of file inside the alignment of {} and {}",
                        record.ref_name,
                        record.qry_name
                    )
                })?;
                let d = line
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("Line {}: invalid indel `{}`", no + 1, line))?;
                if d == 0 {
                    break;
                }
                align.deltas.push(d);
            }

            record.aligns.push(align);
        }

        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for DeltaReader<R> {
    type Item = anyhow::Result<DeltaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn next_content_line<I>(lines: &mut I) -> anyhow::Result<Option<(usize, String)>>
where
    I: Iterator<Item = (usize, io::Result<String>)>,
{
    for (no, line) in lines.by_ref() {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some((no, line)));
        }
    }
    Ok(None)
}

fn parse_record_header(line: &str) -> anyhow::Result<DeltaRecord> {
    let body = line
        .strip_prefix('>')
        .ok_or_else(|| anyhow!("expected a `>` header, got `{}`", line))?;
    let parts: Vec<&str> = body.split_whitespace().collect();
    if parts.len() != 4 {
        bail!("header needs 4 fields, got `{}`", line);
    }

    let ref_len = parts[2].parse::<i64>()?;
    let qry_len = parts[3].parse::<i64>()?;
    if ref_len <= 0 || qry_len <= 0 {
        bail!("sequence lengths must be positive: `{}`", line);
    }
    // the right boundary of a walk sits at len + 1
    if ref_len == i64::MAX || qry_len == i64::MAX {
        bail!("sequence length out of range: `{}`", line);
    }

    Ok(DeltaRecord {
        ref_name: parts[0].to_string(),
        qry_name: parts[1].to_string(),
        ref_len,
        qry_len,
        aligns: vec![],
    })
}

fn parse_align_line(line: &str) -> anyhow::Result<DeltaAlign> {
    let fields = line
        .split_whitespace()
        .map(|s| s.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid alignment line `{}`", line))?;
    if fields.len() != 7 {
        bail!("alignment line needs 7 integers, got `{}`", line);
    }
    if fields[..4].iter().any(|&c| c <= 0) {
        bail!("alignment coordinates are 1-based: `{}`", line);
    }

    Ok(DeltaAlign {
        s_r: fields[0],
        e_r: fields[1],
        s_q: fields[2],
        e_q: fields[3],
        errors: fields[4],
        sim_errors: fields[5],
        stops: fields[6],
        deltas: vec![],
    })
}
