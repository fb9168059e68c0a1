use clap::*;
use dlt::libs::delta::{flag_wga, Axis, Graph, LisOpts};
use dlt::libs::diff::{diff_axis, write_events, Style};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("diff")
        .about("Classify breaks between the reference and the query")
        .after_help(
            r###"
Walks the best chain of alignments of every sequence, in its own
coordinates, and reports each break between consecutive chain members.

Both chains are computed from the delta file; alignments in neither are
discarded first.

Output columns (plain):
* GAP  start end gap-len               unaligned bases between chain members
* SEQ  start end gap-len next-seq      jump to another partner sequence
* JMP  start end gap-len               rearrangement within the same partner
* INV  start end gap-len               inversion
* INS  start end gap gap-partner diff  insertion, gap > gap-partner
* DEL  start end gap gap-partner diff  deletion, gap <= gap-partner
* DUP  start end length                copy missing from the partner's chain

`start` and `end` are the last base before and the first base after the break,
so negative lengths mean the flanking alignments overlap.

Examples:
1. Both reference and query breaks:
   dlt diff out.delta

2. Reference breaks as AMOS features:
   dlt diff out.delta -r -f -o out.fea

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input delta file, `stdin` for standard input"),
        )
        .arg(
            Arg::new("feature")
                .long("feature")
                .short('f')
                .action(ArgAction::SetTrue)
                .help("Output breaks as AMOS features"),
        )
        .arg(
            Arg::new("qry_only")
                .long("qry-only")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Show breaks of query sequences only"),
        )
        .arg(
            Arg::new("ref_only")
                .long("ref-only")
                .short('r')
                .action(ArgAction::SetTrue)
                .help("Show breaks of reference sequences only"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let style = if args.get_flag("feature") {
        Style::Feature
    } else {
        Style::Plain
    };
    let is_ref = !args.get_flag("qry_only");
    let is_qry = !args.get_flag("ref_only");

    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    if opt_parallel > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(opt_parallel)
            .build_global()?;
    }

    //----------------------------
    // Ops
    //----------------------------
    let reader = dlt::reader(infile)?;
    let mut graph = Graph::from_reader(reader)?;

    // Keep the union of both chains
    flag_wga(&mut graph, &LisOpts::default());
    graph.clean();

    let mut writer = dlt::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Output
    //----------------------------
    for (axis, enabled) in [(Axis::Ref, is_ref), (Axis::Qry, is_qry)] {
        if !enabled {
            continue;
        }
        let events = diff_axis(&graph, axis, opt_parallel > 1)?;
        write_events(&mut writer, &events, style)?;
    }
    writer.flush()?;

    Ok(())
}
