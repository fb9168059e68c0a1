use clap::*;
use dlt::libs::delta::{flag_qlis, flag_rlis, Graph, LisOpts};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("filter")
        .about("Keep alignments of the best reference/query chains")
        .after_help(
            r###"
Selects, for every sequence, the best chain of alignments in its own
coordinates: the heaviest set of alignments (length x identity) that increase
monotonically on that sequence. Alignments outside the chains are dropped and
the rest is written back as a delta file.

* default: keep the union of the reference and the query chains
* -r: keep the reference chains only (query may have overlaps)
* -q: keep the query chains only (reference may have overlaps)

Examples:
1. The union of both chains, as `dlt diff` uses it:
   dlt filter out.delta -o out.filter.delta

2. Drop short or divergent alignments first:
   dlt filter out.delta -i 90 -l 1000 -q

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
            Arg::new("ref")
                .long("ref")
                .short('r')
                .action(ArgAction::SetTrue)
                .conflicts_with("qry")
                .help("Keep the reference chains only"),
        )
        .arg(
            Arg::new("qry")
                .long("qry")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Keep the query chains only"),
        )
        .arg(
            Arg::new("min_idy")
                .long("min-idy")
                .short('i')
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(f64))
                .help("Minimum alignment identity [0, 100]"),
        )
        .arg(
            Arg::new("min_len")
                .long("min-len")
                .short('l')
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(i64))
                .help("Minimum alignment length on the reference"),
        )
        .arg(
            Arg::new("max_overlap")
                .long("max-overlap")
                .num_args(1)
                .default_value("100")
                .value_parser(value_parser!(f64))
                .help("Maximum overlap of neighbouring chain members, percent of the shorter one"),
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
    let is_ref = args.get_flag("ref");
    let is_qry = args.get_flag("qry");
    let opt_min_idy = *args.get_one::<f64>("min_idy").unwrap();
    let opt_min_len = *args.get_one::<i64>("min_len").unwrap();
    let opts = LisOpts {
        max_overlap: *args.get_one::<f64>("max_overlap").unwrap(),
    };
    if !(0.0..=100.0).contains(&opt_min_idy) || !(0.0..=100.0).contains(&opts.max_overlap) {
        anyhow::bail!("--min-idy and --max-overlap are percentages between 0 and 100");
    }

    //----------------------------
    // Ops
    //----------------------------
    let reader = dlt::reader(infile)?;
    let mut graph = Graph::from_reader(reader)?;

    graph.retain(|e| e.idy >= opt_min_idy && e.len_r() >= opt_min_len);

    if !is_qry {
        flag_rlis(&mut graph, &opts);
    }
    if !is_ref {
        flag_qlis(&mut graph, &opts);
    }
    graph.clean();

    //----------------------------
    // Output
    //----------------------------
    let mut writer = dlt::writer(args.get_one::<String>("outfile").unwrap())?;
    graph.write_delta(&mut writer)?;
    writer.flush()?;

    Ok(())
}
