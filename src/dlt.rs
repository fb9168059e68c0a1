extern crate clap;
use clap::*;

mod cmd_dlt;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let app = Command::new("dlt")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`dlt` - Delta alignment toolkit")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_dlt::diff::make_subcommand())
        .subcommand(cmd_dlt::filter::make_subcommand())
        .after_help(
            r###"Subcommands:

* diff   - Classify breaks between the reference and the query
* filter - Keep alignments of the best reference/query chains

Set RUST_LOG=info (or debug) for progress messages.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("diff", sub_matches)) => cmd_dlt::diff::execute(sub_matches),
        Some(("filter", sub_matches)) => cmd_dlt::filter::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
