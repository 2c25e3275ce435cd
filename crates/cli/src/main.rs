// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

mod commands;

fn source_arg() -> Arg {
    Arg::new("source")
        .required(true)
        .value_name("SOURCE")
        .help("Feed URL (http/https) or path to a feed file")
}

pub(crate) fn build_cli() -> Command {
    Command::new("podfeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract podcast metadata and episodes from RSS feeds")
        .arg_required_else_help(true)
        .arg(
            Arg::new("options")
                .short('o')
                .long("options")
                .value_name("FILE")
                .help("Options file (.toml or .json)")
                .global(true),
        )
        .arg(
            Arg::new("meta-fields")
                .long("meta-fields")
                .value_name("LIST")
                .help("Comma-separated meta fields; include 'default' to extend the defaults")
                .global(true),
        )
        .arg(
            Arg::new("episode-fields")
                .long("episode-fields")
                .value_name("LIST")
                .help("Comma-separated episode fields; include 'default' to extend the defaults")
                .global(true),
        )
        .arg(
            Arg::new("required-meta")
                .long("required-meta")
                .value_name("LIST")
                .help("Comma-separated meta fields that must be present")
                .global(true),
        )
        .arg(
            Arg::new("required-episodes")
                .long("required-episodes")
                .value_name("LIST")
                .help("Comma-separated episode fields that must be present")
                .global(true),
        )
        .arg(
            Arg::new("header")
                .short('H')
                .long("header")
                .value_name("NAME:VALUE")
                .help("Extra request header (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .help("Fetch timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("30")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Print the extracted podcast as JSON")
                .arg(source_arg())
                .arg(
                    Arg::new("pretty")
                        .short('p')
                        .long("pretty")
                        .help("Pretty-print the JSON output")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("meta-only")
                        .long("meta-only")
                        .help("Only print the podcast meta")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("episodes-only"),
                )
                .arg(
                    Arg::new("episodes-only")
                        .long("episodes-only")
                        .help("Only print the episodes")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("episodes")
                .about("List episodes in display order")
                .arg(source_arg())
                .arg(
                    Arg::new("limit")
                        .short('n')
                        .long("limit")
                        .value_name("COUNT")
                        .help("Show at most COUNT episodes")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("fields").about("List the known fields and their defaults"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    // Global flags are read from the subcommand, where clap propagates them
    let active = matches.subcommand().map_or(&matches, |(_, sub_matches)| sub_matches);
    let default_level = if active.get_flag("verbose") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match matches.subcommand() {
        Some(("extract", sub_matches)) => commands::extract(sub_matches).await,
        Some(("episodes", sub_matches)) => commands::list_episodes(sub_matches).await,
        Some(("fields", _)) => commands::list_fields(),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
