//! Command-line interface for sheetfmt
//! This binary parses a spreadsheet format pattern and prints its token tree in one of the
//! registered output formats.
//!
//! Usage:
//!   sheetfmt `<pattern>` [--family `<family>`] [--format `<format>`] [--config `<file>`]
//!                        [--lowercase] [--verbose]
//!   sheetfmt --list-formats                                  - List the output formats
//!
//! Settings not given as flags come from the configuration file and the embedded defaults.
//! Set `RUST_LOG` for finer control of logging than `--verbose`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use sheetfmt_config::{Loader, SheetfmtConfig};
use sheetfmt_parser::sheetfmt::formats::FormatRegistry;
use sheetfmt_parser::sheetfmt::parsing::{parse_with_context, ParseError, PatternFamily};
use sheetfmt_parser::sheetfmt::transforms::lowercase;

fn main() {
    let matches = Command::new("sheetfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting spreadsheet format patterns")
        .arg_required_else_help(true)
        .arg(
            Arg::new("pattern")
                .help("Format pattern to parse, e.g. '#,##0.00;[RED]-#,##0.00'")
                .required_unless_present("list-formats")
                .allow_hyphen_values(true)
                .index(1),
        )
        .arg(
            Arg::new("family")
                .long("family")
                .help("Pattern family to parse as (expression, number, date, time, date-time, fraction, text, general, color, condition)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("lowercase")
                .long("lowercase")
                .help("Lower-case pattern letters before printing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser decisions to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let pattern = matches
        .get_one::<String>("pattern")
        .expect("pattern is required unless listing formats");
    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });
    handle_parse_command(pattern, &config);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Defaults, then the `--config` file, then the flags.
fn load_config(matches: &ArgMatches) -> Result<SheetfmtConfig, sheetfmt_config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        log::debug!("reading configuration from {path}");
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(family) = matches.get_one::<String>("family") {
        loader = loader.set_override("output.family", family.as_str())?;
    }
    if matches.get_flag("lowercase") {
        loader = loader.set_override("output.lowercase", true)?;
    }
    loader.build()
}

fn handle_parse_command(pattern: &str, config: &SheetfmtConfig) {
    let context = config.context.to_parser_context().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let family = PatternFamily::from_name(&config.output.family).unwrap_or_else(|| {
        eprintln!("Unknown pattern family '{}'", config.output.family);
        let names: Vec<_> = PatternFamily::ALL.iter().map(|f| f.name()).collect();
        eprintln!("Available families: {}", names.join(", "));
        std::process::exit(1);
    });

    log::debug!(
        "parsing {pattern:?} as {family}, output {}",
        config.output.format
    );
    let token = parse_with_context(pattern, family, &context).unwrap_or_else(|e| {
        log::warn!("rejected {pattern:?}");
        report_parse_error(&e);
        std::process::exit(1);
    });
    let token = if config.output.lowercase {
        lowercase(&token)
    } else {
        token
    };

    let registry = FormatRegistry::with_defaults();
    let mut output = registry
        .serialize(&token, &config.output.format)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            eprintln!("Available formats: {}", registry.list_formats().join(", "));
            std::process::exit(1);
        });
    if !output.ends_with('\n') {
        output.push('\n');
    }
    print!("{output}");
}

/// The error, then the pattern with a caret under the offending char.
fn report_parse_error(error: &ParseError) {
    eprintln!("Error: {error}");
    eprintln!("  {}", error.pattern());
    eprintln!("  {}^", " ".repeat(error.position()));
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for (name, description) in registry.descriptions() {
        println!("  {name}");
        println!("    {description}");
        println!();
    }
}
