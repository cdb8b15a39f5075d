//! Shortex CLI - ASCII math shorthand to LaTeX converter

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::collections::BTreeMap;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::Path;

#[cfg(feature = "cli")]
use serde::Deserialize;
#[cfg(feature = "cli")]
use shortex::{
    diagnostics::{check_shorthand, has_errors, metrics_source},
    ConversionError, PatternKey, PatternTable, S2LOptions, ShorthandConverter,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "s2l")]
#[command(version)]
#[command(about = "Shortex - ASCII math shorthand to LaTeX converter", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Options file (TOML if it ends in .toml, JSON otherwise)
    #[arg(short, long)]
    config: Option<String>,

    /// Only structural rewrites and name prefixing: no sizing, no symbol table
    #[arg(long)]
    minimal: bool,

    /// Do not wrap delimiters in \left / \right
    #[arg(long)]
    no_sizing: bool,

    /// Do not apply the literal symbol table
    #[arg(long)]
    no_symbols: bool,

    /// Convert each line separately instead of the whole input at once
    #[arg(long)]
    lines: bool,

    /// Check mode - report structural problems without converting
    #[arg(long)]
    check: bool,

    /// Print source metrics as JSON without converting
    #[arg(long)]
    metrics: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Contents of a `--config` file.
#[cfg(feature = "cli")]
#[derive(Deserialize, Default)]
struct CliConfig {
    #[serde(flatten)]
    options: S2LOptions,
    /// Pattern overrides keyed by pattern name (`function`, `text`, ...)
    #[serde(default)]
    patterns: BTreeMap<String, String>,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => CliConfig::default(),
    };

    let mut options = if cli.minimal {
        S2LOptions {
            blocks: config.options.blocks.clone(),
            max_fraction_rewrites: config.options.max_fraction_rewrites,
            ..S2LOptions::minimal()
        }
    } else {
        config.options.clone()
    };
    if cli.no_sizing {
        options.size_delimiters = false;
    }
    if cli.no_symbols {
        options.substitute_symbols = false;
    }

    let patterns = match build_patterns(&config.patterns) {
        Ok(patterns) => patterns,
        Err(e) => fail(&e, None),
    };

    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if cli.check {
        let diagnostics = check_shorthand(&input, &options);
        for diagnostic in &diagnostics {
            println!("{}", diagnostic);
        }
        if has_errors(&diagnostics) {
            std::process::exit(1);
        }
        return Ok(());
    }

    if cli.metrics {
        let metrics = metrics_source(&input, &options);
        let json = serde_json::to_string_pretty(&metrics)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        println!("{}", json);
        return Ok(());
    }

    let converter = ShorthandConverter::new(&patterns, options);
    let output = if cli.lines {
        let mut converted = Vec::new();
        for (number, line) in input.lines().enumerate() {
            match converter.convert(line) {
                Ok(out) => converted.push(out),
                Err(e) => fail(&e, Some(number + 1)),
            }
        }
        converted.join("\n")
    } else {
        match converter.convert(input.trim_end_matches('\n')) {
            Ok(out) => out,
            Err(e) => fail(&e, None),
        }
    };

    match cli.output {
        Some(ref path) => {
            fs::write(path, format!("{}\n", output))?;
            log::info!("output written to {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", output)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[cfg(feature = "cli")]
fn load_config(path: &str) -> io::Result<CliConfig> {
    let content = fs::read_to_string(path)?;
    let is_toml = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

    parse_config(&content, is_toml).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {}", path, e),
        )
    })
}

#[cfg(feature = "cli")]
fn parse_config(content: &str, is_toml: bool) -> Result<CliConfig, String> {
    if is_toml {
        toml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(feature = "cli")]
fn build_patterns(overrides: &BTreeMap<String, String>) -> Result<PatternTable, ConversionError> {
    overrides
        .iter()
        .try_fold(PatternTable::default(), |table, (name, source)| {
            let key = PatternKey::from_name(name)
                .ok_or_else(|| ConversionError::config(format!("unknown pattern '{}'", name)))?;
            table.with_pattern(key, source)
        })
}

#[cfg(feature = "cli")]
fn fail(error: &ConversionError, line: Option<usize>) -> ! {
    match line {
        Some(line) => eprintln!("error[{}]: line {}: {}", error.kind(), line, error),
        None => eprintln!("error[{}]: {}", error.kind(), error),
    }
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use shortex::BlockRewriter;

    #[test]
    fn test_json_config() {
        let config = parse_config(
            r#"{
                "substitute_symbols": false,
                "blocks": [{"title": "pmatrix", "prefix": "%"}],
                "patterns": {"text": "'([^']*)'"}
            }"#,
            false,
        )
        .unwrap();
        assert!(config.options.size_delimiters);
        assert!(!config.options.substitute_symbols);
        assert_eq!(config.options.blocks, vec![BlockRewriter::new("pmatrix", '%')]);

        let patterns = build_patterns(&config.patterns).unwrap();
        let converter = ShorthandConverter::new(&patterns, config.options);
        assert_eq!(
            converter.convert("%{'a',b}").unwrap(),
            "\\begin{pmatrix} \\text{a} & b \\end{pmatrix}"
        );
    }

    #[test]
    fn test_toml_config() {
        let config = parse_config(
            r##"
size_delimiters = false
max_fraction_rewrites = 4

[[blocks]]
title = "bmatrix"
prefix = "#"

[patterns]
text = "'([^']*)'"
"##,
            true,
        )
        .unwrap();
        assert!(!config.options.size_delimiters);
        assert!(config.options.substitute_symbols);
        assert_eq!(config.options.max_fraction_rewrites, Some(4));
        assert_eq!(config.options.blocks, vec![BlockRewriter::new("bmatrix", '#')]);
        assert_eq!(config.patterns.get("text").map(String::as_str), Some("'([^']*)'"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("{}", false).unwrap();
        assert_eq!(config.options, S2LOptions::default());
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(parse_config("size_delimiters = ", true).is_err());
        assert!(parse_config(r#"{"blocks": 3}"#, false).is_err());
    }

    #[test]
    fn test_unknown_pattern_name() {
        let mut overrides = BTreeMap::new();
        overrides.insert("nope".to_string(), "x".to_string());
        let err = build_patterns(&overrides).unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_bad_pattern_source() {
        let mut overrides = BTreeMap::new();
        overrides.insert("text".to_string(), "(".to_string());
        assert_eq!(build_patterns(&overrides).unwrap_err().kind(), "config");
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install shortex --features cli");
    eprintln!("  s2l [OPTIONS] [INPUT_FILE]");
}
