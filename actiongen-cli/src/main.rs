//! actiongen CLI - extract enum action hierarchies from Rust source.
//!
//! Modes:
//! - `actiongen` reads `action.rs` and writes `shortcut-actions.json`
//! - `actiongen INPUT OUTPUT` reads and writes the given paths
//! - several `--root` flags write one `<Root>.json` per root into OUTPUT

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use actiongen_core::{
    check_indent, generate_dot, init_logging, load_config, load_config_file, print_summary,
    to_json, write_document, ActionDocument, Actiongen, ActiongenConfig, DeclarationStyle,
    ResolutionResult, DEFAULT_INDENT, DEFAULT_INPUT, DEFAULT_OUTPUT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract enum action hierarchies from Rust source into JSON")]
pub struct Cli {
    /// Rust source file containing the root enum
    input: Option<PathBuf>,

    /// JSON file to write (a directory when several roots are given)
    output: Option<PathBuf>,

    /// Root enum to start from (repeatable, default: Action)
    #[arg(long = "root", value_name = "NAME")]
    roots: Vec<String>,

    /// Only count `pub enum` declarations
    #[arg(long)]
    pub_only: bool,

    /// Count every `enum` declaration, even when the config sets `pub_only`
    #[arg(long, conflicts_with = "pub_only")]
    any_visibility: bool,

    /// JSON indent width (at most 16)
    #[arg(long, value_name = "N", value_parser = parse_indent)]
    indent: Option<usize>,

    /// Print JSON to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Also write a Graphviz DOT graph of the enum dependencies
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Config file (default: ./actiongen.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,
}

fn parse_indent(s: &str) -> Result<usize, String> {
    let indent: usize = s.parse().map_err(|e| format!("invalid indent `{}`: {}", s, e))?;
    check_indent(indent)
}

/// Effective settings after merging CLI flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    input: PathBuf,
    output: PathBuf,
    roots: Vec<String>,
    style: DeclarationStyle,
    indent: usize,
}

impl Settings {
    fn merge(cli: &Cli, config: Option<&ActiongenConfig>) -> Self {
        let config = config.cloned().unwrap_or_default();

        let roots = if cli.roots.is_empty() {
            config.root_names()
        } else {
            cli.roots.clone()
        };

        let style = if cli.pub_only {
            DeclarationStyle::Public
        } else if cli.any_visibility {
            DeclarationStyle::Any
        } else {
            config.declaration_style()
        };

        Self {
            input: cli
                .input
                .clone()
                .or(config.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: cli
                .output
                .clone()
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            roots,
            style,
            indent: cli.indent.or(config.indent).unwrap_or(DEFAULT_INDENT),
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let config = match &cli.config {
        Some(path) => Some(
            load_config_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
        ),
        None => load_config(Path::new(".")).context("Failed to load actiongen.toml")?,
    };
    Ok(Settings::merge(cli, config.as_ref()))
}

/// Writes one document per result. A single result goes to `output`
/// directly; several go to `output/<Root>.json`.
fn write_outputs(results: &[ResolutionResult], output: &Path, indent: usize) -> Result<()> {
    if let [result] = results {
        write_document(output, &ActionDocument::from(result), indent)?;
        return Ok(());
    }

    if output.is_file() {
        bail!(
            "Output must be a directory when resolving several roots: {}",
            output.display()
        );
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    for result in results {
        let path = output.join(format!("{}.json", result.root));
        write_document(&path, &ActionDocument::from(result), indent)?;
    }
    Ok(())
}

/// JSON for stdout: the document itself, or an object keyed by root.
fn stdout_json(results: &[ResolutionResult], indent: usize) -> Result<String> {
    if let [result] = results {
        return Ok(to_json(&ActionDocument::from(result), indent)?);
    }

    let mut by_root = serde_json::Map::new();
    for result in results {
        by_root.insert(
            result.root.clone(),
            serde_json::to_value(ActionDocument::from(result))?,
        );
    }
    Ok(to_json(&by_root, indent)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.json_logs);

    let settings = load_settings(&cli)?;

    let results = Actiongen::new(&settings.input)
        .roots(settings.roots.iter().cloned())
        .declaration_style(settings.style)
        .run()
        .with_context(|| format!("Failed to extract enums from {}", settings.input.display()))?;

    if cli.stdout {
        print!("{}", stdout_json(&results, settings.indent)?);
    } else {
        write_outputs(&results, &settings.output, settings.indent)?;
        print_summary(&results);
    }

    if let Some(dot_path) = &cli.dot {
        let dot: String = results.iter().map(generate_dot).collect();
        fs::write(dot_path, dot)
            .with_context(|| format!("Failed to write DOT file: {}", dot_path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("actiongen_cli_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("actiongen").chain(args.iter().copied()))
    }

    fn resolve(src: &str, roots: &[&str]) -> Vec<ResolutionResult> {
        Actiongen::new("inline.rs")
            .roots(roots.iter().copied())
            .run_on_source(src)
            .unwrap()
    }

    // --- Settings::merge TESTS ---

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::merge(&parse(&[]), None);
        assert_eq!(settings.input, PathBuf::from("action.rs"));
        assert_eq!(settings.output, PathBuf::from("shortcut-actions.json"));
        assert!(settings.roots.is_empty());
        assert_eq!(settings.style, DeclarationStyle::Any);
        assert_eq!(settings.indent, 2);
    }

    #[test]
    fn test_positional_paths() {
        let settings = Settings::merge(&parse(&["in.rs", "out.json"]), None);
        assert_eq!(settings.input, PathBuf::from("in.rs"));
        assert_eq!(settings.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_config_fills_gaps() {
        let config = ActiongenConfig {
            input: Some(PathBuf::from("cfg.rs")),
            root: Some("Menu".to_string()),
            pub_only: Some(true),
            indent: Some(4),
            ..Default::default()
        };
        let settings = Settings::merge(&parse(&[]), Some(&config));
        assert_eq!(settings.input, PathBuf::from("cfg.rs"));
        assert_eq!(settings.roots, vec!["Menu"]);
        assert_eq!(settings.style, DeclarationStyle::Public);
        assert_eq!(settings.indent, 4);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ActiongenConfig {
            input: Some(PathBuf::from("cfg.rs")),
            root: Some("Menu".to_string()),
            indent: Some(4),
            ..Default::default()
        };
        let cli = parse(&["cli.rs", "--root", "Action", "--root", "Command", "--indent", "8"]);
        let settings = Settings::merge(&cli, Some(&config));
        assert_eq!(settings.input, PathBuf::from("cli.rs"));
        assert_eq!(settings.roots, vec!["Action", "Command"]);
        assert_eq!(settings.indent, 8);
    }

    #[test]
    fn test_any_visibility_overrides_config_pub_only() {
        let config = ActiongenConfig {
            pub_only: Some(true),
            ..Default::default()
        };
        let settings = Settings::merge(&parse(&["--any-visibility"]), Some(&config));
        assert_eq!(settings.style, DeclarationStyle::Any);

        let settings = Settings::merge(&parse(&[]), Some(&config));
        assert_eq!(settings.style, DeclarationStyle::Public);
    }

    #[test]
    fn test_visibility_flags_conflict() {
        let args = ["actiongen", "--pub-only", "--any-visibility"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_indent_flag_is_capped() {
        assert!(Cli::try_parse_from(["actiongen", "--indent", "64"]).is_err());
        assert!(Cli::try_parse_from(["actiongen", "--indent", "wide"]).is_err());
        assert_eq!(parse(&["--indent", "16"]).indent, Some(16));
    }

    // --- output TESTS ---

    #[test]
    fn test_write_single_output() {
        let dir = create_temp_dir("single");
        let output = dir.join("shortcut-actions.json");
        let results = resolve("enum Action { Quit }", &[]);

        write_outputs(&results, &output, 2).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"name\": \"Quit\""));
    }

    #[test]
    fn test_write_several_outputs_into_dir() {
        let dir = create_temp_dir("several");
        let output = dir.join("generated");
        let results = resolve("enum Action { Quit }\nenum Menu { Open(Action) }", &["Action", "Menu"]);

        write_outputs(&results, &output, 2).unwrap();
        assert!(output.join("Action.json").is_file());
        assert!(output.join("Menu.json").is_file());
    }

    #[test]
    fn test_several_outputs_reject_file_target() {
        let dir = create_temp_dir("file_target");
        let output = dir.join("taken.json");
        fs::write(&output, "{}").unwrap();
        let results = resolve("enum Action { Quit }\nenum Menu { Open }", &["Action", "Menu"]);

        assert!(write_outputs(&results, &output, 2).is_err());
    }

    #[test]
    fn test_stdout_json_shapes() {
        let single = resolve("enum Action { Quit }", &[]);
        let json = stdout_json(&single, 2).unwrap();
        assert!(json.starts_with("{\n  \"Actions\""));

        let several = resolve("enum Action { Quit }\nenum Menu { Open }", &["Menu", "Action"]);
        let value: serde_json::Value = serde_json::from_str(&stdout_json(&several, 2).unwrap()).unwrap();
        assert!(value["Menu"]["Actions"].is_array());
        assert!(value["Action"]["Dependencies"].is_object());
    }
}
