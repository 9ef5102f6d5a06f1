use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::{env, process};
use wikitree_config::{Config, DisplayConfig};
use wikitree_syntax::tree::kind_counts;
use wikitree_syntax::{Document, FormatOptions, format_tree, parse};

/// Where a page is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn label(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read page from stdin")?;
                Ok(buffer)
            }
            Input::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read page at {}", path.display())),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    summary: bool,
    patterns: Vec<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--summary" => parsed.summary = true,
            "-h" | "--help" => return None,
            flag if flag.starts_with("--") => return None,
            pattern => parsed.patterns.push(pattern.to_string()),
        }
    }
    Some(parsed)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand the command-line patterns into the pages to read.
fn collect_inputs(patterns: &[String], config: &Config) -> Result<Vec<Input>> {
    if patterns.is_empty() {
        return Ok(vec![Input::Stdin]);
    }

    let mut inputs = Vec::new();
    for pattern in patterns {
        if !is_glob(pattern) {
            inputs.push(Input::File(config.resolve_input(pattern.as_ref())));
            continue;
        }

        let mut matched = false;
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern {pattern}"))? {
            let path = entry.with_context(|| format!("Failed to expand {pattern}"))?;
            if path.is_file() {
                inputs.push(Input::File(path));
                matched = true;
            }
        }
        if !matched {
            log::warn!("pattern {pattern} matched no files");
        }
    }
    Ok(inputs)
}

fn format_options(display: &DisplayConfig) -> FormatOptions {
    FormatOptions {
        show_positions: display.show_positions,
        show_raw: display.show_raw,
        max_width: display.max_width(),
    }
}

fn format_summary(doc: &Document) -> String {
    let mut result = String::new();
    for (kind, count) in kind_counts(doc) {
        result.push_str(&format!("{:<20} {count}\n", kind.to_string()));
    }
    result
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(cli) = parse_args(args.get(1..).unwrap_or_default()) else {
        eprintln!("Usage: {} [--summary] [PAGE|PATTERN...]", args[0]);
        eprintln!("Reads the page from stdin when no PAGE is given.");
        process::exit(1);
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let options = format_options(&config.display);

    let inputs = collect_inputs(&cli.patterns, &config)?;
    let several = inputs.len() > 1;
    let mut failures = 0;
    let mut stdout = io::stdout().lock();

    for input in &inputs {
        let source = match input.read() {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: {e:#}");
                failures += 1;
                continue;
            }
        };

        let doc = match parse(&source) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("Error: {}: {e}", input.label());
                failures += 1;
                continue;
            }
        };
        log::debug!(
            "{}: {} bytes, {} entities",
            input.label(),
            source.len(),
            doc.root().descendants().count()
        );

        if several {
            writeln!(stdout, "== {} ==", input.label())?;
        }
        let output = if cli.summary {
            format_summary(&doc)
        } else {
            format_tree(&doc, &options)
        };
        stdout.write_all(output.as_bytes())?;
    }

    if failures > 0 {
        eprintln!("{failures} of {} page(s) failed", inputs.len());
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wikitree_syntax::parse_from_text;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse_args(&strings(&["--summary", "a.wiki", "pages/*.wiki"])),
            Some(Args {
                summary: true,
                patterns: strings(&["a.wiki", "pages/*.wiki"]),
            })
        );
        assert_eq!(parse_args(&[]), Some(Args::default()));
        assert_eq!(parse_args(&strings(&["--help"])), None);
        assert_eq!(parse_args(&strings(&["--bogus"])), None);
    }

    #[test]
    fn test_no_patterns_reads_stdin() {
        let inputs = collect_inputs(&[], &Config::default()).unwrap();
        assert_eq!(inputs, vec![Input::Stdin]);
    }

    #[test]
    fn test_glob_patterns_expand_to_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.wiki"), "'''a'''").unwrap();
        std::fs::write(temp_dir.path().join("b.wiki"), "''b''").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let pattern = format!("{}/*.wiki", temp_dir.path().display());
        let inputs = collect_inputs(&[pattern], &Config::default()).unwrap();

        assert_eq!(
            inputs,
            vec![
                Input::File(temp_dir.path().join("a.wiki")),
                Input::File(temp_dir.path().join("b.wiki")),
            ]
        );
    }

    #[test]
    fn test_plain_paths_resolve_against_pages_path() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("Main_Page.wiki"), "x").unwrap();
        let config = Config {
            pages_path: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        let inputs = collect_inputs(&strings(&["Main_Page.wiki"]), &config).unwrap();

        assert_eq!(inputs, vec![Input::File(temp_dir.path().join("Main_Page.wiki"))]);
    }

    #[test]
    fn test_display_config_maps_to_format_options() {
        let options = format_options(&DisplayConfig {
            show_positions: false,
            show_raw: true,
            max_text_width: 0,
        });
        assert_eq!(
            options,
            FormatOptions {
                show_positions: false,
                show_raw: true,
                max_width: None,
            }
        );
    }

    #[test]
    fn test_summary_counts_kinds() {
        let doc = parse_from_text("'''a''' {{b|c}} ''d''").unwrap();
        assert_eq!(
            format_summary(&doc),
            "Text                 2\n\
             TextBold             1\n\
             TextItalic           1\n\
             Template             1\n\
             TemplateName         1\n\
             TemplateProp         1\n"
        );
    }
}
