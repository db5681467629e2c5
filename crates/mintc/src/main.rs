//! The Mint transpiler CLI.
//!
//! `mintc <INPUT> <OUTPUT>` reads a Quint JSON IR document, resolves it into
//! the Mint AST and writes the rendered Rust source to `OUTPUT`.
//!
//! Options:
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output
//! - `--verbose` - Report index and declaration counts
//! - `--emit-ast` - Write the resolved AST as JSON alongside the output

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use mint_ast::Program;
use mint_emit::{emit_program, EmitConfig};
use mint_resolve::{resolve_document, Document, ResolveError, ResolveWarning};

#[derive(Parser)]
#[command(name = "mintc", version, about = "Transpile Quint JSON IR to Rust")]
struct Cli {
    /// Path to the JSON IR document
    input: PathBuf,

    /// Path of the Rust source file to write
    output: PathBuf,

    /// Output diagnostics as JSON (one object per line) instead of human-readable format
    #[arg(long)]
    json: bool,

    /// Disable colorized output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Report the number of named types and declarations
    #[arg(short, long)]
    verbose: bool,

    /// Write the resolved AST as JSON (<OUTPUT>.ast.json)
    #[arg(long = "emit-ast")]
    emit_ast: bool,
}

/// How diagnostics are rendered on stderr.
struct DiagnosticOptions {
    color: bool,
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let diag_opts = DiagnosticOptions {
        color: !cli.no_color && !cli.json,
        json: cli.json,
    };

    if let Err(e) = transpile(&cli, &diag_opts) {
        if diag_opts.json {
            let msg = serde_json::json!({
                "code": "C0001",
                "severity": "error",
                "message": e,
                "file": cli.input.display().to_string(),
                "spans": [],
                "fix": null
            });
            eprintln!("{}", msg);
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

/// Execute the pipeline: read -> decode -> resolve -> emit -> write.
///
/// Nothing is written until every earlier stage has succeeded, and the Rust
/// output is written last.
fn transpile(cli: &Cli, diag_opts: &DiagnosticOptions) -> Result<(), String> {
    let source = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to read '{}': {}", cli.input.display(), e))?;

    let document = match Document::from_str(&source) {
        Ok(document) => document,
        Err(e) => {
            report_decode_error(&source, &cli.input, &e, diag_opts);
            return Err("Failed to decode the IR document due to errors above.".to_string());
        }
    };

    let resolution = match resolve_document(&document) {
        Ok(resolution) => resolution,
        Err(e) => {
            report_resolve_error(&e, &cli.input, diag_opts);
            return Err("Transpilation failed due to errors above.".to_string());
        }
    };

    for warning in &resolution.warnings {
        report_warning(warning, &cli.input, diag_opts);
    }

    if cli.verbose && !diag_opts.json {
        eprintln!("  Named types: {}", resolution.named_types.len());
        for (id, name) in resolution.named_types.iter() {
            eprintln!("    {}: {}", id, name);
        }
        eprintln!("  Declarations: {}", resolution.program.decls.len());
    }

    let text = emit_program(&resolution.program, &EmitConfig::default());

    // The Rust output is the last file written, so a failed side output
    // never leaves it behind.
    if cli.emit_ast {
        let ast_path = ast_path(&cli.output);
        write_ast(&resolution.program, &ast_path)?;
        eprintln!("  AST: {}", ast_path.display());
    }

    std::fs::write(&cli.output, text)
        .map_err(|e| format!("Failed to write '{}': {}", cli.output.display(), e))?;

    eprintln!("  Transpiled: {}", cli.output.display());

    Ok(())
}

/// `<output>.ast.json`, next to the emitted source.
fn ast_path(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".ast.json");
    PathBuf::from(path)
}

fn write_ast(program: &Program, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(program)
        .map_err(|e| format!("Failed to serialize AST: {}", e))?;
    std::fs::write(path, json + "\n")
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

/// Report a JSON decode error, pointing at the offending location.
fn report_decode_error(
    source: &str,
    path: &Path,
    error: &serde_json::Error,
    diag_opts: &DiagnosticOptions,
) {
    let start = char_offset(source, error.line(), error.column());
    let end = start + 1;
    let message = error.to_string();

    if diag_opts.json {
        let json_diag = serde_json::json!({
            "code": "D0001",
            "severity": "error",
            "message": format!("Decode error: {}", message),
            "file": path.display().to_string(),
            "spans": [{
                "start": start,
                "end": end,
                "label": message
            }],
            "fix": null
        });
        eprintln!("{}", json_diag);
        return;
    }

    use ariadne::{Config, Label, Report, ReportKind, Source};
    let config = if diag_opts.color {
        Config::default()
    } else {
        Config::default().with_color(false)
    };
    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
        .with_message("Decode error")
        .with_config(config)
        .with_label(Label::new(start..end).with_message(&message))
        .finish()
        .eprint(Source::from(source));
}

/// Character offset of a 1-based line/column position, clamped to the source.
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut byte = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(byte) {
        byte -= 1;
    }
    source[..byte].chars().count()
}

fn report_resolve_error(error: &ResolveError, path: &Path, diag_opts: &DiagnosticOptions) {
    if diag_opts.json {
        let json_diag = serde_json::json!({
            "code": error.code(),
            "severity": "error",
            "message": error.to_string(),
            "file": path.display().to_string(),
            "spans": [],
            "fix": null
        });
        eprintln!("{}", json_diag);
    } else {
        eprintln!("error[{}]: {}", error.code(), error);
    }
}

fn report_warning(warning: &ResolveWarning, path: &Path, diag_opts: &DiagnosticOptions) {
    if diag_opts.json {
        let json_diag = serde_json::json!({
            "code": warning.code(),
            "severity": "warning",
            "message": warning.to_string(),
            "file": path.display().to_string(),
            "spans": [],
            "fix": null
        });
        eprintln!("{}", json_diag);
    } else {
        eprintln!("warning[{}]: {}", warning.code(), warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_offset_of_line_and_column() {
        let source = "{\n  \"modules\": x\n}";
        assert_eq!(char_offset(source, 1, 1), 0);
        assert_eq!(char_offset(source, 2, 3), 4);
        assert_eq!(char_offset(source, 9, 9), source.chars().count());
    }

    #[test]
    fn char_offset_counts_characters_not_bytes() {
        let source = "\"é\" x";
        // Byte column 5 is the space after the closing quote.
        assert_eq!(char_offset(source, 1, 5), 3);
    }

    #[test]
    fn ast_path_appends_suffix() {
        assert_eq!(
            ast_path(Path::new("out/bank.rs")),
            PathBuf::from("out/bank.rs.ast.json")
        );
    }
}
