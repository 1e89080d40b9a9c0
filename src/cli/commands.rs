//! Command implementations for the lumo CLI.
//!
//! Each command reads a file, runs the pipeline through a [`ModelBuilder`], and
//! renders the result. Diagnostics are rendered with miette so spans show up as
//! labeled source excerpts.

use std::fs;
use std::path::{Path, PathBuf};

use lumo_syntax::diagnostics::{Diagnostic, LineIndex};
use lumo_syntax::lexer;

use crate::builder::{BuilderConfig, ModelBuilder};
use crate::model::{Declaration, DeclarationKind};
use crate::source_root::LuaSourceRoot;

use super::{CliError, CliResult, ExitCode};

// ============================================================================
// Diagnostic rendering
// ============================================================================

/// Adapter giving a [`Diagnostic`] a labeled source excerpt in miette output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
struct Rendered {
    message: String,
    #[source_code]
    src: miette::NamedSource<String>,
    #[label]
    span: miette::SourceSpan,
    #[help]
    help: Option<String>,
}

fn render(path: &Path, source: &str, diagnostic: &Diagnostic) {
    let help = if diagnostic.notes.is_empty() {
        None
    } else {
        Some(diagnostic.notes.join("\n"))
    };
    let report = miette::Report::new(Rendered {
        message: diagnostic.to_string(),
        src: miette::NamedSource::new(path.display().to_string(), source.to_string()),
        span: diagnostic.span.into(),
        help,
    });
    eprintln!("{:?}", report);
}

// ============================================================================
// Shared pipeline plumbing
// ============================================================================

fn read_source(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("error reading {}: {}", path.display(), e)))
}

fn build_root(path: &Path, source: &str, search_paths: Vec<PathBuf>) -> CliResult<LuaSourceRoot> {
    let builder = ModelBuilder::new(BuilderConfig {
        module_search_paths: search_paths,
    });
    builder
        .build(source)
        .map_err(|e| CliError::failure(format!("{}: {}", path.display(), e)))
}

// ============================================================================
// Commands
// ============================================================================

/// `lumo check <file>`: report diagnostics, exit nonzero on errors.
pub fn check_file(path: &Path, search_paths: Vec<PathBuf>) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let root = build_root(path, &source, search_paths)?;

    if root.diagnostics.is_empty() {
        println!("{}: ok", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    for diagnostic in &root.diagnostics {
        render(path, &source, diagnostic);
    }

    let errors = root.errors().count();
    let warnings = root.diagnostics.len() - errors;
    eprintln!(
        "{}: {} error(s), {} warning(s)",
        path.display(),
        errors,
        warnings
    );

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// `lumo outline <file>`: print the declaration tree, or the full model as JSON.
pub fn outline_file(path: &Path, json: bool, search_paths: Vec<PathBuf>) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let root = build_root(path, &source, search_paths)?;

    if json {
        let out = root
            .to_json()
            .map_err(|e| CliError::failure(format!("error serializing model: {}", e)))?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    let index = LineIndex::new(&source);
    if root.model.declarations.is_empty() {
        println!("{}: no declarations", path.display());
    } else {
        for decl in &root.model.declarations {
            print_declaration(decl, &index, 0);
        }
    }

    // Keep the outline usable for broken files, but make the breakage visible.
    let errors = root.errors().count();
    if errors > 0 {
        eprintln!("{}: {} error(s); outline may be partial", path.display(), errors);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_declaration(decl: &Declaration, index: &LineIndex, depth: usize) {
    let (line, _) = index.line_col(decl.name_span.start);
    let indent = "  ".repeat(depth);

    let kind = match decl.kind {
        DeclarationKind::Function => "function",
        DeclarationKind::Method => "method",
        DeclarationKind::LocalFunction => "local function",
        DeclarationKind::Local => "local",
        DeclarationKind::Global => "global",
    };

    let function_like = !decl.params.is_empty()
        || decl.is_vararg
        || matches!(
            decl.kind,
            DeclarationKind::Function | DeclarationKind::Method | DeclarationKind::LocalFunction
        );
    let signature = if function_like {
        let mut params = decl.params.clone();
        if decl.is_vararg {
            params.push("...".to_string());
        }
        format!("{}({})", decl.name, params.join(", "))
    } else {
        decl.name.clone()
    };

    println!("{}{} {}  [line {}]", indent, kind, signature, line);
    for child in &decl.children {
        print_declaration(child, index, depth + 1);
    }
}

/// `lumo tokens <file>`: debug token dump.
pub fn dump_tokens(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let lexed = lexer::lex(&source);
    let index = LineIndex::new(&source);

    for token in &lexed.tokens {
        let (line, col) = index.line_col(token.span.start);
        println!("{:>4}:{:<4} {:?}", line, col, token.kind);
    }
    if !lexed.comments.is_empty() {
        println!("-- {} comment(s)", lexed.comments.len());
    }

    for diagnostic in &lexed.errors {
        render(path, &source, diagnostic);
    }
    Ok(if lexed.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
