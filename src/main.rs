use anyhow::{Context, Result};
use clap::Parser;
use docmd::{ImportSink, document_source, version};
use log::{error, info};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "docmd", about = "Convert Python docstrings to markdown")]
struct Cli {
    /// Python file or directory to parse
    path: PathBuf,

    /// Directory where the generated .md files are written
    #[arg(short = 'd', long, default_value = "docs")]
    docs_dir: PathBuf,

    /// Print the markdown to stdout instead of writing a file
    #[arg(short = 'p', long)]
    just_print: bool,

    /// Append every discovered import to this file
    #[arg(short = 's', long)]
    save_import: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logger
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let cli = Cli::parse();
    info!("docmd v{}", version());
    if cli.path.is_dir() {
        directory_mode(&cli)
    } else {
        process_file(&cli.path, &cli.docs_dir, &cli)
    }
}

/// Document a single source file: extract, render, and either print the
/// chunks or write them to `<docs_dir>/<stem>.md`.
fn process_file(file: &Path, docs_dir: &Path, cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let module = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<string>".to_string());

    // The import log is framed per source file; the extractor only ever
    // appends the `├<name>` lines in between.
    let mut import_log = match &cli.save_import {
        Some(path) => {
            let mut fh = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open import file {}", path.display()))?;
            let header = format!("\n┌{} IMPORTS\n", file.display());
            fh.write_all(header.as_bytes())?;
            Some((fh, header))
        }
        None => None,
    };
    let sink = import_log
        .as_mut()
        .map(|(fh, _)| fh as &mut dyn ImportSink);

    let stream = document_source(&source, &module, sink)
        .with_context(|| format!("failed to document {}", file.display()))?;

    if cli.just_print {
        for chunk in stream {
            println!("{chunk}");
        }
    } else {
        fs::create_dir_all(docs_dir)
            .with_context(|| format!("failed to create {}", docs_dir.display()))?;
        let out_path = docs_dir.join(format!("{module}.md"));
        let mut out = File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        for chunk in stream {
            out.write_all(chunk.as_bytes())?;
        }
        info!("Wrote {}", out_path.display());
    }

    if let Some((mut fh, header)) = import_log {
        let rule: String = std::iter::repeat_n('─', header.chars().count()).collect();
        fh.write_all(format!("└{rule}\n\n").as_bytes())?;
    }

    Ok(())
}

/// Walk a directory for .py files, confirm with the user, then document each
/// file. One file failing to parse skips that file, not the batch.
fn directory_mode(cli: &Cli) -> Result<()> {
    let files = collect_python_files(&cli.path);
    if files.is_empty() {
        info!("No python files found under {}", cli.path.display());
        return Ok(());
    }

    println!("I'm about to parse the following for python files");
    for file in &files {
        println!("{}", file.display());
    }
    println!("Are you sure you want to continue? Y - for yes");
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    if !matches!(answer.trim(), "y" | "Y") {
        println!("Goodbye");
        return Ok(());
    }

    for file in &files {
        info!("Converting {}", file.display());
        let docs_dir = cli
            .docs_dir
            .join(file.parent().unwrap_or_else(|| Path::new("")));
        if let Err(e) = process_file(file, &docs_dir, cli) {
            error!("Skipping {}: {:#}", file.display(), e);
        }
    }

    Ok(())
}

fn collect_python_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some("py") {
            files.push(path.to_path_buf());
        }
    }
    files
}
