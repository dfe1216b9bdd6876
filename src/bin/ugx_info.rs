/// Command line tool for inspecting UGX grid files.
///
/// Usage:
///     ugx_info [-v|-vv] info <file.ugx>...
///     ugx_info [-v|-vv] check <file.ugx>...
///     ugx_info [-v|-vv] rewrite <in.ugx> <out.ugx>
///
/// `RUST_LOG` overrides the verbosity flags.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ugxrust::io::ugx::UgxWriterConfiguration;
use ugxrust::{GridSummary, UgxReader, UgxWriter};

const USAGE: &str = "Usage: ugx_info [-v|-vv] <info|check|rewrite> <file>...";

fn init_tracing(verbose: u8) {
    let filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "ugxrust=info",
            _ => "ugxrust=debug",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() {
    let mut verbose = 0u8;
    let args: Vec<String> = env::args()
        .skip(1)
        .filter(|arg| match arg.as_str() {
            "-v" | "--verbose" => {
                verbose += 1;
                false
            }
            "-vv" => {
                verbose += 2;
                false
            }
            _ => true,
        })
        .collect();
    init_tracing(verbose);

    let Some((command, files)) = args.split_first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let files: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();

    let result = match command.as_str() {
        "info" => info(&files),
        "check" => check(&files),
        "rewrite" => rewrite(&files),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Print a summary and the read notifications of every file
fn info(files: &[PathBuf]) -> Result<bool> {
    if files.is_empty() {
        bail!("info needs at least one file");
    }

    for path in files {
        let doc = UgxReader::from_file(path)
            .and_then(|reader| reader.read())
            .with_context(|| format!("failed to read {}", path.display()))?;

        println!("{}:", path.display());
        print!("{}", GridSummary::from_document(&doc));
        for notification in &doc.notifications {
            println!("  {}", notification);
        }
    }
    Ok(true)
}

/// Decode every file in parallel, report OK or the error
fn check(files: &[PathBuf]) -> Result<bool> {
    if files.is_empty() {
        bail!("check needs at least one file");
    }

    let results: Vec<(&PathBuf, ugxrust::Result<usize>)> = files
        .par_iter()
        .map(|path| (path, check_file(path)))
        .collect();

    let mut all_ok = true;
    for (path, result) in results {
        match result {
            Ok(0) => println!("OK    {}", path.display()),
            Ok(n) => println!("OK    {} ({} notifications)", path.display(), n),
            Err(e) => {
                all_ok = false;
                println!("FAIL  {}: {}", path.display(), e);
            }
        }
    }
    Ok(all_ok)
}

fn check_file(path: &Path) -> ugxrust::Result<usize> {
    let doc = UgxReader::from_file(path)?.read()?;
    // a file that decodes must also encode
    UgxWriter::new(&doc).write_to_vec()?;
    Ok(doc.notifications.len())
}

/// Decode a file and encode it again, keeping its handler blocks
fn rewrite(files: &[PathBuf]) -> Result<bool> {
    let [input, output] = files else {
        bail!("rewrite needs exactly an input and an output file");
    };

    let doc = UgxReader::from_file(input)
        .and_then(|reader| reader.read())
        .with_context(|| format!("failed to read {}", input.display()))?;

    let config = UgxWriterConfiguration {
        pass_through_handlers: true,
        ..Default::default()
    };
    UgxWriter::new(&doc)
        .with_configuration(config)
        .write_to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} -> {} ({} vertices, {} faces)",
        input.display(),
        output.display(),
        doc.vertex_count(),
        doc.face_count()
    );
    Ok(true)
}
