use std::env;
use std::path::PathBuf;

use crate::options::Options;
use crate::repair::{RepairOutcome, repair_file};
use crate::scan::scan_tree;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [ROOT]\n\
         \n\
         ROOT: directory scanned recursively for .json files (default: current directory).\n\
         Files that fail to parse get one repair attempt each; a file is only\n\
         rewritten when the patched text parses as valid JSON.\n\
         \n\
         Options:\n\
               --dry-run         Report fixes without writing any file\n\
               --keep-backup     Keep pre-repair content at <file>.orig\n\
               --report-json     Print a machine-readable report instead\n\
           -h, --help            Show this help\n",
        prog = program
    );
}

struct CliMode {
    root: PathBuf,
    report_json: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut root: Option<PathBuf> = None;
    let mut report_json = false;

    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "--dry-run" => {
                opts.dry_run = true;
            }
            "--keep-backup" => {
                opts.keep_backup = true;
            }
            "--report-json" => {
                report_json = true;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                root = Some(PathBuf::from(path));
            }
        }
    }

    let mode = CliMode {
        root: root.unwrap_or_else(|| PathBuf::from(".")),
        report_json,
    };
    (opts, mode)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    if mode.report_json {
        #[cfg(feature = "serde")]
        {
            let report = crate::scan::repair_tree(&mode.root, &opts)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        #[cfg(not(feature = "serde"))]
        {
            eprintln!("--report-json requires the `serde` feature");
            std::process::exit(2);
        }
    }

    let failures = scan_tree(&mode.root)?;
    println!("Found {} file(s) with errors", failures.len());

    let mut fixed = 0usize;
    let mut still_broken: Vec<(PathBuf, String)> = Vec::new();
    for failure in &failures {
        println!();
        println!("Processing: {}", failure.path.display());
        println!("  Error: {}", failure);
        match repair_file(&failure.path, failure, &opts) {
            RepairOutcome::Fixed(records) => {
                let what: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
                println!("  FIXED: {}", what.join(", "));
                fixed += 1;
            }
            RepairOutcome::Unfixed(reason) => {
                println!("  NOT FIXED: {}", reason);
                still_broken.push((failure.path.clone(), reason));
            }
        }
    }

    println!();
    println!("Total errors: {}", failures.len());
    println!("Fixed: {}", fixed);
    println!("Failed: {}", still_broken.len());

    if !still_broken.is_empty() {
        println!();
        println!("Files that still need a fix:");
        for (path, reason) in &still_broken {
            println!("  - {}: {}", path.display(), reason);
        }
    }

    // Full second pass: report what is still broken after the repairs.
    let remaining = scan_tree(&mode.root)?;
    println!();
    println!("Remaining errors after fix: {}", remaining.len());
    for failure in &remaining {
        println!("  - {}: {}", failure.path.display(), failure);
    }

    Ok(())
}
