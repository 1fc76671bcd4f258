use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Import from our modularized library
use kintai_report_validator::prelude::*;

#[derive(Parser)]
#[command(name = "kintai_report_validator")]
#[command(about = "Content validator for rendered attendance-report PDFs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate report PDFs, given as files or directories
    Validate(ValidateArgs),

    /// Generate every sample report and show the verdict for each
    Demo {
        /// Directory the sample PDFs are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Reporting period printed on the samples
        #[arg(long, default_value = "2025-01")]
        year_month: String,
    },

    /// Write a single sample report
    Generate {
        #[arg(value_enum)]
        variant: SampleReport,

        /// Output PDF path
        output: PathBuf,

        /// Reporting period printed on the sample
        #[arg(long, default_value = "2025-01")]
        year_month: String,
    },
}

#[derive(Args)]
struct ValidateArgs {
    /// PDF files or directories to validate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Scan directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Number of parallel worker threads (default: number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Output report filename
    #[arg(short, long, default_value = "report_validation.txt")]
    output: PathBuf,

    /// Also write verdicts as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Do not accept ■ placeholder runs in place of labels
    #[arg(long)]
    strict_encoding: bool,

    /// Print the extracted text of every document
    #[arg(long)]
    show_text: bool,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Demo {
            out_dir,
            year_month,
        } => run_demo(&out_dir, &year_month),
        Command::Generate {
            variant,
            output,
            year_month,
        } => {
            variant
                .write(&output, &year_month)
                .with_context(|| format!("Failed to generate {} sample", variant))?;
            println!("Wrote {} sample to {}", variant, output.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    // Set up graceful shutdown handler
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();

    ctrlc::set_handler(move || {
        eprintln!("\n⚠️  Shutdown requested. Finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    // Set up rayon thread pool
    if let Some(workers) = args.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    println!("Attendance Report Validator");
    println!("Using {} worker thread(s)", rayon::current_num_threads());
    println!();

    let files = collect_inputs(&args.paths, args.recursive)?;
    if files.is_empty() {
        println!("No PDF files found.");
        return Ok(ExitCode::SUCCESS);
    }
    println!("Found {} report(s) to validate\n", files.len());

    let progress = if args.batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let validator = ReportValidator::with_options(ValidatorOptions {
        accept_placeholders: !args.strict_encoding,
    });
    let history = VerdictHistory::new();
    let shutdown_check = shutdown_requested.clone();

    files
        .par_iter()
        .progress_with(progress.clone())
        .for_each(|path| {
            // Stop dispatching new files once shutdown was requested
            if shutdown_check.load(Ordering::SeqCst) {
                return;
            }

            if !args.show_text {
                validator.validate_recorded(path, &history);
                return;
            }

            let extracted = validator.document_text(path);
            match &extracted {
                Ok(text) => progress.println(format!(
                    "=== {} ===\n{}\n{}",
                    path.display(),
                    text,
                    "=".repeat(50)
                )),
                Err(e) => progress.println(format!("=== {} ===\n{}", path.display(), e)),
            }
            history.record(path, validator.validate_extracted(path, extracted));
        });

    let results = history.snapshot();
    let was_interrupted = shutdown_requested.load(Ordering::SeqCst);

    if was_interrupted {
        progress.finish_and_clear();
        eprintln!("\n⏹️  Graceful shutdown complete");
        eprintln!(
            "📊 Processed {}/{} files ({:.1}%)",
            results.len(),
            files.len(),
            (results.len() as f64 / files.len() as f64) * 100.0
        );
    } else {
        progress.finish_with_message("Validation complete!");
    }
    println!();

    let passed = results.iter().filter(|(_, v)| v.overall_pass()).count();

    println!("==================================================");
    println!("VALIDATION COMPLETE");
    println!("==================================================");
    println!("Passed reports: {}", passed);
    println!("Failed reports: {}", results.len() - passed);
    for (path, verdict) in results.iter().filter(|(_, v)| !v.overall_pass()) {
        match verdict.error() {
            Some(error) => println!("  ✗ {} (error: {})", path.display(), error),
            None => {
                let unmet: Vec<_> = verdict.unmet_checks().iter().map(|c| c.key()).collect();
                println!("  ✗ {} ({})", path.display(), unmet.join(", "));
            }
        }
    }
    println!();

    let output = if was_interrupted {
        PathBuf::from(format!("{}.partial", args.output.display()))
    } else {
        args.output.clone()
    };
    write_report(&output, &results)?;
    println!("Detailed report saved to: {:?}", output);

    if let Some(json_path) = &args.json {
        write_json_report(json_path, &results)?;
        println!("JSON verdicts saved to: {:?}", json_path);
    }

    if passed == files.len() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run_demo(out_dir: &Path, year_month: &str) -> Result<ExitCode> {
    println!("=== Attendance report validation demo ===");

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut samples = Vec::with_capacity(SampleReport::ALL.len());
    for sample in SampleReport::ALL {
        let path = out_dir.join(sample.file_name());
        sample
            .write(&path, year_month)
            .with_context(|| format!("Failed to generate {} sample", sample))?;
        samples.push((sample, path));
    }

    println!("Generated sample reports:");
    for (sample, path) in &samples {
        println!("  {}: {}", sample, path.display());
    }

    let validator = ReportValidator::new();
    let mut all_as_expected = true;
    for (sample, path) in &samples {
        println!("\n--- {} ---", sample);
        let verdict = validator.validate(path);

        let Some(checks) = verdict.checks() else {
            println!("Error: {}", verdict.error().unwrap_or_default());
            all_as_expected = false;
            continue;
        };

        for (check, passed) in checks.iter() {
            println!("{}: {}", check.label(), if passed { "✓" } else { "✗" });
        }
        let overall = verdict.overall_pass();
        println!("Overall: {}", if overall { "✓ PASS" } else { "✗ FAIL" });

        if overall != sample.expected_pass() {
            let expected = if sample.expected_pass() { "pass" } else { "fail" };
            println!("  (unexpected: this sample should {})", expected);
            all_as_expected = false;
        }
    }

    println!("\n=== Demo complete ===");
    Ok(if all_as_expected {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
