use crate::options::Args;
use anyhow::Context;
use clap::Parser;
use credtab::counter;
use std::path::Path;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[command(
        name = "credtab",
        version,
        about = "Turn tab-delimited credit account exports into HTML tables for spreadsheets"
    )]
    pub enum Args {
        /// Convert all exports in a directory into HTML reports with merged cells for values shared within a section.
        Format {
            /// The directory with UTF-16 encoded exports, subdirectories are ignored.
            #[clap(long = "in", short = 'i', value_name = "DIR")]
            input_dir: PathBuf,
            /// The directory to write reports to, created if needed.
            #[clap(long = "out", short = 'o', value_name = "DIR")]
            output_dir: PathBuf,
            /// A file with tab-delimited account numbers and their owners.
            #[clap(long, short = 'w', value_name = "FILE")]
            owners: Option<PathBuf>,
            /// A file keeping track of the time saved by all runs, updated after converting.
            #[clap(long, short = 'c', value_name = "FILE")]
            counter: Option<PathBuf>,
        },
        /// Print the records of a single export along with their computed values as tab-delimited text.
        Dump {
            /// A file with tab-delimited account numbers and their owners.
            #[clap(long, short = 'w', value_name = "FILE")]
            owners: Option<PathBuf>,
            /// The UTF-16 encoded export to read.
            file: PathBuf,
        },
    }
}

/// The conventional status of a process ended by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    ctrlc::set_handler(|| {
        eprintln!("Error: Interrupted by user");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("Could not install the interrupt handler")?;

    let args = options::Args::parse();
    tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    match args {
        Args::Format {
            input_dir,
            output_dir,
            owners,
            counter: counter_file,
        } => {
            let start = std::time::Instant::now();
            let options = credtab::convert::Options {
                owners: load_owners(owners.as_deref())?,
                ..Default::default()
            };
            let written = credtab::convert_directory(&input_dir, &output_dir, &options)
                .with_context(|| {
                    format!(
                        "Could not convert exports in '{}' to reports in '{}'",
                        input_dir.display(),
                        output_dir.display()
                    )
                })?;
            if let Some(counter_file) = counter_file.filter(|_| !written.is_empty()) {
                let saved = counter::increment(&counter_file);
                let elapsed =
                    time::Duration::try_from(start.elapsed()).unwrap_or(time::Duration::MAX);
                print_saved_time(saved, elapsed);
            }
        }
        Args::Dump { owners, file } => {
            let owners = load_owners(owners.as_deref())?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Could not read export at '{}'", file.display()))?;
            let mut document = credtab::parse(&credtab::convert::decode_input(&bytes))?;
            credtab::compute(&mut document, &credtab::NumberFormat::default());
            credtab::write_document(
                &document,
                &owners,
                std::io::BufWriter::new(std::io::stdout()),
            )?;
        }
    };
    Ok(())
}

fn load_owners(path: Option<&Path>) -> anyhow::Result<credtab::OwnerDirectory> {
    Ok(match path {
        Some(path) => credtab::OwnerDirectory::load(path)?,
        None => Default::default(),
    })
}

fn print_saved_time(saved_minutes: u64, elapsed: time::Duration) {
    println!("Executions: {}", saved_minutes / counter::SAVED_MINUTES_PER_RUN);
    println!("Execution time: {:.2} ms", elapsed.as_seconds_f64() * 1000.0);
    println!("Saved time: {} minutes", counter::SAVED_MINUTES_PER_RUN);
    println!(
        "Total saved time: {saved_minutes} minutes ({})",
        counter::describe(saved_minutes)
    );
}
