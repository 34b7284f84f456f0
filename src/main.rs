use clap::Parser;
use flatsnap::flatten::Flattener;
use flatsnap::logger::initialize_logger;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Source directory to flatten
    source_dir: PathBuf,
    /// Output directory that receives the flattened snapshot
    output_dir: PathBuf,
    #[arg(
        short = 'e',
        long = "exclude-patterns",
        num_args = 1..,
        help = "Patterns of paths to exclude (regular expressions)"
    )]
    exclude_patterns: Vec<String>,
}

fn main() {
    let args = CliArgs::parse();
    initialize_logger();

    let flattener = match Flattener::new(&args.source_dir, &args.output_dir, &args.exclude_patterns)
    {
        Ok(flattener) => flattener,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = flattener.flatten() {
        eprintln!("Error flattening project: {}", e);
        process::exit(1);
    }
}
