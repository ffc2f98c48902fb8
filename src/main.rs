use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rootcause::Report;
use tracing::{Level, error};

use smdmats::error::{ErrorKind, IResult};
use smdmats::export::build_dir::build_dir;
use smdmats::materials::vmt::PathStyle;
use smdmats::pipeline::{OutputFormat, PipelineConfig};

/// List materials used by SMD files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to search for SMD files
    #[clap(value_name = "dir")]
    directory: PathBuf,

    /// Path to the QC file of the model
    qc: PathBuf,

    /// Path to the materials folder of the model
    materials: PathBuf,

    /// Output file
    #[clap(short, long, default_value = "materials.txt")]
    output: PathBuf,

    /// Verbose mode
    #[clap(short, long)]
    verbose: bool,

    /// Build the directory from found materials to the specified directory
    #[clap(short, long)]
    build_dir: Option<PathBuf>,

    /// Separator style for texture paths. Defaults to the host's.
    #[clap(long, value_enum)]
    path_style: Option<PathStyle>,

    /// Output file format
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn config(&self) -> PipelineConfig {
        PipelineConfig::builder()
            .search_dir(&self.directory)
            .qc(&self.qc)
            .materials(&self.materials)
            .verbose(self.verbose)
            .path_style(self.path_style.unwrap_or_else(PathStyle::host))
            .build()
    }
}

fn run(args: &Args) -> IResult<()> {
    let config = args.config();

    let report = config.run()?;
    report.write(&args.output, args.format)?;

    if let Some(dir) = &args.build_dir {
        let files: Vec<_> = report.files().collect();
        build_dir(config.materials(), dir, &files)?;
    }

    Ok(())
}

/// The operator-facing message for a failed run.
fn error_line(report: &Report<ErrorKind>) -> String {
    format!("[-] Error: {}", report.current_context())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            error!("{}", error_line(&report));
            ExitCode::FAILURE
        }
    }
}
