use clap::Parser;
use ntrace::loader::MachineLoader;
use ntrace::{trace, MachineCatalog, NtmError, DEFAULT_MAX_DEPTH};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file (.ntm) to simulate
    #[clap(short, long, conflicts_with = "builtin")]
    machine: Option<String>,

    /// Run an embedded catalog machine by name instead of a file
    #[clap(short, long)]
    builtin: Option<String>,

    /// List the embedded catalog machines and exit
    #[clap(long)]
    list: bool,

    /// The input string to run the machine on
    #[clap(short, long, default_value = "")]
    input: String,

    /// Maximum number of exploration levels
    #[clap(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Emit the trace report as JSON instead of the text layout
    #[clap(long)]
    json: bool,

    /// Append the rendered report to this file
    #[clap(short, long)]
    output: Option<String>,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), NtmError> {
    if cli.list {
        for name in MachineCatalog::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let spec = match (&cli.machine, &cli.builtin) {
        (Some(path), _) => MachineLoader::load_machine(Path::new(path))?,
        (None, Some(name)) => MachineCatalog::get_by_name(name)?,
        (None, None) => {
            return Err(NtmError::ValidationError(
                "Either --machine or --builtin is required".to_string(),
            ))
        }
    };

    let report = trace(&spec, &cli.input, cli.max_depth)?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&report)
            .map_err(|e| NtmError::FileError(format!("Failed to encode report: {e}")))?
    } else {
        report.to_string()
    };

    println!("{rendered}");

    if let Some(path) = &cli.output {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| NtmError::FileError(format!("Failed to open {path}: {e}")))?;
        writeln!(file, "{rendered}")
            .map_err(|e| NtmError::FileError(format!("Failed to write {path}: {e}")))?;
    }

    Ok(())
}
