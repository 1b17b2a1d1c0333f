//! # dm-codegen
//!
//! Command-line front end for the TR-106 schema compiler. Emits data-holder
//! type declarations to stdout or to `--outfile`, optionally restricted to
//! an allow-list of object names.

use clap::Parser;
use dm_compiler::emitter::EmitterConfig;
use dm_compiler::pipeline;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dm-codegen",
    version,
    about = "Code generator for TR-106 device-model objects"
)]
struct Args {
    /// Device-model schema file (e.g. tr-181-2-0-1.xml)
    schema: PathBuf,

    /// Write the generated artifact to this file instead of stdout
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Print the run summary to stderr as JSON instead of plain text
    #[arg(long)]
    summary_json: bool,

    /// Object names to emit; none means emit every object
    objects: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = if args.objects.is_empty() {
        EmitterConfig::emit_all()
    } else {
        EmitterConfig::with_allow_list(args.objects)
    };

    let result = match &args.outfile {
        Some(path) => {
            let file = File::create(path)?;
            let mut out = BufWriter::new(file);
            let result = pipeline::process_file(&args.schema, config, &mut out)?;
            out.flush()?;
            result
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let result = pipeline::process_file(&args.schema, config, &mut out)?;
            out.flush()?;
            result
        }
    };

    if args.summary_json {
        eprintln!("{}", serde_json::to_string(&result)?);
    } else {
        eprintln!(
            "dm-codegen: {} objects, {} parameters, {} ms",
            result.objects_emitted, result.parameters_emitted, result.duration_ms
        );
    }
    Ok(())
}
