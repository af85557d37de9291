//! paper2txt - Render annotated paper records as linear text
//!
//! A command line tool that loads annotated paper JSON records, runs span
//! normalization, and writes the result as plain text or as the full
//! prepared-text JSON that renderers consume.

use annotext_core::error::Result;
use annotext_core::model::paper::Paper;
use annotext_core::prepare::annotated_text::prepare_annotated_text;
use clap::{ArgAction, Parser, ValueEnum};
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output type for the rendered paper.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Plain linear text (default)
    #[default]
    Text,
    /// Prepared-text JSON: partition, statement table, reference numbers
    Json,
}

/// A command line tool for rendering annotated paper records as plain text
/// or prepared-text JSON.
#[derive(Parser, Debug)]
#[command(name = "paper2txt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to annotated paper JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Skip range validation of the input record
    #[arg(long = "no-validate", action = ArgAction::SetTrue)]
    no_validate: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,
}

/// Infer output type from file extension.
fn infer_output_type(path: &str) -> Option<OutputType> {
    path.to_lowercase()
        .ends_with(".json")
        .then_some(OutputType::Json)
}

/// Write the partition as readable linear text: span texts in order, with
/// section headlines set off by blank lines.
fn write_text<W: Write>(out: &mut W, paper: &Paper) -> Result<()> {
    let prepared = prepare_annotated_text(paper);
    for span in &prepared.spans {
        if span.is_headline {
            writeln!(out, "\n\n{}\n", span.text)?;
        } else {
            out.write_all(span.text.as_bytes())?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, paper: &Paper) -> Result<()> {
    let prepared = prepare_annotated_text(paper);
    serde_json::to_writer_pretty(&mut *out, &prepared)?;
    writeln!(out)?;
    Ok(())
}

fn process_file<W: Write>(
    path: &Path,
    out: &mut W,
    args: &Args,
    output_type: OutputType,
) -> Result<()> {
    let data = fs::read_to_string(path)?;
    let paper: Paper = serde_json::from_str(&data)?;
    if !args.no_validate {
        paper.validate()?;
    }
    match output_type {
        OutputType::Text => write_text(out, &paper),
        OutputType::Json => write_json(out, &paper),
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Determine output type (may be inferred from output filename)
    let output_type = if matches!(args.output_type, OutputType::Text) && args.outfile != "-" {
        infer_output_type(&args.outfile).unwrap_or(args.output_type)
    } else {
        args.output_type
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }

        if let Err(e) = process_file(path, &mut output, &args, output_type) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;

    Ok(())
}
