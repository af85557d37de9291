//! dumppaper - Dump derived structures of an annotated paper record
//!
//! A command line tool that prepares a paper record and dumps the selected
//! derived structures (partition spans, statement table, reference list,
//! author data, metadata) as pretty JSON.

use annotext_core::error::Result;
use annotext_core::model::paper::Paper;
use annotext_core::prepare::annotated_text::prepare_annotated_text;
use annotext_core::prepare::authors::prepare_author_data;
use annotext_core::prepare::metadata::prepare_metadata;
use annotext_core::prepare::references::prepare_references;
use clap::{ArgAction, Parser};
use serde_json::json;
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A command line tool for dumping the derived structures of annotated
/// paper records as JSON.
#[derive(Parser, Debug)]
#[command(name = "dumppaper")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to annotated paper JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Dump the normalized partition spans
    #[arg(long, action = ArgAction::SetTrue)]
    spans: bool,

    /// Dump the quantitative-statement table
    #[arg(long, action = ArgAction::SetTrue)]
    statements: bool,

    /// Dump the prepared reference list
    #[arg(long, action = ArgAction::SetTrue)]
    references: bool,

    /// Dump prepared author and affiliation data
    #[arg(long, action = ArgAction::SetTrue)]
    authors: bool,

    /// Dump prepared display metadata
    #[arg(long, action = ArgAction::SetTrue)]
    metadata: bool,

    /// Skip range validation of the input record
    #[arg(long = "no-validate", action = ArgAction::SetTrue)]
    no_validate: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

impl Args {
    /// With no selection flags, everything is dumped.
    fn dump_all(&self) -> bool {
        !(self.spans || self.statements || self.references || self.authors || self.metadata)
    }
}

fn process_file<W: Write>(path: &Path, out: &mut W, args: &Args) -> Result<()> {
    let data = fs::read_to_string(path)?;
    let paper: Paper = serde_json::from_str(&data)?;
    if !args.no_validate {
        paper.validate()?;
    }

    let prepared = prepare_annotated_text(&paper);
    let all = args.dump_all();
    let mut dump = serde_json::Map::new();

    if all || args.spans {
        dump.insert("spans".into(), json!(prepared.spans));
    }
    if all || args.statements {
        dump.insert("statements".into(), json!(prepared.statements));
    }
    if all || args.references {
        let references = prepare_references(&paper.bibliography, &prepared.ref_numbers);
        dump.insert("references".into(), json!(references));
        dump.insert("ref_numbers".into(), json!(prepared.ref_numbers));
    }
    if all || args.authors {
        let authors = prepare_author_data(&paper.metadata.bibliographic);
        dump.insert("authors".into(), json!(authors));
    }
    if all || args.metadata {
        let metadata = prepare_metadata(&paper.metadata.bibliographic);
        dump.insert("metadata".into(), json!(metadata));
    }

    serde_json::to_writer_pretty(&mut *out, &dump)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

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

        if let Err(e) = process_file(path, &mut output, &args) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;

    Ok(())
}
