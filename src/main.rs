//! Command-line interface for docx2tex.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docx2tex::{convert_file, extract_footnotes, ConvertOptions};

#[derive(Parser)]
#[command(
    name = "docx2tex",
    version,
    about = "Convert .docx manuscripts to semantic LaTeX"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a .docx manuscript to a .tex file
    Convert {
        /// Input document (default: input.docx)
        input: Option<PathBuf>,
        /// Output file (default: output.tex)
        output: Option<PathBuf>,
        /// Disable list-style handling
        #[arg(long)]
        no_lists: bool,
        /// Print the conversion report as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Suppress the conversion summary
        #[arg(long, short)]
        quiet: bool,
    },
    /// Extract footnote text from a converted .tex file
    Footnotes {
        /// Input LaTeX file (default: input.tex)
        input: Option<PathBuf>,
        /// Output text file (default: output.txt)
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => run_convert(None, None, false, false, false),
        Some(Command::Convert {
            input,
            output,
            no_lists,
            json,
            quiet,
        }) => run_convert(input, output, no_lists, json, quiet),
        Some(Command::Footnotes { input, output }) => run_footnotes(input, output),
    }
}

fn run_convert(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    no_lists: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from("input.docx"));
    let output = output.unwrap_or_else(|| PathBuf::from("output.tex"));
    let options = ConvertOptions { lists: !no_lists };

    let (latex, report) = convert_file(&input, &options)?;

    // Written only after the full pipeline succeeded; no partial output.
    std::fs::write(&output, latex).with_context(|| format!("writing {}", output.display()))?;

    for id in &report.unresolved_footnotes {
        eprintln!("warning: footnote reference \"{id}\" has no entry in word/footnotes.xml");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print!("{}", report.summary());
    }

    Ok(())
}

fn run_footnotes(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from("input.tex"));
    let output = output.unwrap_or_else(|| PathBuf::from("output.txt"));

    let latex = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let text = extract_footnotes(&latex);
    std::fs::write(&output, text).with_context(|| format!("writing {}", output.display()))?;

    Ok(())
}
