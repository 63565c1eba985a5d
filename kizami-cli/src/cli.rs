//! Command-line argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Split documents into bounded, optionally overlapping chunks
#[derive(Parser, Debug)]
#[command(name = "kizami", version, about)]
pub struct Cli {
    /// Input files ("-" reads from stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Chunk size, in the configured unit
    #[arg(short = 's', long, default_value_t = 500)]
    pub size: usize,

    /// Unit for the chunk size
    #[arg(short = 'u', long, value_enum, default_value_t = UnitArg::Tokens)]
    pub unit: UnitArg,

    /// Overlap fraction in [0, 1)
    #[arg(long, default_value_t = 0.1)]
    pub overlap: f64,

    /// Allow chunk boundaries inside words
    #[arg(long)]
    pub no_word_boundaries: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// How input files are split into pages
    #[arg(long, value_enum, default_value_t = PageBreakArg::None)]
    pub page_break: PageBreakArg,

    /// Print processing statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Chunk sizing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Unicode characters
    Chars,
    /// Approximate tokens
    Tokens,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON array of documents
    Json,
    /// Markdown sections
    Markdown,
}

/// Page segmentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageBreakArg {
    /// The whole file is one page
    None,
    /// Split on form-feed characters (U+000C)
    Formfeed,
    /// Split on blank lines
    Blank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["kizami", "doc.txt"]);
        assert_eq!(cli.size, 500);
        assert_eq!(cli.unit, UnitArg::Tokens);
        assert_eq!(cli.format, FormatArg::Text);
        assert_eq!(cli.page_break, PageBreakArg::None);
        assert!(!cli.no_word_boundaries);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::parse_from([
            "kizami",
            "-s",
            "128",
            "-u",
            "chars",
            "--overlap",
            "0.25",
            "--format",
            "json",
            "--page-break",
            "formfeed",
            "a.txt",
            "b.txt",
        ]);
        assert_eq!(cli.size, 128);
        assert_eq!(cli.unit, UnitArg::Chars);
        assert_eq!(cli.format, FormatArg::Json);
        assert_eq!(cli.inputs.len(), 2);
    }
}
