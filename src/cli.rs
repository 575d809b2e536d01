//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use pdfgrab_core::download::MAX_TIMEOUT_SECS;

/// Download the PDF files linked from a web page.
///
/// Every link on the page whose target ends in `.pdf` is a candidate. With
/// keywords, only links whose text or file name matches at least one
/// (case-insensitive, regular-expression) keyword are downloaded.
#[derive(Parser, Debug)]
#[command(name = "pdfgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Page to scan for PDF links
    pub url: String,

    /// Keyword regex to filter links by text or file name (repeatable)
    #[arg(short = 'k', long = "keyword", value_name = "PATTERN")]
    pub keywords: Vec<String>,

    /// Folder to save PDFs into [default: downloads]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config file path [default: $XDG_CONFIG_HOME/pdfgrab/config.toml]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Connect timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub connect_timeout: Option<u64>,

    /// Overall per-request timeout in seconds (1-3600)
    #[arg(long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub read_timeout: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
