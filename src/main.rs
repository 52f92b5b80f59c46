use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use tocpress::{OverflowPolicy, SourceSpec, TocError, TocJob, load_layout_config};

/// Insert a clickable table of contents at the front of a PDF.
///
/// Entries come from the document's bookmarks unless a side file is given. A
/// side file whose first line looks like `[1] Title | PAGE 0` is read as a TOC
/// spec; any other side file is a list of titles replacing the bookmark titles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PDF to read
    input: PathBuf,

    /// Where to write the result
    output: PathBuf,

    /// Titles list or TOC spec, detected from its contents
    #[arg(conflicts_with_all = ["titles", "spec"])]
    side_file: Option<PathBuf>,

    /// Replace bookmark titles with the lines of this file
    #[arg(long, value_name = "FILE", conflicts_with = "spec")]
    titles: Option<PathBuf>,

    /// Build the TOC from a `[level] title | PAGE n` file instead of the bookmarks
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Layout configuration as JSON
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Do not draw the "Table of Contents" heading
    #[arg(long)]
    no_heading: bool,

    /// Drop the lines of an entry that do not fit instead of continuing on a new page
    #[arg(long)]
    truncate_on_overflow: bool,
}

impl Args {
    fn into_job(self) -> Result<TocJob, TocError> {
        let source = match (self.side_file, self.titles, self.spec) {
            (Some(path), _, _) => SourceSpec::SideFile(path),
            (_, Some(path), _) => SourceSpec::TitlesFile(path),
            (_, _, Some(path)) => SourceSpec::SpecFile(path),
            _ => SourceSpec::Outline,
        };

        let mut layout = match &self.config {
            Some(path) => load_layout_config(path)?,
            None => Default::default(),
        };
        if self.no_heading {
            layout.heading = None;
        }
        if self.truncate_on_overflow {
            layout.overflow = OverflowPolicy::Truncate;
        }

        Ok(TocJob::new(self.input, self.output)
            .with_source(source)
            .with_layout(layout))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Args::parse().into_job().and_then(|job| tocpress::run(&job));
    match result {
        Ok(report) => {
            println!(
                "Inserted {} TOC page(s) with {} entries.",
                report.toc_pages, report.entries
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
