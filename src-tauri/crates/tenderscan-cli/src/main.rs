use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;

use tenderscan::batch::{self, BatchConfig, BatchReport};
use tenderscan::keywords;
use tenderscan::report;

/// Scan tender documents for keywords; print a checklist or export a
/// spreadsheet.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keyword list file (txt, csv, xls or xlsx; one keyword per line/row).
    #[arg(short, long)]
    keywords: PathBuf,

    /// Documents or directories to analyze (pdf, docx, xlsx, xls, txt, md).
    #[arg(short = 'd', long = "doc")]
    docs: Vec<PathBuf>,

    /// Write results to a spreadsheet (.xlsx or .csv) instead of relying on
    /// the terminal checklist alone.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum snippet length (chars) for matched paragraphs.
    #[arg(long, default_value_t = 200)]
    snippet_length: usize,

    /// Print the loaded keyword list and exit.
    #[arg(long)]
    list_keywords: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tenderscan=info")
        .try_init();

    let cli = Cli::parse();

    let words = keywords::parse_keyword_file(&cli.keywords)
        .with_context(|| format!("failed to load keywords from {}", cli.keywords.display()))?;
    if words.is_empty() {
        bail!("no keywords found in {}", cli.keywords.display());
    }

    if cli.list_keywords {
        println!("{}", format!("{} keywords loaded:", words.len()).bold());
        for word in &words {
            println!("- {word}");
        }
        return Ok(());
    }

    if cli.docs.is_empty() {
        bail!("no documents given; pass at least one --doc");
    }
    let files = batch::collect_document_paths(&cli.docs);
    if files.is_empty() {
        bail!("no supported documents found under the given paths");
    }

    let config = BatchConfig {
        snippet_length: cli.snippet_length,
        ..Default::default()
    };
    let results = batch::run_batch(&files, &words, &config);

    print_checklist(&results, cli.snippet_length);

    if let Some(output) = &cli.output {
        report::export_report(&results, output)
            .with_context(|| format!("failed to export results to {}", output.display()))?;
        println!("\nResults written to {}", output.display().to_string().green());
    }

    Ok(())
}

fn print_checklist(results: &BatchReport, snippet_length: usize) {
    let mut total_matches = 0;

    for file in &results.files {
        println!("\n{}", file.file_name.bold());
        println!("{}", "-".repeat(65).cyan());

        if let Some(err) = &file.error {
            println!("{} {err}", "failed:".red());
            continue;
        }
        if file.matches.is_empty() {
            println!("no matching paragraphs");
            continue;
        }

        for (i, m) in file.matches.iter().enumerate() {
            total_matches += 1;
            let location = if m.section.is_empty() {
                format!("page {}", m.page)
            } else {
                format!("{} | page {}", m.section, m.page)
            };
            println!("{} {}", format!("[{}]", i + 1).cyan(), location.green());
            println!("{}", highlight_keywords(&m.snippet, &results.keywords));
            if m.original_length > snippet_length {
                let omitted = m.original_length - snippet_length;
                println!("{}", format!("... {omitted} chars omitted").dimmed());
            }
        }
    }

    let matched_files = results.matched_file_count();
    println!(
        "\n{}",
        format!(
            "{} matching paragraphs in {} of {} files",
            total_matches,
            matched_files,
            results.files.len()
        )
        .bold()
    );
}

/// Highlight every keyword occurrence in one pass. The alternation is
/// sorted longest keyword first so a shorter keyword never claims part of
/// a longer one.
fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let mut sorted: Vec<&String> = keywords.iter().filter(|k| !k.is_empty()).collect();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    if sorted.is_empty() {
        return text.to_string();
    }

    let pattern = sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let Ok(re) = regex::RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &regex::Captures| caps[0].yellow().to_string())
        .into_owned()
}
