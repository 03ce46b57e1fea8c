use anyhow::Result;
use bit_diff::areas::repository::Repository;
use bit_diff::artifacts::core::PagerWriter;
use bit_diff::artifacts::diff::delta_filter::DeltaFilter;
use bit_diff::artifacts::diff::formatter::DiffOptions;
use bit_diff::artifacts::diff::path_filter::PathFilter;
use bit_diff::artifacts::diff::tree_diff::DiffFilter;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "bit-diff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Git-compatible diffs between directory snapshots",
    long_about = "This tool compares two directories the way git compares two trees \
    and prints the result as a unified git patch, with rename and copy detection.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true, help = "Log more to stderr (repeatable)")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show the patch between two directories",
        long_about = "This command snapshots both directories, pairs their files by path, \
        detects renames and copies and prints the differences as a git patch."
    )]
    Diff {
        #[arg(index = 1, help = "The directory before the change")]
        old: PathBuf,
        #[arg(index = 2, help = "The directory after the change")]
        new: PathBuf,
        #[arg(index = 3, last = true, help = "Limit the patch to these paths")]
        paths: Vec<PathBuf>,
        #[arg(short = 'U', long = "unified", default_value_t = 3, help = "Lines of context around each change")]
        context_lines: usize,
        #[arg(long, default_value_t = 7, help = "Minimum length of abbreviated object ids")]
        abbrev: usize,
        #[arg(
            short = 'M',
            long = "find-renames",
            num_args = 0..=1,
            require_equals = true,
            value_parser = clap::value_parser!(u8).range(0..=100),
            help = "Detect renames, optionally with a similarity threshold in percent"
        )]
        find_renames: Option<Option<u8>>,
        #[arg(long, conflicts_with = "find_renames", help = "Turn off rename detection")]
        no_renames: bool,
        #[arg(short = 'C', long, help = "Detect copies as well as renames")]
        find_copies: bool,
        #[arg(long, value_parser = parse_diff_filter, help = "Only show changes of these kinds (ADMRC)")]
        diff_filter: Option<DiffFilter>,
        #[arg(short = 'G', value_name = "REGEX", help = "Only show files whose changed lines match")]
        matching: Option<String>,
        #[arg(
            long,
            value_name = "REGEX",
            conflicts_with = "matching",
            help = "Hide files whose changes consist only of matches"
        )]
        ignore_matching: Option<String>,
        #[arg(long, help = "Keep the hashed blobs in this loose object directory")]
        objects: Option<PathBuf>,
        #[arg(long, help = "Write straight to stdout")]
        no_pager: bool,
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto, help = "When to color the output")]
        color: ColorChoice,
    },
}

fn parse_diff_filter(value: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(value).ok_or_else(|| format!("invalid diff filter: {value}"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Diff {
            old,
            new,
            paths,
            context_lines,
            abbrev,
            find_renames,
            no_renames,
            find_copies,
            diff_filter,
            matching,
            ignore_matching,
            objects,
            no_pager,
            color,
        } => {
            let cancelled = Arc::new(AtomicBool::new(false));
            let flag = cancelled.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    flag.store(true, Ordering::Relaxed);
                }
            });

            let delta_filter = match (matching, ignore_matching) {
                (Some(pattern), _) => DeltaFilter::matching(&pattern)?,
                (None, Some(pattern)) => DeltaFilter::ignoring(&pattern)?,
                (None, None) => DeltaFilter::None,
            };

            let mut options = DiffOptions::default()
                .with_context_lines(context_lines)
                .with_abbreviation_length(abbrev)
                .with_detect_renames(!no_renames)
                .with_find_copies(find_copies)
                .with_path_filter(match paths.is_empty() {
                    true => PathFilter::empty(),
                    false => PathFilter::new(paths),
                })
                .with_change_filter(diff_filter.unwrap_or_default())
                .with_delta_filter(delta_filter)
                .with_cancellation(cancelled);
            if let Some(Some(threshold)) = find_renames {
                options = options.with_rename_threshold(threshold);
            }

            let is_terminal = std::io::stdout().is_terminal();
            let use_color = match color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => is_terminal,
            };
            colored::control::set_override(use_color);

            let use_pager = is_terminal && !no_pager && std::env::var_os("NO_PAGER").is_none();
            if use_pager {
                let pager = Pager::new();
                let repository = Repository::new(
                    objects.as_deref(),
                    Box::new(PagerWriter::new(pager.clone())),
                )?;
                repository.diff(&old, &new, options, use_color).await?;
                drop(repository);

                minus::page_all(pager)?;
            } else {
                let repository = Repository::new(objects.as_deref(), Box::new(std::io::stdout()))?;
                repository.diff(&old, &new, options, use_color).await?;
            }
        }
    }

    Ok(())
}
