use clap::{Args, Parser, Subcommand};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyvolve::api;
use keyvolve::config::{Config, EffortWeights, RuleSet};
use keyvolve::corpus;
use keyvolve::error::{KeyvolveError, KvResult};
use keyvolve::geometry::KeyPositions;
use keyvolve::layouts;
use keyvolve::optimizer::ProgressCallback;
use keyvolve::scorer::EffortBreakdown;
use std::fs;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Genetic keyboard layout optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keyboard geometry JSON ({"x": [...], "y": [...], "row": [...], "column": [...]}).
    /// Defaults to the standard 30-key grid.
    #[arg(global = true, short = 'k', long)]
    keyboard: Option<String>,

    /// Corpus text files; repeatable.
    #[arg(global = true, short = 'c', long)]
    corpus: Vec<String>,

    /// Inline corpus samples; repeatable.
    #[arg(global = true, long)]
    text: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one layout against the corpus.
    Score(ScoreArgs),
    /// Print an itemized effort report for one layout.
    Breakdown(BreakdownArgs),
    /// Search for a lower-effort layout.
    Optimize(OptimizeArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Layout name (qwerty/dvorak/colemak) or literal character string.
    #[arg(short, long, default_value = "qwerty")]
    layout: String,

    #[command(flatten)]
    weights: EffortWeights,

    #[command(flatten)]
    rules: RuleSet,
}

#[derive(Args, Debug)]
struct BreakdownArgs {
    #[arg(short, long, default_value = "qwerty")]
    layout: String,
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    /// Starting layout; the search explores its permutations.
    #[arg(short, long, default_value = "qwerty")]
    layout: String,

    #[command(flatten)]
    config: Config,

    #[arg(short = 'S', long, help = "Master seed for a reproducible run")]
    seed: Option<u64>,

    /// Write the optimization report as JSON.
    #[arg(short, long)]
    out: Option<String>,
}

struct CliLogger;

impl ProgressCallback for CliLogger {
    fn on_progress(&self, generation: usize, best: f32, mean: f32) -> bool {
        info!("Gen {:5} | Best: {:10.2} | Mean: {:10.2}", generation, best, mean);
        true
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> KvResult<()> {
    let positions = load_positions(cli.keyboard.as_deref())?;
    let samples = load_samples(&cli.corpus, &cli.text)?;

    match cli.command {
        Commands::Score(args) => {
            let layout = resolve_layout(&args.layout)?;
            let (char_list, char_freq) = frequencies_for(&layout, &samples);
            let effort = if args.rules.is_empty() {
                api::layout_effort(
                    &layout,
                    &positions,
                    &samples,
                    &char_freq,
                    &char_list,
                    &args.weights,
                )?
            } else {
                api::layout_effort_with_rules(
                    &layout,
                    &positions,
                    &samples,
                    &char_freq,
                    &char_list,
                    &args.weights,
                    &args.rules,
                )?
            };
            info!("Layout: {}", layout.iter().collect::<String>());
            info!("Effort: {:.2}", effort);
        }
        Commands::Breakdown(args) => {
            let layout = resolve_layout(&args.layout)?;
            let (char_list, char_freq) = frequencies_for(&layout, &samples);
            let breakdown =
                api::effort_breakdown(&layout, &positions, &samples, &char_freq, &char_list)?;
            print_breakdown(&layout, &breakdown);
        }
        Commands::Optimize(args) => {
            let layout = resolve_layout(&args.layout)?;
            let (char_list, char_freq) = frequencies_for(&layout, &samples);

            info!("Optimizing {} keys over {} generations (population {})",
                layout.len(),
                args.config.search.generations,
                args.config.search.population_size,
            );

            let report = api::optimize_with_progress(
                &layout,
                &positions,
                &samples,
                &char_freq,
                &char_list,
                &args.config.weights,
                &args.config.rules,
                &args.config.search,
                args.seed,
                &CliLogger,
            )?;

            info!("Best layout: {}", report.layout.iter().collect::<String>());
            info!("Effort: {:.2} after {} generations", report.effort, report.generations);

            if let Some(path) = args.out {
                fs::write(&path, serde_json::to_string_pretty(&report)?)?;
                info!("Report written to {}", path);
            }
        }
    }
    Ok(())
}

fn load_positions(path: Option<&str>) -> KvResult<KeyPositions> {
    match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(layouts::standard_grid()),
    }
}

fn load_samples(files: &[String], inline: &[String]) -> KvResult<Vec<String>> {
    let mut samples: Vec<String> = inline.to_vec();
    for path in files {
        samples.push(fs::read_to_string(path)?);
    }
    if samples.is_empty() {
        return Err(KeyvolveError::Config(
            "no corpus given: pass --corpus <file> or --text <sample>".to_string(),
        ));
    }
    Ok(samples)
}

fn resolve_layout(arg: &str) -> KvResult<Vec<char>> {
    let source = layouts::by_name(arg).unwrap_or(arg);
    let chars: Vec<char> = source.chars().collect();
    if chars.is_empty() {
        return Err(KeyvolveError::Config("layout is empty".to_string()));
    }
    Ok(chars)
}

/// Frequency table for the layout's characters, measured over the corpus.
fn frequencies_for(layout: &[char], samples: &[String]) -> (Vec<char>, Vec<f32>) {
    let observed = corpus::char_frequencies(samples);
    let char_list: Vec<char> = layout.iter().map(|c| c.to_ascii_lowercase()).collect();
    let char_freq = char_list
        .iter()
        .map(|c| {
            observed
                .iter()
                .find(|(o, _)| o == c)
                .map(|&(_, f)| f)
                .unwrap_or(0.0)
        })
        .collect();
    (char_list, char_freq)
}

fn print_breakdown(layout: &[char], d: &EffortBreakdown) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Component").add_attribute(Attribute::Bold),
        Cell::new("Effort").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.add_row(vec![
        Cell::new("Base"),
        Cell::new(format!("{:.2}", d.base_effort)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Same finger").fg(Color::Red),
        Cell::new(format!("{:.2}", d.same_finger_effort)).fg(Color::Red),
        Cell::new(d.same_finger_bigrams.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Same hand"),
        Cell::new(format!("{:.2}", d.same_hand_effort)),
        Cell::new(d.same_hand_bigrams.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Row change"),
        Cell::new(format!("{:.2}", d.row_change_effort)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Trigram"),
        Cell::new(format!("{:.2}", d.trigram_effort)),
        Cell::new(d.same_hand_trigrams.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Hand alternations").fg(Color::Green),
        Cell::new("0.00").fg(Color::Green),
        Cell::new(d.hand_alternations.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", d.total_effort)).add_attribute(Attribute::Bold),
        Cell::new("-"),
    ]);

    println!("Layout: {}", layout.iter().collect::<String>());
    println!("{}", table);
}
