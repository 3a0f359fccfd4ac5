use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use speechscribe_core::evaluation::evaluate_transcripts_use_case::EvaluateTranscriptsUseCase;
use speechscribe_core::evaluation::evaluation_logger::StdoutEvaluationLogger;
use speechscribe_core::evaluation::infrastructure::json_case_reader::JsonCaseReader;
use speechscribe_core::scoring::domain::edit_operation::EditOperation;
use speechscribe_core::scoring::domain::token_sequence::TokenSequence;
use speechscribe_core::scoring::domain::word_error_rate::measure_wer_with_alignment;
use speechscribe_core::shared::evaluation_settings::EvaluationSettings;

/// Word error rate scoring for transcripts.
#[derive(Parser)]
#[command(name = "speechscribe-eval")]
struct Cli {
    /// Ground-truth text to score against.
    #[arg(long)]
    reference: Option<String>,

    /// System output to score.
    #[arg(long)]
    hypothesis: Option<String>,

    /// JSON array (.json) or JSON Lines (.jsonl) file of cases.
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Print the token alignment (single pair only).
    #[arg(long)]
    alignment: bool,

    /// Skip inputs longer than this many tokens.
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Output format: text or json.
    #[arg(long, default_value = "text")]
    format: String,

    /// Evaluation settings file (JSON). Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = match &cli.config {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            EvaluationSettings::load_from(path)?
        }
        None => EvaluationSettings::default(),
    }
    .with_max_tokens(cli.max_tokens);
    log::info!("{}", describe_mode(&cli, &settings));

    if let Some(cases) = &cli.cases {
        run_cases(cases, settings, &cli.format)
    } else {
        let reference = cli.reference.as_deref().unwrap_or_default();
        let hypothesis = cli.hypothesis.as_deref().unwrap_or_default();
        run_pair(reference, hypothesis, &settings, cli.alignment, &cli.format)
    }
}

fn run_cases(
    cases: &Path,
    settings: EvaluationSettings,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let logger = StdoutEvaluationLogger::new(settings.progress_throttle);
    let mut use_case =
        EvaluateTranscriptsUseCase::new(Box::new(JsonCaseReader::new()), Box::new(logger), settings);
    let report = use_case.execute(cases)?;

    if format == "json" {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn run_pair(
    reference: &str,
    hypothesis: &str,
    settings: &EvaluationSettings,
    show_alignment: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let reference_tokens = TokenSequence::from_text(reference);
    let hypothesis_tokens = TokenSequence::from_text(hypothesis);
    if let Some(limit) = settings.max_tokens {
        let longest = reference_tokens.len().max(hypothesis_tokens.len());
        if longest > limit {
            return Err(format!("Input has {longest} tokens, limit is {limit}").into());
        }
    }

    let (measurement, alignment) = measure_wer_with_alignment(reference, hypothesis)?;
    let alignment = show_alignment.then_some(alignment);

    if format == "json" {
        let mut value = serde_json::to_value(measurement)?;
        if let Some(alignment) = &alignment {
            value["operations"] = serde_json::to_value(alignment.operations())?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Some(alignment) = &alignment {
        println!(
            "{}",
            render_alignment(
                reference_tokens.as_slice(),
                hypothesis_tokens.as_slice(),
                alignment.operations()
            )
        );
    }
    let counts = measurement.counts;
    println!(
        "WER: {:.2}% ({} substitutions, {} deletions, {} insertions over {} reference tokens)",
        measurement.rate,
        counts.substitutions,
        counts.deletions,
        counts.insertions,
        measurement.reference_tokens
    );
    Ok(())
}

fn describe_mode(cli: &Cli, settings: &EvaluationSettings) -> String {
    let limit = match settings.max_tokens {
        Some(limit) => format!("{limit} tokens"),
        None => "none".to_string(),
    };
    match &cli.cases {
        Some(cases) => format!(
            "Scoring cases from {} (limit: {limit}, format: {})",
            cases.display(),
            cli.format
        ),
        None => format!("Scoring single pair (limit: {limit}, format: {})", cli.format),
    }
}

/// Three aligned rows: reference, hypothesis and the edit symbol per column.
/// Gaps are shown as `*`.
fn render_alignment(reference: &[&str], hypothesis: &[&str], ops: &[EditOperation]) -> String {
    let mut ref_iter = reference.iter();
    let mut hyp_iter = hypothesis.iter();
    let mut ref_row = Vec::with_capacity(ops.len());
    let mut hyp_row = Vec::with_capacity(ops.len());
    let mut op_row = Vec::with_capacity(ops.len());

    for op in ops {
        let (r, h) = match op {
            EditOperation::Match | EditOperation::Substitution => {
                (ref_iter.next().copied(), hyp_iter.next().copied())
            }
            EditOperation::Deletion => (ref_iter.next().copied(), None),
            EditOperation::Insertion => (None, hyp_iter.next().copied()),
        };
        let r = r.unwrap_or("*");
        let h = h.unwrap_or("*");
        let width = r.chars().count().max(h.chars().count());
        ref_row.push(format!("{r:width$}"));
        hyp_row.push(format!("{h:width$}"));
        op_row.push(format!("{:width$}", op.to_string()));
    }

    format!(
        "REF: {}\nHYP: {}\n     {}",
        ref_row.join(" ").trim_end(),
        hyp_row.join(" ").trim_end(),
        op_row.join(" ").trim_end()
    )
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let has_pair = cli.reference.is_some() || cli.hypothesis.is_some();
    if cli.cases.is_some() && has_pair {
        return Err("--cases and --reference/--hypothesis are mutually exclusive".into());
    }
    if cli.cases.is_none() && (cli.reference.is_none() || cli.hypothesis.is_none()) {
        return Err("Provide --cases, or both --reference and --hypothesis".into());
    }
    if let Some(cases) = &cli.cases {
        if !cases.exists() {
            return Err(format!("Cases file not found: {}", cases.display()).into());
        }
        if cli.alignment {
            return Err("--alignment is only available for a single --reference/--hypothesis pair".into());
        }
    }
    if cli.max_tokens == Some(0) {
        return Err("Max tokens must be a positive integer, got 0".into());
    }
    if cli.format != "text" && cli.format != "json" {
        return Err(format!("Format must be 'text' or 'json', got '{}'", cli.format).into());
    }
    Ok(())
}
