//! Line-oriented console front end
//!
//! Parses REPL commands and renders snapshots as plain text. Rendering goes
//! through the aggregator so the console shows the same derived numbers a
//! chart would.

use std::fmt::Write;

use shared::{QueryKind, SmoothingVariant};
use crate::core::{Ratio, compare_candidates, cross_variant_rows, history_trend};
use crate::state::SessionSnapshot;
use crate::types::{Corrections, NormalizedResult, SentenceAnalysis, Suggestions};

pub const HELP: &str = "\
commands:
  complete <text>    autocomplete as you type (debounced)
  complete! <text>   autocomplete now
  correct <word>     spelling corrections
  sentence <text>    sentence probability
  clear <kind>       clear autocomplete | autocorrect | sentence
  history            recent successful queries
  show               current results
  help               this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Type { kind: QueryKind, text: String },
    Submit { kind: QueryKind, text: String },
    Clear { kind: QueryKind },
    History,
    Show,
    Help,
    Quit,
    Unknown { input: String },
}

impl ReplCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let (head, rest) = match line.trim_start().split_once(' ') {
            Some((head, rest)) => (head, rest.to_string()),
            None => (line.trim(), String::new()),
        };

        let command = match head {
            "complete" => ReplCommand::Type { kind: QueryKind::Autocomplete, text: rest },
            "complete!" => ReplCommand::Submit { kind: QueryKind::Autocomplete, text: rest },
            "correct" => ReplCommand::Submit { kind: QueryKind::Autocorrect, text: rest.trim().to_string() },
            "sentence" => ReplCommand::Submit { kind: QueryKind::SentenceProbability, text: rest },
            "clear" => match rest.trim().parse::<QueryKind>() {
                Ok(kind) => ReplCommand::Clear { kind },
                Err(_) => ReplCommand::Unknown { input: line.to_string() },
            },
            "history" => ReplCommand::History,
            "show" => ReplCommand::Show,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown { input: line.to_string() },
        };
        Some(command)
    }
}

/// Render every kind's slot
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    for kind in QueryKind::ALL {
        out.push_str(&render_kind(snapshot, kind));
    }
    out
}

pub fn render_kind(snapshot: &SessionSnapshot, kind: QueryKind) -> String {
    let mut out = String::new();
    let slot = snapshot.slot(kind);

    let _ = write!(out, "[{}]", kind);
    if let Some(query) = &slot.current_query {
        let _ = write!(out, " {:?}", query.raw_input());
    }
    if slot.is_loading() {
        out.push_str(" (loading)");
    }
    out.push('\n');

    if let Some(error) = &slot.error {
        let _ = writeln!(out, "  error: {}", error);
    }

    match &slot.result {
        Some(NormalizedResult::Autocomplete(suggestions)) => render_suggestions(&mut out, suggestions),
        Some(NormalizedResult::Autocorrect(corrections)) => render_corrections(&mut out, corrections),
        Some(NormalizedResult::SentenceProbability(analysis)) => render_sentence(&mut out, analysis),
        None => {}
    }
    out
}

fn render_suggestions(out: &mut String, suggestions: &Suggestions) {
    let _ = writeln!(
        out,
        "  {:<16}{:>14}{:>14}{:>14}",
        "word",
        SmoothingVariant::NoSmoothing,
        SmoothingVariant::Laplace,
        SmoothingVariant::KneserNey
    );
    for row in cross_variant_rows(suggestions) {
        let cells: Vec<String> = row
            .probabilities
            .iter()
            .map(|p| p.map_or_else(|| "-".to_string(), |p| format!("{:.6}", p)))
            .collect();
        let _ = writeln!(out, "  {:<16}{:>14}{:>14}{:>14}", row.word, cells[0], cells[1], cells[2]);
    }
    for variant in suggestions.missing_variants() {
        let _ = writeln!(out, "  ({} not returned)", variant);
    }
}

fn render_corrections(out: &mut String, corrections: &Corrections) {
    let _ = writeln!(
        out,
        "  corpus: {} words, vocabulary {}",
        corrections.stats.total_words, corrections.stats.vocab_size
    );
    for comparison in compare_candidates(corrections) {
        let improvement = match comparison.improvement {
            Ratio::Value(v) => format!("{:+.1}%", v * 100.0),
            Ratio::Undefined => "n/a".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<16} unsmoothed {:.6}  smoothed {:.6}  |delta| {:.6}  {}",
            comparison.word, comparison.unsmoothed, comparison.smoothed, comparison.abs_delta, improvement
        );
    }
}

fn render_sentence(out: &mut String, analysis: &SentenceAnalysis) {
    let _ = writeln!(out, "  P = {:e}", analysis.probability);
    for unigram in &analysis.unigrams {
        let _ = writeln!(out, "  {:<16} x{}", unigram.word, unigram.frequency);
    }
    for bigram in &analysis.bigrams {
        let _ = writeln!(out, "  {:<24} x{}", bigram.bigram, bigram.frequency);
    }
}

/// Recent successful queries, one block per kind
pub fn render_history(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    for kind in QueryKind::ALL {
        let trend = history_trend(snapshot.history(kind));
        if trend.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{}]", kind);
        for point in trend {
            let _ = writeln!(out, "  {:<28} {}", point.label, point.count);
        }
    }

    if out.is_empty() {
        out.push_str("no queries yet\n");
    }
    out
}
