//! The `scacquiz play` command: one interactive round.
//!
//! The engine owns the rules; this module owns the clock, the terminal,
//! and the mapping from typed input to submitted answers. Answers that
//! arrive past the question window are submitted empty so they score as
//! unanswered.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use scacquiz_core::evaluator::Evaluator;
use scacquiz_core::generator::Generator;
use scacquiz_core::model::{Attempt, Expected, Question, Shape};
use scacquiz_core::session::{RoundSummary, Session};
use scacquiz_core::traits::{EntitySource, RoundRecord, ScoreSink};
use scacquiz_store::bank::load_merged;
use scacquiz_store::config::load_config_from;
use scacquiz_store::scores::Scoreboard;

pub fn execute(
    bank: Option<PathBuf>,
    player: Option<String>,
    seed: Option<u64>,
    questions: Option<usize>,
    hints: bool,
    no_save: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let bank_path = bank.unwrap_or_else(|| config.bank_path.clone());
    let player = player.unwrap_or_else(|| config.player.clone());

    let bank = load_merged(&bank_path)
        .with_context(|| format!("failed to load bank from {}", bank_path.display()))?;
    let entities = bank.list_entities()?;
    ensure!(!entities.is_empty(), "bank '{}' has no carriers to quiz", bank.name);

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    debug!(carriers = entities.len(), player = %player, "starting round");

    let mut session = Session::new(
        Generator::new(config.generator.to_config()),
        Evaluator::new(config.matcher.to_policy()),
    );
    session.begin_round();

    let window = config.question_secs as f64;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!(
        "SCAC trivia: {} carriers, {} seconds per question. Press Enter on an empty line to pass.",
        entities.len(),
        config.question_secs
    );
    println!();

    let mut number = 0usize;
    while let Some(question) = session.next_question(&entities, &mut rng)? {
        number += 1;
        present(&question, number, hints);

        let started = Instant::now();
        let line = read_answer(&mut input)?;
        let elapsed = started.elapsed().as_secs_f64();

        // Past the window the answer no longer counts; submit it empty.
        let answer = if elapsed > window {
            String::new()
        } else {
            resolve_choice(&question, &line)
        };
        let attempt = session.submit(&question, &answer, elapsed)?;
        feedback(&question, &attempt, window);

        if let Some(cap) = questions {
            if number >= cap {
                break;
            }
        }
    }

    let summary = session.summary();
    print_summary(&player, &summary);

    if !no_save && summary.asked > 0 {
        let scoreboard = Scoreboard::new(config.scores_path.clone());
        scoreboard.record_round(&RoundRecord {
            player: player.clone(),
            score: summary.score,
            correct: summary.correct,
            asked: summary.asked,
            finished_at: chrono::Utc::now(),
        })?;
        println!("Recorded for {player} in {}", config.scores_path.display());
    }

    Ok(())
}

fn present(question: &Question, number: usize, hints: bool) {
    if question.bonus {
        println!("Question {number} [BONUS]");
    } else {
        println!("Question {number}");
    }
    println!("  {}", question.prompt);

    match question.shape {
        Shape::FreeText => {}
        Shape::SingleChoice => {
            for (i, choice) in question.choices.iter().enumerate() {
                println!("    {}) {}", i + 1, choice);
            }
            println!("  Answer with a number or the full text.");
        }
        Shape::MultiChoice => {
            for (i, choice) in question.choices.iter().enumerate() {
                println!("    {}) {}", i + 1, choice);
            }
            println!("  Select all that apply, separated by ';' or ','.");
        }
    }

    if hints && !question.hint.is_empty() {
        println!("  (hint: {})", question.hint);
    }

    print!("> ");
    let _ = io::stdout().flush();
}

/// Map numeric selections onto option text so "2" answers a choice
/// question; anything else passes through for the evaluator to judge.
fn resolve_choice(question: &Question, line: &str) -> String {
    let pick = |part: &str| -> String {
        if let Ok(n) = part.parse::<usize>() {
            if (1..=question.choices.len()).contains(&n) {
                return question.choices[n - 1].clone();
            }
        }
        part.to_string()
    };

    match question.shape {
        Shape::FreeText => line.trim().to_string(),
        Shape::SingleChoice => pick(line.trim()),
        Shape::MultiChoice => {
            let parts: Vec<String> = line
                .split([';', ','])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(pick)
                .collect();
            parts.join("; ")
        }
    }
}

/// Per-answer feedback with the sand-timer tiers: comfortable, running
/// low, or out of time.
fn feedback(question: &Question, attempt: &Attempt, window: f64) {
    let remaining = (window - attempt.elapsed_secs).max(0.0);
    let timing = if remaining > 20.0 {
        format!("{remaining:.0}s to spare")
    } else if remaining > 5.0 {
        format!("only {remaining:.0}s left")
    } else {
        "out of time".to_string()
    };

    if attempt.correct {
        println!("  Correct! +{} ({timing})", attempt.delta);
    } else {
        println!(
            "  Incorrect ({:+}). Answer: {}",
            attempt.delta,
            expected_display(&question.expected)
        );
    }
    println!();
}

fn expected_display(expected: &Expected) -> String {
    match expected {
        Expected::Text(text) => text.clone(),
        Expected::Set(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
    }
}

fn print_summary(player: &str, summary: &RoundSummary) {
    let accuracy = if summary.asked == 0 {
        0.0
    } else {
        summary.correct as f64 / summary.asked as f64 * 100.0
    };

    let mut table = Table::new();
    table.set_header(vec!["Player", "Score", "Correct", "Asked", "Accuracy"]);
    table.add_row(vec![
        Cell::new(player),
        Cell::new(summary.score),
        Cell::new(summary.correct),
        Cell::new(summary.asked),
        Cell::new(format!("{accuracy:.0}%")),
    ]);

    println!("Round complete.");
    println!("{table}");
}

fn read_answer(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read answer from stdin")?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
