//! Seeded round example: minimal programmatic usage of the quiz engine.
//!
//! Builds a small in-memory carrier pool, plays a full round answering
//! every question with its canonical answer, and prints the totals. The
//! fixed seed makes the question order reproducible.
//!
//! ```bash
//! cargo run --example seeded_round
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use scacquiz_core::evaluator::Evaluator;
use scacquiz_core::generator::Generator;
use scacquiz_core::model::{Entity, Expected};
use scacquiz_core::session::Session;

fn main() -> anyhow::Result<()> {
    let entities = vec![
        Entity::new("BNSF", "BNSF Railway", "Rail", Some("Formed in the 1995 merger")),
        Entity::new("ODFL", "Old Dominion Freight Line", "LTL", None),
        Entity::new("MAEU", "Maersk Line", "Ocean", None),
        Entity::new("SWFT", "Swift Transportation", "Truckload", None),
        Entity::new("JBHT", "J.B. Hunt Transport", "Intermodal", None),
    ];

    let mut session = Session::new(Generator::default(), Evaluator::default());
    let mut rng = StdRng::seed_from_u64(42);

    session.begin_round();
    println!("Playing a seeded round over {} carriers\n", entities.len());

    // Answer every question correctly, pretending each took three seconds.
    while let Some(question) = session.next_question(&entities, &mut rng)? {
        let answer = match &question.expected {
            Expected::Text(text) => text.clone(),
            Expected::Set(set) => set.iter().cloned().collect::<Vec<_>>().join("; "),
        };
        let attempt = session.submit(&question, &answer, 3.0)?;
        let tag = if question.bonus { " [bonus]" } else { "" };
        println!("{}{tag}", question.prompt);
        println!("  -> {answer} (+{})\n", attempt.delta);
    }

    let summary = session.summary();
    println!(
        "Round complete: {} points, {}/{} correct",
        summary.score, summary.correct, summary.asked
    );

    Ok(())
}
