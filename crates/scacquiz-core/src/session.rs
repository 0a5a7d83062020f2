//! Round orchestration.
//!
//! A [`Session`] is a caller-held value that walks `Idle -> InRound ->
//! Complete`. The caller owns the entity pool, the clock, and the RNG; the
//! session owns the round totals and the rule that no entity repeats
//! within a round.

use rand::Rng;
use tracing::debug;

use crate::error::SessionError;
use crate::evaluator::Evaluator;
use crate::generator::Generator;
use crate::model::{Attempt, Entity, Question, RoundState};
use crate::scoring::score_attempt;

/// Where a session is in its round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No round has started yet.
    Idle,
    /// A round is running; questions flow and answers score.
    InRound,
    /// The entity pool is exhausted; totals are final.
    Complete,
}

/// End-of-round totals, ready for a score sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: i32,
    pub correct: u32,
    pub asked: u32,
}

/// One player's quiz session.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    round: RoundState,
    generator: Generator,
    evaluator: Evaluator,
}

impl Session {
    /// A new session starts idle; call [`Session::begin_round`] to play.
    pub fn new(generator: Generator, evaluator: Evaluator) -> Self {
        Self {
            phase: Phase::Idle,
            round: RoundState::default(),
            generator,
            evaluator,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Totals for the round in progress (or the last finished one).
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Reset every total and enter `InRound`.
    ///
    /// Valid from any phase; a round in progress is simply discarded.
    pub fn begin_round(&mut self) {
        debug!("starting a fresh round");
        self.round = RoundState::default();
        self.phase = Phase::InRound;
    }

    /// Next question for this round, skipping every entity already asked.
    ///
    /// `Ok(None)` means the pool is exhausted; the session moves to
    /// `Complete` and keeps answering `Ok(None)` until a new round starts.
    /// Asking before the first round is a caller bug and fails instead.
    pub fn next_question<R: Rng>(
        &mut self,
        entities: &[Entity],
        rng: &mut R,
    ) -> Result<Option<Question>, SessionError> {
        match self.phase {
            Phase::Idle => Err(SessionError::RoundNotActive),
            Phase::Complete => Ok(None),
            Phase::InRound => {
                match self.generator.generate(entities, &self.round.asked_ids, rng) {
                    Some(question) => Ok(Some(question)),
                    None => {
                        debug!(
                            score = self.round.score,
                            asked = self.round.asked_count,
                            "entity pool exhausted, round complete"
                        );
                        self.phase = Phase::Complete;
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Evaluate one submission, fold its delta into the totals, and mark
    /// the entity as asked.
    pub fn submit(
        &mut self,
        question: &Question,
        raw_answer: &str,
        elapsed_secs: f64,
    ) -> Result<Attempt, SessionError> {
        if self.phase != Phase::InRound {
            return Err(SessionError::RoundNotActive);
        }

        let correct = self.evaluator.evaluate(question, raw_answer);
        let delta = score_attempt(elapsed_secs, correct, question.bonus);

        self.round.score += delta;
        self.round.asked_count += 1;
        if correct {
            self.round.correct_count += 1;
        }
        self.round.asked_ids.insert(question.entity_id);

        Ok(Attempt {
            correct,
            delta,
            elapsed_secs,
        })
    }

    /// Totals so far; final once the phase is `Complete`.
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.round.score,
            correct: self.round.correct_count,
            asked: self.round.asked_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Expected;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool() -> Vec<Entity> {
        vec![
            Entity::new("AAAA", "Alpha Freight", "Truckload", None),
            Entity::new("BBBB", "Beta Lines", "LTL", None),
            Entity::new("CCCC", "Gamma Rail", "Rail", None),
            Entity::new("DDDD", "Delta Carriers", "Intermodal", None),
        ]
    }

    fn session() -> Session {
        Session::new(Generator::default(), Evaluator::default())
    }

    /// The canonical answer, rendered the way a presenter would submit it.
    fn canonical_answer(question: &Question) -> String {
        match &question.expected {
            Expected::Text(text) => text.clone(),
            Expected::Set(set) => set.iter().cloned().collect::<Vec<_>>().join("; "),
        }
    }

    #[test]
    fn session_starts_idle() {
        let s = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.summary().asked, 0);
    }

    #[test]
    fn asking_before_any_round_is_an_error() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(1);
        let err = s.next_question(&pool(), &mut rng).unwrap_err();
        assert_eq!(err, SessionError::RoundNotActive);
    }

    #[test]
    fn submitting_before_any_round_is_an_error() {
        let mut s = session();
        let entities = pool();
        let question = Generator::default()
            .generate(&entities, &Default::default(), &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(
            s.submit(&question, "whatever", 1.0).unwrap_err(),
            SessionError::RoundNotActive
        );
    }

    #[test]
    fn a_perfect_round_runs_the_pool_dry() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(42);

        s.begin_round();
        assert_eq!(s.phase(), Phase::InRound);

        let mut answered = 0;
        while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
            let attempt = s
                .submit(&question, &canonical_answer(&question), 2.0)
                .unwrap();
            assert!(attempt.correct, "canonical answer judged wrong: {question:?}");
            assert!(attempt.delta > 0);
            answered += 1;
            assert!(answered <= entities.len(), "round never terminated");
        }

        assert_eq!(s.phase(), Phase::Complete);
        let summary = s.summary();
        assert_eq!(summary.asked, entities.len() as u32);
        assert_eq!(summary.correct, entities.len() as u32);
        assert!(summary.score > 0);
        assert_eq!(s.round().asked_ids.len(), entities.len());
    }

    #[test]
    fn wrong_answers_count_against_the_score() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(7);

        s.begin_round();
        while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
            let attempt = s.submit(&question, "", 0.0).unwrap();
            assert!(!attempt.correct);
            if question.bonus {
                assert_eq!(attempt.delta, 0);
            } else {
                assert_eq!(attempt.delta, -50);
            }
        }

        let summary = s.summary();
        assert_eq!(summary.correct, 0);
        assert_eq!(summary.asked, entities.len() as u32);
        assert!(summary.score <= 0);
    }

    #[test]
    fn complete_session_keeps_returning_none() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);

        s.begin_round();
        while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
            s.submit(&question, "", 1.0).unwrap();
        }
        assert_eq!(s.phase(), Phase::Complete);

        for _ in 0..3 {
            assert!(s.next_question(&entities, &mut rng).unwrap().is_none());
        }
    }

    #[test]
    fn submitting_after_completion_is_an_error() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);

        s.begin_round();
        let mut last = None;
        while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
            s.submit(&question, "", 1.0).unwrap();
            last = Some(question);
        }

        let question = last.unwrap();
        assert_eq!(
            s.submit(&question, "again", 1.0).unwrap_err(),
            SessionError::RoundNotActive
        );
    }

    #[test]
    fn begin_round_resets_mid_round_progress() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(11);

        s.begin_round();
        let question = s.next_question(&entities, &mut rng).unwrap().unwrap();
        s.submit(&question, &canonical_answer(&question), 1.0).unwrap();
        assert_eq!(s.summary().asked, 1);

        s.begin_round();
        assert_eq!(s.phase(), Phase::InRound);
        assert_eq!(s.summary().asked, 0);
        assert_eq!(s.summary().score, 0);
        assert!(s.round().asked_ids.is_empty());
    }

    #[test]
    fn begin_round_restarts_a_complete_session() {
        let entities = pool();
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(13);

        s.begin_round();
        while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
            s.submit(&question, "", 1.0).unwrap();
        }
        assert_eq!(s.phase(), Phase::Complete);

        s.begin_round();
        assert_eq!(s.phase(), Phase::InRound);
        assert!(s.next_question(&entities, &mut rng).unwrap().is_some());
    }

    #[test]
    fn seeded_rounds_replay_identically() {
        let entities = pool();

        let run = |seed: u64| {
            let mut s = session();
            let mut rng = StdRng::seed_from_u64(seed);
            s.begin_round();
            let mut prompts = Vec::new();
            while let Some(question) = s.next_question(&entities, &mut rng).unwrap() {
                prompts.push(question.prompt.clone());
                s.submit(&question, &canonical_answer(&question), 1.0).unwrap();
            }
            (prompts, s.summary())
        };

        assert_eq!(run(5), run(5));
    }
}
