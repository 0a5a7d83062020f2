//! Time-decay scoring for answered questions.
//!
//! Fast correct answers earn the most, slow incorrect answers cost the
//! least, and bonus questions are all upside: double points on success,
//! no penalty on failure.

/// Floor award for a correct answer, however slow.
pub const MIN_CORRECT: i32 = 10;
/// Award for an instant correct answer.
pub const MAX_CORRECT: i32 = 100;
/// Penalty for an instant incorrect answer.
pub const MAX_PENALTY: i32 = 50;
/// Smallest penalty, reached forty seconds in.
pub const MIN_PENALTY: i32 = 10;

/// Points per second shaved off a correct answer.
const CORRECT_DECAY_PER_SEC: f64 = 1.5;

/// Signed point delta for one attempt.
///
/// Correct non-bonus: `floor(max(10, 100 - elapsed * 1.5))`. Correct
/// bonus: twice that. Incorrect non-bonus: `-floor(min(50, max(10,
/// 50 - elapsed)))`. Incorrect bonus: zero. Elapsed time is clamped to
/// zero before any arithmetic, so the result is always in `[-50, 200]`
/// whatever the clock reports.
pub fn score_attempt(elapsed_secs: f64, correct: bool, bonus: bool) -> i32 {
    let t = elapsed_secs.max(0.0);
    match (correct, bonus) {
        (true, false) => (MAX_CORRECT as f64 - t * CORRECT_DECAY_PER_SEC)
            .max(MIN_CORRECT as f64)
            .floor() as i32,
        (true, true) => 2 * score_attempt(t, true, false),
        (false, false) => {
            let penalty = (MAX_PENALTY as f64 - t)
                .max(MIN_PENALTY as f64)
                .min(MAX_PENALTY as f64)
                .floor() as i32;
            -penalty
        }
        (false, true) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_correct_scores_full_marks() {
        assert_eq!(score_attempt(0.0, true, false), 100);
    }

    #[test]
    fn correct_decays_at_one_and_a_half_per_second() {
        assert_eq!(score_attempt(10.0, true, false), 85);
        assert_eq!(score_attempt(20.0, true, false), 70);
        assert_eq!(score_attempt(40.0, true, false), 40);
    }

    #[test]
    fn correct_never_drops_below_the_floor() {
        assert_eq!(score_attempt(60.0, true, false), 10);
        assert_eq!(score_attempt(1000.0, true, false), 10);
    }

    #[test]
    fn fractional_seconds_floor_after_decay() {
        // 100 - 0.5 * 1.5 = 99.25
        assert_eq!(score_attempt(0.5, true, false), 99);
    }

    #[test]
    fn bonus_doubles_the_correct_award() {
        assert_eq!(score_attempt(0.0, true, true), 200);
        assert_eq!(score_attempt(20.0, true, true), 140);
        assert_eq!(score_attempt(90.0, true, true), 20);
    }

    #[test]
    fn instant_incorrect_costs_the_most() {
        assert_eq!(score_attempt(0.0, false, false), -50);
    }

    #[test]
    fn incorrect_penalty_eases_with_time() {
        assert_eq!(score_attempt(20.0, false, false), -30);
        assert_eq!(score_attempt(40.0, false, false), -10);
        assert_eq!(score_attempt(60.0, false, false), -10);
    }

    #[test]
    fn incorrect_bonus_costs_nothing() {
        assert_eq!(score_attempt(0.0, false, true), 0);
        assert_eq!(score_attempt(45.0, false, true), 0);
    }

    #[test]
    fn negative_elapsed_is_treated_as_zero() {
        assert_eq!(score_attempt(-3.0, true, false), 100);
        assert_eq!(score_attempt(-3.0, true, true), 200);
        assert_eq!(score_attempt(-3.0, false, false), -50);
    }

    #[test]
    fn delta_stays_within_bounds_across_the_clock() {
        for tenths in 0..=1200 {
            let t = f64::from(tenths) / 10.0;
            let correct = score_attempt(t, true, false);
            assert!((MIN_CORRECT..=MAX_CORRECT).contains(&correct), "t={t} gave {correct}");

            let bonus = score_attempt(t, true, true);
            assert!((2 * MIN_CORRECT..=2 * MAX_CORRECT).contains(&bonus));

            let wrong = score_attempt(t, false, false);
            assert!((-MAX_PENALTY..=-MIN_PENALTY).contains(&wrong), "t={t} gave {wrong}");

            assert_eq!(score_attempt(t, false, true), 0);
        }
    }
}
