//! Question generation.
//!
//! One call produces one question: sample a not-yet-asked entity, decide
//! whether it earns a bonus, pick a shape, and assemble the prompt,
//! canonical answer, and (for choice shapes) shuffled options. Randomness
//! is injected so a seeded round replays identically.

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::model::{Entity, Expected, Question, Shape};
use crate::similarity::{normalize, ratio, strip_parenthetical};

/// Tunable generation policy.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Chance of a bonus question for an annotated entity whose mode is
    /// not in [`GeneratorConfig::always_bonus_modes`].
    pub bonus_probability: f64,
    /// Ship modes that always produce a bonus question.
    pub always_bonus_modes: Vec<String>,
    /// Name-similarity ratio at or above which two entities count as
    /// variants of one carrier.
    pub near_duplicate_threshold: f64,
    /// Distractor names offered beside the correct one in choice shapes.
    pub distractor_count: usize,
    /// Longest note excerpt quoted in a bonus prompt, in chars.
    pub note_excerpt_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bonus_probability: 0.15,
            always_bonus_modes: vec!["Ocean".to_string(), "Air".to_string()],
            near_duplicate_threshold: 0.95,
            distractor_count: 3,
            note_excerpt_chars: 200,
        }
    }
}

/// Builds one question per call from the not-yet-asked slice of the
/// entity pool.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce the next question, or `None` once every entity has been
    /// asked. `None` is the round-complete signal, not an error.
    pub fn generate<R: Rng>(
        &self,
        entities: &[Entity],
        asked: &HashSet<Uuid>,
        rng: &mut R,
    ) -> Option<Question> {
        let available: Vec<&Entity> = entities
            .iter()
            .filter(|e| !asked.contains(&e.id))
            .collect();
        let entity = *available.choose(rng)?;

        if self.roll_bonus(entity, rng) {
            return Some(self.bonus_question(entity, entities, rng));
        }

        let question = match rng.gen_range(0..4) {
            0 => self.code_to_name(entity),
            1 => self.name_to_code(entity),
            2 => self.mode_question(entity, entities, rng),
            _ => self.code_to_name_choice(entity, entities, rng),
        };
        Some(question)
    }

    /// Always-bonus modes short-circuit; otherwise only annotated entities
    /// roll the dice. `gen` rather than `gen_bool` so an out-of-range
    /// configured probability degrades instead of panicking.
    fn roll_bonus<R: Rng>(&self, entity: &Entity, rng: &mut R) -> bool {
        if self
            .config
            .always_bonus_modes
            .iter()
            .any(|m| m.eq_ignore_ascii_case(&entity.mode))
        {
            return true;
        }
        entity.has_note() && rng.gen::<f64>() < self.config.bonus_probability
    }

    fn code_to_name(&self, entity: &Entity) -> Question {
        Question {
            shape: Shape::FreeText,
            prompt: format!("Which carrier uses SCAC code {}?", entity.code),
            expected: Expected::Text(entity.name.clone()),
            choices: Vec::new(),
            entity_id: entity.id,
            hint: format!("Ship mode: {}", entity.mode),
            bonus: false,
        }
    }

    fn name_to_code(&self, entity: &Entity) -> Question {
        Question {
            shape: Shape::FreeText,
            prompt: format!("What is the SCAC code for {}?", entity.name),
            expected: Expected::Text(entity.code.clone()),
            choices: Vec::new(),
            entity_id: entity.id,
            hint: format!("Ship mode: {}", entity.mode),
            bonus: false,
        }
    }

    /// Ship-mode question. When other entities carry near-duplicate names
    /// (regional variants of one carrier), the question upgrades to
    /// multi-choice over the whole group's modes; otherwise it stays
    /// free-text about this entity alone.
    fn mode_question<R: Rng>(
        &self,
        entity: &Entity,
        entities: &[Entity],
        rng: &mut R,
    ) -> Question {
        let duplicates = self.near_duplicates(entity, entities);
        let name = prompt_name(&entity.name);

        if duplicates.is_empty() {
            return Question {
                shape: Shape::FreeText,
                prompt: format!("What ship mode does {} ({}) operate?", name, entity.code),
                expected: Expected::Text(entity.mode.clone()),
                choices: Vec::new(),
                entity_id: entity.id,
                hint: format!("Carrier code: {}", entity.code),
                bonus: false,
            };
        }

        let mut modes: BTreeSet<String> = BTreeSet::new();
        modes.insert(entity.mode.clone());
        for duplicate in &duplicates {
            modes.insert(duplicate.mode.clone());
        }

        let group: HashSet<Uuid> = duplicates
            .iter()
            .map(|d| d.id)
            .chain([entity.id])
            .collect();
        let mut extras: Vec<String> = entities
            .iter()
            .filter(|e| !group.contains(&e.id))
            .map(|e| e.mode.clone())
            .filter(|m| !modes.contains(m))
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        extras.shuffle(rng);
        extras.truncate(2);

        let mut choices: Vec<String> = modes.iter().cloned().chain(extras).collect();
        choices.shuffle(rng);

        Question {
            shape: Shape::MultiChoice,
            prompt: format!("Which ship modes does {name} operate? Select all that apply."),
            expected: Expected::Set(modes),
            choices,
            entity_id: entity.id,
            hint: format!("Carrier code: {}", entity.code),
            bonus: false,
        }
    }

    fn code_to_name_choice<R: Rng>(
        &self,
        entity: &Entity,
        entities: &[Entity],
        rng: &mut R,
    ) -> Question {
        let pool: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.id != entity.id && e.name != entity.name)
            .collect();
        Question {
            shape: Shape::SingleChoice,
            prompt: format!("Which carrier uses SCAC code {}?", entity.code),
            expected: Expected::Text(entity.name.clone()),
            choices: self.build_choices(&entity.name, &pool, rng),
            entity_id: entity.id,
            hint: format!("Ship mode: {}", entity.mode),
            bonus: false,
        }
    }

    /// Bonus variant: single-choice on the carrier name. The prompt quotes
    /// a note excerpt when the note is meaningful and no other entity
    /// carries an identical one; otherwise it falls back to the code.
    fn bonus_question<R: Rng>(
        &self,
        entity: &Entity,
        entities: &[Entity],
        rng: &mut R,
    ) -> Question {
        let note_key = normalize(&entity.note);
        let note_shared = entities
            .iter()
            .any(|e| e.id != entity.id && normalize(&e.note) == note_key);
        let note_based = entity.has_note() && !note_shared;

        let others: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.id != entity.id && e.name != entity.name)
            .collect();
        // An identically-annotated distractor would make the correct
        // choice ambiguous; keep them out unless that starves the pool.
        let pool: Vec<&Entity> = if note_based {
            let safe: Vec<&Entity> = others
                .iter()
                .copied()
                .filter(|e| normalize(&e.note) != note_key)
                .collect();
            if safe.len() >= self.config.distractor_count {
                safe
            } else {
                others
            }
        } else {
            others
        };

        let prompt = if note_based {
            format!(
                "Bonus: which carrier does this describe? \"{}\"",
                excerpt(&entity.note, self.config.note_excerpt_chars)
            )
        } else {
            format!("Bonus: which carrier holds SCAC code {}?", entity.code)
        };

        Question {
            shape: Shape::SingleChoice,
            prompt,
            expected: Expected::Text(entity.name.clone()),
            choices: self.build_choices(&entity.name, &pool, rng),
            entity_id: entity.id,
            hint: format!("Ship mode: {}, code {}", entity.mode, entity.code),
            bonus: true,
        }
    }

    /// Other entities whose normalized names clear the near-duplicate
    /// threshold.
    fn near_duplicates<'a>(&self, entity: &Entity, entities: &'a [Entity]) -> Vec<&'a Entity> {
        let target = normalize(&entity.name);
        entities
            .iter()
            .filter(|e| e.id != entity.id)
            .filter(|e| ratio(&normalize(&e.name), &target) >= self.config.near_duplicate_threshold)
            .collect()
    }

    /// Sample distractor names from the pool, add the correct one, and
    /// shuffle. Fewer distractors than configured is fine; the correct
    /// option is always present.
    fn build_choices<R: Rng>(&self, correct: &str, pool: &[&Entity], rng: &mut R) -> Vec<String> {
        let mut choices: Vec<String> = pool
            .choose_multiple(rng, self.config.distractor_count)
            .map(|e| e.name.clone())
            .collect();
        choices.push(correct.to_string());
        choices.shuffle(rng);
        choices
    }
}

/// Name as shown in a prompt: parenthetical qualifiers stripped when
/// present, the raw name otherwise.
fn prompt_name(name: &str) -> String {
    if name.contains('(') {
        let stripped = strip_parenthetical(name);
        if !stripped.is_empty() {
            return stripped;
        }
    }
    name.to_string()
}

/// At most `max` chars of a note, on a char boundary, with a trailing
/// ellipsis when content was dropped.
fn excerpt(note: &str, max: usize) -> String {
    let trimmed = note.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
