use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;
use crate::outcome::report;

/// Outcome of submitting the dropped answer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing dropped yet, or the level is over
    Ignored,
    Correct,
    Incorrect,
    /// Last problem submitted
    Completed { correct: u8, total: u8 },
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One arithmetic level: a fixed number of problems answered by dragging a choice into the answer slot.
#[derive(Debug)]
pub struct ArithmeticSession<R> {
    tier: Tier,
    config: ArithmeticConfig,
    rng: SmallRng,
    reporter: R,
    problem: Problem,
    problem_number: u8,
    correct: u8,
    dropped: Option<u32>,
    completed: bool,
}

impl<R: OutcomeReporter> ArithmeticSession<R> {
    pub fn new(tier: Tier, config: ArithmeticConfig, seed: u64, reporter: R) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let problem = Problem::generate(tier, config.operand_max, &mut rng);
        Self {
            tier,
            config,
            rng,
            reporter,
            problem,
            problem_number: 1,
            correct: 0,
            dropped: None,
            completed: false,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn config(&self) -> ArithmeticConfig {
        self.config
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// 1-based position of the current problem.
    pub fn problem_number(&self) -> u8 {
        self.problem_number
    }

    pub fn total_problems(&self) -> u8 {
        self.config.problems_per_level
    }

    pub fn correct_answers(&self) -> u8 {
        self.correct
    }

    pub fn dropped_answer(&self) -> Option<u32> {
        self.dropped
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Places `value` in the answer slot, replacing any earlier drop. Values that are not choices are ignored.
    pub fn drop_answer(&mut self, value: u32) -> bool {
        if self.completed || !self.problem.is_choice(value) {
            return false;
        }
        self.dropped = Some(value);
        true
    }

    pub fn clear_answer(&mut self) {
        self.dropped = None;
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.completed {
            return SubmitOutcome::Ignored;
        }
        let Some(answer) = self.dropped.take() else {
            return SubmitOutcome::Ignored;
        };

        let is_correct = answer == self.problem.answer;
        if is_correct {
            self.correct += 1;
        }
        log::debug!(
            "Problem {}/{} `{} {}` answered, correct: {}",
            self.problem_number,
            self.config.problems_per_level,
            self.problem,
            answer,
            is_correct
        );

        if self.problem_number >= self.config.problems_per_level {
            self.completed = true;
            report(
                &mut self.reporter,
                OutcomeEvent::ArithmeticCompleted {
                    tier: self.tier,
                    correct: self.correct,
                    total: self.config.problems_per_level,
                },
            );
            return SubmitOutcome::Completed {
                correct: self.correct,
                total: self.config.problems_per_level,
            };
        }

        self.problem_number += 1;
        self.problem = Problem::generate(self.tier, self.config.operand_max, &mut self.rng);
        if is_correct {
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect
        }
    }

    /// Starts the level over with new problems.
    pub fn retry(&mut self) {
        self.problem = Problem::generate(self.tier, self.config.operand_max, &mut self.rng);
        self.problem_number = 1;
        self.correct = 0;
        self.dropped = None;
        self.completed = false;
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }
}
