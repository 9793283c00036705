use core::fmt;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use distractor::*;
pub use session::*;

mod distractor;
mod session;

/// Problems in one arithmetic level.
pub const DEFAULT_PROBLEMS_PER_LEVEL: u8 = 5;

/// Operands are drawn from `0..DEFAULT_OPERAND_MAX`.
pub const DEFAULT_OPERAND_MAX: u32 = 100;

/// Largest operand bound, so that the sum of two operands fits in a `u32`.
pub const OPERAND_MAX_LIMIT: u32 = u32::MAX / 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticConfig {
    pub problems_per_level: u8,
    pub operand_max: u32,
}

impl ArithmeticConfig {
    pub fn new(problems_per_level: u8, operand_max: u32) -> Self {
        Self {
            problems_per_level: problems_per_level.max(1),
            operand_max: operand_max.clamp(1, OPERAND_MAX_LIMIT),
        }
    }
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROBLEMS_PER_LEVEL, DEFAULT_OPERAND_MAX)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }

    /// Addition on tier 1, subtraction on tier 2, a coin flip on tier 3.
    fn for_tier(tier: Tier, rng: &mut SmallRng) -> Self {
        match tier {
            Tier::One => Self::Add,
            Tier::Two => Self::Subtract,
            Tier::Three if rng.random_bool(0.5) => Self::Add,
            Tier::Three => Self::Subtract,
        }
    }
}

/// One question with its shuffled answer choices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub lhs: u32,
    pub rhs: u32,
    pub operation: Operation,
    pub answer: u32,
    pub choices: [u32; CHOICE_COUNT],
}

impl Problem {
    pub fn generate(tier: Tier, operand_max: u32, rng: &mut SmallRng) -> Self {
        let operation = Operation::for_tier(tier, rng);
        let operand_max = operand_max.clamp(1, OPERAND_MAX_LIMIT);
        let a = rng.random_range(0..operand_max);
        let b = rng.random_range(0..operand_max);

        // subtraction keeps the larger operand on the left so answers stay non-negative
        let (lhs, rhs, answer) = match operation {
            Operation::Add => (a, b, a + b),
            Operation::Subtract => (a.max(b), a.min(b), a.max(b) - a.min(b)),
        };

        Self {
            lhs,
            rhs,
            operation,
            answer,
            choices: generate_choices(answer, rng),
        }
    }

    pub fn is_choice(&self, value: u32) -> bool {
        self.choices.contains(&value)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} =", self.lhs, self.operation.symbol(), self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_pick_their_operations() {
        let mut rng = SmallRng::seed_from_u64(3);

        assert!(
            (0..20).all(|_| Problem::generate(Tier::One, 100, &mut rng).operation == Operation::Add)
        );
        assert!(
            (0..20)
                .all(|_| Problem::generate(Tier::Two, 100, &mut rng).operation == Operation::Subtract)
        );

        let mixed: alloc::vec::Vec<Operation> = (0..50)
            .map(|_| Problem::generate(Tier::Three, 100, &mut rng).operation)
            .collect();
        assert!(mixed.contains(&Operation::Add) && mixed.contains(&Operation::Subtract));
    }

    #[test]
    fn problems_are_consistent_and_non_negative() {
        let mut rng = SmallRng::seed_from_u64(11);

        for tier in Tier::ALL {
            for _ in 0..100 {
                let problem = Problem::generate(tier, 100, &mut rng);
                let expected = match problem.operation {
                    Operation::Add => problem.lhs + problem.rhs,
                    Operation::Subtract => problem.lhs - problem.rhs,
                };

                assert_eq!(problem.answer, expected);
                assert!(problem.lhs < 100 && problem.rhs < 100);
                assert!(problem.is_choice(problem.answer));
            }
        }
    }

    #[test]
    fn huge_operand_bound_is_capped() {
        let mut rng = SmallRng::seed_from_u64(23);

        assert_eq!(
            ArithmeticConfig::new(5, u32::MAX).operand_max,
            OPERAND_MAX_LIMIT
        );
        for tier in Tier::ALL {
            for _ in 0..50 {
                let problem = Problem::generate(tier, u32::MAX, &mut rng);

                assert!(problem.lhs < OPERAND_MAX_LIMIT && problem.rhs < OPERAND_MAX_LIMIT);
                if problem.operation == Operation::Add {
                    assert_eq!(problem.lhs.checked_add(problem.rhs), Some(problem.answer));
                }
                assert!(problem.is_choice(problem.answer));
            }
        }
    }

    #[test]
    fn display_reads_like_the_question() {
        let problem = Problem {
            lhs: 12,
            rhs: 5,
            operation: Operation::Subtract,
            answer: 7,
            choices: [7, 9, 2],
        };

        assert_eq!(alloc::format!("{}", problem), "12 - 5 =");
    }
}
