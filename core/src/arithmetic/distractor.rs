use alloc::collections::BTreeSet;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Answer choices shown per problem, the correct one included.
pub const CHOICE_COUNT: usize = 3;

/// Distractors start within this distance of the correct answer.
pub const DISTRACTOR_SPREAD: u32 = 10;

/// Three distinct non-negative answers, `correct` among them, in random order.
pub fn generate_choices(correct: u32, rng: &mut SmallRng) -> [u32; CHOICE_COUNT] {
    generate_choices_within(correct, DISTRACTOR_SPREAD, rng)
}

/// Like [`generate_choices`], sampling differences from `-spread..=spread` first.
///
/// When every difference in range has been tried without filling the choices the range doubles.
pub fn generate_choices_within(
    correct: u32,
    spread: u32,
    rng: &mut SmallRng,
) -> [u32; CHOICE_COUNT] {
    let mut choices = [correct; CHOICE_COUNT];
    let mut filled = 1;
    let mut used = BTreeSet::new();
    let mut spread = i64::from(spread.max(1));

    while filled < CHOICE_COUNT {
        if used.len() as i64 >= 2 * spread {
            log::warn!(
                "No room for distractors within {} of {}, widening",
                spread,
                correct
            );
            spread *= 2;
        }

        let difference = loop {
            let difference = rng.random_range(-spread..=spread);
            if difference != 0 && !used.contains(&difference) {
                break difference;
            }
        };
        used.insert(difference);

        // differences are distinct and nonzero, so accepted values never collide
        if let Ok(candidate) = u32::try_from(i64::from(correct) + difference) {
            choices[filled] = candidate;
            filled += 1;
        }
    }

    choices.shuffle(rng);
    choices
}
