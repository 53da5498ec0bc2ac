use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::fact::Factor;
use crate::quiz::QuizQuestion;

pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
// How far the "close guess" distractors may land from the product
const MAX_OFFSET: u32 = 5;

/// The three first guesses, in this order:
/// a bit too high, a bit too low (never below 1), and one factor off by one.
fn seed_distractors(a: Factor, b: Factor, up: u32, down: u32) -> [u32; 3] {
    let correct = a.get() * b.get();
    [
        correct + up,
        correct.saturating_sub(down).max(1),
        (a.get() + 1) * b.get(),
    ]
}

/// Keeps candidates in order, skipping the product and repeats, then backfills
/// with correct+1, correct-1, correct+2, ... until there are enough.
/// `correct + k` grows without bound, so this always finishes.
fn pick_distractors(correct: u32, seeds: [u32; 3]) -> Vec<u32> {
    let backfill = (1u32..)
        .flat_map(|k| [Some(correct + k), correct.checked_sub(k).filter(|v| *v >= 1)])
        .flatten();

    let mut picked = Vec::with_capacity(OPTION_COUNT);
    for candidate in seeds.into_iter().chain(backfill) {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        if candidate == correct || picked.contains(&candidate) {
            continue;
        }
        picked.push(candidate);
    }
    picked
}

pub fn generate_quiz_question<R: Rng + ?Sized>(rng: &mut R) -> QuizQuestion {
    let a = Factor::random(rng);
    let b = Factor::random(rng);
    let correct = a.get() * b.get();

    let up = rng.gen_range(1..=MAX_OFFSET);
    let down = rng.gen_range(1..=MAX_OFFSET);
    let mut options = pick_distractors(correct, seed_distractors(a, b, up, down));

    // We shuffle the options so the correct one isn't always the last one
    options.push(correct);
    options.shuffle(rng);

    debug!("Generated question {} × {} with options {:?}", a, b, options);

    QuizQuestion {
        a,
        b,
        options,
        correct_answer: correct,
    }
}
