use rand::Rng;
use rand::seq::SliceRandom;

pub const REFLECTION_PROMPTS: [&str; 5] = [
    "What was the clearest cue that helped today? (e.g., elbow position, breathing rhythm)",
    "How did your mindset feel before and after the session?",
    "What minor adjustment made the biggest difference?",
    "Did any shot surprise you? Break down what happened.",
    "What is one thing you want to focus on next time?",
];

pub const PROMPTS_PER_SESSION: usize = 3;

/// Up to `count` distinct prompts in random order.
pub fn pick_prompts<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    let mut prompts = REFLECTION_PROMPTS.to_vec();
    prompts.shuffle(rng);
    prompts.truncate(count);
    prompts
}
