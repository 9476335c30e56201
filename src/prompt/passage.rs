use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::prompt::{PromptError, PromptSource};

const PASSAGES: &[&str] = &[
    "The old lighthouse keeper climbed the winding stairs every evening, lantern in hand, to make sure the great lamp was burning. Ships passing in the dark relied on its steady beam, and he took quiet pride in knowing that, for one more night, nobody would be lost to the rocks below.",
    "Morning mist hung low over the meadow as the first birds began their chorus. Dew sparkled on every blade of grass, and a lone deer stepped carefully from the trees, paused to listen, then bent its head to drink from the narrow stream that wound through the valley.",
    "Learning to cook is a little like learning a language. At first you follow every rule exactly, measuring each spoonful with care. Over time, however, you begin to understand why the rules exist, and that is when you can finally start to improvise with confidence.",
    "The library was nearly empty on Sunday afternoons, which suited her perfectly. She chose a table by the tall window, spread out her notes, and worked until the light turned gold. Only the soft turning of pages and the distant ticking of a clock broke the silence.",
    "A good walking route does not need to be long or difficult. It only needs a few surprises along the way: a bench with a view, a bakery on the corner, a quiet park where children play. Small rewards like these keep you coming back, week after week.",
    "When the storm finally passed, the whole town stepped outside to look around. Branches littered the streets, and a few fences had fallen, but the air smelled fresh and clean. Neighbors who rarely spoke began to help each other, sweeping, lifting, and sharing hot coffee.",
    "Every great bridge begins as a simple sketch on paper. Engineers then spend months testing ideas, calculating loads, and imagining the worst weather the structure might face. By the time the first beam is placed, thousands of small decisions have already been made.",
    "The train rolled slowly through the countryside, past sleepy farms and fields of bright sunflowers. Passengers dozed, read, or simply watched the scenery drift by. Nobody seemed in a hurry, and for a few peaceful hours, the rest of the world felt very far away.",
    "Gardening teaches patience in a way that few other hobbies can. You plant a seed, water it, and wait, sometimes for weeks, before anything appears. Yet the first green shoot pushing through the soil is so rewarding that most gardeners happily start again each spring.",
    "Our team met every Monday to plan the week ahead. We listed the most important tasks, agreed on who would handle each one, and promised to ask for help early. That simple habit, repeated for a year, did more for our results than any new tool we tried.",
    "The museum had a small room that most visitors walked straight past. Inside were old maps, drawn by hand, showing coastlines that were only partly known. Looking at them, you could almost feel the curiosity and courage of the sailors who first charted those distant shores.",
    "Running in the rain feels strange at first, but after a few minutes you stop noticing the water. Your breathing settles into a rhythm, your feet find the puddles less often, and the empty streets seem to belong to you alone. It is a surprisingly calm experience.",
];

/// Built-in passages, for offline use and as an alternative to generation.
pub struct PassagePromptSource {
    rng: Mutex<SmallRng>,
}

impl PassagePromptSource {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl PromptSource for PassagePromptSource {
    fn fetch_prompt(&self) -> Result<String, PromptError> {
        let idx = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..PASSAGES.len()),
            Err(poisoned) => poisoned.into_inner().gen_range(0..PASSAGES.len()),
        };
        crate::prompt::normalize_prompt(PASSAGES[idx]).ok_or(PromptError::Empty)
    }
}
