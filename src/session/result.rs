use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters per word for the WPM convention.
const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub wpm: u32,
    pub cpm: u32,
    /// Percent of typed characters that matched, kept to two decimals.
    pub accuracy: f64,
    pub duration_secs: u32,
    pub correct_chars: usize,
    pub typed_chars: usize,
    pub finished_at: DateTime<Utc>,
}

impl TestResult {
    pub fn compute(prompt: &[char], input: &[char], duration_secs: u32) -> Self {
        let typed_prefix = &prompt[..input.len().min(prompt.len())];
        let correct_chars = input
            .iter()
            .zip(typed_prefix)
            .filter(|(typed, expected)| typed == expected)
            .count();

        let accuracy = if input.is_empty() {
            0.0
        } else {
            round_to(correct_chars as f64 / input.len() as f64 * 100.0, 2)
        };

        let cpm = if duration_secs == 0 {
            0.0
        } else {
            correct_chars as f64 * 60.0 / duration_secs as f64
        };
        let wpm = cpm / CHARS_PER_WORD;

        Self {
            wpm: wpm.round() as u32,
            cpm: cpm.round() as u32,
            accuracy,
            duration_secs,
            correct_chars,
            typed_chars: input.len(),
            finished_at: Utc::now(),
        }
    }

    /// Accuracy as the score store records it: a whole percent.
    pub fn submitted_accuracy(&self) -> u32 {
        self.accuracy.round() as u32
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
