//! Strength estimation for the current password.
//!
//! The scorers themselves are swappable behind [`ComplexityScorer`]; the
//! indicator thresholds and the crack-time estimate live here too since
//! every roll needs all three.

use serde::{Deserialize, Serialize};

/// Complexity above which a password may count as valid
const MIN_COMPLEXITY: f64 = 49.0;
/// Complexity mapped to a full bar
const MAX_COMPLEXITY: f64 = 120.0;

/// Unicode blocks a password character may fall into. Each block present
/// adds its full size to the guessing alphabet.
const RANGES: &[(u32, u32)] = &[
    (0x0020, 0x0020), // space
    (0x0030, 0x0039), // digits
    (0x0041, 0x005A), // uppercase
    (0x0061, 0x007A), // lowercase
    (0x0021, 0x002F), // punctuation
    (0x003A, 0x0040),
    (0x005B, 0x0060),
    (0x007B, 0x007E),
    (0x0080, 0x00FF), // Latin-1 supplement
    (0x0100, 0x017F), // Latin extended-A
    (0x0180, 0x024F), // Latin extended-B
    (0x0250, 0x02AF), // IPA extensions
    (0x02B0, 0x02FF), // spacing modifiers
    (0x0300, 0x036F), // combining diacritics
    (0x0370, 0x03FF), // Greek
    (0x0400, 0x04FF), // Cyrillic
    (0x0530, 0x058F), // Armenian
    (0x0590, 0x05FF), // Hebrew
    (0x0600, 0x06FF), // Arabic
    (0x2000, 0x206F), // general punctuation
    (0x20A0, 0x20CF), // currency symbols
    (0x2100, 0x214F), // letterlike symbols
    (0x2190, 0x21FF), // arrows
    (0x2200, 0x22FF), // mathematical operators
    (0x3040, 0x309F), // Hiragana
    (0x30A0, 0x30FF), // Katakana
    (0x4E00, 0x9FFF), // CJK unified ideographs
];

/// Size of the alphabet an attacker has to cover for `password`.
pub fn alphabet_size(password: &str) -> u32 {
    RANGES
        .iter()
        .filter(|(lo, hi)| password.chars().any(|c| (*lo..=*hi).contains(&(c as u32))))
        .map(|(lo, hi)| hi - lo + 1)
        .sum()
}

/// What a scorer reports back for one password.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complexity {
    pub valid: bool,
    /// 0..=100
    pub percent: f64,
}

/// External estimator of crack resistance.
pub trait ComplexityScorer {
    fn score(&self, password: &str) -> Complexity;
}

/// Alphabet-size based scorer, the default meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complexify {
    pub minimum_chars: usize,
    pub strength_scale_factor: f64,
}

impl Default for Complexify {
    fn default() -> Self {
        Self {
            minimum_chars: 8,
            strength_scale_factor: 1.0,
        }
    }
}

impl ComplexityScorer for Complexify {
    fn score(&self, password: &str) -> Complexity {
        let length = password.chars().count();
        let size = alphabet_size(password);

        // ln(size^length), without overflowing
        let complexity = if size == 0 {
            0.0
        } else {
            length as f64 * f64::from(size).ln() / self.strength_scale_factor
        };

        Complexity {
            valid: complexity > MIN_COMPLEXITY && length >= self.minimum_chars,
            percent: (complexity / MAX_COMPLEXITY * 100.0).min(100.0),
        }
    }
}

/// Pattern-matching scorer backed by zxcvbn.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZxcvbnScorer;

impl ZxcvbnScorer {
    /// 10^20 guesses fill the bar
    const FULL_BAR_LOG10: f64 = 20.0;
    /// Lower bound of zxcvbn score 3
    const VALID_LOG10: f64 = 8.0;
}

impl ComplexityScorer for ZxcvbnScorer {
    fn score(&self, password: &str) -> Complexity {
        if password.is_empty() {
            return Complexity {
                valid: false,
                percent: 0.0,
            };
        }
        let guesses_log10 = zxcvbn::zxcvbn(password, &[]).guesses_log10();
        Complexity {
            valid: guesses_log10 >= Self::VALID_LOG10,
            percent: (guesses_log10 / Self::FULL_BAR_LOG10 * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Which scorer drives the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    #[default]
    Complexify,
    Zxcvbn,
}

impl ScorerKind {
    pub fn build(self, minimum_chars: usize, strength_scale_factor: f64) -> Box<dyn ComplexityScorer> {
        match self {
            ScorerKind::Complexify => Box::new(Complexify {
                minimum_chars,
                strength_scale_factor,
            }),
            ScorerKind::Zxcvbn => Box::new(ZxcvbnScorer),
        }
    }
}

/// Visual style of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorClass {
    #[default]
    Invalid,
    Middle,
    Valid,
}

/// Progress bar state after a roll.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Indicator {
    pub class: IndicatorClass,
    /// Bar width in percent, unrounded
    pub width: f64,
    /// e.g. "42%"
    pub label: String,
}

impl Indicator {
    pub fn from_complexity(complexity: Complexity) -> Self {
        let rounded = complexity.percent.round();
        let class = if !complexity.valid {
            IndicatorClass::Invalid
        } else if (40.0..=65.0).contains(&rounded) {
            IndicatorClass::Middle
        } else {
            IndicatorClass::Valid
        };
        Self {
            class,
            width: complexity.percent,
            label: format!("{rounded}%"),
        }
    }
}

/// Brute-force time for the whole alphabet on a number of cracking nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTimeEstimate {
    pub seconds: f64,
}

impl CrackTimeEstimate {
    pub fn new(password: &str, nodes: u32, guesses_per_node: f64) -> Self {
        let length = password.chars().count() as i32;
        let combinations = f64::from(alphabet_size(password)).powi(length);
        let rate = f64::from(nodes.max(1)) * guesses_per_node.max(1.0);
        Self {
            seconds: combinations / rate,
        }
    }

    /// Human friendly duration, e.g. "3 days"
    pub fn describe(&self) -> String {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = 60.0 * MINUTE;
        const DAY: f64 = 24.0 * HOUR;
        const YEAR: f64 = 365.25 * DAY;

        let s = self.seconds;
        let (amount, unit) = if s < 1.0 {
            return "instantly".to_owned();
        } else if s < MINUTE {
            (s, "second")
        } else if s < HOUR {
            (s / MINUTE, "minute")
        } else if s < DAY {
            (s / HOUR, "hour")
        } else if s < YEAR {
            (s / DAY, "day")
        } else if s < 100.0 * YEAR {
            (s / YEAR, "year")
        } else {
            return "centuries".to_owned();
        };

        let amount = amount.floor() as u64;
        if amount == 1 {
            format!("1 {unit}")
        } else {
            format!("{amount} {unit}s")
        }
    }
}
