use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_PRIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}[A-Z] [0-9]{5}$").unwrap());

static SINGLE_FIVE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

static FIVE_DIGIT_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{5}\s+)+[0-9]{5}$").unwrap());

static FOUR_DIGIT_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{4}\s+)+[0-9]{4}$").unwrap());

static LOOSE_FOUR_DIGIT_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{4}\s*)*$").unwrap());

/// Entries allowed in the third and fourth tiers.
pub const TIER_CAP: usize = 2;

/// Prize tier a line can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrizeTier {
    First,
    Consolation,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl std::fmt::Display for PrizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeTier::First => write!(f, "First"),
            PrizeTier::Consolation => write!(f, "Consolation"),
            PrizeTier::Second => write!(f, "Second"),
            PrizeTier::Third => write!(f, "Third"),
            PrizeTier::Fourth => write!(f, "Fourth"),
            PrizeTier::Fifth => write!(f, "Fifth"),
        }
    }
}

/// Counts carried between lines of one document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierState {
    pub third_count: usize,
    pub fourth_count: usize,
}

impl ClassifierState {
    /// Record that a line landed in `tier`.
    pub fn observe(&mut self, tier: PrizeTier) {
        match tier {
            PrizeTier::Third => self.third_count += 1,
            PrizeTier::Fourth => self.fourth_count += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tier: PrizeTier,
    pub value: String,
}

pub struct LineClassifier;

impl LineClassifier {
    /// Classify one line against the current document state.
    ///
    /// Rules are tried in priority order and the first match wins:
    /// 1. First prize: `NNL NNNNN`
    /// 2. Consolation: a single 5-digit number
    /// 3. Second: two or more 5-digit numbers
    /// 4. Third: two or more 4-digit numbers, while fewer than two thirds exist
    /// 5. Fourth: same shape, once thirds are full and while fewer than two fourths exist
    /// 6. Fifth: loose 4-digit groups with at least one digit, re-chunked by character
    pub fn classify(line: &str, state: &ClassifierState) -> Option<Classification> {
        let tier = if FIRST_PRIZE.is_match(line) {
            PrizeTier::First
        } else if SINGLE_FIVE_DIGIT.is_match(line) {
            PrizeTier::Consolation
        } else if FIVE_DIGIT_GROUPS.is_match(line) {
            PrizeTier::Second
        } else if FOUR_DIGIT_GROUPS.is_match(line) && state.third_count < TIER_CAP {
            PrizeTier::Third
        } else if FOUR_DIGIT_GROUPS.is_match(line)
            && state.third_count >= TIER_CAP
            && state.fourth_count < TIER_CAP
        {
            PrizeTier::Fourth
        } else if Self::is_fifth_shape(line) && state.fourth_count <= TIER_CAP {
            // The fourth-count gate never fails while fourths are capped at two.
            return Some(Classification {
                tier: PrizeTier::Fifth,
                value: rechunk(line),
            });
        } else {
            return None;
        };

        Some(Classification {
            tier,
            value: line.to_string(),
        })
    }

    fn is_fifth_shape(line: &str) -> bool {
        line.bytes().any(|b| b.is_ascii_digit()) && LOOSE_FOUR_DIGIT_GROUPS.is_match(line)
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Split a raw line into windows of at most four characters and join them
/// with single spaces. Existing whitespace counts as characters; line
/// terminators end a window and are dropped.
pub fn rechunk(line: &str) -> String {
    if line.trim().is_empty() {
        return String::new();
    }

    line.split(is_line_terminator)
        .flat_map(|segment| {
            let chars: Vec<char> = segment.chars().collect();
            chars
                .chunks(4)
                .map(|window| window.iter().collect::<String>())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_of(line: &str, state: &ClassifierState) -> Option<PrizeTier> {
        LineClassifier::classify(line, state).map(|c| c.tier)
    }

    #[test]
    fn test_first_prize_shape() {
        let state = ClassifierState::default();
        assert_eq!(tier_of("12A 12345", &state), Some(PrizeTier::First));
        assert_eq!(tier_of("12a 12345", &state), None);
        assert_eq!(tier_of(" 12A 12345", &state), None);
        assert_eq!(tier_of("12A  12345", &state), None);
    }

    #[test]
    fn test_consolation_and_second() {
        let state = ClassifierState::default();
        assert_eq!(tier_of("67890", &state), Some(PrizeTier::Consolation));
        assert_eq!(tier_of("11111 22222", &state), Some(PrizeTier::Second));
        assert_eq!(tier_of("11111\t22222   33333", &state), Some(PrizeTier::Second));
        assert_eq!(tier_of("11111 2222", &state), None);
    }

    #[test]
    fn test_third_then_fourth_gating() {
        let mut state = ClassifierState::default();
        assert_eq!(tier_of("3333 4444", &state), Some(PrizeTier::Third));

        state.third_count = 1;
        assert_eq!(tier_of("3333 4444", &state), Some(PrizeTier::Third));

        state.third_count = 2;
        assert_eq!(tier_of("3333 4444", &state), Some(PrizeTier::Fourth));

        state.fourth_count = 2;
        // Both capped: the line still has the loose fifth shape.
        let classified = LineClassifier::classify("3333 4444", &state).unwrap();
        assert_eq!(classified.tier, PrizeTier::Fifth);
        assert_eq!(classified.value, "3333  444 4");
    }

    #[test]
    fn test_single_four_digit_group_is_fifth() {
        let state = ClassifierState::default();
        let classified = LineClassifier::classify("7777", &state).unwrap();
        assert_eq!(classified.tier, PrizeTier::Fifth);
        assert_eq!(classified.value, "7777");
    }

    #[test]
    fn test_fifth_rechunks_run_of_digits() {
        let state = ClassifierState::default();
        let classified = LineClassifier::classify("123456789012", &state).unwrap();
        assert_eq!(classified.tier, PrizeTier::Fifth);
        assert_eq!(classified.value, "1234 5678 9012");
    }

    #[test]
    fn test_trailing_carriage_return_falls_to_fifth() {
        let state = ClassifierState::default();
        let classified = LineClassifier::classify("3333 4444\r", &state).unwrap();
        assert_eq!(classified.tier, PrizeTier::Fifth);
        assert_eq!(classified.value, "3333  444 4");
    }

    #[test]
    fn test_unmatched_lines() {
        let state = ClassifierState::default();
        assert_eq!(tier_of("", &state), None);
        assert_eq!(tier_of("   ", &state), None);
        assert_eq!(tier_of("Lottery Sambad", &state), None);
        assert_eq!(tier_of("123", &state), None);
        assert_eq!(tier_of("1234 567", &state), None);
    }

    #[test]
    fn test_rechunk_is_character_level() {
        assert_eq!(rechunk("12 3456 78"), "12 3 456  78");
        assert_eq!(rechunk(""), "");
        assert_eq!(rechunk("  \t "), "");
        assert_eq!(rechunk("12\r34"), "12 34");
    }

    #[test]
    fn test_observe_counts_only_capped_tiers() {
        let mut state = ClassifierState::default();
        state.observe(PrizeTier::Second);
        state.observe(PrizeTier::Third);
        state.observe(PrizeTier::Fourth);
        state.observe(PrizeTier::Fifth);
        assert_eq!(state, ClassifierState { third_count: 1, fourth_count: 1 });
    }
}
