use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{ClassifierState, LineClassifier, PrizeTier};

/// Number of fields in a rendered record.
pub const RECORD_FIELDS: usize = 6;

/// Prize tiers pulled out of one result sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeRecord {
    pub first_prize: String,
    pub consolation_prize: String,
    pub second_prizes: Vec<String>,
    pub third_prizes: Vec<String>,
    pub fourth_prizes: Vec<String>,
    pub fifth_prizes: Vec<String>,
}

impl PrizeRecord {
    fn push(&mut self, tier: PrizeTier, value: String) {
        match tier {
            PrizeTier::First => self.first_prize = value,
            PrizeTier::Consolation => self.consolation_prize = value,
            PrizeTier::Second => self.second_prizes.push(value),
            PrizeTier::Third => self.third_prizes.push(value),
            PrizeTier::Fourth => self.fourth_prizes.push(value),
            PrizeTier::Fifth => self.fifth_prizes.push(value),
        }
    }

    /// True when no line of the document matched any tier.
    pub fn is_empty(&self) -> bool {
        self.first_prize.is_empty()
            && self.consolation_prize.is_empty()
            && self.second_prizes.is_empty()
            && self.third_prizes.is_empty()
            && self.fourth_prizes.is_empty()
            && self.fifth_prizes.is_empty()
    }

    /// Flatten into the stored shape: first, consolation, then each list
    /// joined with single spaces.
    pub fn render(&self) -> [String; RECORD_FIELDS] {
        [
            self.first_prize.clone(),
            self.consolation_prize.clone(),
            self.second_prizes.join(" "),
            self.third_prizes.join(" "),
            self.fourth_prizes.join(" "),
            self.fifth_prizes.join(" "),
        ]
    }
}

pub struct PrizeAggregator;

impl PrizeAggregator {
    /// Classify every line of `text` in document order.
    pub fn extract(text: &str) -> PrizeRecord {
        let mut state = ClassifierState::default();
        let mut record = PrizeRecord::default();

        for (index, line) in text.split('\n').enumerate() {
            if let Some(classified) = LineClassifier::classify(line, &state) {
                debug!("Line {} -> {}: {:?}", index + 1, classified.tier, classified.value);
                state.observe(classified.tier);
                record.push(classified.tier, classified.value);
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
LOTTERY SAMBAD
DEAR MORNING 1PM
12A 12345
67890
11111 22222
33333 44444
1111 2222
3333 4444
5555 6666
7777 8888
9999 0000
123456789012
";

    #[test]
    fn test_render_always_has_six_fields() {
        assert_eq!(PrizeAggregator::extract("").render().len(), RECORD_FIELDS);
        assert_eq!(PrizeAggregator::extract(SHEET).render().len(), RECORD_FIELDS);
        assert_eq!(PrizeAggregator::extract("no numbers here\nat all").render().len(), RECORD_FIELDS);
    }

    #[test]
    fn test_unmatched_document_renders_empty_fields() {
        let record = PrizeAggregator::extract("header\nfooter\n");
        assert!(record.is_empty());
        assert!(record.render().iter().all(|field| field.is_empty()));
    }

    #[test]
    fn test_full_sheet() {
        let record = PrizeAggregator::extract(SHEET);
        assert_eq!(record.first_prize, "12A 12345");
        assert_eq!(record.consolation_prize, "67890");
        assert_eq!(record.second_prizes, vec!["11111 22222", "33333 44444"]);
        assert_eq!(record.third_prizes, vec!["1111 2222", "3333 4444"]);
        assert_eq!(record.fourth_prizes, vec!["5555 6666", "7777 8888"]);
        assert_eq!(record.fifth_prizes, vec!["9999  000 0", "1234 5678 9012"]);

        let rendered = record.render();
        assert_eq!(rendered[2], "11111 22222 33333 44444");
        assert_eq!(rendered[3], "1111 2222 3333 4444");
        assert_eq!(rendered[4], "5555 6666 7777 8888");
        assert_eq!(rendered[5], "9999  000 0 1234 5678 9012");
    }

    #[test]
    fn test_extract_is_idempotent() {
        assert_eq!(PrizeAggregator::extract(SHEET), PrizeAggregator::extract(SHEET));
        assert_eq!(
            PrizeAggregator::extract(SHEET).render(),
            PrizeAggregator::extract(SHEET).render()
        );
    }

    #[test]
    fn test_third_prizes_capped_in_document_order() {
        let record = PrizeAggregator::extract("1111 2222\n3333 4444\n5555 6666");
        assert_eq!(record.third_prizes, vec!["1111 2222", "3333 4444"]);
        assert_eq!(record.fourth_prizes, vec!["5555 6666"]);
    }

    #[test]
    fn test_fourth_requires_full_thirds() {
        // One third seen: the next four-digit line is another third, never a fourth.
        let record = PrizeAggregator::extract("1111 2222\n3333 4444");
        assert_eq!(record.third_prizes.len(), 2);
        assert!(record.fourth_prizes.is_empty());
    }

    #[test]
    fn test_first_and_consolation_last_wins() {
        let record = PrizeAggregator::extract("12A 12345\n54321\n34Z 99999\n11111");
        assert_eq!(record.first_prize, "34Z 99999");
        assert_eq!(record.consolation_prize, "11111");
    }

    #[test]
    fn test_mixed_example_lines() {
        let text = ["12A 12345", "67890", "11111 22222", "3333 4444", "5555 6666", "7777"].join("\n");
        let record = PrizeAggregator::extract(&text);
        assert_eq!(record.first_prize, "12A 12345");
        assert_eq!(record.consolation_prize, "67890");
        assert_eq!(record.second_prizes, vec!["11111 22222"]);
        assert_eq!(record.third_prizes, vec!["3333 4444", "5555 6666"]);
        assert!(record.fourth_prizes.is_empty());
        assert_eq!(record.fifth_prizes, vec!["7777"]);
    }

    #[test]
    fn test_crlf_lines_fall_through_to_fifth() {
        let record = PrizeAggregator::extract("1111 2222\r\n3333\r\n");
        assert!(record.third_prizes.is_empty());
        assert_eq!(record.fifth_prizes, vec!["1111  222 2", "3333"]);
    }
}
