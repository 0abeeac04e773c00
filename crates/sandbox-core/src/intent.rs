//! Keyword intent classifier for the site assistant.
//!
//! A linear containment scan: intents are tried in a fixed order and the
//! first one with any keyword inside the (lower-cased) message wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Services,
    Estimate,
    Timeline,
    Technology,
    Contact,
    Pricing,
    Projects,
    Veteran,
    General,
}

/// Scan order matters: "military construction" hits `Services`
/// before `Veteran`.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["hello", "hi", "hey", "good morning", "good afternoon", "greetings"],
    ),
    (
        Intent::Services,
        &["services", "what do you do", "construction", "build", "residential", "commercial"],
    ),
    (
        Intent::Estimate,
        &["estimate", "cost", "price", "quote", "how much", "budget"],
    ),
    (
        Intent::Timeline,
        &["timeline", "how long", "duration", "schedule", "when"],
    ),
    (
        Intent::Technology,
        &["technology", "ai", "sandbox", "3d", "virtual", "innovation"],
    ),
    (
        Intent::Contact,
        &["contact", "phone", "call", "speak", "consultation", "meeting"],
    ),
    (
        Intent::Pricing,
        &["pricing", "rates", "fees", "expensive", "affordable"],
    ),
    (
        Intent::Projects,
        &["projects", "portfolio", "examples", "work", "completed"],
    ),
    (Intent::Veteran, &["veteran", "military", "army", "service"]),
];

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Services => "services",
            Intent::Estimate => "estimate",
            Intent::Timeline => "timeline",
            Intent::Technology => "technology",
            Intent::Contact => "contact",
            Intent::Pricing => "pricing",
            Intent::Projects => "projects",
            Intent::Veteran => "veteran",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a user message. Never fails; unmatched text is `General`.
pub fn classify(message: &str) -> Intent {
    let message = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| message.contains(w)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

/// Every intent with a matching keyword, in scan order.
pub fn matching_intents(message: &str) -> SmallVec<[Intent; 4]> {
    let message = message.to_lowercase();
    KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| message.contains(w)))
        .map(|(intent, _)| *intent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_intent_wins() {
        assert_eq!(classify("How much would a kitchen cost?"), Intent::Estimate);
        assert_eq!(classify("Tell me about your PORTFOLIO"), Intent::Projects);
        assert_eq!(classify("openings for military veterans"), Intent::Veteran);
    }

    #[test]
    fn substring_matching_is_naive() {
        // "which" contains "hi"
        assert_eq!(classify("which one"), Intent::Greeting);
    }

    #[test]
    fn unmatched_is_general() {
        assert_eq!(classify("xyz"), Intent::General);
        assert_eq!(classify(""), Intent::General);
    }

    #[test]
    fn matching_intents_lists_all_hits() {
        let hits = matching_intents("quote for a 3d sandbox");
        assert_eq!(hits.as_slice(), &[Intent::Estimate, Intent::Technology]);
    }
}
