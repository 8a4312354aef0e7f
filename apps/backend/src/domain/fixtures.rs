use super::cards::Card;

/// Centralized helper for parsing hardcoded card tokens in fixtures and demo data.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse one hardcoded `color:value` token (e.g. `"red:5"`, `"wild:wild"`).
    ///
    /// Only for literals known to be valid; panics on a malformed token.
    pub fn one(token: &str) -> Card {
        #[allow(clippy::expect_used)]
        token.parse::<Card>().expect("hardcoded valid card token")
    }
}
