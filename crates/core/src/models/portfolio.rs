use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// The persisted container: every holding, in the order it was first bought.
///
/// Serializes as a bare JSON array of holdings. The whole document is
/// rewritten on every mutation; there is no versioning or diffing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Look up a holding by asset id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    /// Asset ids in stored order, as sent to the price feed.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.id.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }
}

impl From<Vec<Holding>> for Portfolio {
    fn from(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }
}
