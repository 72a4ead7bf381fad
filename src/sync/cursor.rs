use serde::{Deserialize, Serialize};

/// Wire form of the page cursor, round-tripped by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPageConfig {
    /// `null` decodes like a missing key.
    #[serde(default, deserialize_with = "crate::provider::models::nullable")]
    pub page: u64,
}

/// 1-based provider page index.
///
/// All pagination state lives in this token; nothing is kept server-side
/// between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken(u64);

impl PageToken {
    pub const FIRST: PageToken = PageToken(1);

    /// An absent or zero cursor means the first page.
    pub fn from_cursor(cursor: Option<u64>) -> Self {
        match cursor {
            None | Some(0) => Self::FIRST,
            Some(page) => PageToken(page),
        }
    }

    pub fn page(self) -> u64 {
        self.0
    }

    /// The cursor handed back to the platform. Always `page + 1`, whether or
    /// not the provider reported more data.
    pub fn next(self) -> NextPageConfig {
        NextPageConfig {
            page: self.0.saturating_add(1),
        }
    }
}
