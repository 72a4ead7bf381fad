pub mod cursor;
pub mod filter;
pub mod mode;
pub mod normalize;
pub mod orchestrator;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use cursor::{NextPageConfig, PageToken};
pub use mode::{ModeSelection, SyncMode};
pub use normalize::{GroupItem, NormalizedItem, SyncAction, UserItem};

/// Entity types this connector can synchronize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    User,
    Group,
}

impl EntityType {
    pub const ALL: [EntityType; 2] = [EntityType::User, EntityType::Group];

    /// Resolve the platform's `requestedType` string.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(EntityType::User),
            "group" => Ok(EntityType::Group),
            other => Err(Error::UnknownType(format!("{other:?}"))),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Group => "group",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntityType::User => "User",
            EntityType::Group => "Group",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The account block the platform attaches to every sync call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPagination {
    #[serde(default)]
    pub next_page_config: Option<NextPageConfig>,
}

/// Body of `POST /api/v1/synchronizer/data`.
///
/// Other fields the platform sends (`types`, `schema`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub requested_type: String,
    #[serde(default)]
    pub filter: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub account: Account,
    #[serde(default)]
    pub last_synchronized_at: Option<String>,
    #[serde(default)]
    pub pagination: Option<RequestPagination>,
}

impl SyncRequest {
    /// Page index the platform asked for, if any.
    pub fn page_cursor(&self) -> Option<u64> {
        self.pagination
            .as_ref()
            .and_then(|p| p.next_page_config.as_ref())
            .map(|c| c.page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub has_next: bool,
    pub next_page_config: NextPageConfig,
}

/// Envelope returned for one sync call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub items: Vec<NormalizedItem>,
    pub pagination: Pagination,
    pub synchronization_type: SyncMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_entity_types() {
        assert_eq!(EntityType::parse("user").unwrap(), EntityType::User);
        assert_eq!(EntityType::parse("group").unwrap(), EntityType::Group);
        assert!(matches!(EntityType::parse("timesheet"), Err(Error::UnknownType(_))));
        assert!(EntityType::parse("User").is_err());
    }

    #[test]
    fn test_decode_platform_request() {
        let req: SyncRequest = serde_json::from_value(json!({
            "requestedType": "user",
            "types": ["user", "group"],
            "filter": {"inactiveUsers": true},
            "account": {"access_token": "tok", "name": "ann@example.com"},
            "lastSynchronizedAt": "2024-05-01T12:00:00Z",
            "pagination": {"hasNext": true, "nextPageConfig": {"page": 4}},
            "schema": {"user": {}}
        }))
        .unwrap();

        assert_eq!(req.requested_type, "user");
        assert_eq!(req.account.access_token, "tok");
        assert_eq!(req.last_synchronized_at.as_deref(), Some("2024-05-01T12:00:00Z"));
        assert_eq!(req.page_cursor(), Some(4));
        assert_eq!(req.filter.unwrap()["inactiveUsers"], json!(true));
    }

    #[test]
    fn test_decode_first_request() {
        let req: SyncRequest = serde_json::from_value(json!({
            "requestedType": "group",
            "pagination": null,
            "filter": null
        }))
        .unwrap();
        assert_eq!(req.page_cursor(), None);
        assert!(req.filter.is_none());
        assert!(req.last_synchronized_at.is_none());
    }

    #[test]
    fn test_decode_null_page() {
        let req: SyncRequest = serde_json::from_value(json!({
            "requestedType": "user",
            "pagination": {"nextPageConfig": {"page": null}}
        }))
        .unwrap();
        assert_eq!(req.page_cursor(), Some(0));
    }

    #[test]
    fn test_decode_page_beyond_u32() {
        let req: SyncRequest = serde_json::from_value(json!({
            "requestedType": "user",
            "pagination": {"nextPageConfig": {"page": 5_000_000_000u64}}
        }))
        .unwrap();
        assert_eq!(req.page_cursor(), Some(5_000_000_000));
    }

    #[test]
    fn test_response_wire_shape() {
        let resp = SyncResponse {
            items: vec![],
            pagination: Pagination {
                has_next: false,
                next_page_config: NextPageConfig { page: 2 },
            },
            synchronization_type: SyncMode::Full,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "items": [],
                "pagination": {"hasNext": false, "nextPageConfig": {"page": 2}},
                "synchronizationType": "full"
            })
        );
    }
}
