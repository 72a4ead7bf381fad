use serde::Serialize;

use crate::provider::{Group, User};
use crate::sync::SyncMode;

/// Per-item change marker. The provider exposes no deletion signal, so the
/// only action this connector ever emits is `SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncAction {
    #[serde(rename = "SET")]
    Set,
}

impl SyncAction {
    /// Full syncs replace everything, so items carry no action; delta syncs
    /// mark every item.
    pub fn for_mode(mode: SyncMode) -> Option<Self> {
        match mode {
            SyncMode::Full => None,
            SyncMode::Delta => Some(SyncAction::Set),
        }
    }
}

/// Field names must match the `user` schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserItem {
    pub id: String,
    #[serde(rename = "timeId")]
    pub time_id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub email: String,
    pub last_active: String,
    pub group_id: String,
    #[serde(rename = "__syncAction", skip_serializing_if = "Option::is_none")]
    pub sync_action: Option<SyncAction>,
}

/// Field names must match the `group` schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub id: String,
    #[serde(rename = "timeId")]
    pub time_id: String,
    pub name: String,
    pub active: bool,
    #[serde(rename = "__syncAction", skip_serializing_if = "Option::is_none")]
    pub sync_action: Option<SyncAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NormalizedItem {
    User(UserItem),
    Group(GroupItem),
}

impl NormalizedItem {
    pub fn id(&self) -> &str {
        match self {
            NormalizedItem::User(u) => &u.id,
            NormalizedItem::Group(g) => &g.id,
        }
    }

    pub fn sync_action(&self) -> Option<SyncAction> {
        match self {
            NormalizedItem::User(u) => u.sync_action,
            NormalizedItem::Group(g) => g.sync_action,
        }
    }
}

/// A provider record that maps onto a platform item.
pub trait Normalize {
    fn normalize(self, action: Option<SyncAction>) -> NormalizedItem;
}

impl Normalize for User {
    fn normalize(self, action: Option<SyncAction>) -> NormalizedItem {
        let id = self.id.to_string();
        NormalizedItem::User(UserItem {
            time_id: id.clone(),
            id,
            display_name: self.display_name,
            first_name: self.first_name,
            last_name: self.last_name,
            active: self.active,
            email: self.email,
            last_active: self.last_active,
            group_id: self.group_id.map(|g| g.to_string()).unwrap_or_default(),
            sync_action: action,
        })
    }
}

impl Normalize for Group {
    fn normalize(self, action: Option<SyncAction>) -> NormalizedItem {
        let id = self.id.to_string();
        NormalizedItem::Group(GroupItem {
            time_id: id.clone(),
            id,
            name: self.name,
            active: self.active,
            sync_action: action,
        })
    }
}

/// Map provider records to platform items for the given sync mode.
pub fn normalize<R: Normalize>(records: Vec<R>, mode: SyncMode) -> Vec<NormalizedItem> {
    let action = SyncAction::for_mode(mode);
    records.into_iter().map(|r| r.normalize(action)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: serde_json::Value) -> User {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_delta_user_ids_become_strings() {
        let items = normalize(
            vec![user(json!({"id": 123, "display_name": "A", "active": true, "group_id": 55}))],
            SyncMode::Delta,
        );
        let value = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(value["id"], json!("123"));
        assert_eq!(value["timeId"], json!("123"));
        assert_eq!(value["display_name"], json!("A"));
        assert_eq!(value["active"], json!(true));
        assert_eq!(value["group_id"], json!("55"));
        assert_eq!(value["__syncAction"], json!("SET"));
    }

    #[test]
    fn test_full_mode_omits_sync_action() {
        let items = normalize(
            vec![user(json!({"id": 1})), user(json!({"id": 2}))],
            SyncMode::Full,
        );
        for item in &items {
            assert_eq!(item.sync_action(), None);
            let value = serde_json::to_value(item).unwrap();
            assert!(value.get("__syncAction").is_none());
        }
    }

    #[test]
    fn test_missing_group_id_is_empty() {
        let items = normalize(vec![user(json!({"id": 1}))], SyncMode::Full);
        match &items[0] {
            NormalizedItem::User(u) => assert_eq!(u.group_id, ""),
            other => panic!("expected a user, got {other:?}"),
        }
    }

    #[test]
    fn test_group_normalized() {
        let group: Group = serde_json::from_value(json!({"id": "77", "name": "Crew", "active": true})).unwrap();
        let items = normalize(vec![group], SyncMode::Delta);
        assert_eq!(
            items[0],
            NormalizedItem::Group(GroupItem {
                id: "77".into(),
                time_id: "77".into(),
                name: "Crew".into(),
                active: true,
                sync_action: Some(SyncAction::Set),
            })
        );
        assert_eq!(items[0].id(), "77");
    }

    #[test]
    fn test_empty_page() {
        assert!(normalize(Vec::<Group>::new(), SyncMode::Delta).is_empty());
    }
}
