use std::collections::BTreeMap;

use serde::Serialize;

use crate::sync::filter::ALL_FILTERS;
use crate::sync::EntityType;

#[derive(Debug, Clone, Serialize)]
pub struct AuthField {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthMethod {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<AuthField>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleFor {
    pub data_synchronization: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub authentication: Vec<AuthMethod>,
    pub sources: Vec<String>,
    pub responsible_for: ResponsibleFor,
}

pub fn app_config() -> AppConfig {
    AppConfig {
        id: "tsheets",
        name: "TSheets",
        version: env!("CARGO_PKG_VERSION"),
        description: "Integrate TSheets users and groups with Fibery",
        authentication: vec![AuthMethod {
            id: "oauth2",
            name: "OAuth v2 Authentication",
            description: "OAuth v2-based authentication and authorization for access to TSheets",
            fields: vec![AuthField {
                id: "callback_uri",
                title: "callback_uri",
                description: "OAuth post-auth redirect URI",
                kind: "oauth",
            }],
        }],
        sources: Vec::new(),
        responsible_for: ResponsibleFor {
            data_synchronization: true,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncType {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncFilter {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncConfig {
    pub types: Vec<SyncType>,
    pub filters: Vec<SyncFilter>,
}

pub fn sync_config() -> SyncConfig {
    SyncConfig {
        types: EntityType::ALL
            .iter()
            .map(|t| SyncType {
                id: t.id(),
                name: t.display_name(),
            })
            .collect(),
        filters: ALL_FILTERS
            .iter()
            .map(|f| SyncFilter {
                id: f.id,
                title: f.title,
                kind: f.kind.wire_type(),
                optional: true,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub cardinality: &'static str,
    pub name: &'static str,
    pub target_name: &'static str,
    pub target_type: &'static str,
    pub target_field_id: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<&'static str>,
    #[serde(rename = "readonly", skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

fn field(name: &'static str, kind: &'static str) -> Field {
    Field {
        name,
        kind: Some(kind),
        ..Field::default()
    }
}

fn sub_typed(name: &'static str, kind: &'static str, sub_type: &'static str) -> Field {
    Field {
        sub_type: Some(sub_type),
        ..field(name, kind)
    }
}

/// Fields shared by every synchronized type.
fn common_fields(fields: &mut BTreeMap<&'static str, Field>) {
    fields.insert("id", field("Id", "id"));
    fields.insert(
        "timeId",
        Field {
            read_only: true,
            ..field("Time ID", "text")
        },
    );
    fields.insert("active", sub_typed("Active", "text", "boolean"));
    fields.insert("__syncAction", field("Sync Action", "text"));
}

/// Schema for one entity type, keyed by item field name. Keys must match the
/// serialized fields of `UserItem` and `GroupItem`.
pub fn schema(entity: EntityType) -> BTreeMap<&'static str, Field> {
    let mut fields = BTreeMap::new();
    common_fields(&mut fields);
    match entity {
        EntityType::User => {
            fields.insert("display_name", sub_typed("Name", "text", "title"));
            fields.insert("first_name", field("First Name", "text"));
            fields.insert("last_name", field("Last Name", "text"));
            fields.insert("email", sub_typed("Email", "text", "email"));
            fields.insert("last_active", field("Last Active", "date"));
            fields.insert(
                "group_id",
                Field {
                    relation: Some(Relation {
                        cardinality: "many-to-one",
                        name: "Group",
                        target_name: "Users",
                        target_type: "group",
                        target_field_id: "id",
                    }),
                    ..field("Group ID", "text")
                },
            );
        }
        EntityType::Group => {
            fields.insert("name", sub_typed("Name", "text", "title"));
        }
    }
    fields
}

/// Schemas for the requested types. Unknown type ids are skipped.
pub fn schemas(types: &[String]) -> BTreeMap<&'static str, BTreeMap<&'static str, Field>> {
    types
        .iter()
        .filter_map(|t| EntityType::parse(t).ok())
        .map(|t| (t.id(), schema(t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Group, User};
    use crate::sync::normalize::normalize;
    use crate::sync::SyncMode;
    use serde_json::json;

    fn item_keys(item: &crate::sync::NormalizedItem) -> Vec<String> {
        serde_json::to_value(item)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_user_schema_matches_items() {
        let user: User = serde_json::from_value(json!({"id": 1, "group_id": 2})).unwrap();
        let item = normalize(vec![user], SyncMode::Delta).remove(0);
        let schema = schema(EntityType::User);
        let keys = item_keys(&item);
        assert_eq!(keys.len(), schema.len());
        for key in keys {
            assert!(schema.contains_key(key.as_str()), "{key} missing from schema");
        }
    }

    #[test]
    fn test_group_schema_matches_items() {
        let group: Group = serde_json::from_value(json!({"id": 1})).unwrap();
        let item = normalize(vec![group], SyncMode::Delta).remove(0);
        let schema = schema(EntityType::Group);
        let keys = item_keys(&item);
        assert_eq!(keys.len(), schema.len());
        for key in keys {
            assert!(schema.contains_key(key.as_str()), "{key} missing from schema");
        }
    }

    #[test]
    fn test_group_relation_targets_group_ids() {
        let value = serde_json::to_value(schema(EntityType::User)).unwrap();
        assert_eq!(value["group_id"]["relation"]["targetType"], json!("group"));
        assert_eq!(value["group_id"]["relation"]["targetFieldId"], json!("id"));
        assert_eq!(value["id"], json!({"name": "Id", "type": "id"}));
    }

    #[test]
    fn test_schemas_only_requested_types() {
        let out = schemas(&["group".to_string(), "timesheet".to_string()]);
        assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec!["group"]);
    }

    #[test]
    fn test_sync_config_lists_types_and_filters() {
        let value = serde_json::to_value(sync_config()).unwrap();
        assert_eq!(value["types"][0], json!({"id": "user", "name": "User"}));
        assert_eq!(value["types"][1], json!({"id": "group", "name": "Group"}));
        assert_eq!(value["filters"][0]["id"], json!("inactiveUsers"));
        assert_eq!(value["filters"][0]["type"], json!("bool"));
        assert_eq!(value["filters"][1]["type"], json!("datebox"));
        assert_eq!(value["filters"][1]["optional"], json!(true));
    }

    #[test]
    fn test_app_config() {
        let value = serde_json::to_value(app_config()).unwrap();
        assert_eq!(value["id"], json!("tsheets"));
        assert_eq!(value["responsibleFor"], json!({"dataSynchronization": true}));
        assert_eq!(value["authentication"][0]["id"], json!("oauth2"));
    }
}
