use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::provider::Active;
use crate::sync::EntityType;

pub const INACTIVE_USERS: &str = "inactiveUsers";
pub const TIMESHEET_START: &str = "timesheetStart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Bool,
    /// RFC3339 date string.
    DateBox,
}

impl FilterKind {
    /// Name used in the synchronizer config descriptor.
    pub fn wire_type(&self) -> &'static str {
        match self {
            FilterKind::Bool => "bool",
            FilterKind::DateBox => "datebox",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: FilterKind,
}

const INACTIVE_USERS_DEF: FilterDef = FilterDef {
    id: INACTIVE_USERS,
    title: "Include inactive users?",
    kind: FilterKind::Bool,
};

const TIMESHEET_START_DEF: FilterDef = FilterDef {
    id: TIMESHEET_START,
    title: "Starting date of timesheet sync after Jan 1, 2020. Jan 1, 2020 will be used if selection is earlier or empty.",
    kind: FilterKind::DateBox,
};

const USER_FILTERS: &[FilterDef] = &[INACTIVE_USERS_DEF, TIMESHEET_START_DEF];
const GROUP_FILTERS: &[FilterDef] = &[TIMESHEET_START_DEF];

/// Every filter the connector advertises, in descriptor order.
pub const ALL_FILTERS: &[FilterDef] = &[INACTIVE_USERS_DEF, TIMESHEET_START_DEF];

/// Filters declared for an entity type.
pub fn schema(entity: EntityType) -> &'static [FilterDef] {
    match entity {
        EntityType::User => USER_FILTERS,
        EntityType::Group => GROUP_FILTERS,
    }
}

/// A type-checked filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Date(DateTime<FixedOffset>),
}

/// Check one raw value against its declared kind. `null` counts as absent.
fn check(def: &FilterDef, raw: &Value) -> Result<Option<FilterValue>> {
    match (def.kind, raw) {
        (_, Value::Null) => Ok(None),
        (FilterKind::Bool, Value::Bool(b)) => Ok(Some(FilterValue::Bool(*b))),
        (FilterKind::DateBox, Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|d| Some(FilterValue::Date(d)))
            .map_err(|e| {
                Error::Validation(format!("filter {:?}: unable to parse date {s:?}: {e}", def.id))
            }),
        (kind, other) => Err(Error::Validation(format!(
            "filter {:?} expects a {} value, got {}",
            def.id,
            kind.wire_type(),
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type-check `filters` against a set of definitions, returning the values
/// that are present. Unknown keys are skipped.
fn check_all(
    defs: &[FilterDef],
    filters: &Map<String, Value>,
) -> Result<Vec<(&'static str, FilterValue)>> {
    let mut values = Vec::new();
    for def in defs {
        if let Some(raw) = filters.get(def.id) {
            if let Some(value) = check(def, raw)? {
                values.push((def.id, value));
            }
        }
    }
    Ok(values)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub active: Option<Active>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter;

/// Provider-side filter for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFilter {
    User(UserFilter),
    Group(GroupFilter),
}

/// Translate platform filters for `entity` into its provider filter.
///
/// `inactiveUsers`: `true` asks for active and inactive users (`both`),
/// `false` for active only (`yes`); absent sends nothing.
pub fn translate(entity: EntityType, filters: Option<&Map<String, Value>>) -> Result<ProviderFilter> {
    let empty = Map::new();
    let values = check_all(schema(entity), filters.unwrap_or(&empty))?;

    Ok(match entity {
        EntityType::User => {
            let mut filter = UserFilter::default();
            for (id, value) in values {
                if let (INACTIVE_USERS, FilterValue::Bool(include)) = (id, value) {
                    filter.active = Some(if include { Active::Both } else { Active::Only });
                }
            }
            ProviderFilter::User(filter)
        }
        EntityType::Group => ProviderFilter::Group(GroupFilter),
    })
}

/// Pre-validate filters for the given types without translating them.
///
/// An empty `types` list checks against every advertised filter.
pub fn validate(types: &[EntityType], filters: &Map<String, Value>) -> Result<()> {
    if types.is_empty() {
        check_all(ALL_FILTERS, filters)?;
        return Ok(());
    }
    for entity in types {
        check_all(schema(*entity), filters)?;
    }
    Ok(())
}
