use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{de, Deserialize, Deserializer};

/// A provider-assigned identifier.
///
/// TSheets sends ids as JSON numbers, but some payloads quote them. Both forms
/// decode here and keep the exact text of the number, however wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => Ok(ProviderId(n.to_string())),
            serde_json::Value::String(s) => Ok(ProviderId(s)),
            other => Err(de::Error::custom(format!(
                "expected a number or string id, got {other}"
            ))),
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A provider collection the client knows how to fetch.
pub trait Resource: DeserializeOwned {
    /// Path segment appended to the provider base URL.
    const PATH: &'static str;
    /// Key under `results` that holds the id-keyed records.
    const RESULTS_KEY: &'static str;
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: ProviderId,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub active: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub last_active: String,
    #[serde(default)]
    pub group_id: Option<ProviderId>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

impl Resource for User {
    const PATH: &'static str = "users";
    const RESULTS_KEY: &'static str = "users";
}

/// The user that owns the access token. Same record shape as [`User`], served
/// from its own endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CurrentUser(pub User);

impl Resource for CurrentUser {
    const PATH: &'static str = "current_user";
    const RESULTS_KEY: &'static str = "users";
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: ProviderId,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub active: bool,
}

impl Resource for Group {
    const PATH: &'static str = "groups";
    const RESULTS_KEY: &'static str = "groups";
}

/// One page of provider records.
///
/// Records come out of an id-keyed JSON object, so their order follows the
/// map's iteration order and carries no meaning.
#[derive(Debug, Clone)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub more: bool,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    results: HashMap<String, serde_json::Value>,
    #[serde(default)]
    more: bool,
}

/// Decode a `{ "results": { "<key>": { "<id>": {...} } }, "more": bool }` body.
pub(crate) fn decode_page<R: Resource>(body: &[u8]) -> serde_json::Result<Page<R>> {
    let mut envelope: Envelope = serde_json::from_slice(body)?;
    let records: HashMap<String, R> = match envelope.results.remove(R::RESULTS_KEY) {
        // An empty result set may arrive as `[]` instead of `{}`.
        None | Some(serde_json::Value::Null) => HashMap::new(),
        Some(serde_json::Value::Array(a)) if a.is_empty() => HashMap::new(),
        Some(value) => serde_json::from_value(value)?,
    };

    Ok(Page {
        items: records.into_values().collect(),
        more: envelope.more,
    })
}
