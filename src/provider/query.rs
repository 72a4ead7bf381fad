/// Query parameters are built by hand per request type so the exact wire
/// contract is visible here.
pub type QueryParams = Vec<(&'static str, String)>;

/// Value of the provider's `active` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    /// Active records only (`yes`).
    Only,
    /// Active and inactive records (`both`).
    Both,
}

impl Active {
    pub fn as_str(&self) -> &'static str {
        match self {
            Active::Only => "yes",
            Active::Both => "both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// `None` leaves the provider default (active only).
    pub active: Option<Active>,
    pub page: u64,
    /// Provider-formatted timestamp; `None` for a full sync.
    pub modified_since: Option<String>,
}

impl UserQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut query = Vec::with_capacity(4);
        if let Some(active) = self.active {
            query.push(("active", active.as_str().to_string()));
        }
        push_paging(&mut query, self.page, self.modified_since.as_deref());
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    pub page: u64,
    pub modified_since: Option<String>,
}

impl GroupQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut query = Vec::with_capacity(3);
        push_paging(&mut query, self.page, self.modified_since.as_deref());
        query
    }
}

fn push_paging(query: &mut QueryParams, page: u64, modified_since: Option<&str>) {
    query.push(("page", page.to_string()));
    query.push(("supplemental_data", "no".to_string()));
    if let Some(since) = modified_since.filter(|s| !s.is_empty()) {
        query.push(("modified_since", since.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(query: &'a QueryParams, key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_user_query_full_sync() {
        let query = UserQuery {
            active: None,
            page: 1,
            modified_since: None,
        }
        .to_query();
        assert_eq!(get(&query, "active"), None);
        assert_eq!(get(&query, "page"), Some("1"));
        assert_eq!(get(&query, "supplemental_data"), Some("no"));
        assert_eq!(get(&query, "modified_since"), None);
    }

    #[test]
    fn test_user_query_with_filters() {
        let query = UserQuery {
            active: Some(Active::Both),
            page: 3,
            modified_since: Some("2024-01-02T03:04:05+00:00".into()),
        }
        .to_query();
        assert_eq!(get(&query, "active"), Some("both"));
        assert_eq!(get(&query, "page"), Some("3"));
        assert_eq!(get(&query, "modified_since"), Some("2024-01-02T03:04:05+00:00"));
    }

    #[test]
    fn test_empty_modified_since_is_omitted() {
        let query = GroupQuery {
            page: 2,
            modified_since: Some(String::new()),
        }
        .to_query();
        assert_eq!(query.len(), 2);
        assert_eq!(get(&query, "modified_since"), None);
    }

    #[test]
    fn test_group_query_never_sends_active() {
        let query = GroupQuery {
            page: 1,
            modified_since: None,
        }
        .to_query();
        assert_eq!(get(&query, "active"), None);
    }

    #[test]
    fn test_active_wire_values() {
        assert_eq!(Active::Only.as_str(), "yes");
        assert_eq!(Active::Both.as_str(), "both");
    }
}
