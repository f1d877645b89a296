use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entity record as stored by Base44.
///
/// Built-in metadata is lifted into fields; everything else stays in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            created_date: None,
            updated_date: None,
            created_by: None,
            data,
        }
    }

    /// Field from the record body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Deserialize the record body into a typed value
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.data.clone()))
    }
}

/// Current user as returned by `entities/User/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query for listing entity records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Field to sort by, `-field` for descending
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    /// Field projection
    pub fields: Vec<String>,
    /// Equality filter, sent as JSON in `q`
    pub filter: Option<Value>,
}

impl ListQuery {
    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Convert to query parameters for the list endpoint
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip".to_string(), skip.to_string()));
        }
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("q".to_string(), filter.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_record_deserialize() {
        let raw = json!({
            "id": "abc123",
            "created_date": "2025-06-30T12:00:00Z",
            "created_by": "someone@example.com",
            "material": "Concrete",
            "quantity": 100
        });

        let record: EntityRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.id, "abc123");
        assert!(record.created_date.is_some());
        assert!(record.updated_date.is_none());
        assert_eq!(record.field("material"), Some(&json!("Concrete")));
        assert!(record.field("id").is_none());
    }

    #[test]
    fn test_entity_record_parse_body() {
        #[derive(Deserialize)]
        struct Row {
            material: String,
        }

        let mut data = Map::new();
        data.insert("material".to_string(), json!("Steel"));
        let record = EntityRecord::new("1", data);

        let row: Row = record.parse().unwrap();
        assert_eq!(row.material, "Steel");
    }

    #[test]
    fn test_user_extra_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@b.c",
            "role": "admin",
            "team": "beam"
        }))
        .unwrap();
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert!(user.full_name.is_none());
        assert_eq!(user.extra.get("team"), Some(&json!("beam")));
    }

    #[test]
    fn test_query_params() {
        let query = ListQuery {
            fields: vec!["material".to_string(), "quantity".to_string()],
            ..Default::default()
        }
        .sorted_by("-created_date")
        .limit(50)
        .skip(10)
        .filter(json!({"project_id": "AUTO123"}));

        let params = query.to_query_params();
        assert!(params.iter().any(|(k, v)| k == "sort" && v == "-created_date"));
        assert!(params.iter().any(|(k, v)| k == "limit" && v == "50"));
        assert!(params.iter().any(|(k, v)| k == "skip" && v == "10"));
        assert!(params.iter().any(|(k, v)| k == "fields" && v == "material,quantity"));
        assert!(params
            .iter()
            .any(|(k, v)| k == "q" && v == r#"{"project_id":"AUTO123"}"#));
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(ListQuery::default().to_query_params().is_empty());
    }
}
