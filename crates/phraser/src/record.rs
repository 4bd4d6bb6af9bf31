// Text field access on tabular rows.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// A row with named text fields.
pub trait Record {
    /// The text stored under `name`, or `None` if the field is missing or
    /// not text.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> Record for hashbrown::HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }
}

/// Only JSON objects have fields.
impl Record for Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_object()?.field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn std_hash_map_record() {
        let mut row = HashMap::new();
        row.insert("clean_body".to_string(), "hello".to_string());
        assert_eq!(row.field("clean_body"), Some("hello"));
        assert_eq!(row.field("clean_header"), None);
    }

    #[test]
    fn hashbrown_map_record() {
        let mut row = hashbrown::HashMap::new();
        row.insert("clean_header".to_string(), "subject".to_string());
        assert_eq!(row.field("clean_header"), Some("subject"));
    }

    #[test]
    fn btree_map_record() {
        let row: BTreeMap<String, String> =
            [("clean_body".to_string(), "text".to_string())].into_iter().collect();
        assert_eq!(row.field("clean_body"), Some("text"));
    }

    #[test]
    fn json_record() {
        let row = json!({"clean_body": "bonjour", "id": 7, "clean_header": null});
        assert_eq!(row.field("clean_body"), Some("bonjour"));
        assert_eq!(row.field("id"), None);
        assert_eq!(row.field("clean_header"), None);
        assert_eq!(row.field("missing"), None);
    }

    #[test]
    fn json_non_object_has_no_fields() {
        assert_eq!(json!(["clean_body"]).field("clean_body"), None);
        assert_eq!(json!("clean_body").field("clean_body"), None);
    }

    #[test]
    fn reference_record() {
        let row = json!({"clean_body": "x"});
        let by_ref: &Value = &row;
        assert_eq!(Record::field(&by_ref, "clean_body"), Some("x"));
    }
}
