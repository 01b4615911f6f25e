//! Canonical JSON: claves ordenadas y sin espacios, para que dos valores
//! estructuralmente iguales produzcan exactamente el mismo texto.

use serde_json::Value;
use std::collections::BTreeMap;

fn quote(s: &str) -> String {
    // serializar un &str no puede fallar
    serde_json::to_string(s).unwrap_or_default()
}

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", quote(k), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::to_canonical_json;
    use serde_json::json;

    #[test]
    fn test_object_sorted_keys() {
        let val = json!({ "b": 2, "a": 1 });
        assert_eq!(to_canonical_json(&val), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn test_nested_sections() {
        let val = json!({ "sections": { "intro": ["x"], "body": [] }, "title": "t" });
        assert_eq!(to_canonical_json(&val),
                   "{\"sections\":{\"body\":[],\"intro\":[\"x\"]},\"title\":\"t\"}");
    }
}
