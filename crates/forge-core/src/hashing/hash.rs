//! Helpers de hash sobre blake3.

use blake3::Hasher;
use serde::Serialize;
use serde_json::Value;

use super::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hash de la forma canónica de un `Value`.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

/// Huella estructural de cualquier valor serializable.
///
/// Dos valores con los mismos campos producen la misma huella aunque el
/// orden de inserción de sus mapas difiera.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(hash_value(&serde_json::to_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_ignores_key_order() {
        let a = json!({"x": 1, "y": [1, 2]});
        let b = json!({"y": [1, 2], "x": 1});
        assert_eq!(hash_value(&a), hash_value(&b));
        assert_eq!(hash_value(&a).len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = fingerprint(&vec!["a", "b"]).unwrap();
        let b = fingerprint(&vec!["a", "c"]).unwrap();
        assert_ne!(a, b);
    }
}
