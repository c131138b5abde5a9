//! Merge algorithm for build engine configuration.
//!
//! User overrides are layered over the generated configuration the way the
//! build engine layers its own config files.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are concatenated, generated entries first
//! - A scalar merged with an array is wrapped and concatenated
//! - Null values in the overlay are ignored
//! - Scalars in the overlay replace the base
//! - `alias` (top level or under `resolve`) merges key by key when both sides
//!   are objects; otherwise both sides become `{ find, replacement }` lists,
//!   overlay entries first so they match before the generated ones

use serde_json::{json, Value};

/// Merge `overlay` into `base`.
///
/// The overlay wins at every conflict except arrays, which accumulate.
pub fn merge_config(base: &Value, overlay: &Value) -> Value {
    merge_at(base, overlay, "")
}

fn merge_at(base: &Value, overlay: &Value, root_path: &str) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    continue;
                }

                let merged = match base_map.get(key) {
                    Some(base_value) if base_value.is_null() => overlay_value.clone(),
                    Some(base_value)
                        if key == "alias" && (root_path.is_empty() || root_path == "resolve") =>
                    {
                        merge_alias(base_value, overlay_value)
                    }
                    Some(base_value) => {
                        let path = if root_path.is_empty() {
                            key.clone()
                        } else {
                            format!("{root_path}.{key}")
                        };
                        merge_value(base_value, overlay_value, &path)
                    }
                    None => overlay_value.clone(),
                };
                result.insert(key.clone(), merged);
            }

            Value::Object(result)
        }
        (base, overlay) if overlay.is_null() => base.clone(),
        (_, overlay) => overlay.clone(),
    }
}

fn merge_value(base: &Value, overlay: &Value, path: &str) -> Value {
    if base.is_array() || overlay.is_array() {
        let mut items = arraify(base);
        items.extend(arraify(overlay));
        return Value::Array(items);
    }
    if base.is_object() && overlay.is_object() {
        return merge_at(base, overlay, path);
    }
    overlay.clone()
}

fn merge_alias(base: &Value, overlay: &Value) -> Value {
    if let (Value::Object(base_map), Value::Object(overlay_map)) = (base, overlay) {
        let mut result = base_map.clone();
        result.extend(overlay_map.iter().map(|(k, v)| (k.clone(), v.clone())));
        return Value::Object(result);
    }

    let mut entries = alias_entries(overlay);
    entries.extend(alias_entries(base));
    Value::Array(entries)
}

/// An alias map or list as `{ find, replacement }` entries.
fn alias_entries(value: &Value) -> Vec<Value> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(find, replacement)| json!({ "find": find, "replacement": replacement }))
            .collect(),
        Value::Array(items) => items.clone(),
        _ => Vec::new(),
    }
}

fn arraify(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_scalar() {
        let base = json!({ "build": { "outDir": "assets", "assetsDir": "" } });
        let overlay = json!({ "build": { "outDir": "dist" } });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["build"]["outDir"], "dist");
        assert_eq!(result["build"]["assetsDir"], "");
    }

    #[test]
    fn arrays_concatenate_generated_first() {
        let base = json!({ "envPrefix": ["VITE_", "PUBLIC_"] });
        let overlay = json!({ "envPrefix": ["APP_"] });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["envPrefix"], json!(["VITE_", "PUBLIC_", "APP_"]));
    }

    #[test]
    fn scalar_joins_array() {
        let base = json!({ "server": { "watch": { "ignored": ["assets/*"] } } });
        let overlay = json!({ "server": { "watch": { "ignored": "tmp/*" } } });

        let result = merge_config(&base, &overlay);

        assert_eq!(
            result["server"]["watch"]["ignored"],
            json!(["assets/*", "tmp/*"])
        );
    }

    #[test]
    fn null_in_overlay_is_ignored() {
        let base = json!({ "base": "./", "publicDir": false });
        let overlay = json!({ "base": null });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["base"], "./");
    }

    #[test]
    fn new_keys_are_added() {
        let base = json!({ "base": "./" });
        let overlay = json!({ "plugins": [{ "name": "tailwind" }] });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["base"], "./");
        assert_eq!(result["plugins"][0]["name"], "tailwind");
    }

    #[test]
    fn scalar_overlay_replaces_object() {
        let base = json!({ "server": { "https": false } });
        let overlay = json!({ "server": { "https": { "cert": "dev.pem" } } });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["server"]["https"]["cert"], "dev.pem");
    }

    #[test]
    fn empty_overlay_returns_base() {
        let base = json!({ "resolve": { "alias": { "~": "/src" } } });
        assert_eq!(merge_config(&base, &json!({})), base);
    }

    #[test]
    fn alias_objects_merge_by_key() {
        let base = json!({ "resolve": { "alias": { "~": "/src", "@": "/src" } } });
        let overlay = json!({ "resolve": { "alias": { "~": "/custom" } } });

        let result = merge_config(&base, &overlay);

        assert_eq!(
            result["resolve"]["alias"],
            json!({ "~": "/custom", "@": "/src" })
        );
    }

    #[test]
    fn alias_list_normalizes_generated_map() {
        let base = json!({ "resolve": { "alias": { "~": "/src" } } });
        let overlay = json!({
            "resolve": { "alias": [{ "find": "vue", "replacement": "vue/dist/vue.esm.js" }] }
        });

        let result = merge_config(&base, &overlay);

        assert_eq!(
            result["resolve"]["alias"],
            json!([
                { "find": "vue", "replacement": "vue/dist/vue.esm.js" },
                { "find": "~", "replacement": "/src" }
            ])
        );
    }

    #[test]
    fn nested_alias_keys_merge_normally() {
        let base = json!({ "build": { "alias": ["a"] } });
        let overlay = json!({ "build": { "alias": ["b"] } });

        let result = merge_config(&base, &overlay);

        assert_eq!(result["build"]["alias"], json!(["a", "b"]));
    }
}
