use serde_json::{Map, Value};

/// Keys whose string values name an asset on disk.
pub const REFERENCE_KEYS: [&str; 3] = ["path", "file", "local_file"];

#[must_use]
pub fn is_reference_key(key: &str) -> bool {
    REFERENCE_KEYS.contains(&key)
}

/// Receives every asset reference found by [`walk`].
///
/// `value` is the string stored under `key` in the containing map; writing to
/// it rewrites the document in place.
pub trait ReferenceVisitor {
    type Error;

    fn visit(&mut self, key: &str, value: &mut String) -> Result<(), Self::Error>;
}

impl<F, E> ReferenceVisitor for F
where
    F: FnMut(&str, &mut String) -> Result<(), E>,
{
    type Error = E;

    fn visit(&mut self, key: &str, value: &mut String) -> Result<(), E> {
        self(key, value)
    }
}

/// Visit every reference in `node`, returning how many were visited.
///
/// Maps are searched at every depth. Sequences are only descended into
/// through their map elements; scalars and nested sequences inside a
/// sequence are skipped. A root that is not a map has no references.
/// The first visitor error stops the walk and is returned as is.
pub fn walk<V>(node: &mut Value, visitor: &mut V) -> Result<usize, V::Error>
where
    V: ReferenceVisitor + ?Sized,
{
    match node {
        Value::Object(map) => walk_map(map, visitor),
        _ => Ok(0),
    }
}

fn walk_map<V>(map: &mut Map<String, Value>, visitor: &mut V) -> Result<usize, V::Error>
where
    V: ReferenceVisitor + ?Sized,
{
    let mut visited = 0;

    for (key, value) in map.iter_mut() {
        match value {
            Value::String(s) if is_reference_key(key) => {
                visitor.visit(key, s)?;
                visited += 1;
            }
            Value::Object(child) => visited += walk_map(child, visitor)?,
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(child) = item {
                        visited += walk_map(child, visitor)?;
                    }
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::convert::Infallible;

    fn collect(doc: &mut Value) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        walk(doc, &mut |key: &str, value: &mut String| {
            seen.push((key.to_string(), value.clone()));
            Ok::<_, Infallible>(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn finds_all_reference_keys_at_one_level() {
        let mut doc = json!({
            "path": "/a/one.png",
            "file": "/b/two.mp4",
            "local_file": "/c/three.wav",
            "name": "Scene"
        });
        let seen = collect(&mut doc);
        assert_eq!(
            seen,
            vec![
                ("path".to_string(), "/a/one.png".to_string()),
                ("file".to_string(), "/b/two.mp4".to_string()),
                ("local_file".to_string(), "/c/three.wav".to_string()),
            ]
        );
    }

    #[test]
    fn ignores_unrecognized_keys() {
        let mut doc = json!({"label": "/usr/local/foo", "settings": {"url": "/x/y.png"}});
        let before = doc.clone();
        assert!(collect(&mut doc).is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn descends_through_maps_and_sequences_of_maps() {
        let mut doc = json!({
            "sources": [
                {"name": "A", "settings": {"file": "/deep/a.png"}},
                {"name": "B", "filters": [{"settings": {"local_file": "/deep/b.lut"}}]}
            ],
            "groups": {"inner": {"items": [{"path": "/deep/c.gif"}]}}
        });
        let files: Vec<String> = collect(&mut doc).into_iter().map(|(_, v)| v).collect();
        assert_eq!(files, vec!["/deep/a.png", "/deep/b.lut", "/deep/c.gif"]);
    }

    #[test]
    fn skips_scalars_and_nested_sequences_inside_sequences() {
        let mut doc = json!({
            "playlist": ["/music/one.mp3", "/music/two.mp3"],
            "nested": [[{"file": "/hidden/nested.png"}]]
        });
        assert!(collect(&mut doc).is_empty());
    }

    #[test]
    fn skips_reference_keys_with_non_string_values() {
        let mut doc = json!({"path": 3, "file": null, "local_file": true});
        assert!(collect(&mut doc).is_empty());
    }

    #[test]
    fn recurses_into_reference_key_holding_a_map() {
        let mut doc = json!({"file": {"path": "/inner/x.png"}});
        assert_eq!(
            collect(&mut doc),
            vec![("path".to_string(), "/inner/x.png".to_string())]
        );
    }

    #[test]
    fn non_map_root_is_a_no_op() {
        let mut doc = json!([{"file": "/a.png"}]);
        assert!(collect(&mut doc).is_empty());
        let mut doc = json!("/a.png");
        assert!(collect(&mut doc).is_empty());
    }

    #[test]
    fn rewrites_in_place() {
        let mut doc = json!({"sources": [{"settings": {"file": "/tmp/in/bg.png"}}]});
        let count = walk(&mut doc, &mut |_: &str, value: &mut String| {
            *value = value.to_uppercase();
            Ok::<_, Infallible>(())
        })
        .unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc["sources"][0]["settings"]["file"], "/TMP/IN/BG.PNG");
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let mut doc = json!({"a": {"file": "/one"}, "b": {"file": "/two"}});
        let mut calls = 0;
        let result = walk(&mut doc, &mut |_: &str, _: &mut String| {
            calls += 1;
            Err::<(), _>("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn visitor_trait_objects_are_accepted() {
        struct Counter(usize);
        impl ReferenceVisitor for Counter {
            type Error = Infallible;
            fn visit(&mut self, _: &str, _: &mut String) -> Result<(), Infallible> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut doc = json!({"x": [{"file": "/1"}, {"path": "/2"}]});
        let mut counter = Counter(0);
        let visitor: &mut dyn ReferenceVisitor<Error = Infallible> = &mut counter;
        assert_eq!(walk(&mut doc, visitor).unwrap(), 2);
        assert_eq!(counter.0, 2);
    }
}
