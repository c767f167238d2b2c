//! Read-only JSON path lookup for dotted/array paths like `a.b[0].c`.

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathSeg {
    Key(String),
    Index(usize),
}

/// Parse a dotted/array path into segments
///
/// Malformed index segments (`a[x]`) yield `None` so that a typo in a path
/// never silently resolves to a parent value.
fn parse_path(path: &str) -> Option<Vec<PathSeg>> {
    let mut segs = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            continue;
        }
        let (key, mut rest) = match part.find('[') {
            Some(idx) => part.split_at(idx),
            None => (part, ""),
        };
        if !key.is_empty() {
            segs.push(PathSeg::Key(key.to_string()));
        }
        // Zero or more [number]
        while let Some(inner) = rest.strip_prefix('[') {
            let close = inner.find(']')?;
            let idx = inner[..close].parse::<usize>().ok()?;
            segs.push(PathSeg::Index(idx));
            rest = &inner[close + 1..];
        }
        if !rest.is_empty() {
            return None;
        }
    }
    Some(segs)
}

/// Get immutable reference by path
pub fn get_path<'a>(v: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut cur = v;
    for seg in parse_path(path)? {
        match (seg, cur) {
            (PathSeg::Key(k), serde_json::Value::Object(map)) => {
                cur = map.get(&k)?;
            }
            (PathSeg::Index(i), serde_json::Value::Array(arr)) => {
                cur = arr.get(i)?;
            }
            _ => return None,
        }
    }
    Some(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_keys_and_indices() {
        assert_eq!(
            parse_path("a.b[0].c[2][1]").unwrap(),
            vec![
                PathSeg::Key("a".into()),
                PathSeg::Key("b".into()),
                PathSeg::Index(0),
                PathSeg::Key("c".into()),
                PathSeg::Index(2),
                PathSeg::Index(1),
            ]
        );
    }

    #[test]
    fn rejects_malformed_index() {
        assert!(parse_path("a[x]").is_none());
        assert!(parse_path("a[0").is_none());
        assert!(parse_path("a[0]b").is_none());
    }

    #[test]
    fn resolves_nested_values() {
        let v = json!({ "a": [{ "b": "x" }, { "b": "y" }] });
        assert_eq!(get_path(&v, "a[1].b"), Some(&json!("y")));
        assert_eq!(get_path(&v, "a[2].b"), None);
        assert_eq!(get_path(&v, "a.b"), None);
        assert_eq!(get_path(&v, ""), Some(&v));
    }
}
