//! Client-side search over loaded items.
//!
//! Items are serialized to JSON and the named fields are matched as text,
//! so any record type works without per-type code.

use serde::Serialize;
use serde_json::Value;

/// Text of `field` in `item`'s JSON form.
///
/// `field` may be camelCase or snake_case, and may reach into nested
/// objects with dots (`address.city`). Null, `false`, zero and empty
/// strings count as absent.
pub fn field_text<T: Serialize>(item: &T, field: &str) -> Option<String> {
    let json = serde_json::to_value(item).ok()?;
    lookup(&json, field)
}

fn lookup(json: &Value, field: &str) -> Option<String> {
    let mut cur = json;
    for part in field.split('.') {
        cur = cur.get(part).or_else(|| cur.get(to_camel_case(part)))?;
    }
    match cur {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        // serde_json writes `200.0`; std's Display drops the fraction.
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        other => Some(other.to_string()),
    }
}

/// Items where at least one of `fields` contains `term`, ignoring case.
///
/// An empty term matches everything. Order is preserved.
pub fn filter<'a, T: Serialize>(items: &'a [T], fields: &[&str], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return items.iter().collect();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let Ok(json) = serde_json::to_value(item) else {
                return false;
            };
            fields.iter().any(|f| {
                lookup(&json, f).is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut upper = false;
    for c in s.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            result.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Person {
        name: String,
        user_name: Option<String>,
        phone: String,
        age: u32,
        active: bool,
        address: Address,
    }

    #[derive(Serialize)]
    struct Address {
        city: String,
    }

    fn person(name: &str, user: Option<&str>, phone: &str, age: u32, city: &str) -> Person {
        Person {
            name: name.into(),
            user_name: user.map(Into::into),
            phone: phone.into(),
            age,
            active: true,
            address: Address { city: city.into() },
        }
    }

    fn people() -> Vec<Person> {
        vec![
            person("Maria Silva", Some("maria"), "11988887777", 34, "São Paulo"),
            person("João Souza", None, "2133334444", 0, "Rio de Janeiro"),
            person("Ana Maria", Some("ana"), "", 27, "Curitiba"),
        ]
    }

    fn names(found: Vec<&Person>) -> Vec<&str> {
        found.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_term_returns_everything() {
        let items = people();
        assert_eq!(filter(&items, &["name"], "").len(), 3);
    }

    #[test]
    fn case_insensitive_substring() {
        let items = people();
        assert_eq!(names(filter(&items, &["name"], "MARIA")), vec!["Maria Silva", "Ana Maria"]);
        assert_eq!(names(filter(&items, &["name"], "souza")), vec!["João Souza"]);
    }

    #[test]
    fn any_field_may_match() {
        let items = people();
        assert_eq!(
            names(filter(&items, &["name", "phone"], "3333")),
            vec!["João Souza"]
        );
        assert!(filter(&items, &["phone"], "maria").is_empty());
    }

    #[test]
    fn snake_case_field_names() {
        let items = people();
        assert_eq!(names(filter(&items, &["user_name"], "ana")), vec!["Ana Maria"]);
        assert_eq!(names(filter(&items, &["userName"], "ana")), vec!["Ana Maria"]);
    }

    #[test]
    fn numbers_are_stringified() {
        let items = people();
        assert_eq!(names(filter(&items, &["age"], "27")), vec!["Ana Maria"]);
        // Zero is treated as absent.
        assert!(filter(&items, &["age"], "0").is_empty());
    }

    #[test]
    fn nested_fields() {
        let items = people();
        assert_eq!(names(filter(&items, &["address.city"], "rio")), vec!["João Souza"]);
    }

    #[test]
    fn unknown_field_matches_nothing() {
        let items = people();
        assert!(filter(&items, &["nope"], "a").is_empty());
    }

    #[test]
    fn field_text_values() {
        let p = person("Maria", None, "", 34, "X");
        assert_eq!(field_text(&p, "name").as_deref(), Some("Maria"));
        assert_eq!(field_text(&p, "age").as_deref(), Some("34"));
        assert_eq!(field_text(&p, "active").as_deref(), Some("true"));
        assert_eq!(field_text(&p, "userName"), None);
        assert_eq!(field_text(&p, "phone"), None);
        assert_eq!(field_text(&json!({"v": 1.5}), "v").as_deref(), Some("1.5"));
    }

    #[test]
    fn whole_floats_search_without_fraction() {
        #[derive(Serialize)]
        struct Priced {
            value: f64,
        }
        let items = [Priced { value: 200.0 }, Priced { value: 49.9 }];

        assert_eq!(field_text(&items[0], "value").as_deref(), Some("200"));
        assert_eq!(field_text(&items[1], "value").as_deref(), Some("49.9"));
        assert_eq!(filter(&items, &["value"], "200").len(), 1);
        assert!(filter(&items, &["value"], "200.0").is_empty());
        assert_eq!(field_text(&json!({"v": -3.0}), "v").as_deref(), Some("-3"));
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("mesh_type_id"), "meshTypeId");
        assert_eq!(to_camel_case("name"), "name");
    }
}
