//! Naming conventions for type names
//!
//! Designators given as strings follow the usual record-model conventions:
//! table-style names are plural snake case (`other_things`, `admin/users`),
//! type names are singular CamelCase joined by `::` (`OtherThing`,
//! `Admin::User`). These helpers convert between the two forms.
//!
//! - `classify`: `admin/users` -> `Admin::User`
//! - `underscore`: `Admin::User` -> `admin/user`
//! - `sanitize`: `Admin::User` -> `admin_user` (safe inside an accessor name)

/// Irregular plural -> singular pairs (lowercase)
const IRREGULARS: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

/// Words whose singular and plural forms are the same
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "data",
];

/// Singularize the last word of a snake_case token
///
/// Only the tail of the token is inflected: `other_things` -> `other_thing`.
/// Tokens that are already singular are returned unchanged.
pub fn singularize(word: &str) -> String {
    let (head, tail) = match word.rfind(|c: char| c == '_' || c == '/') {
        Some(pos) => word.split_at(pos + 1),
        None => ("", word),
    };
    format!("{}{}", head, singularize_word(tail))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULARS {
        if lower == *plural {
            return preserve_first_case(word, singular);
        }
    }

    let stem = |n: usize| word[..word.len() - n].to_string();

    if lower.ends_with("ies") && lower.len() > 3 {
        return format!("{}y", stem(3));
    }
    if lower.ends_with("sses")
        || lower.ends_with("shes")
        || lower.ends_with("ches")
        || lower.ends_with("xes")
        || lower.ends_with("zzes")
    {
        return stem(2);
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }
    if lower.ends_with('s') && lower.len() > 1 {
        return stem(1);
    }

    word.to_string()
}

fn preserve_first_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_ascii_uppercase() => capitalize(replacement),
        _ => replacement.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a snake_case path into a CamelCase type name
///
/// `/` separates namespaces and becomes `::`; `_` separates words.
/// Letters after the first of each word are left as they are, so an already
/// camelized token (`OtherThing`) passes through unchanged.
pub fn camelize(token: &str) -> String {
    token
        .split('/')
        .map(|segment| segment.split('_').map(capitalize).collect::<String>())
        .collect::<Vec<_>>()
        .join("::")
}

/// Convert a table-style or symbolic name into a type name
///
/// Anything up to the last `.` is treated as a schema prefix and dropped,
/// the trailing word is singularized and the result camelized.
pub fn classify(token: &str) -> String {
    let token = token.trim();
    let token = token.rsplit('.').next().unwrap_or(token);
    camelize(&singularize(token))
}

/// Convert a CamelCase type name into its snake_case path
///
/// `::` becomes `/`; acronym runs are kept together (`HTTPServer` ->
/// `http_server`).
pub fn underscore(name: &str) -> String {
    let path = name.replace("::", "/");
    let chars: Vec<char> = path.chars().collect();
    let mut out = String::with_capacity(path.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }

    out
}

/// Identifier-safe lowercase form of a type name
///
/// `underscore` with namespace separators replaced by `_`.
pub fn sanitize(name: &str) -> String {
    underscore(name).replace('/', "_")
}
