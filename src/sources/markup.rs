//! Helpers for pulling structured data out of scraped pages.
//!
//! Both IMDb and Letterboxd embed a schema.org JSON-LD block in their film
//! pages. The helpers here read it loosely: numbers may arrive as strings,
//! and single values may arrive where lists are expected.

use scraper::{Html, Selector};
use serde_json::Value;

/// Parse every `application/ld+json` script in `html`.
///
/// Letterboxd wraps its block in `/* <![CDATA[ */ ... /* ]]> */`, so each
/// script is cut down to the outermost `{ ... }` before parsing. Blocks that
/// do not parse are skipped.
pub fn json_ld_blocks(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|script| {
            let text: String = script.text().collect();
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end < start {
                return None;
            }
            serde_json::from_str(&text[start..=end]).ok()
        })
        .collect()
}

/// The first JSON-LD block that declares an `@type`.
pub fn json_ld(html: &str) -> Option<Value> {
    json_ld_blocks(html)
        .into_iter()
        .find(|block| block.get("@type").is_some())
}

/// Text of the first element matching `css`, parsed as JSON.
pub fn script_json(html: &str, css: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(css).ok()?;
    let script = document.select(&selector).next()?;
    let text: String = script.text().collect();
    serde_json::from_str(text.trim()).ok()
}

/// A finite number, or a string holding one.
pub fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    };
    number.filter(|n: &f64| n.is_finite())
}

/// A non-negative integer, or a string holding one.
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// A string or a list of strings.
pub fn strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Names from a person object or a list of person objects.
pub fn person_names(value: Option<&Value>) -> Vec<String> {
    let name = |v: &Value| v.get("name").and_then(Value::as_str).map(str::to_string);
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(name).collect(),
        Some(obj @ Value::Object(_)) => name(obj).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Four-digit year at the start of a date string like `"2023-04-15"`.
pub fn parse_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse::<u16>().ok())
}
