//! Pattern extractors for ISG pages.
//!
//! The device renders the same kind of data in different shapes depending on
//! the page, so each shape gets its own extractor and callers pick the right
//! one per page. Labels and values are returned verbatim; HTML entities are
//! not decoded.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;

/// ```text
/// <td class="key">VORLAUFISTTEMPERATUR WP</td>
///     <td class="value">21,8°C</td>
/// ```
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<td class="key">(.*?)</td>\r?\n.*?<td class="value">(.*?)</td>"#)
        .expect("table row pattern")
});

static COOLING_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input id="aval456" value="(.*?)" readonly="readonly""#)
        .expect("cooling pattern")
});

static OPERATING_MODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<input class="value curpoi" readonly="readonly" id="aval1" name="aval1" type="text" value="(.*?)" style="width:255px""#,
    )
    .expect("operating mode pattern")
});

/// All `(label, value)` pairs of the key/value statistics tables.
pub fn table_rows(document: &str) -> Vec<(String, String)> {
    TABLE_ROW
        .captures_iter(document)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Scheme A: `jsvalues['16']['val']='24,0'` for key `val16`.
pub fn js_value(document: &str, key: &str) -> Result<String, ExtractError> {
    // Only a leading `val` is dropped; the rest of the key is the id verbatim.
    let id = key.strip_prefix("val").unwrap_or(key);
    let re = Regex::new(&format!(
        r"jsvalues\['{}'\]\['val'\]='(.*?)'",
        regex::escape(id)
    ))?;
    first_capture(&re, document, "jsvalues", key)
}

/// Scheme B: the `jsobj` pair on two consecutive lines, for key `val16`:
///
/// ```text
/// jsobj['id']='val16info';
/// jsobj['val']='24,0';
/// ```
pub fn js_obj_value(document: &str, key: &str) -> Result<String, ExtractError> {
    let re = Regex::new(&format!(
        r"jsobj\['id'\]='{}';\r?\n[ \t]*jsobj\['val'\]='(.*?)';",
        regex::escape(&format!("{key}info"))
    ))?;
    first_capture(&re, document, "jsobj", key)
}

/// Read-only cooling switch on the cooling page (`aval456`).
pub fn cooling_state(document: &str) -> Result<String, ExtractError> {
    first_capture(&COOLING_STATE, document, "input", "aval456")
}

/// Operating mode field on the start page (`aval1`).
pub fn operating_mode(document: &str) -> Result<String, ExtractError> {
    first_capture(&OPERATING_MODE, document, "input", "aval1")
}

fn first_capture(
    re: &Regex,
    document: &str,
    pattern: &'static str,
    key: &str,
) -> Result<String, ExtractError> {
    match re.captures(document) {
        Some(caps) => Ok(caps[1].to_string()),
        None => {
            tracing::warn!(pattern, key, doc_len = document.len(), "extract.miss");
            Err(ExtractError::Missing {
                pattern,
                key: key.to_string(),
            })
        }
    }
}
