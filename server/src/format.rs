//! Text helpers shared by the report templates.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use time::Date;
use time::macros::format_description;

const CLINVAR_URL: &str = "https://www.ncbi.nlm.nih.gov/clinvar";

/// Characters left as-is when quoting a path; everything else is escaped.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// `2019-05-01T00:00:00` → `01 May 2019`. Unparseable input is returned as-is.
pub fn prettify_date(iso_date: &str) -> String {
    let Some(day) = iso_date.get(..10) else {
        return iso_date.to_string();
    };
    Date::parse(day, format_description!("[year]-[month]-[day]"))
        .ok()
        .and_then(|date| {
            date.format(format_description!("[day] [month repr:short] [year]"))
                .ok()
        })
        .unwrap_or_else(|| iso_date.to_string())
}

/// Keeps empty table cells and link texts from collapsing.
pub fn or_space(text: &str) -> String {
    if text.is_empty() {
        "\u{200B}".to_string()
    } else {
        text.to_string()
    }
}

/// Query string to append to drill-down links so filters carry over.
pub fn query_suffix(raw_query: Option<&str>) -> String {
    match raw_query {
        Some(query) if !query.is_empty() => format!("?{query}"),
        _ => String::new(),
    }
}

/// Quotes a value for use as one path segment.
///
/// Slashes become `%252F`: the router decodes that to `%2F`, which the
/// handlers turn back into `/` once the segment has been split off.
pub fn quote_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SAFE)
        .to_string()
        .replace('/', "%252F")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Adds line-break opportunities to long HGVS names and organisation names.
pub fn break_punctuation(text: &str) -> String {
    text.replace('(', "<wbr/>(")
        .replace(')', ")<wbr/>")
        .replace(',', ",<wbr/>")
        .replace('.', ".<wbr/>")
        .replace(':', "<wbr/>:<wbr/>")
        .replace('-', "-<wbr/>")
}

pub fn rcv_link(rcv: &str) -> String {
    let rcv = escape_html(rcv);
    format!(r#"<a href="{CLINVAR_URL}/{rcv}/">{rcv}</a>"#)
}

/// Submitter id 0 is the "any other submitter" placeholder and gets no link.
pub fn submitter_link(submitter_id: i64, submitter_name: &str) -> String {
    if submitter_id == 0 {
        return escape_html(submitter_name);
    }
    let text = break_punctuation(&escape_html(submitter_name));
    format!(r#"<a href="{CLINVAR_URL}/submitters/{submitter_id}/">{text}</a>"#)
}

pub fn variant_link(variant_id: i64, variant_name: &str) -> String {
    let text = break_punctuation(&escape_html(variant_name));
    format!(r#"<a href="{CLINVAR_URL}/variation/{variant_id}/">{text}</a>"#)
}
