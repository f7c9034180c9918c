//! Text and HTML representations of declared objects.
//!
//! Two configuration keys drive this module: `print_changed_only` omits
//! parameters that still hold their declared default, and `display` set to
//! `"diagram"` adds an HTML rendering to [`mime_bundle`].

use std::collections::BTreeMap;

use log::debug;

use crate::config::registry::{DISPLAY, PRINT_CHANGED_ONLY};
use crate::object::BaseObject;
use crate::value::{ParamMap, Value};

/// Longest representation, in non-blank characters, printed in full.
pub const MAX_REPR_CHARS: usize = 700;

/// MIME type of the plain text representation.
pub const MIME_TEXT: &str = "text/plain";

/// MIME type of the diagram representation.
pub const MIME_HTML: &str = "text/html";

const ELLIPSIS: &str = "...";

/// Renders `Name(param=value, ...)` with parameters sorted by name.
///
/// Objects whose parameters cannot be read render as `Name()`.
pub fn object_repr<O: BaseObject + ?Sized>(object: &O) -> String {
    let name = object.descriptor().name;
    let body = shown_params(object)
        .iter()
        .map(|(key, value)| format!("{key}={}", value.repr()))
        .collect::<Vec<_>>()
        .join(", ");
    shorten(&format!("{name}({body})"), MAX_REPR_CHARS)
}

/// Parameters that appear in the representation of `object`.
fn shown_params<O: BaseObject + ?Sized>(object: &O) -> ParamMap {
    let mut params = match object.get_params(false) {
        Ok(params) => params,
        Err(err) => {
            debug!("Rendering {} without parameters: {err}", object.descriptor().name);
            return ParamMap::new();
        }
    };
    if changed_only(object) {
        let defaults = object.param_defaults().unwrap_or_default();
        params.retain(|key, value| defaults.get(key) != Some(value));
    }
    params
}

fn changed_only<O: BaseObject + ?Sized>(object: &O) -> bool {
    object
        .get_config()
        .get(PRINT_CHANGED_ONLY)
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

/// Shortens `text` around its middle once it holds more than `limit`
/// non-blank characters.
///
/// The first and last `limit / 2` non-blank characters are kept, with any
/// whitespace between them, and joined by `...`.
///
/// # Examples
///
/// ```
/// use predictably::repr::shorten;
///
/// assert_eq!(shorten("abcdef", 10), "abcdef");
/// assert_eq!(shorten("abcdefgh", 4), "ab...gh");
/// ```
#[must_use]
pub fn shorten(text: &str, limit: usize) -> String {
    let non_blank = text.chars().filter(|c| !c.is_whitespace()).count();
    if non_blank <= limit {
        return text.to_string();
    }

    let keep = limit / 2;
    let chars: Vec<char> = text.chars().collect();
    let left = prefix_len(chars.iter(), keep);
    let right = prefix_len(chars.iter().rev(), keep);
    if left + ELLIPSIS.len() >= chars.len() - right {
        return text.to_string();
    }

    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}{ELLIPSIS}{tail}")
}

// Characters needed to cover `count` non-blank characters, blanks included.
fn prefix_len<'a>(chars: impl Iterator<Item = &'a char>, count: usize) -> usize {
    let mut seen = 0;
    let mut taken = 0;
    for c in chars {
        if seen == count {
            break;
        }
        taken += 1;
        if !c.is_whitespace() {
            seen += 1;
        }
    }
    taken
}

/// Renders `object` as a nested HTML diagram.
///
/// Each object is a `<details>` block whose summary is its type name;
/// object-valued parameters nest recursively.
pub fn html_repr<O: BaseObject + ?Sized>(object: &O) -> String {
    let mut html = String::from("<div class=\"predictably\">");
    render_html(object, &mut html);
    html.push_str("</div>");
    html
}

fn render_html<O: BaseObject + ?Sized>(object: &O, html: &mut String) {
    html.push_str("<details open><summary>");
    html.push_str(&escape_html(object.descriptor().name));
    html.push_str("</summary><ul>");
    for (key, value) in shown_params(object) {
        html.push_str("<li>");
        html.push_str(&escape_html(&key));
        if let Value::Object(component) = &value {
            html.push_str(": ");
            render_html(&*component.read(), html);
        } else {
            html.push('=');
            html.push_str(&escape_html(&value.repr()));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></details>");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Representations of `object` keyed by MIME type.
///
/// `text/plain` is always present; `text/html` is added when the effective
/// `display` configuration is `"diagram"`.
pub fn mime_bundle<O: BaseObject + ?Sized>(object: &O) -> BTreeMap<&'static str, String> {
    let mut bundle = BTreeMap::from([(MIME_TEXT, object_repr(object))]);
    let diagram = object
        .get_config()
        .get(DISPLAY)
        .and_then(Value::as_str)
        .is_some_and(|mode| mode == "diagram");
    if diagram {
        bundle.insert(MIME_HTML, html_repr(object));
    }
    bundle
}
