//! Helpers for formatting sequences in warnings and error messages.

use std::fmt::Display;

/// Joins `items` with `sep`, optionally using `last_sep` before the final item.
///
/// A single item is returned on its own, and `last_sep` is surrounded by
/// spaces.
///
/// # Examples
///
/// ```
/// use predictably::format::format_seq;
///
/// assert_eq!(format_seq(&[1, 2, 3, 4], ", ", None), "1, 2, 3, 4");
/// assert_eq!(format_seq(&[1, 2, 3, 4], ", ", Some("and")), "1, 2, 3 and 4");
/// assert_eq!(format_seq(&["polars"], ", ", Some("or")), "polars");
/// ```
#[must_use]
pub fn format_seq<T: Display>(items: &[T], sep: &str, last_sep: Option<&str>) -> String {
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    match (last_sep, rendered.split_last()) {
        (Some(last_sep), Some((last, rest))) if !rest.is_empty() => {
            format!("{} {last_sep} {last}", rest.join(sep))
        }
        _ => rendered.join(sep),
    }
}
