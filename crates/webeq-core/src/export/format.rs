//! Plain-text filter settings layout
//!
//! ```text
//! Filter Settings file
//!
//! WebEQ V0.3.0
//! Dated: Oct 18, 2026 3:04:05 PM
//!
//! Notes:
//!
//! Equaliser: Generic
//!
//! Filter  1: ON  PK       Fc   1500 Gain   3 dB  Q 2
//! Filter  2: ON  HP       Fc     50 Gain   0 dB  Q 0.707
//! ```

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::bank::FilterNode;

/// chrono format of the `Dated:` line
pub const DATE_FORMAT: &str = "%b %d, %Y %-I:%M:%S %p";

/// Shortest decimal form, with `-0` printed as `0`
fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Header block, ending with the blank line before the filter lines
pub fn format_header<Tz>(product: &str, version: &str, dated: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "Filter Settings file\n\n{} V{}\nDated: {}\n\nNotes:\n\nEqualiser: Generic\n\n",
        product,
        version,
        dated.format(DATE_FORMAT)
    )
}

/// One filter line; `position` is 1-based within the export
pub fn format_filter_line(position: usize, node: &FilterNode) -> String {
    format!(
        "Filter {:>2}: ON  {:<8} Fc {:>6} Gain {:>3} dB  Q {}",
        position,
        node.filter_type().export_code(),
        fmt_num(node.freq()),
        fmt_num(node.gain()),
        fmt_num(node.q())
    )
}

/// Full export for the committed nodes, in bank order
///
/// Temporary nodes are skipped; every exported filter is written as `ON`.
pub fn format_export<'a, Tz>(
    product: &str,
    version: &str,
    dated: &DateTime<Tz>,
    nodes: impl IntoIterator<Item = &'a FilterNode>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = format_header(product, version, dated);
    let committed = nodes.into_iter().filter(|n| !n.is_temporary());
    for (index, node) in committed.enumerate() {
        out.push_str(&format_filter_line(index + 1, node));
        out.push('\n');
    }
    out
}
