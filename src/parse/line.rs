//! Ceiling and visibility extraction from a single METAR/TAF line.
//!
//! Only the first cloud layer group and the first visibility group on a
//! line are considered; later groups (TEMPO/BECMG segments, remarks) are
//! ignored. A line with neither group parses to all-`None`, which always
//! passes a minima check.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::ParsedConditions;

/// `BKN`, `OVC` or `VV` followed by a three-digit height in hundreds of feet.
static CEILING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:BKN|OVC|VV)(\d{3})").expect("ceiling pattern is valid")
});

/// Statute-mile visibility: `10SM`, `P6SM`, `1/2SM`, `1 1/2SM`, `M1/4SM`.
/// A leading whole number only combines with a fraction.
static VISIBILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\s)(?P<prefix>[PM])?(?:(?P<whole>\d{1,2}) (?P<wnum>\d)/(?P<wden>\d{1,2})|(?P<num>\d{1,2})/(?P<den>\d{1,2})|(?P<int>\d{1,2}))SM\b",
    )
    .expect("visibility pattern is valid")
});

/// Parses ceiling and visibility out of one line of report text.
pub fn parse_line(line: &str) -> ParsedConditions {
    let (vis_miles, is_greater) = parse_visibility(line)
        .map(|(miles, greater)| (Some(miles), greater))
        .unwrap_or((None, false));

    ParsedConditions {
        ceiling_ft: parse_ceiling(line),
        vis_miles,
        is_greater,
    }
}

/// Height of the first BKN/OVC/VV layer, in feet.
pub fn parse_ceiling(line: &str) -> Option<u32> {
    let caps = CEILING_RE.captures(line)?;
    let hundreds: u32 = caps[1].parse().ok()?;
    Some(hundreds * 100)
}

/// First visibility group as `(statute miles, is_greater)`.
pub fn parse_visibility(line: &str) -> Option<(f64, bool)> {
    let caps = VISIBILITY_RE.captures(line)?;
    let miles = visibility_miles(&caps)?;
    let is_greater = caps.name("prefix").is_some_and(|p| p.as_str() == "P");
    Some((miles, is_greater))
}

fn visibility_miles(caps: &Captures<'_>) -> Option<f64> {
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<f64>().ok());

    let numerator = number("num").or_else(|| number("wnum"));
    let denominator = number("den").or_else(|| number("wden"));
    let fraction = match (numerator, denominator) {
        (Some(_), Some(den)) if den == 0.0 => return None,
        (Some(num), Some(den)) => num / den,
        _ => number("int")?,
    };

    Some(number("whole").unwrap_or(0.0) + fraction)
}
