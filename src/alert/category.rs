//! FAA flight category from parsed ceiling and visibility.
//!
//! Bands, worst condition wins:
//!   LIFR  ceiling < 500 ft   or visibility < 1 SM
//!   IFR   ceiling < 1000 ft  or visibility < 3 SM
//!   MVFR  ceiling <= 3000 ft or visibility <= 5 SM
//!   VFR   otherwise

use serde::{Deserialize, Serialize};

use crate::model::ParsedConditions;

/// Flight categories, in ascending order of restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightCategory::Vfr => write!(f, "VFR"),
            FlightCategory::Mvfr => write!(f, "MVFR"),
            FlightCategory::Ifr => write!(f, "IFR"),
            FlightCategory::Lifr => write!(f, "LIFR"),
        }
    }
}

fn ceiling_category(ceiling_ft: u32) -> FlightCategory {
    match ceiling_ft {
        0..500 => FlightCategory::Lifr,
        500..1000 => FlightCategory::Ifr,
        1000..=3000 => FlightCategory::Mvfr,
        _ => FlightCategory::Vfr,
    }
}

fn visibility_category(vis_miles: f64, is_greater: bool) -> FlightCategory {
    if is_greater && vis_miles > 5.0 {
        FlightCategory::Vfr
    } else if vis_miles < 1.0 {
        FlightCategory::Lifr
    } else if vis_miles < 3.0 {
        FlightCategory::Ifr
    } else if vis_miles <= 5.0 {
        FlightCategory::Mvfr
    } else {
        FlightCategory::Vfr
    }
}

/// Returns the flight category, or `None` when the line reported neither
/// ceiling nor visibility.
pub fn flight_category(conditions: &ParsedConditions) -> Option<FlightCategory> {
    if !conditions.has_any() {
        return None;
    }

    let by_ceiling = conditions.ceiling_ft.map(ceiling_category);
    let by_vis = conditions
        .vis_miles
        .map(|vis| visibility_category(vis, conditions.is_greater));

    by_ceiling.max(by_vis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::line::parse_line;

    #[test]
    fn test_clear_line_is_vfr() {
        let parsed = parse_line("KPIA 011254Z 21008KT 10SM FEW040");
        assert_eq!(flight_category(&parsed), Some(FlightCategory::Vfr));
    }

    #[test]
    fn test_worst_of_ceiling_and_visibility_wins() {
        // 10 SM is VFR but a 700 ft ceiling is IFR.
        let parsed = parse_line("KBOS 011254Z 10SM OVC007");
        assert_eq!(flight_category(&parsed), Some(FlightCategory::Ifr));
    }

    #[test]
    fn test_half_mile_is_lifr() {
        let parsed = parse_line("KJFK 291951Z 18010KT 1/2SM BKN005");
        assert_eq!(flight_category(&parsed), Some(FlightCategory::Lifr));
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(ceiling_category(3000), FlightCategory::Mvfr);
        assert_eq!(ceiling_category(3100), FlightCategory::Vfr);
        assert_eq!(visibility_category(5.0, false), FlightCategory::Mvfr);
        assert_eq!(visibility_category(3.0, false), FlightCategory::Mvfr);
    }

    #[test]
    fn test_p6sm_is_vfr() {
        assert_eq!(visibility_category(6.0, true), FlightCategory::Vfr);
    }

    #[test]
    fn test_line_without_groups_has_no_category() {
        assert_eq!(flight_category(&parse_line("RMK AO2")), None);
    }

    #[test]
    fn test_categories_are_ordered_by_restriction() {
        assert!(FlightCategory::Vfr < FlightCategory::Mvfr);
        assert!(FlightCategory::Mvfr < FlightCategory::Ifr);
        assert!(FlightCategory::Ifr < FlightCategory::Lifr);
    }
}
