use serde::Serialize;
use strum_macros::Display;

/// Named color band backing the severity meter; the lowercase display form
/// doubles as the CSS class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Critical,
    Warning,
    Elevated,
    Normal,
}

/// Visual rendering of a numeric severity level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBand {
    pub fill_percent: f64,
    pub color: BandColor,
}

/// Maps a 0-5 severity level onto a proportional fill and a color band.
///
/// The arms are checked in this exact order. The `> 2` arm cannot match an
/// integer level once the first two have been excluded; it is kept rather
/// than collapsed because the thresholds are a contract, not a derivation.
pub fn map_severity(level: u8) -> SeverityBand {
    let fill_percent = level as f64 / 5.0 * 100.0;

    let color = if level >= 4 {
        BandColor::Critical
    } else if level == 3 {
        BandColor::Warning
    } else if level > 2 {
        BandColor::Elevated
    } else {
        BandColor::Normal
    };

    SeverityBand { fill_percent, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_twenty_percent_per_level() {
        for level in 0..=5 {
            assert_eq!(map_severity(level).fill_percent, level as f64 * 20.0);
        }
    }

    #[test]
    fn low_levels_map_to_normal() {
        for level in 0..=2 {
            assert_eq!(map_severity(level).color, BandColor::Normal);
        }
    }

    #[test]
    fn level_three_maps_to_warning() {
        assert_eq!(map_severity(3).color, BandColor::Warning);
    }

    #[test]
    fn high_levels_map_to_critical() {
        assert_eq!(map_severity(4).color, BandColor::Critical);
        assert_eq!(map_severity(5).color, BandColor::Critical);
    }

    #[test]
    fn display_forms_are_css_ready() {
        assert_eq!(BandColor::Critical.to_string(), "critical");
        assert_eq!(BandColor::Elevated.to_string(), "elevated");
    }
}
