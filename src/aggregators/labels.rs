//! Human-readable names for the categorical codes in the rental tables.

use crate::record::{Season, WeatherSituation};

pub fn season_label(season: Season) -> &'static str {
    match season {
        Season::Winter => "Winter",
        Season::Spring => "Spring",
        Season::Summer => "Summer",
        Season::Fall => "Fall",
    }
}

pub fn weather_label(weather: WeatherSituation) -> &'static str {
    match weather {
        WeatherSituation::Clear => "Clear",
        WeatherSituation::Mist => "Mist",
        WeatherSituation::LightRain => "Light Rain",
        WeatherSituation::HeavyRain => "Heavy Rain",
    }
}

/// Weekday name for a code where 0 is Sunday.
pub fn weekday_label(weekday: u8) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}

pub fn month_label(month: u8) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "?",
    }
}

/// Calendar year for a year code (0 = 2011).
pub fn calendar_year(year: u8) -> i32 {
    2011 + i32::from(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_starts_on_sunday() {
        assert_eq!(weekday_label(0), "Sunday");
        assert_eq!(weekday_label(6), "Saturday");
        assert_eq!(weekday_label(7), "?");
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "?");
        assert_eq!(month_label(13), "?");
    }

    #[test]
    fn test_calendar_year() {
        assert_eq!(calendar_year(0), 2011);
        assert_eq!(calendar_year(1), 2012);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(season_label(Season::Fall), "Fall");
        assert_eq!(weather_label(WeatherSituation::LightRain), "Light Rain");
    }
}
