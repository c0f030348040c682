//! Plain-text rendering of search results, weather and the overview.
//!
//! Everything here is a pure function from core data to a `String`.

use std::fmt::Write;

use chrono::NaiveDate;
use kenya_weather_core::{
    ForecastDay, KENYA_CENTER, LocationCandidate, Overview, TemperatureBand, ViewState,
    WeatherReport,
};

const COLUMN_WIDTH: usize = 14;

/// `Mon, Jan 15`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn welcome() -> String {
    [
        "🌤️  Welcome to Kenya Weather Search",
        "Search for any location in Kenya to get current weather conditions",
        "and a 7-day forecast.",
    ]
    .join("\n")
}

/// One line per candidate, as shown in the picker.
pub fn candidate_line(location: &LocationCandidate) -> String {
    format!(
        "{} ({}) Lat: {:.4}, Lon: {:.4}",
        location.name,
        location.region_label(),
        location.latitude,
        location.longitude
    )
}

pub fn render_candidates(candidates: &[LocationCandidate]) -> String {
    let mut out = String::from("Select a location:\n");
    for (idx, location) in candidates.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, candidate_line(location));
    }
    out
}

pub fn render_report(location: &LocationCandidate, report: &WeatherReport) -> String {
    let current = &report.current;
    let code = current.weather_code;

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", code.glyph(), location.name);
    let _ = writeln!(out, "{}", location.region_label());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}°C  {}", current.temperature, code.description());
    let _ = writeln!(
        out,
        "Humidity: {}%   Wind Speed: {} km/h   Precipitation: {} mm",
        current.humidity, current.wind_speed, current.precipitation
    );

    if !report.forecast.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}-Day Forecast", report.forecast.len());
        out.push_str(&render_forecast_grid(&report.forecast));
    }
    out
}

/// One column per day: date, glyph, max, min and (if any) rain.
pub fn render_forecast_grid(days: &[ForecastDay]) -> String {
    const ROWS: usize = 5;

    let mut out = String::new();
    for row in 0..ROWS {
        let cells: Vec<String> = days
            .iter()
            .map(|day| pad(&forecast_cell(day, row), COLUMN_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", cells.join("").trim_end());
    }
    out
}

fn forecast_cell(day: &ForecastDay, row: usize) -> String {
    match row {
        0 => format_date(day.date),
        1 => day.weather_code.glyph().to_string(),
        2 => format!("↑ {}°C", day.temp_max),
        3 => format!("↓ {}°C", day.temp_min),
        _ if day.precipitation > 0.0 => format!("💧 {} mm", day.precipitation),
        _ => String::new(),
    }
}

pub fn render_overview(overview: &Overview) -> String {
    let (centre_lat, centre_lon) = KENYA_CENTER;
    let mut out = String::from("Kenya Weather Distribution\n");
    let _ = writeln!(out, "Centre: {centre_lat:.4}, {centre_lon:.4}\n");

    out.push_str("Temperature Scale: ");
    let legend: Vec<String> = TemperatureBand::ALL
        .iter()
        .map(|band| format!("{} {}", band.color(), band.label()))
        .collect();
    out.push_str(&legend.join("  "));
    out.push_str("\n\n");

    for point in &overview.points {
        let current = &point.current;
        let _ = writeln!(
            out,
            "{} {:<10} {:>7.4},{:>8.4}  {:>5}°C  {}  💧 {}%  🌧️ {} mm  💨 {} km/h",
            current.weather_code.glyph(),
            point.name,
            point.latitude,
            point.longitude,
            current.temperature,
            point.band().color(),
            current.humidity,
            current.precipitation,
            current.wind_speed,
        );
    }

    if !overview.failed.is_empty() {
        let _ = writeln!(out, "\nUnavailable: {}", overview.failed.join(", "));
    }

    out.push('\n');
    match overview.stats() {
        Some(stats) => {
            let _ = writeln!(
                out,
                "Locations: {}   Hottest: {:.1}°C   Coolest: {:.1}°C   Avg Temp: {:.1}°C",
                stats.count, stats.hottest, stats.coolest, stats.mean
            );
        }
        None => out.push_str("Locations: 0\n"),
    }
    out
}

pub fn render_state(state: &ViewState) -> String {
    match state {
        ViewState::Idle => welcome(),
        ViewState::Searching { term } => format!("Searching for {term}..."),
        ViewState::LocationAmbiguous { candidates } => render_candidates(candidates),
        ViewState::WeatherLoading { location } => format!("Loading weather for {}...", location.name),
        ViewState::WeatherLoaded { location, report } => render_report(location, report),
        ViewState::Failed { failure, .. } => format!("Error: {failure}"),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        format!("{text} ")
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kenya_weather_core::{CurrentConditions, Failure, WeatherCode, overview::OverviewPoint};

    fn nairobi() -> LocationCandidate {
        LocationCandidate {
            name: "Nairobi".into(),
            admin1: Some("Nairobi County".into()),
            country: "Kenya".into(),
            latitude: -1.28333,
            longitude: 36.81667,
        }
    }

    fn current(temperature: f64) -> CurrentConditions {
        CurrentConditions {
            temperature,
            humidity: 61.0,
            wind_speed: 11.2,
            precipitation: 0.0,
            weather_code: WeatherCode(3),
            time: None,
        }
    }

    fn day(date: (i32, u32, u32), precipitation: f64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            temp_max: 26.1,
            temp_min: 13.9,
            precipitation,
            weather_code: WeatherCode(61),
        }
    }

    #[test]
    fn dates_use_short_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(date), "Mon, Jan 15");
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(format_date(date), "Sun, Mar 3");
    }

    #[test]
    fn candidate_line_shows_region_and_rounded_coordinates() {
        assert_eq!(
            candidate_line(&nairobi()),
            "Nairobi (Nairobi County, Kenya) Lat: -1.2833, Lon: 36.8167"
        );
    }

    #[test]
    fn candidate_list_is_numbered() {
        let mut other = nairobi();
        other.name = "Nairobi West".into();
        let text = render_candidates(&[nairobi(), other]);
        assert!(text.contains("  1. Nairobi ("));
        assert!(text.contains("  2. Nairobi West ("));
    }

    #[test]
    fn report_shows_current_conditions() {
        let report = WeatherReport { current: current(22.4), forecast: vec![] };
        let text = render_report(&nairobi(), &report);
        assert!(text.starts_with("⛅ Nairobi"));
        assert!(text.contains("22.4°C  Overcast"));
        assert!(text.contains("Humidity: 61%"));
        assert!(text.contains("Wind Speed: 11.2 km/h"));
        assert!(!text.contains("Forecast"));
    }

    #[test]
    fn forecast_grid_only_shows_rain_when_present() {
        let dry = render_forecast_grid(&[day((2024, 1, 15), 0.0)]);
        assert!(dry.contains("Mon, Jan 15"));
        assert!(dry.contains("↑ 26.1°C"));
        assert!(dry.contains("↓ 13.9°C"));
        assert!(!dry.contains("💧"));

        let wet = render_forecast_grid(&[day((2024, 1, 15), 0.0), day((2024, 1, 16), 4.5)]);
        assert!(wet.contains("💧 4.5 mm"));
        assert!(wet.lines().next().unwrap().contains("Tue, Jan 16"));
    }

    #[test]
    fn overview_prints_markers_and_stats() {
        let overview = Overview {
            points: vec![
                OverviewPoint {
                    name: "Lodwar".into(),
                    latitude: 3.1167,
                    longitude: 35.5986,
                    current: current(36.2),
                },
                OverviewPoint {
                    name: "Nyeri".into(),
                    latitude: -0.4197,
                    longitude: 36.947,
                    current: current(14.0),
                },
            ],
            failed: vec!["Mandera".into()],
        };

        let text = render_overview(&overview);
        assert!(text.starts_with("Kenya Weather Distribution\nCentre: 0.0236, 37.9062\n"));
        assert!(text.contains("#3b82f6 <15°C"));
        assert!(text.contains("Lodwar"));
        assert!(text.contains("#dc2626"));
        assert!(text.contains("Unavailable: Mandera"));
        assert!(text.contains("Locations: 2"));
        assert!(text.contains("Hottest: 36.2°C"));
        assert!(text.contains("Coolest: 14.0°C"));
        assert!(text.contains("Avg Temp: 25.1°C"));
    }

    #[test]
    fn empty_overview_has_no_stats() {
        let text = render_overview(&Overview::default());
        assert!(text.contains("Locations: 0"));
        assert!(!text.contains("Hottest"));
    }

    #[test]
    fn failed_state_shows_message_only() {
        let state = ViewState::Failed { failure: Failure::WeatherFailed, location: Some(nairobi()) };
        assert_eq!(render_state(&state), "Error: Failed to fetch weather data. Please try again.");
        assert!(render_state(&ViewState::Idle).contains("Welcome"));
    }
}
