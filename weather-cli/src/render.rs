//! Human-friendly output formatting for weather documents.

use chrono::Local;
use weather_core::WeatherResponse;

use crate::nav::NavMenu;

/// Print the side navigation panel with section headers and the active
/// entry marked.
pub fn print_nav(menu: &NavMenu) {
    let mut current_section = None;
    for item in menu.items() {
        if current_section != Some(item.section) {
            println!("{}", item.section.title());
            current_section = Some(item.section);
        }
        let marker = if menu.is_active(item.id) { ">" } else { " " };
        println!(" {marker} [{}] {}", item.icon, item.label);
    }
    println!();
}

/// Print a weather document. Absent subrecords are skipped, not treated as
/// errors; the upstream omits them for some districts.
pub fn print_weather(weather: &WeatherResponse) {
    if weather.status != 0 {
        println!("Upstream reported status {}", weather.status);
    }

    let Some(result) = &weather.result else {
        println!("No weather data available.");
        return;
    };

    if let Some(location) = &result.location {
        println!("{} {} ({})", location.city, location.name, location.country);
    }

    if let Some(now) = &result.now {
        println!(
            "Now: {}  {:.1}°C (feels like {:.1}°C)",
            now.text, now.temp, now.feels_like
        );
        if !now.wind_dir.is_empty() {
            println!("Wind: {} {}  Humidity: {}%", now.wind_dir, now.wind_class, now.rh);
        }
    }

    if !result.forecasts.is_empty() {
        println!();
        println!("{:<12} {:<10} {:>6} {:>6}  {}", "Date", "Day", "High", "Low", "Night");
        for entry in &result.forecasts {
            println!("{}", forecast_line(entry));
        }
    }

    println!();
    println!("Fetched {}", Local::now().format("%Y-%m-%d %H:%M"));
}

/// One forecast row. The date sits alone in its fixed-width column (dates
/// are 10 ASCII characters); the weekday label trails the row so wide
/// characters in it cannot push the numeric columns out of line.
fn forecast_line(entry: &weather_core::ForecastEntry) -> String {
    format!(
        "{:<12} {:<10} {:>5.0}° {:>5.0}°  {} ({})",
        entry.date, entry.text_day, entry.high, entry.low, entry.text_night, entry.week,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::ForecastEntry;

    fn entry(date: &str, week: &str) -> ForecastEntry {
        ForecastEntry {
            text_day: "Sunny".into(),
            text_night: "Cloudy".into(),
            high: 28.0,
            low: 17.0,
            wc_day: String::new(),
            wd_day: String::new(),
            wc_night: String::new(),
            wd_night: String::new(),
            date: date.into(),
            week: week.into(),
        }
    }

    #[test]
    fn forecast_line_keeps_date_column_fixed_width() {
        let line = forecast_line(&entry("2024-06-01", "星期六"));

        assert_eq!(line, "2024-06-01   Sunny         28°    17°  Cloudy (星期六)");
    }

    #[test]
    fn forecast_lines_align_regardless_of_weekday_label() {
        let narrow = forecast_line(&entry("2024-06-01", "Sat"));
        let wide = forecast_line(&entry("2024-06-02", "星期日"));

        // Weekday labels only trail the row, so the numeric columns stay put.
        assert_eq!(narrow.find("28°"), wide.find("28°"));
        assert_eq!(narrow.find("17°"), wide.find("17°"));
    }
}
