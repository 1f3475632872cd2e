use serde::{Deserialize, Serialize};

/// A geographic position, produced by a position source or taken from
/// [`Coordinate::BEIJING`]. Immutable once obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Fallback coordinate used when no position source is consulted.
    pub const BEIJING: Coordinate = Coordinate {
        latitude: 39.9093,
        longitude: 116.3964,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The upstream expects `location=lat,lng`.
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Top-level document returned by the upstream weather API.
///
/// Treated as an opaque value once parsed: subrecords the upstream omits
/// deserialize to `None` / empty rather than failing, and callers are
/// expected to tolerate their absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<WeatherResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<WeatherLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<CurrentConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forecasts: Vec<ForecastEntry>,
}

/// Administrative naming for the resolved district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherLocation {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

/// Current observed conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub text: String,
    pub temp: f64,
    pub feels_like: f64,
    /// Relative humidity, percent.
    #[serde(default)]
    pub rh: u8,
    #[serde(default)]
    pub wind_class: String,
    #[serde(default)]
    pub wind_dir: String,
    /// Upstream observation timestamp, passed through verbatim.
    #[serde(default)]
    pub uptime: String,
}

/// One day of forecast. Flat record, no nested identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(default)]
    pub text_day: String,
    #[serde(default)]
    pub text_night: String,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub wc_day: String,
    #[serde(default)]
    pub wd_day: String,
    #[serde(default)]
    pub wc_night: String,
    #[serde(default)]
    pub wd_night: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub week: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "status": 0,
        "result": {
            "location": {
                "country": "中国",
                "province": "北京市",
                "city": "北京市",
                "name": "东城",
                "id": "110101"
            },
            "now": {
                "text": "晴",
                "temp": 25.0,
                "feels_like": 23.0,
                "rh": 40,
                "wind_class": "2级",
                "wind_dir": "东北风",
                "uptime": "20240601120000"
            },
            "forecasts": [
                {
                    "text_day": "晴",
                    "text_night": "多云",
                    "high": 28.0,
                    "low": 17.0,
                    "wc_day": "3级",
                    "wd_day": "南风",
                    "wc_night": "2级",
                    "wd_night": "北风",
                    "date": "2024-06-01",
                    "week": "星期六"
                }
            ]
        }
    }"#;

    #[test]
    fn parse_full_response() {
        let parsed: WeatherResponse = serde_json::from_str(FULL_RESPONSE).unwrap();

        assert_eq!(parsed.status, 0);
        let result = parsed.result.expect("result must be present");
        assert_eq!(result.location.unwrap().city, "北京市");

        let now = result.now.unwrap();
        assert_eq!(now.temp, 25.0);
        assert_eq!(now.rh, 40);

        assert_eq!(result.forecasts.len(), 1);
        assert_eq!(result.forecasts[0].date, "2024-06-01");
        assert_eq!(result.forecasts[0].high, 28.0);
    }

    #[test]
    fn roundtrip_is_structurally_lossless() {
        let parsed: WeatherResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let reserialized = serde_json::to_string(&parsed).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        let original: serde_json::Value = serde_json::from_str(FULL_RESPONSE).unwrap();

        assert_eq!(reparsed, original);
    }

    #[test]
    fn missing_subfields_parse_to_none() {
        let parsed: WeatherResponse = serde_json::from_str(r#"{"status": 0}"#).unwrap();
        assert!(parsed.result.is_none());

        let parsed: WeatherResponse =
            serde_json::from_str(r#"{"status": 0, "result": {}}"#).unwrap();
        let result = parsed.result.unwrap();
        assert!(result.location.is_none());
        assert!(result.now.is_none());
        assert!(result.forecasts.is_empty());
    }

    #[test]
    fn coordinate_displays_as_location_parameter() {
        assert_eq!(Coordinate::BEIJING.to_string(), "39.9093,116.3964");
        assert_eq!(Coordinate::new(1.5, -2.25).to_string(), "1.5,-2.25");
    }
}
