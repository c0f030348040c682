//! Country-wide temperature overview.
//!
//! Fetches current conditions for a fixed list of towns one at a time with a
//! pause between requests, so the backend sees at most one request in flight.
//! Points whose fetch fails are logged and left out; the batch carries on.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::{backend::WeatherBackend, model::CurrentConditions};

pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Geographic centre of Kenya, (latitude, longitude).
pub const KENYA_CENTER: (f64, f64) = (0.0236, 37.9062);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedPoint {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn point(name: &'static str, latitude: f64, longitude: f64) -> NamedPoint {
    NamedPoint { name, latitude, longitude }
}

/// Major cities and towns across Kenya.
pub const KENYA_POINTS: [NamedPoint; 20] = [
    point("Nairobi", -1.2921, 36.8219),
    point("Mombasa", -4.0435, 39.6682),
    point("Kisumu", -0.0917, 34.7680),
    point("Nakuru", -0.3031, 36.0800),
    point("Eldoret", 0.5143, 35.2698),
    point("Thika", -1.0332, 37.0690),
    point("Malindi", -3.2167, 40.1167),
    point("Garissa", -0.4536, 39.6401),
    point("Kitale", 1.0167, 35.0000),
    point("Machakos", -1.5177, 37.2634),
    point("Nyeri", -0.4197, 36.9470),
    point("Meru", 0.0469, 37.6500),
    point("Kakamega", 0.2827, 34.7519),
    point("Lamu", -2.2717, 40.9020),
    point("Lodwar", 3.1167, 35.5986),
    point("Mandera", 3.9366, 41.8550),
    point("Wajir", 1.7471, 40.0573),
    point("Marsabit", 2.3284, 37.9908),
    point("Embu", -0.5310, 37.4575),
    point("Kericho", -0.3676, 35.2839),
];

/// Marker colour bucket for a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    VeryCold,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    /// Coldest first, as shown in the legend.
    pub const ALL: [TemperatureBand; 6] = [
        TemperatureBand::VeryCold,
        TemperatureBand::Cold,
        TemperatureBand::Cool,
        TemperatureBand::Mild,
        TemperatureBand::Warm,
        TemperatureBand::Hot,
    ];

    pub fn from_celsius(temperature: f64) -> Self {
        if temperature >= 35.0 {
            TemperatureBand::Hot
        } else if temperature >= 30.0 {
            TemperatureBand::Warm
        } else if temperature >= 25.0 {
            TemperatureBand::Mild
        } else if temperature >= 20.0 {
            TemperatureBand::Cool
        } else if temperature >= 15.0 {
            TemperatureBand::Cold
        } else {
            TemperatureBand::VeryCold
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TemperatureBand::Hot => "#dc2626",
            TemperatureBand::Warm => "#f97316",
            TemperatureBand::Mild => "#fbbf24",
            TemperatureBand::Cool => "#84cc16",
            TemperatureBand::Cold => "#10b981",
            TemperatureBand::VeryCold => "#3b82f6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureBand::VeryCold => "<15°C",
            TemperatureBand::Cold => "15-20°C",
            TemperatureBand::Cool => "20-25°C",
            TemperatureBand::Mild => "25-30°C",
            TemperatureBand::Warm => "30-35°C",
            TemperatureBand::Hot => ">35°C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentConditions,
}

impl OverviewPoint {
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::from_celsius(self.current.temperature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewStats {
    pub count: usize,
    pub hottest: f64,
    pub coolest: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    /// Successful points, in input order.
    pub points: Vec<OverviewPoint>,
    /// Names of points whose fetch failed.
    pub failed: Vec<String>,
}

impl Overview {
    /// Summary over successful points; `None` if nothing succeeded.
    pub fn stats(&self) -> Option<OverviewStats> {
        let temps = self.points.iter().map(|p| p.current.temperature);
        let count = self.points.len();
        if count == 0 {
            return None;
        }

        let hottest = temps.clone().fold(f64::NEG_INFINITY, f64::max);
        let coolest = temps.clone().fold(f64::INFINITY, f64::min);
        let mean = temps.sum::<f64>() / count as f64;

        Some(OverviewStats { count, hottest, coolest, mean })
    }
}

/// Fetches `points` in order, sleeping `throttle` between consecutive requests.
pub async fn fetch_overview<B>(backend: &B, points: &[NamedPoint], throttle: Duration) -> Overview
where
    B: WeatherBackend + ?Sized,
{
    let mut overview = Overview::default();

    for (idx, point) in points.iter().enumerate() {
        if idx > 0 && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }

        match backend.get_weather(point.latitude, point.longitude).await {
            Ok(report) => overview.points.push(OverviewPoint {
                name: point.name.to_string(),
                latitude: point.latitude,
                longitude: point.longitude,
                current: report.current,
            }),
            Err(err) => {
                warn!(location = point.name, error = %err, "skipping overview point");
                overview.failed.push(point.name.to_string());
            }
        }
    }

    info!(
        fetched = overview.points.len(),
        failed = overview.failed.len(),
        "overview batch finished"
    );
    overview
}
