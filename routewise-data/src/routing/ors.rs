//! OpenRouteService wire types for the Matrix and Directions services.
//!
//! See: <https://giscience.github.io/openrouteservice/api-reference/>

use serde::{Deserialize, Serialize};

/// Body of `POST /v2/matrix/{profile}`.
#[derive(Debug, Serialize)]
pub struct MatrixRequest {
    /// `[longitude, latitude]` pairs.
    pub locations: Vec<[f64; 2]>,
    /// Requested metrics; only distances are used.
    pub metrics: [&'static str; 1],
    /// Distance unit.
    pub units: &'static str,
}

impl MatrixRequest {
    pub const fn distances_in_km(locations: Vec<[f64; 2]>) -> Self {
        Self {
            locations,
            metrics: ["distance"],
            units: "km",
        }
    }
}

/// Matrix service response.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// `distances[i][j]` is the distance from location `i` to location `j`.
    ///
    /// Cells are `null` when no route exists between a pair.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

/// Body of `POST /v2/directions/{profile}/geojson`.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// `[longitude, latitude]` pairs in visiting order.
    pub coordinates: Vec<[f64; 2]>,
    /// Distance unit for the summary.
    pub units: &'static str,
}

impl DirectionsRequest {
    pub const fn in_km(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            coordinates,
            units: "km",
        }
    }
}

/// GeoJSON feature collection returned by the directions service.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: LineGeometry,
    #[serde(default)]
    pub properties: Properties,
}

/// A GeoJSON `LineString`.
///
/// Positions may carry a third elevation ordinate, which is ignored.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    pub summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
pub struct Summary {
    pub distance: Option<f64>,
}

/// Error document returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// ORS reports either a structured error or a bare message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured {
        code: serde_json::Value,
        message: String,
    },
    Message(String),
}

impl ErrorDetail {
    /// Split into `(code, message)`; bare messages have an empty code.
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::Structured { code, message } => {
                let code_text = match code {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                (code_text, message)
            }
            Self::Message(message) => (String::new(), message),
        }
    }
}
