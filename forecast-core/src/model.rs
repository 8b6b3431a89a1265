use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

/// Language sent to the provider when neither the payload nor the config
/// names one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Unit systems the provider understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Ca,
    Uk2,
    #[default]
    Us,
    Si,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Ca => "ca",
            Units::Uk2 => "uk2",
            Units::Us => "us",
            Units::Si => "si",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Ca, Units::Uk2, Units::Us, Units::Si]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "ca" => Ok(Units::Ca),
            "uk2" => Ok(Units::Uk2),
            "us" => Ok(Units::Us),
            "si" => Ok(Units::Si),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: ca, uk2, us, si."
            )),
        }
    }
}

/// A latitude or longitude as the front-end sends it: widget configs carry
/// them either as JSON numbers or as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn is_blank(&self) -> bool {
        match self {
            Coordinate::Number(_) => false,
            Coordinate::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::Number(n) => write!(f, "{n}"),
            Coordinate::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// One forecast request as delivered by the `GET_REQUEST` notification.
///
/// Only `requestId` is mandatory at the wire level; the rest is whatever the
/// widget was configured with, checked by [`ForecastRequest::validated`]
/// before any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub api_key: Option<String>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub units: Option<Units>,
    pub language: Option<String>,
    pub request_id: String,
}

/// Borrowed view of a request that passed validation, with units and
/// language resolved to concrete values.
#[derive(Debug, Clone, Copy)]
pub struct ValidRequest<'a> {
    pub api_key: &'a str,
    pub latitude: &'a Coordinate,
    pub longitude: &'a Coordinate,
    pub units: Units,
    pub language: &'a str,
}

impl ForecastRequest {
    /// Checks the fields that must be present before the provider is
    /// contacted: a non-blank API key and both coordinates.
    pub fn validated(&self) -> Result<ValidRequest<'_>, FetchError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(FetchError::MissingApiKey),
        };

        let (latitude, longitude) = match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lon)) if !lat.is_blank() && !lon.is_blank() => (lat, lon),
            _ => return Err(FetchError::MissingCoordinates),
        };

        Ok(ValidRequest {
            api_key,
            latitude,
            longitude,
            units: self.units.unwrap_or_default(),
            language: self
                .language
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(DEFAULT_LANGUAGE),
        })
    }
}

/// Provider JSON relayed back to the widget, stamped with the identifier of
/// the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastData {
    pub request_id: String,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl ForecastData {
    pub fn new(request_id: String, body: Map<String, Value>) -> Self {
        Self { request_id, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> ForecastRequest {
        ForecastRequest {
            api_key: Some("K".to_string()),
            latitude: Some(Coordinate::Number(1.5)),
            longitude: Some(Coordinate::Number(-2.5)),
            units: Some(Units::Us),
            language: Some("en".to_string()),
            request_id: "widget-1".to_string(),
        }
    }

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let s = units.as_str();
            let parsed = Units::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("metric").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn validated_accepts_full_request() {
        let request = full_request();
        let valid = request.validated().expect("request must pass");

        assert_eq!(valid.api_key, "K");
        assert_eq!(valid.units, Units::Us);
        assert_eq!(valid.language, "en");
    }

    #[test]
    fn validated_rejects_missing_api_key() {
        let mut request = full_request();
        request.api_key = None;
        assert!(matches!(
            request.validated(),
            Err(FetchError::MissingApiKey)
        ));

        request.api_key = Some("   ".to_string());
        assert!(matches!(
            request.validated(),
            Err(FetchError::MissingApiKey)
        ));
    }

    #[test]
    fn validated_rejects_missing_or_blank_coordinates() {
        let mut request = full_request();
        request.latitude = None;
        assert!(matches!(
            request.validated(),
            Err(FetchError::MissingCoordinates)
        ));

        let mut request = full_request();
        request.longitude = Some(Coordinate::Text(String::new()));
        assert!(matches!(
            request.validated(),
            Err(FetchError::MissingCoordinates)
        ));
    }

    #[test]
    fn validated_resolves_omitted_units_and_language() {
        let mut request = full_request();
        request.units = None;
        request.language = None;

        let valid = request.validated().expect("request must pass");
        assert_eq!(valid.units, Units::Us);
        assert_eq!(valid.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn request_deserializes_widget_payload() {
        let payload = json!({
            "apiKey": "K",
            "latitude": "40.7128",
            "longitude": -74.006,
            "units": "si",
            "language": "de",
            "requestId": "widget-2"
        });

        let request: ForecastRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.api_key.as_deref(), Some("K"));
        assert_eq!(
            request.latitude,
            Some(Coordinate::Text("40.7128".to_string()))
        );
        assert_eq!(request.longitude, Some(Coordinate::Number(-74.006)));
        assert_eq!(request.units, Some(Units::Si));
        assert_eq!(request.request_id, "widget-2");
    }

    #[test]
    fn coordinate_display_matches_wire_form() {
        assert_eq!(Coordinate::Number(1.5).to_string(), "1.5");
        assert_eq!(Coordinate::Number(-2.5).to_string(), "-2.5");
        assert_eq!(Coordinate::Text(" 40.7 ".to_string()).to_string(), "40.7");
    }

    #[test]
    fn forecast_data_serializes_flat_with_request_id() {
        let body = json!({"temp": 70})
            .as_object()
            .cloned()
            .expect("object literal");
        let data = ForecastData::new("widget-3".to_string(), body);

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({"temp": 70, "requestId": "widget-3"}));
    }
}
