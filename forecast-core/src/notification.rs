use serde::{Deserialize, Serialize};

use crate::model::{ForecastData, ForecastRequest};

/// One event frame on the in-process channel between the widget and the
/// helper. On the wire each frame is `{"notification": ..., "payload": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "notification", content = "payload")]
pub enum Notification {
    #[serde(rename = "GET_REQUEST")]
    GetRequest(ForecastRequest),
    #[serde(rename = "DATA_RESPONSE")]
    DataResponse(ForecastData),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use serde_json::json;

    #[test]
    fn get_request_frame_deserializes() {
        let frame = json!({
            "notification": "GET_REQUEST",
            "payload": {
                "apiKey": "K",
                "latitude": 51.5,
                "longitude": "-0.12",
                "requestId": "widget-1"
            }
        });

        let notification: Notification = serde_json::from_value(frame).unwrap();
        let Notification::GetRequest(request) = notification else {
            panic!("expected GET_REQUEST");
        };
        assert_eq!(request.latitude, Some(Coordinate::Number(51.5)));
        assert_eq!(
            request.longitude,
            Some(Coordinate::Text("-0.12".to_string()))
        );
        assert_eq!(request.units, None);
        assert_eq!(request.request_id, "widget-1");
    }

    #[test]
    fn data_response_frame_serializes() {
        let body = json!({"temp": 70}).as_object().cloned().unwrap();
        let notification =
            Notification::DataResponse(ForecastData::new("widget-1".to_string(), body));

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(
            value,
            json!({
                "notification": "DATA_RESPONSE",
                "payload": {"temp": 70, "requestId": "widget-1"}
            })
        );
    }
}
