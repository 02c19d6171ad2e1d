//! Response checking and unwrapping.
//!
//! Egeria reports most failures with HTTP 200 and an exception envelope in
//! the body, so the transport status and `relatedHTTPCode` are both checked.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::error;

use crate::core::error::{EgeriaError, ExceptionReport, Result};

/// Turn a raw status + body into JSON, or the matching error variant.
pub fn check_response(status: StatusCode, body: &str) -> Result<Value> {
    let parsed = if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(body)
    };

    if !status.is_success() {
        let report = match &parsed {
            Ok(json) if json.is_object() => report_from(json, status.as_u16()),
            _ => ExceptionReport {
                related_http_code: status.as_u16(),
                message: non_empty_or(body, status.canonical_reason().unwrap_or("request failed")),
                ..Default::default()
            },
        };
        error!(%status, message = %report.message, "Egeria request returned HTTP error");
        return Err(map_report(report));
    }

    let json = parsed.map_err(|e| EgeriaError::Decode(format!("response is not JSON: {e}")))?;

    match json.get("relatedHTTPCode").and_then(Value::as_u64) {
        Some(code) if code != 200 => {
            let report = report_from(&json, status_code(code));
            error!(code, message = %report.message, "Egeria reported an exception");
            Err(map_report(report))
        }
        _ => Ok(json),
    }
}

/// Codes outside the `u16` range are treated as a server failure.
fn status_code(code: u64) -> u16 {
    u16::try_from(code).unwrap_or(500)
}

fn non_empty_or(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() { fallback.to_string() } else { trimmed.to_string() }
}

fn report_from(json: &Value, fallback_code: u16) -> ExceptionReport {
    let text = |key: &str| json.get(key).and_then(Value::as_str).map(str::to_string);
    let related_http_code = json
        .get("relatedHTTPCode")
        .and_then(Value::as_u64)
        .map(status_code)
        .unwrap_or(fallback_code);

    ExceptionReport {
        related_http_code,
        class_name: text("exceptionClassName"),
        message_id: text("exceptionErrorMessageId"),
        message: text("exceptionErrorMessage")
            .or_else(|| text("message"))
            .or_else(|| text("error"))
            .unwrap_or_else(|| json.to_string()),
        system_action: text("exceptionSystemAction"),
        user_action: text("exceptionUserAction"),
    }
}

/// Sort an exception report into an error variant by its HTTP code.
pub fn map_report(report: ExceptionReport) -> EgeriaError {
    match report.related_http_code {
        400 => EgeriaError::InvalidParameter {
            parameter: "request".to_string(),
            reason: report.to_string(),
        },
        401 | 403 => EgeriaError::NotAuthorized(report),
        404 => EgeriaError::NotFound(report),
        _ => EgeriaError::Api(report),
    }
}

/// Extract the `guid` of a `GUIDResponse`.
pub fn guid_from(json: &Value) -> Result<String> {
    json.get("guid")
        .and_then(Value::as_str)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            EgeriaError::Api(ExceptionReport {
                related_http_code: 200,
                message: "response did not contain a guid".into(),
                ..Default::default()
            })
        })
}

/// Pull the element list out of a list response. A missing or null list is
/// an empty result, not an error.
pub fn elements_from(mut json: Value) -> Vec<Value> {
    for key in ["elements", "elementList"] {
        if let Some(Value::Array(items)) = json.get_mut(key).map(Value::take) {
            return items;
        }
    }
    Vec::new()
}

/// Pull the single element out of an element response.
pub fn element_from(mut json: Value) -> Option<Value> {
    json.get_mut("element").map(Value::take).filter(|e| !e.is_null())
}

/// GUID from an element's `elementHeader`.
pub fn element_guid(element: &Value) -> Option<&str> {
    element.pointer("/elementHeader/guid").and_then(Value::as_str)
}

/// A named entry of an element's `properties`.
pub fn element_property<'a>(element: &'a Value, name: &str) -> Option<&'a Value> {
    element.get("properties").and_then(|p| p.get(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_response_passes_through() {
        let body = r#"{"class":"GUIDResponse","relatedHTTPCode":200,"guid":"g-1"}"#;
        let json = check_response(StatusCode::OK, body).unwrap();
        assert_eq!(guid_from(&json).unwrap(), "g-1");
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(check_response(StatusCode::OK, "").unwrap(), Value::Null);
    }

    #[test]
    fn related_code_400_is_invalid_parameter() {
        let body = json!({
            "relatedHTTPCode": 400,
            "exceptionClassName": "org.odpi.openmetadata.frameworks.connectors.ffdc.InvalidParameterException",
            "exceptionErrorMessageId": "OMAG-REPOSITORY-HANDLER-400-001",
            "exceptionErrorMessage": "The unique identifier (guid) passed is unknown"
        })
        .to_string();
        match check_response(StatusCode::OK, &body).unwrap_err() {
            EgeriaError::InvalidParameter { parameter, reason } => {
                assert_eq!(parameter, "request");
                assert!(reason.contains("OMAG-REPOSITORY-HANDLER-400-001"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_related_code_is_server_error() {
        let body = json!({"relatedHTTPCode": 65936, "exceptionErrorMessage": "garbled"}).to_string();
        match check_response(StatusCode::OK, &body).unwrap_err() {
            EgeriaError::Api(report) => assert_eq!(report.related_http_code, 500),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn related_code_403_is_not_authorized() {
        let body = json!({"relatedHTTPCode": 403, "exceptionErrorMessage": "no access"}).to_string();
        let err = check_response(StatusCode::OK, &body).unwrap_err();
        assert!(matches!(err, EgeriaError::NotAuthorized(ref r) if r.message == "no access"));
    }

    #[test]
    fn related_code_500_keeps_actions() {
        let body = json!({
            "relatedHTTPCode": 500,
            "exceptionErrorMessage": "repository down",
            "exceptionSystemAction": "The request is rejected",
            "exceptionUserAction": "Restart the server"
        })
        .to_string();
        let err = check_response(StatusCode::OK, &body).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.system_action.as_deref(), Some("The request is rejected"));
        assert_eq!(report.user_action.as_deref(), Some("Restart the server"));
        assert!(matches!(err, EgeriaError::Api(_)));
    }

    #[test]
    fn http_status_without_envelope() {
        let err = check_response(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(matches!(err, EgeriaError::NotFound(ref r) if r.message == "Not Found"));

        let err = check_response(StatusCode::UNAUTHORIZED, "bad token").unwrap_err();
        assert!(matches!(err, EgeriaError::NotAuthorized(ref r) if r.message == "bad token"));
    }

    #[test]
    fn non_json_success_is_decode_error() {
        let err = check_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, EgeriaError::Decode(_)));
    }

    #[test]
    fn missing_guid_errors() {
        assert!(guid_from(&json!({"relatedHTTPCode": 200})).is_err());
        assert!(guid_from(&json!({"guid": ""})).is_err());
    }

    #[test]
    fn elements_unwrap() {
        let items = elements_from(json!({"elements": [{"a": 1}, {"a": 2}]}));
        assert_eq!(items.len(), 2);
        assert!(elements_from(json!({"relatedHTTPCode": 200})).is_empty());
        assert!(elements_from(json!({"elements": null})).is_empty());
        assert_eq!(elements_from(json!({"elementList": [1]})), vec![json!(1)]);
    }

    #[test]
    fn element_and_header_helpers() {
        let element = element_from(json!({
            "element": {
                "elementHeader": {"guid": "loc-1"},
                "properties": {"displayName": "Amsterdam"}
            }
        }))
        .unwrap();
        assert_eq!(element_guid(&element), Some("loc-1"));
        assert_eq!(element_property(&element, "displayName"), Some(&json!("Amsterdam")));
        assert!(element_from(json!({"element": null})).is_none());
    }
}
