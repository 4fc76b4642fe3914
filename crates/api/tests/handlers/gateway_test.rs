use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_api::{advisor::GatewayAdvisor, config::GatewayConfig};
use timetable_core::{
    advisor::ScheduleAdvisor,
    errors::TimetableError,
    models::{
        course::{Course, CourseColor},
        time_slot::Day,
    },
};
use tokio::net::TcpListener;

const API_KEY: &str = "test-key";

/// Serves a canned chat completions endpoint on an ephemeral port.
async fn spawn_gateway(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let body = body.clone();
            async move {
                let authorized = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    == Some("Bearer test-key");
                let well_formed = request["messages"][0]["role"] == "system"
                    && request["model"] == "test-model";
                if !authorized || !well_formed {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                (status, Json(body))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

fn advisor(base_url: String, api_key: Option<&str>) -> GatewayAdvisor {
    GatewayAdvisor::new(GatewayConfig {
        base_url,
        api_key: api_key.map(str::to_string),
        model: "test-model".to_string(),
        request_timeout: 5,
    })
    .unwrap()
}

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn courses() -> Vec<Course> {
    vec![Course {
        id: "c1".to_string(),
        name: "Statistics".to_string(),
        lecturer: "Dr. Bayes".to_string(),
        color: CourseColor::Green,
        duration: 2,
    }]
}

#[test_log::test(tokio::test)]
async fn test_suggestions_are_parsed() {
    let content = r#"[{"courseId":"c1","day":"Thursday","startTime":10,"reason":"Late morning"},{"day":"Monday"}]"#;
    let url = spawn_gateway(StatusCode::OK, completion(content)).await;

    let suggestions = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].day, Day::Thursday);
    assert_eq!(suggestions[0].start_time, 10);
    assert_eq!(suggestions[0].reason, "Late morning");
}

#[test_log::test(tokio::test)]
async fn test_fenced_reply_is_accepted() {
    let content = "Here you go:\n```json\n[{\"courseId\":\"c1\",\"day\":\"Friday\",\"startTime\":14}]\n```";
    let url = spawn_gateway(StatusCode::OK, completion(content)).await;

    let suggestions = advisor(url, Some(API_KEY))
        .suggest(&courses(), "afternoons")
        .await
        .unwrap();

    assert_eq!(suggestions[0].slot_id(), "Friday-14");
    assert_eq!(suggestions[0].reason, "");
}

#[test_log::test(tokio::test)]
async fn test_rate_limit_status() {
    let url = spawn_gateway(StatusCode::TOO_MANY_REQUESTS, json!({})).await;

    let error = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(
        matches!(&error, TimetableError::RateLimited(message) if message == "Rate limit exceeded. Please try again later.")
    );
}

#[test_log::test(tokio::test)]
async fn test_payment_required_status() {
    let url = spawn_gateway(StatusCode::PAYMENT_REQUIRED, json!({})).await;

    let error = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(matches!(error, TimetableError::PaymentRequired(_)));
}

#[test_log::test(tokio::test)]
async fn test_other_failure_status() {
    let url = spawn_gateway(StatusCode::BAD_GATEWAY, json!({ "error": "down" })).await;

    let error = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(matches!(&error, TimetableError::Upstream(message) if message == "AI gateway error: 502"));
}

#[test_log::test(tokio::test)]
async fn test_non_array_reply_is_invalid() {
    let url = spawn_gateway(StatusCode::OK, completion(r#"{"courseId":"c1"}"#)).await;

    let error = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(matches!(&error, TimetableError::Upstream(message) if message == "Invalid response format"));
}

#[test_log::test(tokio::test)]
async fn test_unparseable_reply() {
    let url = spawn_gateway(StatusCode::OK, json!({ "choices": [] })).await;

    let error = advisor(url, Some(API_KEY))
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(matches!(&error, TimetableError::Upstream(message) if message == "Failed to parse AI response"));
}

#[tokio::test]
async fn test_missing_api_key() {
    let error = advisor("http://127.0.0.1:9/".to_string(), None)
        .suggest(&courses(), "")
        .await
        .unwrap_err();

    assert!(
        matches!(&error, TimetableError::Upstream(message) if message == "AI gateway API key is not configured")
    );
}
