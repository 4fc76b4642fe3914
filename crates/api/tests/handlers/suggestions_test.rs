use axum::http::StatusCode;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_core::errors::TimetableError;
use timetable_core::models::suggestion::{SuggestScheduleResponse, Suggestion};
use timetable_core::models::time_slot::Day;
use timetable_core::models::timetable::TimetableSnapshot;

use crate::test_utils::{MockAdvisor, TestContext};

fn suggestion(course_id: &str, day: Day, start_time: u8) -> Suggestion {
    Suggestion {
        course_id: course_id.to_string(),
        day,
        start_time,
        reason: Sentence(3..8).fake(),
    }
}

#[tokio::test]
async fn test_stored_courses_are_sent_to_advisor() {
    let mut advisor = MockAdvisor::new();
    advisor
        .expect_suggest()
        .withf(|courses, preferences| {
            courses.len() == 1 && courses[0].name == "Physics" && preferences.trim() == "mornings only"
        })
        .times(1)
        .returning(|courses, _| Ok(vec![suggestion(&courses[0].id, Day::Monday, 8)]));
    let ctx = TestContext::with_advisor(advisor).await;
    let course = ctx.add_course("Physics", 2).await;

    let response = ctx
        .server
        .post("/api/timetable/suggestions")
        .json(&json!({ "preferences": "mornings only" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SuggestScheduleResponse>();
    assert_eq!(body.suggestions.len(), 1);
    assert_eq!(body.suggestions[0].course_id, course.id);
    assert_eq!(body.suggestions[0].slot_id(), "Monday-8");
}

#[tokio::test]
async fn test_suggestions_need_courses() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/timetable/suggestions")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: Please add some courses first" })
    );
}

#[tokio::test]
async fn test_stateless_proxy_uses_request_courses() {
    let mut advisor = MockAdvisor::new();
    advisor
        .expect_suggest()
        .withf(|courses, preferences| courses.len() == 2 && preferences.is_empty())
        .returning(|_, _| Ok(Vec::new()));
    let ctx = TestContext::with_advisor(advisor).await;

    let response = ctx
        .server
        .post("/api/suggest-schedule")
        .json(&json!({
            "courses": [
                { "id": "c1", "name": "Art", "lecturer": "Ms. Kahlo", "color": "pink", "duration": 1 },
                { "id": "c2", "name": "Music", "lecturer": "Mr. Bach", "duration": 2 },
            ],
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "suggestions": [] }));
}

#[tokio::test]
async fn test_stateless_proxy_forwards_empty_course_list() {
    let mut advisor = MockAdvisor::new();
    advisor
        .expect_suggest()
        .withf(|courses, _| courses.is_empty())
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let ctx = TestContext::with_advisor(advisor).await;

    let response = ctx
        .server
        .post("/api/suggest-schedule")
        .json(&json!({ "courses": [] }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "suggestions": [] }));
}

#[tokio::test]
async fn test_concurrent_request_is_busy() {
    let ctx = TestContext::new().await;
    ctx.add_course("Physics", 1).await;
    let _permit = ctx.state.suggest_gate.try_acquire().unwrap();

    let response = ctx
        .server
        .post("/api/timetable/suggestions")
        .json(&json!({ "preferences": "" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_rate_limit_is_forwarded() {
    let mut advisor = MockAdvisor::new();
    advisor.expect_suggest().returning(|_, _| {
        Err(TimetableError::RateLimited(
            "Rate limit exceeded. Please try again later.".to_string(),
        ))
    });
    let ctx = TestContext::with_advisor(advisor).await;
    ctx.add_course("Physics", 1).await;

    let response = ctx
        .server
        .post("/api/timetable/suggestions")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Rate limit exceeded. Please try again later." })
    );
}

#[tokio::test]
async fn test_gateway_failure_message_is_kept() {
    let mut advisor = MockAdvisor::new();
    advisor
        .expect_suggest()
        .returning(|_, _| Err(TimetableError::Upstream("AI gateway error: 503".to_string())));
    let ctx = TestContext::with_advisor(advisor).await;
    ctx.add_course("Physics", 1).await;

    let response = ctx
        .server
        .post("/api/timetable/suggestions")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "AI gateway error: 503" })
    );
}

#[tokio::test]
async fn test_apply_suggestions_assigns_slots() {
    let ctx = TestContext::new().await;
    let physics = ctx.add_course("Physics", 2).await;
    let poetry = ctx.add_course("Poetry", 1).await;

    let snapshot = ctx
        .server
        .post("/api/timetable/suggestions/apply")
        .json(&json!({
            "suggestions": [
                suggestion(&physics.id, Day::Tuesday, 10),
                suggestion(&poetry.id, Day::Friday, 18),
                suggestion("unknown", Day::Monday, 7),
            ],
        }))
        .await
        .json::<TimetableSnapshot>();

    let occupied: Vec<(&str, &str)> = snapshot
        .slots
        .iter()
        .filter_map(|slot| Some((slot.id.as_str(), slot.course_id.as_deref()?)))
        .collect();
    assert_eq!(
        occupied,
        vec![
            ("Tuesday-10", physics.id.as_str()),
            ("Tuesday-11", physics.id.as_str()),
            ("Friday-18", poetry.id.as_str()),
        ]
    );
}
