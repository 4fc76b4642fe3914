use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_core::models::course::{Course, CourseColor};
use timetable_core::models::timetable::TimetableSnapshot;
use timetable_db::mock::storage::MockStorage;

use crate::test_utils::{MockAdvisor, TestContext};

#[tokio::test]
async fn test_create_course_defaults_color() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({ "name": "Compilers", "lecturer": "Dr. Aho", "duration": 2 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let course = response.json::<Course>();
    assert_eq!(course.name, "Compilers");
    assert_eq!(course.color, CourseColor::Blue);
    assert_eq!(course.duration, 2);
    assert!(!course.id.is_empty());

    let courses = ctx.server.get("/api/courses").await.json::<Vec<Course>>();
    assert_eq!(courses, vec![course]);
}

#[tokio::test]
async fn test_create_course_rejects_zero_duration() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({ "name": "Compilers", "lecturer": "Dr. Aho", "duration": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: Course duration must be at least 1 hour" })
    );
}

#[tokio::test]
async fn test_create_course_rejects_blank_name() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({ "name": "  ", "lecturer": "Dr. Aho", "duration": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_course_rejects_duration_longer_than_a_day() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({ "name": "Marathon", "lecturer": "Dr. Aho", "duration": 4294967295u32 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: Course duration cannot exceed 12 hours" })
    );
}

#[tokio::test]
async fn test_update_course_rejects_duration_longer_than_a_day() {
    let ctx = TestContext::new().await;
    let course = ctx.add_course("Databases", 2).await;

    let response = ctx
        .server
        .put(&format!("/api/courses/{}", course.id))
        .json(&json!({ "duration": 13 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let courses = ctx.server.get("/api/courses").await.json::<Vec<Course>>();
    assert_eq!(courses, vec![course]);
}

#[tokio::test]
async fn test_update_course_merges_fields() {
    let ctx = TestContext::new().await;
    let course = ctx.add_course("Databases", 2).await;

    let response = ctx
        .server
        .put(&format!("/api/courses/{}", course.id))
        .json(&json!({ "lecturer": "Dr. Codd", "color": "red" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Course>(),
        Course {
            lecturer: "Dr. Codd".to_string(),
            color: CourseColor::Red,
            ..course
        }
    );
}

#[tokio::test]
async fn test_update_unknown_course_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/api/courses/missing")
        .json(&json!({ "name": "Renamed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_course_clears_its_slots() {
    let ctx = TestContext::new().await;
    let course = ctx.add_course("Networks", 2).await;
    ctx.assign(&course.id, "Thursday-13").await;

    let response = ctx
        .server
        .delete(&format!("/api/courses/{}", course.id))
        .await;
    assert_eq!(response.json::<Value>(), json!({ "deleted": true }));

    let snapshot = ctx.server.get("/api/timetable").await.json::<TimetableSnapshot>();
    assert!(snapshot.courses.is_empty());
    assert!(snapshot.slots.iter().all(|slot| slot.course_id.is_none()));

    let again = ctx
        .server
        .delete(&format!("/api/courses/{}", course.id))
        .await;
    assert_eq!(again.json::<Value>(), json!({ "deleted": false }));
}

#[tokio::test]
async fn test_failed_write_is_reported() {
    let mut storage = MockStorage::new();
    storage.expect_load().returning(|_| Ok(None));
    storage
        .expect_save()
        .returning(|_, _| Err(eyre::eyre!("disk full")));
    let ctx = TestContext::with_storage(Arc::new(storage), MockAdvisor::new()).await;

    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({ "name": "Compilers", "lecturer": "Dr. Aho", "duration": 1 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Storage error"), "{}", error);

    let courses = ctx.server.get("/api/courses").await.json::<Vec<Course>>();
    assert!(courses.is_empty());
}
