use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use mockall::mock;
use serde_json::json;
use timetable_api::{ApiState, build_router};
use timetable_core::{
    advisor::ScheduleAdvisor,
    errors::TimetableResult,
    models::{course::Course, suggestion::Suggestion},
    store::{DEFAULT_STORAGE_KEY, MemoryStorage, TimetableStorage, TimetableStore},
};

pub const PUBLIC_URL: &str = "https://timetable.example.com/";

mock! {
    pub Advisor {}

    #[async_trait]
    impl ScheduleAdvisor for Advisor {
        async fn suggest(
            &self,
            courses: &[Course],
            preferences: &str,
        ) -> TimetableResult<Vec<Suggestion>>;
    }
}

pub struct TestContext {
    pub state: Arc<ApiState>,
    pub server: TestServer,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_advisor(MockAdvisor::new()).await
    }

    pub async fn with_advisor(advisor: MockAdvisor) -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()), advisor).await
    }

    pub async fn with_storage(storage: Arc<dyn TimetableStorage>, advisor: MockAdvisor) -> Self {
        let store = TimetableStore::open(storage, DEFAULT_STORAGE_KEY)
            .await
            .unwrap();
        let state = Arc::new(ApiState::new(
            store,
            Arc::new(advisor),
            PUBLIC_URL,
            chrono_tz::UTC,
        ));
        let server = TestServer::new(build_router(state.clone())).unwrap();

        Self { state, server }
    }

    /// Creates a course through the API.
    pub async fn add_course(&self, name: &str, duration: u32) -> Course {
        self.server
            .post("/api/courses")
            .json(&json!({
                "name": name,
                "lecturer": "Dr. Hopper",
                "color": "teal",
                "duration": duration,
            }))
            .await
            .json::<Course>()
    }

    pub async fn assign(&self, course_id: &str, slot_id: &str) {
        self.server
            .post(&format!("/api/timetable/slots/{}", slot_id))
            .json(&json!({ "courseId": course_id }))
            .await
            .assert_status_ok();
    }
}
