use async_trait::async_trait;
use mockall::mock;
use timetable_core::store::TimetableStorage;

// Mock storage backend for testing
mock! {
    pub Storage {}

    #[async_trait]
    impl TimetableStorage for Storage {
        async fn load(&self, key: &str) -> eyre::Result<Option<String>>;

        async fn save(&self, key: &str, value: &str) -> eyre::Result<()>;
    }
}
