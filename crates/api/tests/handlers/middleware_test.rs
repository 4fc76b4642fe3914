use axum::http::StatusCode;
use rstest::rstest;
use timetable_api::middleware::error_handling::map_error;
use timetable_core::errors::TimetableError;

#[rstest]
#[case(TimetableError::NotFound("Course".to_string()), StatusCode::NOT_FOUND)]
#[case(TimetableError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(TimetableError::Storage(eyre::eyre!("disk full")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(TimetableError::Upstream("AI gateway error: 500".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(TimetableError::RateLimited("slow down".to_string()), StatusCode::TOO_MANY_REQUESTS)]
#[case(TimetableError::PaymentRequired("add credits".to_string()), StatusCode::PAYMENT_REQUIRED)]
#[case(TimetableError::Busy("suggestions".to_string()), StatusCode::CONFLICT)]
fn test_error_status_mapping(#[case] error: TimetableError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_error_handling_internal() {
    let error = TimetableError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
