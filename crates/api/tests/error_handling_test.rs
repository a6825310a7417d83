use axum::{http::StatusCode, response::IntoResponse};
use medisys_api::middleware::error_handling::AppError;
use medisys_core::errors::BookingError;
use rstest::rstest;

#[rstest]
#[case(BookingError::NotFound("doctor".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Authentication("token".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("role".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::SlotUnavailable("taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::InvalidTimeFormat("9am".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(BookingError::InvalidDayOfWeek("Funday".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(BookingError::InvalidDuration(0), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(BookingError::InvalidTimestamp("soon".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(BookingError::Backend(eyre::eyre!("refused")), StatusCode::BAD_GATEWAY)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("disk"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[test]
fn test_eyre_report_becomes_bad_gateway() {
    let error: AppError = eyre::eyre!("timed out").into();
    assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_error_body() {
    let response = AppError(BookingError::InvalidDuration(-5)).into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        serde_json::json!({"error": "Invalid slot duration: -5 minutes"})
    );
}
