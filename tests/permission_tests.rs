mod common;

use common::{controller_with, join_payload, CountingOracle, FakeFactory};
use meeting_bridge::{
    AuthorizationStatus, BridgeError, ConstraintValue, ControllerState, ErrorKind,
    MediaConstraint, PermissionNegotiator, PermissionState, PermissionValue,
};
use std::sync::Arc;

fn negotiator(oracle: &Arc<CountingOracle>) -> PermissionNegotiator {
    PermissionNegotiator::new(oracle.clone())
}

#[test]
fn test_get_permissions_authorized_audio() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true));
    let state = negotiator(&oracle).get_permissions(br#"{"audio": true}"#).unwrap();

    assert_eq!(state.audio, PermissionValue::Granted);
    assert_eq!(state.video, PermissionValue::NotApplicable);
    assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"audio":true}"#);
}

#[test]
fn test_get_permissions_status_mapping() {
    let cases = [
        (AuthorizationStatus::NotDetermined, PermissionValue::NotApplicable),
        (AuthorizationStatus::Restricted, PermissionValue::Denied),
        (AuthorizationStatus::Denied, PermissionValue::Denied),
        (AuthorizationStatus::Authorized, PermissionValue::Granted),
        (AuthorizationStatus::Unknown, PermissionValue::NotApplicable),
    ];

    for (status, expected) in cases {
        let oracle = Arc::new(CountingOracle::new(status, true));
        let state = negotiator(&oracle).get_permissions(br#"{"audio": true}"#).unwrap();
        assert_eq!(state.audio, expected, "status {:?}", status);
    }
}

#[test]
fn test_get_permissions_skips_oracle_unless_requested_on() {
    for payload in [&br#"{}"#[..], br#"{"audio": false}"#, br#"{"audio": null, "video": false}"#] {
        let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true));
        let state = negotiator(&oracle).get_permissions(payload).unwrap();

        assert_eq!(state, PermissionState::default());
        assert_eq!(oracle.query_count(), 0, "oracle consulted for {:?}", payload);
    }
}

#[test]
fn test_get_permissions_video_query_is_supported() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Denied, true));
    let state = negotiator(&oracle).get_permissions(br#"{"video": true}"#).unwrap();

    assert_eq!(state.audio, PermissionValue::NotApplicable);
    assert_eq!(state.video, PermissionValue::Granted);
    assert_eq!(oracle.query_count(), 1);
}

#[tokio::test]
async fn test_request_video_is_not_implemented() {
    for payload in [
        &br#"{"video": true}"#[..],
        br#"{"audio": true, "video": true}"#,
        br#"{"audio": false, "video": true}"#,
    ] {
        let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::NotDetermined, true));
        let err = negotiator(&oracle).request_permissions(payload).await.unwrap_err();

        assert_eq!(
            err,
            BridgeError::NotImplemented("Not Implemented for Video Permission".to_string())
        );
        assert_eq!(oracle.request_count(), 0);
    }
}

#[tokio::test]
async fn test_request_without_audio_resolves_denied_without_prompt() {
    for payload in [&br#"{}"#[..], br#"{"audio": false}"#, br#"{"video": false}"#] {
        let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true));
        let state = negotiator(&oracle).request_permissions(payload).await.unwrap();

        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"audio":false,"video":false}"#);
        assert_eq!(oracle.request_count(), 0);
        assert_eq!(oracle.query_count(), 0);
    }
}

#[tokio::test]
async fn test_request_audio_prompts_once() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::NotDetermined, true));
    let constraint = MediaConstraint::new(ConstraintValue::RequestedOn, ConstraintValue::RequestedOff);

    let state = negotiator(&oracle).request(constraint).await.unwrap();
    assert_eq!(state.audio, PermissionValue::Granted);
    assert_eq!(state.video, PermissionValue::Denied);
    assert_eq!(oracle.request_count(), 1);

    let denying = Arc::new(CountingOracle::new(AuthorizationStatus::NotDetermined, false));
    let state = negotiator(&denying).request(constraint).await.unwrap();
    assert_eq!(state.audio, PermissionValue::Denied);
}

#[tokio::test]
async fn test_concurrent_requests_are_not_coalesced() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::NotDetermined, true));
    let negotiator = negotiator(&oracle);

    let (first, second) = futures::future::join(
        negotiator.request_permissions(br#"{"audio": true}"#),
        negotiator.request_permissions(br#"{"audio": true}"#),
    )
    .await;

    assert!(first.is_ok() && second.is_ok());
    assert_eq!(oracle.request_count(), 2);
}

#[tokio::test]
async fn test_malformed_constraint_is_parse_error_and_keeps_session() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true));
    let mut controller = controller_with(FakeFactory::default(), oracle.clone());
    controller.configure(&join_payload("A")).unwrap();
    controller.start().await.unwrap();

    for payload in [&b"not json"[..], br#"{"audio": "yes"}"#, b"[true]"] {
        let err = controller.get_permissions(payload).unwrap_err();
        assert_eq!(err, BridgeError::Parse("Wrong Constraint".to_string()));

        let err = controller.request_permissions(payload).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    assert_eq!(controller.state(), ControllerState::Started);
    assert_eq!(oracle.query_count(), 0);
    assert_eq!(oracle.request_count(), 0);
}

#[tokio::test]
async fn test_sequence_constraint_never_reaches_oracle() {
    let oracle = Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true));
    let negotiator = negotiator(&oracle);

    let err = negotiator.get_permissions(b"[true]").unwrap_err();
    assert_eq!(err, BridgeError::Parse("Wrong Constraint".to_string()));

    let err = negotiator.request_permissions(b"[true, false]").await.unwrap_err();
    assert_eq!(err, BridgeError::Parse("Wrong Constraint".to_string()));

    assert_eq!(oracle.query_count(), 0);
    assert_eq!(oracle.request_count(), 0, "A malformed constraint must not prompt");
}
