//! End-to-end tests: core services over the REST remote store against a mock
//! backend.

mod support;

use std::sync::Arc;

use serde_json::json;
use shiftline_core::{AdminService, AuthService, ShiftTracker, TokenStore};
use shiftline_domain::constants::{MSG_END_SHIFT_FAILED, MSG_LOGIN_FAILED};
use shiftline_domain::{BreakType, Position, ShiftStatus, ShiftlineError};
use shiftline_infra::StaticPositionProvider;
use support::{token_for, TestStack};
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const FIX: Position = Position { latitude: 52.52, longitude: 13.405, accuracy: 5.0 };

fn tracker(stack: &TestStack) -> ShiftTracker {
    ShiftTracker::new(stack.remote.clone(), Arc::new(StaticPositionProvider::new(FIX)))
}

fn location() -> serde_json::Value {
    json!({ "latitude": 52.52, "longitude": 13.405, "accuracy": 5.0 })
}

fn open_shift_json() -> serde_json::Value {
    json!({
        "_id": "s1",
        "startTime": "2024-03-12T09:00:00Z",
        "onBreak": false,
        "breaks": [],
        "location": location()
    })
}

async fn mount_stats(stack: &TestStack) {
    Mock::given(method("GET"))
        .and(path("/api/shifts/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "today": 3.5, "weekly": 20.25, "monthly": 80.0 })),
        )
        .mount(&stack.server)
        .await;
}

#[tokio::test]
async fn login_posts_credentials_and_persists_token() {
    let stack = TestStack::new().await;
    let token = token_for("employee");
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .expect(1)
        .mount(&stack.server)
        .await;

    let auth = AuthService::new(stack.remote.clone(), stack.session.clone());
    let claims = auth.login("ada@example.com", "secret").await.unwrap();

    assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
    assert_eq!(stack.store.load().unwrap(), Some(token));
}

#[tokio::test]
async fn login_rejections_surface_message_or_fallback() {
    let stack = TestStack::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "wrong1" })))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&stack.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "wrong2" })))
        .respond_with(ResponseTemplate::new(400))
        .mount(&stack.server)
        .await;

    let auth = AuthService::new(stack.remote.clone(), stack.session.clone());

    let err = auth.login("ada@example.com", "wrong1").await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.display_message(MSG_LOGIN_FAILED), "Invalid credentials");

    let err = auth.login("ada@example.com", "wrong2").await.unwrap_err();
    assert_eq!(err.display_message(MSG_LOGIN_FAILED), "Login failed");
    assert!(!stack.session.is_authenticated());
}

#[tokio::test]
async fn no_open_shift_reads_as_inactive() {
    let stack = TestStack::signed_in("employee").await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/current"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&stack.server)
        .await;

    let tracker = tracker(&stack);
    assert_eq!(tracker.load_current_shift().await.unwrap(), ShiftStatus::Inactive);
    assert_eq!(tracker.snapshot().current_shift, None);
}

#[tokio::test]
async fn start_break_and_end_wire_format() {
    let stack = TestStack::signed_in("employee").await;
    mount_stats(&stack).await;

    Mock::given(method("POST"))
        .and(path("/api/shifts/start"))
        .and(body_json(json!({ "location": location() })))
        .respond_with(ResponseTemplate::new(201).set_body_json(open_shift_json()))
        .expect(1)
        .mount(&stack.server)
        .await;

    let mut on_break = open_shift_json();
    on_break["onBreak"] = json!(true);
    on_break["breakType"] = json!("SHORT");
    on_break["breaks"] = json!([{ "startTime": "2024-03-12T11:00:00Z" }]);
    Mock::given(method("POST"))
        .and(path("/api/shifts/break/start"))
        .and(body_json(json!({ "type": "SHORT", "location": location() })))
        .respond_with(ResponseTemplate::new(200).set_body_json(on_break))
        .expect(1)
        .mount(&stack.server)
        .await;

    let tracker = tracker(&stack);
    let state = tracker.start_shift().await.unwrap();
    assert_eq!(state.status, ShiftStatus::Active);
    assert_eq!(state.current_shift.as_ref().unwrap().id, "s1");
    assert_eq!(state.stats.weekly, 20.25);

    let state = tracker.start_break(BreakType::Short).await.unwrap();
    assert_eq!(state.status, ShiftStatus::Break);
    assert_eq!(state.break_type, Some(BreakType::Short));
    assert!(state.current_shift.as_ref().unwrap().open_break().is_some());
}

#[tokio::test]
async fn rejected_end_shift_keeps_backend_message() {
    let stack = TestStack::signed_in("employee").await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_shift_json()))
        .mount(&stack.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/shifts/end"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Please end your break first" })),
        )
        .up_to_n_times(1)
        .mount(&stack.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/shifts/end"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&stack.server)
        .await;

    let tracker = tracker(&stack);
    tracker.load_current_shift().await.unwrap();

    let err = tracker.end_shift().await.unwrap_err();
    assert_eq!(err, ShiftlineError::Remote("Please end your break first".into()));
    let state = tracker.snapshot();
    assert_eq!(state.error.as_deref(), Some("Please end your break first"));
    assert_eq!(state.status, ShiftStatus::Active);

    tracker.end_shift().await.unwrap_err();
    assert_eq!(tracker.snapshot().error.as_deref(), Some(MSG_END_SHIFT_FAILED));
}

#[tokio::test]
async fn history_query_and_payload_shapes() {
    let stack = TestStack::signed_in("employee").await;
    let mut closed = open_shift_json();
    closed["endTime"] = json!("2024-03-12T17:00:00Z");

    Mock::given(method("GET"))
        .and(path("/api/shifts/history"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "shifts": [closed], "pages": 4 })),
        )
        .mount(&stack.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/history"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([closed.clone(), closed])))
        .mount(&stack.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/history"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shifts": "oops" })))
        .mount(&stack.server)
        .await;

    let tracker = tracker(&stack);

    let page = tracker.fetch_history(2, 5).await.unwrap();
    assert_eq!((page.shifts.len(), page.page, page.pages), (1, 2, 4));
    assert!(page.shifts[0].end_time.is_some());

    let page = tracker.fetch_history(1, 5).await.unwrap();
    assert_eq!((page.shifts.len(), page.pages), (2, 1));

    let page = tracker.fetch_history(3, 5).await.unwrap();
    assert!(page.shifts.is_empty());
    assert_eq!(page.pages, 1);
}

#[tokio::test]
async fn unauthorized_response_signs_out() {
    let stack = TestStack::signed_in("employee").await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/current"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&stack.server)
        .await;

    let tracker = tracker(&stack);
    let err = tracker.load_current_shift().await.unwrap_err();

    assert!(err.is_auth());
    assert!(!stack.session.is_authenticated());
    assert_eq!(stack.store.load().unwrap(), None);
    assert_eq!(tracker.snapshot().error.as_deref(), Some("Token expired"));
}

#[tokio::test]
async fn admin_listing_requires_admin_and_tolerates_odd_payloads() {
    let employee_stack = TestStack::signed_in("employee").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&employee_stack.server)
        .await;
    let admin = AdminService::new(employee_stack.remote.clone(), employee_stack.session.clone());
    assert!(admin.fetch_employees().await.unwrap_err().is_auth());

    let admin_stack = TestStack::signed_in("admin").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "unexpected" })))
        .mount(&admin_stack.server)
        .await;
    let mut owned = open_shift_json();
    owned["employeeId"] = json!("e1");
    Mock::given(method("GET"))
        .and(path("/api/admin/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shifts": [owned] })))
        .mount(&admin_stack.server)
        .await;

    let admin = AdminService::new(admin_stack.remote.clone(), admin_stack.session.clone());
    let overview = admin.overview().await.unwrap();
    assert!(overview.employees.is_empty());
    assert_eq!(overview.shifts.len(), 1);
    assert_eq!(overview.shift_owner(&overview.shifts[0]), "Unknown");
}

#[tokio::test]
async fn malformed_listings_degrade_to_empty() {
    let stack = TestStack::signed_in("admin").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "_id": 5, "name": "x" }])))
        .mount(&stack.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&stack.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&stack.server)
        .await;

    let admin = AdminService::new(stack.remote.clone(), stack.session.clone());
    assert!(admin.fetch_employees().await.unwrap().is_empty());
    assert!(admin.fetch_all_shifts().await.unwrap().is_empty());

    let tracker = tracker(&stack);
    let page = tracker.fetch_history(1, 10).await.unwrap();
    assert!(page.shifts.is_empty());
    assert_eq!(page.pages, 1);
    assert_eq!(tracker.snapshot().error, None);
}

#[tokio::test]
async fn undecodable_current_shift_is_malformed() {
    let stack = TestStack::signed_in("employee").await;
    Mock::given(method("GET"))
        .and(path("/api/shifts/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&stack.server)
        .await;

    let err = tracker(&stack).load_current_shift().await.unwrap_err();
    assert!(matches!(err, ShiftlineError::MalformedResponse(_)), "{err:?}");
}
