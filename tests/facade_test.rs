//! Page façade integration tests
//!
//! Wait faults keep their type, window round-trips restore the original
//! window, and the end-to-end setup/navigate/verify/teardown flow works over
//! a full harness.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{mock_harness_with, settings_with};
use webharness::config::SettingsLayer;
use webharness::page::{Locator, PageActions};
use webharness::session::{DriverSession, MockElement, MockSession, WindowId};
use webharness::Error;

fn facade_over(session: &Arc<MockSession>) -> PageActions {
    let session: Arc<dyn DriverSession> = session.clone();
    PageActions::new(session, &common::test_settings())
        .with_element_wait(Duration::from_millis(400))
}

#[tokio::test]
async fn visibility_timeout_is_not_a_generic_fault() {
    let session = Arc::new(MockSession::new());
    let facade = facade_over(&session);
    let never_visible = Locator::id("tooltip");
    session.put_element(&never_visible, MockElement::hidden()).await;

    let err = facade.find_visible(&never_visible).await.unwrap_err();
    match err {
        Error::ElementNotVisible { locator, .. } => assert_eq!(locator, "id=tooltip"),
        other => panic!("expected ElementNotVisible, got {:?}", other),
    }
}

#[tokio::test]
async fn clickability_and_visibility_faults_are_distinct() {
    let session = Arc::new(MockSession::new());
    let facade = facade_over(&session);

    let visible_but_disabled = Locator::id("disabled-button");
    let mut element = MockElement::visible("Submit");
    element.clickable = false;
    session.put_element(&visible_but_disabled, element).await;

    assert!(facade.find_visible(&visible_but_disabled).await.is_ok());
    assert!(matches!(
        facade.find_clickable(&visible_but_disabled).await.unwrap_err(),
        Error::ElementNotClickable { .. }
    ));
}

#[tokio::test]
async fn window_round_trip_closes_every_extra_window() {
    let session = Arc::new(MockSession::new());
    let facade = facade_over(&session);

    session.open_window("w-2").await;
    session.open_window("w-3").await;
    session.open_window("w-4").await;

    facade.switch_to_new_window().await.unwrap();
    facade.switch_back_to_original().await.unwrap();

    // Exactly one window remains and it is the original
    assert_eq!(session.open_window_count().await, 1);
    assert_eq!(
        session.current_window().await.unwrap(),
        WindowId("w-main".to_string())
    );
    assert_eq!(session.closed_windows().await.len(), 3);
}

#[tokio::test]
async fn switch_back_without_a_recorded_original_is_a_no_op() {
    let session = Arc::new(MockSession::new());
    let facade = facade_over(&session);
    session.open_window("w-2").await;

    facade.switch_back_to_original().await.unwrap();
    assert_eq!(session.open_window_count().await, 2);
}

#[tokio::test]
async fn assertion_faults_propagate_like_infrastructure_faults_but_stay_typed() {
    let session = Arc::new(MockSession::new());
    let facade = facade_over(&session);

    let infra = facade.find_visible(&Locator::id("gone")).await.unwrap_err();
    assert!(!infra.is_assertion());

    let expectation = facade.verify_true(false, "should hold").unwrap_err();
    assert!(expectation.is_assertion());
}

#[tokio::test]
async fn end_to_end_mock_scenario() {
    // initialize chrome headless, navigate, verify title, quit, slot empty
    let settings = settings_with(SettingsLayer {
        browser: Some("chrome".to_string()),
        headless: Some(true),
        ..Default::default()
    });
    assert!(settings.headless);

    let (harness, factory) = mock_harness_with(settings);
    let test = harness.start_test("end_to_end").await.unwrap();
    let ctx = test.context_id().clone();

    let mock = factory.last_session().await.unwrap();
    mock.set_title("Example Domain").await;

    let actions = test.actions().with_element_wait(Duration::from_millis(400));
    actions.open("https://example.com").await.unwrap();
    actions.verify_title("Example Domain").await.unwrap();

    assert_eq!(mock.visited().await, vec!["https://example.com"]);

    test.finish().await;
    assert!(!harness.registry().is_active(&ctx).await);
    assert!(!mock.is_active());
}
