//! Driver lifecycle integration tests
//!
//! The per-context state machine: initialize fills exactly one slot, re-init
//! is idempotent, quit releases the slot unconditionally, and construction
//! faults carry their cause.

mod common;

use std::sync::Arc;

use common::{mock_harness, test_settings};
use webharness::config::BrowserKind;
use webharness::session::{ContextId, DriverRegistry, DriverSession, MockFactory};
use webharness::Error;

#[tokio::test]
async fn every_supported_browser_kind_initializes() {
    let registry = DriverRegistry::new(Arc::new(MockFactory::new()));

    for (i, browser) in [BrowserKind::Chrome, BrowserKind::Firefox, BrowserKind::Edge]
        .into_iter()
        .enumerate()
    {
        let ctx = ContextId::new(format!("ctx-{}", i));
        let session = registry.initialize(&ctx, browser).await.unwrap();
        assert_eq!(session.browser(), browser);
        assert!(session.is_active());
    }

    assert_eq!(registry.active_count().await, 3);
}

#[test]
fn unsupported_browser_strings_fail_naming_the_allowed_set() {
    let err = "safari".parse::<BrowserKind>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedBrowser { .. }));
    assert!(err.to_string().contains("chrome, firefox, edge"));

    assert!("ie".parse::<BrowserKind>().is_err());
    assert!("".parse::<BrowserKind>().is_err());
    assert_eq!("Chrome".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
    assert_eq!("FIREFOX".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
}

#[tokio::test]
async fn reinitializing_an_active_context_returns_the_same_session() {
    let factory = Arc::new(MockFactory::new());
    let registry = DriverRegistry::new(factory.clone());
    let ctx = ContextId::new("t1");

    let first = registry.initialize(&ctx, BrowserKind::Chrome).await.unwrap();
    let second = registry.initialize(&ctx, BrowserKind::Chrome).await.unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(factory.created_count(), 1);
    assert_eq!(registry.active_count().await, 1);
}

#[tokio::test]
async fn quit_releases_the_slot_even_when_close_fails() {
    let factory = Arc::new(MockFactory::new());
    let registry = DriverRegistry::new(factory.clone());
    let ctx = ContextId::new("t1");

    registry.initialize(&ctx, BrowserKind::Chrome).await.unwrap();
    let session = factory.last_session().await.unwrap();
    session.fail_quit();

    registry.quit(&ctx).await;

    // Close reported an error, the slot is empty regardless
    assert!(!session.is_active());
    assert!(!registry.is_active(&ctx).await);
    assert!(matches!(
        registry.current(&ctx).await.unwrap_err(),
        Error::NotInitialized(_)
    ));
}

#[tokio::test]
async fn get_current_fails_before_init_and_after_quit() {
    let registry = DriverRegistry::new(Arc::new(MockFactory::new()));
    let ctx = ContextId::new("t1");

    assert!(matches!(
        registry.current(&ctx).await.unwrap_err(),
        Error::NotInitialized(_)
    ));

    registry.initialize(&ctx, BrowserKind::Chrome).await.unwrap();
    assert!(registry.current(&ctx).await.is_ok());

    registry.quit(&ctx).await;
    assert!(matches!(
        registry.current(&ctx).await.unwrap_err(),
        Error::NotInitialized(_)
    ));
}

#[tokio::test]
async fn construction_failure_is_fatal_and_wrapped() {
    let registry = DriverRegistry::new(Arc::new(MockFactory::failing()));
    let ctx = ContextId::new("t1");

    let err = registry.initialize(&ctx, BrowserKind::Firefox).await.unwrap_err();
    match err {
        Error::DriverInit { ref browser, .. } => assert_eq!(browser, "firefox"),
        other => panic!("expected DriverInit, got {:?}", other),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert!(!registry.is_active(&ctx).await);
}

#[tokio::test]
async fn parallel_contexts_do_not_interfere() {
    let registry = Arc::new(DriverRegistry::new(Arc::new(MockFactory::new())));

    let mut handles = Vec::new();
    for i in 0..10 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            let ctx = ContextId::new(format!("worker-{}", i));
            let session = registry.initialize(&ctx, BrowserKind::Chrome).await?;
            let found = registry.current(&ctx).await?;
            assert_eq!(session.id(), found.id());
            registry.quit(&ctx).await;
            Ok::<_, Error>(())
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(registry.active_count().await, 0);
}

#[tokio::test]
async fn harness_runs_one_session_per_test() {
    let (harness, factory) = mock_harness();

    let test = harness.start_test("alert_with_ok").await.unwrap();
    assert_eq!(factory.created_count(), 1);
    assert_eq!(test.session().browser(), test_settings().browser);

    let ctx = test.context_id().clone();
    test.finish().await;
    assert!(!harness.registry().is_active(&ctx).await);

    let test2 = harness.start_test("alert_with_ok_cancel").await.unwrap();
    assert_eq!(factory.created_count(), 2);
    test2.finish().await;
}
