//! Integration test: client construction through the registry
//!
//! Exercises the factory contract with mock factories: the configuration
//! reaches the factory untouched, the handle is a singleton, and factory
//! failures come back unmodified.

mod common;

use base44::{create_client, ClientConfiguration, ClientError, ClientRegistry};
use common::{FailingFactory, MockError, MockFactory};
use std::sync::Arc;

const APP_ID: &str = "6862a46146d51035d8059d9d";

#[test]
fn test_factory_receives_exact_configuration() {
    let registry = ClientRegistry::new();
    let factory = MockFactory::new(APP_ID, true);

    let handle = registry
        .initialize(&factory, ClientConfiguration::new(APP_ID, true))
        .unwrap();

    let calls = factory.calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].application_id(), APP_ID);
    assert!(calls[0].requires_auth());
    assert!(Arc::ptr_eq(&handle, &factory.stub));
}

#[test]
fn test_singleton_handle() {
    let registry = ClientRegistry::new();
    let factory = MockFactory::new(APP_ID, true);
    let config = ClientConfiguration::new(APP_ID, true);

    let first = registry.initialize(&factory, config.clone()).unwrap();
    for _ in 0..5 {
        let again = registry.initialize(&factory, config.clone()).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert!(Arc::ptr_eq(&first, &registry.get().unwrap()));
    }
    assert_eq!(factory.call_count(), 1);
}

#[test]
fn test_factory_error_propagates_unmodified() {
    let registry = ClientRegistry::new();
    let expected = MockError {
        code: 503,
        message: "service unavailable".to_string(),
    };

    let err = registry
        .initialize(
            &FailingFactory(expected.clone()),
            ClientConfiguration::new(APP_ID, true),
        )
        .err()
        .unwrap();

    assert_eq!(err, expected);
    assert!(registry.get().is_none());
    assert!(registry.handle().is_err());
}

#[tokio::test]
async fn test_real_factory_refuses_unauthenticated_calls() {
    let handle = create_client(&ClientConfiguration::new(APP_ID, true)).unwrap();

    assert!(handle.requires_auth());
    assert!(!handle.is_authenticated());
    assert!(matches!(
        handle.me().await,
        Err(ClientError::AuthenticationRequired { .. })
    ));
}
