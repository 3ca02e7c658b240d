use crate::{ConnectionLimits, ConnectionRegistry, WsError};

fn registry(max_total: usize) -> ConnectionRegistry {
    ConnectionRegistry::new(ConnectionLimits { max_total })
}

#[tokio::test]
async fn given_empty_registry_when_register_then_counted() {
    // Given
    let registry = registry(2);

    // When
    let id = registry
        .register(Some(String::from("test-agent")))
        .await
        .unwrap();

    // Then
    assert_eq!(registry.total_count().await, 1);
    let info = registry.unregister(id).await.unwrap();
    assert_eq!(info.connection_id, id);
    assert_eq!(info.user_agent.as_deref(), Some("test-agent"));
    assert!(info.connected_at <= chrono::Utc::now());
}

#[tokio::test]
async fn given_registry_at_limit_when_register_then_limit_error() {
    // Given
    let registry = registry(1);
    registry.register(None).await.unwrap();

    // When
    let result = registry.register(None).await;

    // Then
    assert!(matches!(
        result,
        Err(WsError::ConnectionLimitExceeded {
            current: 1,
            max: 1,
            ..
        })
    ));
}

#[tokio::test]
async fn given_registry_at_limit_when_one_unregisters_then_register_succeeds() {
    // Given
    let registry = registry(1);
    let first = registry.register(None).await.unwrap();

    // When
    registry.unregister(first).await;
    let result = registry.register(None).await;

    // Then
    assert!(result.is_ok());
    assert!(registry.unregister(first).await.is_none());
}

#[tokio::test]
async fn given_unknown_id_when_unregister_then_no_change() {
    // Given
    let registry = registry(3);
    registry.register(None).await.unwrap();

    // When
    let removed = registry.unregister(crate::ConnectionId::new()).await;

    // Then
    assert!(removed.is_none());
    assert_eq!(registry.total_count().await, 1);
}

#[tokio::test]
async fn given_cloned_registry_when_register_then_shared() {
    let registry = registry(3);
    let clone = registry.clone();

    clone.register(None).await.unwrap();

    assert_eq!(registry.total_count().await, 1);
    assert_eq!(clone.max_total(), 3);
}
