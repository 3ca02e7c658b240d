use crate::BoundedBuffer;

#[test]
fn given_full_buffer_when_pushed_then_oldest_evicted() {
    // Given
    let mut buffer = BoundedBuffer::new(3);
    for element in ["A", "B", "C"] {
        assert_eq!(buffer.push(element), 0);
    }

    // When
    let evicted = buffer.push("D");

    // Then
    assert_eq!(evicted, 1);
    assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["B", "C", "D"]);
}

#[test]
fn given_elements_when_popped_then_fifo_order() {
    let mut buffer = BoundedBuffer::new(4);
    buffer.push(1);
    buffer.push(2);
    buffer.push(3);

    assert_eq!(buffer.pop(), Some(1));
    assert_eq!(buffer.pop(), Some(2));
    assert_eq!(buffer.pop(), Some(3));
    assert_eq!(buffer.pop(), None);
}

#[test]
fn given_backlog_when_cleared_then_count_returned_and_empty() {
    let mut buffer = BoundedBuffer::new(5);
    buffer.push("x");
    buffer.push("y");

    assert_eq!(buffer.clear(), 2);
    assert!(buffer.is_empty());
}

#[test]
fn given_zero_capacity_when_created_then_clamped_to_one() {
    let mut buffer = BoundedBuffer::new(0);
    buffer.push("a");
    buffer.push("b");

    assert_eq!(buffer.capacity(), 1);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.pop(), Some("b"));
}
