use super::*;
use rstest::rstest;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.page_size, 20);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1, 20).offset(), 0);
    assert_eq!(PageRequest::new(2, 20).offset(), 20);
    assert_eq!(PageRequest::new(3, 7).offset(), 14);
}

#[test]
fn test_page_request_clamps_zero() {
    let request = PageRequest::new(0, 0);
    assert_eq!(request.page, 1);
    assert_eq!(request.page_size, 1);
}

#[test]
fn test_page_request_limit() {
    assert_eq!(PageRequest::new(1, 50).limit(), 50);
}

#[test]
fn test_page_request_deserialize_defaults() {
    let request: PageRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request, PageRequest::default());
}

#[rstest]
#[case(1, 10, 25, true)]
#[case(2, 10, 25, true)]
#[case(3, 10, 25, false)]
#[case(1, 10, 10, false)]
#[case(1, 10, 0, false)]
fn test_has_more(#[case] page: u32, #[case] page_size: u32, #[case] total: u64, #[case] expected: bool) {
    let response: PageResponse<i32> = PageResponse::new(vec![], page, page_size, total);
    assert_eq!(response.has_more, expected);
}

#[test]
fn test_paginate_slices_and_counts() {
    let items: Vec<i32> = (1..=25).collect();

    let first = paginate(items.clone(), PageRequest::new(1, 10));
    assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
    assert_eq!(first.total, 25);
    assert!(first.has_more);

    let last = paginate(items, PageRequest::new(3, 10));
    assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
    assert_eq!(last.total, 25);
    assert!(!last.has_more);
}

#[test]
fn test_paginate_past_the_end() {
    let response = paginate(vec![1, 2, 3], PageRequest::new(5, 10));
    assert!(response.items.is_empty());
    assert_eq!(response.total, 3);
    assert!(!response.has_more);
}

#[test]
fn test_map_keeps_metadata() {
    let response = paginate(vec![1, 2, 3], PageRequest::new(1, 2)).map(|n| n * 10);
    assert_eq!(response.items, vec![10, 20]);
    assert_eq!(response.total, 3);
    assert!(response.has_more);
}
