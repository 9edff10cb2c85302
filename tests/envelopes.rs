use bord_model::envelope::total_pages;
use bord_model::{
    paginate, ApiResponse, ModelError, PageRequest, PaginatedResponse, Pagination, Post, Validate,
};
use serde_json::json;

#[test]
fn total_pages_is_ceiling_of_total_over_limit() {
    assert_eq!(total_pages(95, 20), 5);
    assert_eq!(total_pages(100, 20), 5);
    assert_eq!(total_pages(101, 20), 6);
    assert_eq!(total_pages(0, 20), 0);
    assert_eq!(total_pages(1, 1), 1);
}

#[test]
fn page_range_for_ninety_five_items() {
    for page in 0..=5 {
        let pagination = Pagination::new(page, 20, 95).unwrap();
        assert_eq!(pagination.total_pages, 5);
    }
    let err = Pagination::new(6, 20, 95).unwrap_err();
    assert!(matches!(err, ModelError::PageOutOfRange { page: 6, total_pages: 5 }));

    let pagination = Pagination::new(5, 20, 95).unwrap();
    assert!(pagination.is_valid_page(0));
    assert!(pagination.is_valid_page(5));
    assert!(!pagination.is_valid_page(6));
    assert_eq!(pagination.expected_len(), 15);
    assert!(!pagination.has_next());
    assert!(pagination.has_previous());
}

#[test]
fn zero_limit_is_rejected() {
    assert!(Pagination::new(0, 0, 10).is_err());
}

#[test]
fn inconsistent_total_pages_do_not_decode() {
    let good = json!({
        "data": [1, 2, 3],
        "pagination": { "page": 1, "limit": 20, "total": 95, "totalPages": 5 }
    });
    let decoded: PaginatedResponse<u32> = serde_json::from_value(good).unwrap();
    assert_eq!(decoded.pagination.total_pages, 5);

    let lying = json!({
        "data": [],
        "pagination": { "page": 1, "limit": 20, "total": 95, "totalPages": 4 }
    });
    assert!(serde_json::from_value::<PaginatedResponse<u32>>(lying).is_err());

    let past_end = json!({
        "data": [],
        "pagination": { "page": 6, "limit": 20, "total": 95, "totalPages": 5 }
    });
    assert!(serde_json::from_value::<PaginatedResponse<u32>>(past_end).is_err());
}

#[test]
fn oversized_page_is_rejected() {
    let items: Vec<u32> = (0..5).collect();
    assert!(PaginatedResponse::new(items, 1, 3, 5).is_err());

    let full_page: Vec<u32> = (0..20).collect();
    assert!(matches!(
        PaginatedResponse::new(full_page.clone(), 0, 20, 95),
        Err(ModelError::InvalidEnvelope(_))
    ));
    assert!(PaginatedResponse::new(full_page.clone(), 5, 20, 95).is_err());
    assert!(PaginatedResponse::new(full_page[..15].to_vec(), 5, 20, 95).is_ok());
    assert!(PaginatedResponse::<u32>::new(Vec::new(), 0, 20, 95).is_ok());
}

#[test]
fn item_count_is_checked_on_decode() {
    let twenty: Vec<u32> = (0..20).collect();
    let thirty: Vec<u32> = (0..30).collect();
    let fifteen: Vec<u32> = (0..15).collect();

    let last_page_overfull = json!({
        "data": twenty,
        "pagination": { "page": 5, "limit": 20, "total": 95, "totalPages": 5 }
    });
    assert!(serde_json::from_value::<PaginatedResponse<u32>>(last_page_overfull).is_err());

    let over_limit = json!({
        "data": thirty,
        "pagination": { "page": 1, "limit": 20, "total": 95, "totalPages": 5 }
    });
    assert!(serde_json::from_value::<PaginatedResponse<u32>>(over_limit).is_err());

    let page_zero_with_items = json!({
        "data": [1],
        "pagination": { "page": 0, "limit": 20, "total": 95, "totalPages": 5 }
    });
    assert!(serde_json::from_value::<PaginatedResponse<u32>>(page_zero_with_items).is_err());

    let last_page = json!({
        "data": fifteen,
        "pagination": { "page": 5, "limit": 20, "total": 95, "totalPages": 5 }
    });
    let decoded: PaginatedResponse<u32> = serde_json::from_value(last_page).unwrap();
    assert_eq!(decoded.data.len(), decoded.pagination.expected_len());
}

#[test]
fn paginate_slices_one_based_pages() {
    let items: Vec<u32> = (1..=95).collect();

    let first = paginate(&items, &PageRequest::new(1, 20)).unwrap();
    assert_eq!(first.data, (1..=20).collect::<Vec<_>>());
    assert_eq!(first.pagination.total_pages, 5);

    let last = paginate(&items, &PageRequest::new(5, 20)).unwrap();
    assert_eq!(last.data, (81..=95).collect::<Vec<_>>());
    assert_eq!(last.data.len(), last.pagination.expected_len());

    assert!(matches!(
        paginate(&items, &PageRequest::new(6, 20)),
        Err(ModelError::PageOutOfRange { page: 6, total_pages: 5 })
    ));
}

#[test]
fn paginate_empty_list_reports_page_zero() {
    let items: Vec<u32> = Vec::new();
    let page = paginate(&items, &PageRequest::default()).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.page, 0);
    assert_eq!(page.pagination.total_pages, 0);
}

#[test]
fn page_request_from_query() {
    let request = PageRequest::from_query("/posts?page=3&limit=10");
    assert_eq!(request, PageRequest { page: 3, limit: 10 });
    assert_eq!(request.offset(), 20);

    assert_eq!(PageRequest::from_query("/posts"), PageRequest::default());
    assert_eq!(PageRequest::from_query("/posts?limit=5000").limit, 100);
    assert_eq!(PageRequest::from_query("/posts?page=0").page, 1);
}

#[test]
fn api_response_success_carries_no_error() {
    let response = ApiResponse::ok_with_message(7u32, "done");
    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded, json!({ "success": true, "data": 7, "message": "done" }));
    assert_eq!(response.into_result().unwrap(), Some(7));
}

#[test]
fn api_response_failure_folds_into_rejected() {
    let response: ApiResponse<u32> = ApiResponse::err("Username exists");
    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded, json!({ "success": false, "error": "Username exists" }));

    match response.into_result() {
        Err(ModelError::Rejected(error)) => assert_eq!(error, "Username exists"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn malformed_envelopes_do_not_decode() {
    let both = json!({ "success": false, "data": 1, "error": "boom" });
    assert!(serde_json::from_value::<ApiResponse<u32>>(both).is_err());

    let silent_failure = json!({ "success": false });
    assert!(serde_json::from_value::<ApiResponse<u32>>(silent_failure).is_err());

    let contradictory = json!({ "success": true, "data": 1, "error": "boom" });
    assert!(serde_json::from_value::<ApiResponse<u32>>(contradictory).is_err());

    let acknowledged = json!({ "success": true, "message": "Logged out" });
    let decoded: ApiResponse<u32> = serde_json::from_value(acknowledged).unwrap();
    assert_eq!(decoded.into_result().unwrap(), None);
}

#[test]
fn model_errors_become_failed_envelopes() {
    let response: ApiResponse<Post> = ModelError::not_found("post", "p-404").into();
    assert!(!response.is_success());
    assert_eq!(response.error.as_deref(), Some("post not found: p-404"));
}

#[test]
fn envelope_validation_reaches_the_payload() {
    let response = ApiResponse::ok(Post::new("u-1", ""));
    assert!(response.validate().is_err());

    let page = PaginatedResponse::new(vec![Post::new("u-1", "fine")], 1, 20, 1).unwrap();
    assert!(page.validate().is_ok());
}
