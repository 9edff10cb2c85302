//! Uniform wrappers for request/response exchanges and list results.

use crate::config::{Policy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::core::errors::{ModelError, Result};
use crate::core::query_params::{get_int, parse_query_params};
use crate::core::validation::Validate;
use serde::{Deserialize, Serialize};

/// `success == true` carries no error; `success == false` carries an error
/// and no data. Decoding rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawApiResponse<T>")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

impl<T> TryFrom<RawApiResponse<T>> for ApiResponse<T> {
    type Error = ModelError;

    fn try_from(raw: RawApiResponse<T>) -> Result<Self> {
        let response = ApiResponse {
            success: raw.success,
            data: raw.data,
            error: raw.error,
            message: raw.message,
        };
        response.check_shape()?;
        Ok(response)
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Success without a payload, e.g. an acknowledged logout.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_result(self) -> Result<Option<T>> {
        self.check_shape()?;
        if self.success {
            return Ok(self.data);
        }
        Err(ModelError::Rejected(self.error.unwrap_or_default()))
    }

    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }

    fn check_shape(&self) -> Result<()> {
        match (self.success, &self.data, &self.error) {
            (true, _, Some(_)) => Err(ModelError::InvalidEnvelope(
                "a successful response must not carry an error".to_string(),
            )),
            (false, _, None) => Err(ModelError::InvalidEnvelope(
                "a failed response must carry an error".to_string(),
            )),
            (false, _, Some(error)) if error.trim().is_empty() => Err(ModelError::InvalidEnvelope(
                "a failed response must carry a non-empty error".to_string(),
            )),
            (false, Some(_), Some(_)) => Err(ModelError::InvalidEnvelope(
                "a failed response must not carry data".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl<T> From<ModelError> for ApiResponse<T> {
    fn from(err: ModelError) -> Self {
        ApiResponse::err(err.to_string())
    }
}

impl<T> From<Result<T>> for ApiResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => err.into(),
        }
    }
}

impl<T: Validate> Validate for ApiResponse<T> {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        self.check_shape()?;
        match &self.data {
            Some(data) => data.validate_with(policy),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPagination")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPagination {
    page: usize,
    limit: usize,
    total: usize,
    total_pages: usize,
}

impl TryFrom<RawPagination> for Pagination {
    type Error = ModelError;

    fn try_from(raw: RawPagination) -> Result<Self> {
        let pagination = Pagination::new(raw.page, raw.limit, raw.total)?;
        if pagination.total_pages != raw.total_pages {
            return Err(ModelError::InvalidEnvelope(format!(
                "totalPages is {} but {} items at {} per page make {}",
                raw.total_pages, raw.total, raw.limit, pagination.total_pages
            )));
        }
        Ok(pagination)
    }
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Result<Self> {
        if limit == 0 {
            return Err(ModelError::validation("limit", "must be at least 1"));
        }
        let total_pages = total_pages(total, limit);
        if page > total_pages {
            return Err(ModelError::PageOutOfRange { page, total_pages });
        }
        Ok(Self {
            page,
            limit,
            total,
            total_pages,
        })
    }

    pub fn is_valid_page(&self, page: usize) -> bool {
        page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Items a full response for `self.page` should carry.
    pub fn expected_len(&self) -> usize {
        if self.page == 0 {
            return 0;
        }
        let offset = (self.page - 1) * self.limit;
        self.total.saturating_sub(offset).min(self.limit)
    }
}

/// One page of a list. A page never carries more items than its metadata
/// leaves room for, so page 0 is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPaginatedResponse<T>")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaginatedResponse<T> {
    data: Vec<T>,
    pagination: Pagination,
}

impl<T> TryFrom<RawPaginatedResponse<T>> for PaginatedResponse<T> {
    type Error = ModelError;

    fn try_from(raw: RawPaginatedResponse<T>) -> Result<Self> {
        let response = PaginatedResponse {
            data: raw.data,
            pagination: raw.pagination,
        };
        response.check_len()?;
        Ok(response)
    }
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: usize, limit: usize, total: usize) -> Result<Self> {
        let pagination = Pagination::new(page, limit, total)?;
        let response = Self { data, pagination };
        response.check_len()?;
        Ok(response)
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    fn check_len(&self) -> Result<()> {
        let room = self.pagination.expected_len();
        if self.data.len() > room {
            return Err(ModelError::InvalidEnvelope(format!(
                "{} items on page {} of {} where at most {} fit",
                self.data.len(),
                self.pagination.page,
                self.pagination.total_pages,
                room
            )));
        }
        Ok(())
    }
}

impl<T: Validate> Validate for PaginatedResponse<T> {
    fn validate_with(&self, policy: &Policy) -> Result<()> {
        self.check_len()?;
        self.data.iter().try_for_each(|item| item.validate_with(policy))
    }
}

/// A 1-based page request as parsed from `?page=&limit=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn from_query(uri: &str) -> Self {
        let params = parse_query_params(uri);
        Self::new(
            get_int(&params, "page", 1),
            get_int(&params, "limit", DEFAULT_PAGE_SIZE),
        )
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.limit
    }
}

/// Cuts one page out of a full list.
///
/// An empty list yields page 0 with no items; asking past the last page is
/// an error rather than an empty page.
pub fn paginate<T: Clone>(items: &[T], request: &PageRequest) -> Result<PaginatedResponse<T>> {
    let limit = request.limit.max(1);
    let total = items.len();
    let pages = total_pages(total, limit);

    if pages == 0 {
        return PaginatedResponse::new(Vec::new(), 0, limit, 0);
    }
    let page = request.page.max(1);
    if page > pages {
        tracing::debug!(page, total_pages = pages, "page request out of range");
        return Err(ModelError::PageOutOfRange {
            page,
            total_pages: pages,
        });
    }

    let slice = items
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    PaginatedResponse::new(slice, page, limit, total)
}
