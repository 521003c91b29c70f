use serde::Serialize;

use crate::error::AppError;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 500;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Rows skipped before the first returned item.
    #[schema(example = 0)]
    pub skip: u64,
    /// Maximum number of items in this response.
    #[schema(example = 100)]
    pub limit: u64,
    /// Total number of matching items.
    #[schema(example = 47)]
    pub total: u64,
}

/// Offset window of a list request after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

impl Window {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            skip: self.skip,
            limit: self.limit,
            total,
        }
    }
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Reject a negative lower or upper bound.
pub fn validate_non_negative<T>(name: &str, value: Option<T>) -> Result<(), AppError>
where
    T: PartialOrd + Default,
{
    if let Some(value) = value
        && value < T::default()
    {
        return Err(AppError::Validation(format!("{name} must be >= 0")));
    }
    Ok(())
}

/// Split a comma-separated tag list, dropping blanks and duplicates.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    let mut tags: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
