//! Footer control for paged list endpoints.
//!
//! The table itself knows nothing about pages; callers render this alongside
//! it when the payload carried metadata.

use caredesk_model::{ListPage, PageInfo};
use serde::Serialize;

/// Position within a paged result. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationControl {
    pub page: u32,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl PaginationControl {
    /// `total_pages` is raised to 1 and `page` clamped into `1..=total_pages`.
    pub fn new(page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
            total: None,
        }
    }

    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn from_info(info: &PageInfo) -> Self {
        let control = Self::new(info.page, info.total_pages);
        match info.total {
            Some(total) => control.with_total(total),
            None => control,
        }
    }

    /// `None` when the payload carried no pagination metadata.
    pub fn from_page(page: &ListPage) -> Option<Self> {
        page.pagination.as_ref().map(Self::from_info)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        match self.total {
            Some(total) => format!(
                "Page {} of {} ({} rows)",
                self.page, self.total_pages, total
            ),
            None => format!("Page {} of {}", self.page, self.total_pages),
        }
    }
}
