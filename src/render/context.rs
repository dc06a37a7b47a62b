use serde::{Deserialize, Serialize};

use crate::core::SortingOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSort {
    pub component_id: String,
    pub order: SortingOrder,
}

/// Host-owned UI state consumed by stateful adapters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Zero-based page requested by the host; adapters clamp it.
    pub page: usize,
    /// Written back by paginating adapters.
    pub page_count: usize,
    pub sort: Option<ColumnSort>,
    /// Rendering key of the datum under the pointer.
    pub hovered_key: Option<String>,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, component_id: impl Into<String>, order: SortingOrder) -> Self {
        self.sort = Some(ColumnSort {
            component_id: component_id.into(),
            order,
        });
        self
    }

    #[must_use]
    pub fn with_hovered_key(mut self, key: impl Into<String>) -> Self {
        self.hovered_key = Some(key.into());
        self
    }
}
