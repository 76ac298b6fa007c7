use serde::{Deserialize, Serialize};

/// Single-resource responses come wrapped as `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// List responses: one page of items plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub per_page: u32,
}

impl PageMeta {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_response_without_meta() {
        let parsed: PaginatedResponse<String> =
            serde_json::from_str(r#"{"data": ["a", "b"]}"#).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.meta, PageMeta::default());
        assert!(!parsed.meta.has_next_page());
    }

    #[test]
    fn test_has_next_page() {
        let meta = PageMeta {
            current_page: 1,
            total_pages: 3,
            total_count: 40,
            per_page: 15,
        };
        assert!(meta.has_next_page());
    }
}
