//! Unified mapper dialog lifecycle.
//!
//! The dialog is `None` (closed), open without results, or open with
//! search results. Any navigation drops the handle.

use serde::{Deserialize, Serialize};

/// Outcome of searching one destination object in the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStatus {
    pub title: String,
    pub found: bool,
    pub already_mapped: bool,
}

impl MappingStatus {
    pub fn new(title: impl Into<String>, found: bool, already_mapped: bool) -> Self {
        Self {
            title: title.into(),
            found,
            already_mapped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperState {
    OpenEmpty,
    OpenWithResults,
}

/// Open mapper dialog bound to the source object page it was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedMapperHandle {
    pub src_url: String,
    pub state: MapperState,
}

impl UnifiedMapperHandle {
    pub fn opened_from(src_url: impl Into<String>) -> Self {
        Self {
            src_url: src_url.into(),
            state: MapperState::OpenEmpty,
        }
    }

    pub fn is_bound_to(&self, src_url: &str) -> bool {
        self.src_url == src_url
    }

    pub fn mark_searched(&mut self) {
        self.state = MapperState::OpenWithResults;
    }
}

#[cfg(test)]
mod tests {
    use super::{MapperState, UnifiedMapperHandle};

    #[test]
    fn search_moves_handle_to_results_state() {
        let mut handle = UnifiedMapperHandle::opened_from("http://h/programs/1");
        assert_eq!(handle.state, MapperState::OpenEmpty);
        handle.mark_searched();
        assert_eq!(handle.state, MapperState::OpenWithResults);
        assert!(handle.is_bound_to("http://h/programs/1"));
        assert!(!handle.is_bound_to("http://h/programs/2"));
    }
}
