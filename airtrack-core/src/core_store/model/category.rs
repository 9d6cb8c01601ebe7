use super::types::CategoryId;
use serde::{Deserialize, Serialize};

/// A named bucket for records of one kind
///
/// Records reference categories by name, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: CategoryId::generate(),
            name: name.into(),
        }
    }

    /// Seed list with sequential ids starting at "1"
    pub fn seed(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: CategoryId::new((i + 1).to_string()),
                name: (*name).to_string(),
            })
            .collect()
    }
}
