pub mod dashboard;
pub mod query_engine;

pub use dashboard::DashboardStats;
pub use query_engine::{ListQuery, ParseQueryError, SortOption, StatusFilter, ALL_CATEGORIES};
