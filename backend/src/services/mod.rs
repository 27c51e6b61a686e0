pub mod lifecycle;
pub mod projection;

pub use lifecycle::{LifecycleError, RequestLifecycle, RequestOverview};
pub use projection::{badge_class, count_by_status, filter_by_status, status_label, StatusCounts};
