use std::sync::Arc;

use crate::{config::Config, repositories::EmployeeDirectory, services::RequestLifecycle};

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: RequestLifecycle,
    pub directory: Arc<dyn EmployeeDirectory>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        lifecycle: RequestLifecycle,
        directory: Arc<dyn EmployeeDirectory>,
        config: Config,
    ) -> Self {
        Self {
            lifecycle,
            directory,
            config,
        }
    }
}
