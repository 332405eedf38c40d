use crate::proxy::SessionProxy;
use std::sync::Arc;
use types::account::{self, Account};

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<SessionProxy>,
    pub directory: Arc<Vec<Account>>,
}

impl AppState {
    pub fn new(proxy: SessionProxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
            directory: Arc::new(account::directory()),
        }
    }
}
