//! Shared request state: the injected service and policies, cloned per
//! request (all `Arc`s, so cloning is cheap).

use std::sync::Arc;

use auth_adapters::AdminKeyAuth;
use services::ContactService;

use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub contact: Arc<ContactService>,
    pub admin_auth: Arc<AdminKeyAuth>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(contact: Arc<ContactService>, admin_auth: AdminKeyAuth, rate_limiter: RateLimiter) -> Self {
        Self {
            contact,
            admin_auth: Arc::new(admin_auth),
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
