use std::sync::Arc;

use crate::application::use_cases::session::SessionUseCase;
use crate::application::use_cases::spec_detail::SpecDetailStore;
use crate::infrastructure::api::{AuthApi, EndpointsApi, SpecDetailApi, SpecsApi, TestCasesApi};
use crate::infrastructure::security::TokenStore;
use crate::interfaces::cli::notify::Toasts;

/// Everything a page needs, built once per process.
pub struct ConsoleState {
    pub api_base: String,
    pub auth: Arc<dyn AuthApi>,
    pub endpoints: Arc<dyn EndpointsApi>,
    pub specs: Arc<dyn SpecsApi>,
    pub test_cases: Arc<dyn TestCasesApi>,
    spec_detail_api: Arc<dyn SpecDetailApi>,
    pub session: SessionUseCase,
    pub toasts: Toasts,
}

impl ConsoleState {
    pub fn new<A>(api: Arc<A>, tokens: Arc<dyn TokenStore>, api_base: impl Into<String>) -> Self
    where
        A: AuthApi + EndpointsApi + SpecsApi + TestCasesApi + 'static,
    {
        let auth: Arc<dyn AuthApi> = api.clone();
        Self {
            api_base: api_base.into(),
            session: SessionUseCase::new(auth.clone(), tokens),
            auth,
            endpoints: api.clone(),
            specs: api.clone(),
            test_cases: api.clone(),
            spec_detail_api: api,
            toasts: Toasts::new(),
        }
    }

    /// A fresh container for one spec page and the drawers opened from it.
    pub fn spec_detail_store(&self) -> Arc<SpecDetailStore> {
        Arc::new(SpecDetailStore::new(self.spec_detail_api.clone()))
    }
}
