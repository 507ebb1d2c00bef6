use userdesk_business::{BusinessConfig, build_state_ctx};
use userdesk_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            ctx: build_state_ctx(config),
        }
    }

    /// Configuration from `API_BASE_URL`, `API_TOKEN` and `REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(BusinessConfig::from_env()?))
    }

    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url))
    }
}
