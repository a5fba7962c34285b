/// Service-level configuration, dependency-injected into the dispatcher
/// context alongside the store handle.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Page size used when a list request does not supply one.
    pub default_page_limit: u32,
    /// Upper bound on caller-supplied page sizes.
    pub max_page_limit: u32,
    /// Default lookahead window for `findExpiringSoon`, in days.
    pub expiring_window_days: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 10,
            max_page_limit: 100,
            expiring_window_days: 7,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // -- builder helpers --

    pub fn default_page_limit(mut self, limit: u32) -> Self {
        self.default_page_limit = limit;
        self
    }

    pub fn max_page_limit(mut self, limit: u32) -> Self {
        self.max_page_limit = limit;
        self
    }

    pub fn expiring_window_days(mut self, days: i64) -> Self {
        self.expiring_window_days = days;
        self
    }
}
