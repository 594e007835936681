//! Running counters updated on session/subscription create/destroy, referenced from `Session`
//! and `Subscription`.

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ServerDiagnostics {
    pub cumulated_session_count: u64,
    pub session_count: u64,
    pub cumulated_subscription_count: u64,
    pub subscription_count: u64,
    pub rejected_requests_count: u64,
}

impl ServerDiagnostics {
    pub fn new() -> ServerDiagnostics {
        ServerDiagnostics::default()
    }

    pub fn on_create_session(&mut self) {
        self.cumulated_session_count += 1;
        self.session_count += 1;
    }

    pub fn on_destroy_session(&mut self) {
        self.session_count = self.session_count.saturating_sub(1);
    }

    pub fn on_create_subscription(&mut self) {
        self.cumulated_subscription_count += 1;
        self.subscription_count += 1;
    }

    pub fn on_destroy_subscription(&mut self) {
        self.subscription_count = self.subscription_count.saturating_sub(1);
    }

    pub fn on_rejected_request(&mut self) {
        self.rejected_requests_count += 1;
    }

    /// Renders the current counters as a JSON object, for a diagnostics log line or endpoint.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cumulated_session_count": self.cumulated_session_count,
            "session_count": self.session_count,
            "cumulated_subscription_count": self.cumulated_subscription_count,
            "subscription_count": self.subscription_count,
            "rejected_requests_count": self.rejected_requests_count,
        })
    }
}
