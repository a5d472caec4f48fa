use si_usage_report::prelude::*;

/// Mock SessionProvider with a fixed answer
pub struct MockSession {
    pub authenticated: bool,
}

impl MockSession {
    pub fn logged_in() -> Self {
        Self {
            authenticated: true,
        }
    }

    pub fn logged_out() -> Self {
        Self {
            authenticated: false,
        }
    }
}

impl SessionProvider for MockSession {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
