use std::sync::RwLock;

/// Source of the current bearer token. The client only ever reads it; issuing
/// and refreshing tokens belongs to whoever implements this.
pub trait SessionAccessor: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Session holding a token handed in at startup (or replaced on login).
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RwLock<Option<String>>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }
}

impl SessionAccessor for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|t| t.clone())
            .filter(|t| !t.is_empty())
    }
}
