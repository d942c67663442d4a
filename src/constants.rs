pub mod auth {

    /// Successful logins kept per user, newest first.
    pub const LOGIN_HISTORY_LIMIT: usize = 8;

    pub const SESSION_USER_KEY: &str = "user";

    pub const UNKNOWN_USER_AGENT: &str = "unknown";
}

pub mod db {
    use std::time::Duration;

    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

    pub const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

    pub const MAX_LIFETIME: Duration = Duration::from_secs(600);
}

pub mod http {

    pub const USER_AGENT: &str = "Brickshelf/1.0";
}
