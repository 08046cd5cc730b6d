// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
pub const MAX_TOKEN_TTL_SECS: u64 = 24 * 3600;

// Minimum wall time of a failed login
pub const DEFAULT_MIN_AUTH_MILLIS: u64 = 100;

// Request limits
pub const MAX_JSON_BODY_BYTES: u64 = 64 * 1024;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_TEST_QUESTIONS: u32 = 50;

// Upstream chat-completion API
pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
