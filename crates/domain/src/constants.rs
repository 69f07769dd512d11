//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Remote endpoints
pub const ENDPOINT_LOGIN: &str = "/api/auth/login";
pub const ENDPOINT_REGISTER: &str = "/api/auth/register";
pub const ENDPOINT_CURRENT_SHIFT: &str = "/api/shifts/current";
pub const ENDPOINT_START_SHIFT: &str = "/api/shifts/start";
pub const ENDPOINT_END_SHIFT: &str = "/api/shifts/end";
pub const ENDPOINT_START_BREAK: &str = "/api/shifts/break/start";
pub const ENDPOINT_END_BREAK: &str = "/api/shifts/break/end";
pub const ENDPOINT_HISTORY: &str = "/api/shifts/history";
pub const ENDPOINT_STATS: &str = "/api/shifts/stats";
pub const ENDPOINT_ADMIN_EMPLOYEES: &str = "/api/admin/employees";
pub const ENDPOINT_ADMIN_SHIFTS: &str = "/api/admin/shifts";

// Defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_POSITION_ACCURACY: f64 = 10.0;
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Fallback messages shown when an error carries no user-facing text
pub const MSG_FETCH_CURRENT_SHIFT_FAILED: &str = "Failed to fetch current shift";
pub const MSG_START_SHIFT_FAILED: &str = "Failed to start shift";
pub const MSG_END_SHIFT_FAILED: &str = "Failed to end shift";
pub const MSG_START_BREAK_FAILED: &str = "Failed to start break";
pub const MSG_END_BREAK_FAILED: &str = "Failed to end break";
pub const MSG_FETCH_HISTORY_FAILED: &str = "Failed to fetch shift history";
pub const MSG_FETCH_STATS_FAILED: &str = "Failed to fetch shift statistics";
pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_REGISTER_FAILED: &str = "Registration failed";
pub const MSG_ADMIN_LOAD_FAILED: &str = "Failed to load data. Please try again.";

// Validation messages
pub const MSG_LOGIN_FIELDS_REQUIRED: &str = "Please enter both email and password";
pub const MSG_REGISTER_FIELDS_REQUIRED: &str = "Please fill in all fields";
pub const MSG_PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";

pub const MSG_ADMIN_REQUIRED: &str = "Administrator access required";
pub const MSG_NOT_AUTHENTICATED: &str = "Not authenticated";
pub const MSG_REQUEST_IN_PROGRESS: &str = "another request is already in progress";
pub const MSG_GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported on this platform";
