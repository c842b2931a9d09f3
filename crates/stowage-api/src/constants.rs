//! API constants.

/// Current API version segment.
pub const API_VERSION: &str = "v0";

/// Path prefix for all versioned API routes.
pub const API_PREFIX: &str = "/api/v0";
