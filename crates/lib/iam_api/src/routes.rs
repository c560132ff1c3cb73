//! Route paths.

pub const GET_HEALTH: &str = "/health";
pub const POST_AUTH_SIGNUP: &str = "/auth/signup";
pub const POST_AUTH_SIGNIN: &str = "/auth/signin";
pub const POST_AUTH_SIGNOUT: &str = "/auth/signout";
pub const POST_AUTH_REFRESH: &str = "/auth/refresh";
pub const USERS: &str = "/users";
pub const USERS_ID: &str = "/users/{id}";
