mod user;

pub use user::{LoginRequest, RegisterRequest, UpdateRoleRequest, User, UserResponse, UserRole};
