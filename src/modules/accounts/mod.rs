// Accounts module: users, roles, sign-in

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{User, UserRole};
pub use repositories::{MySqlUserRepository, UserRepository};
pub use services::AccountService;
