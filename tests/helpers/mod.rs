// Shared test infrastructure.
//
// Integration tests run the real actix app over in-memory repositories and
// fake outbound clients, so no MySQL, SMTP or completion provider is needed.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod in_memory;

pub use assertions::*;
pub use in_memory::*;
pub use test_app::*;
pub use test_data::*;
