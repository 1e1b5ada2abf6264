mod authenticated_operator;
mod basic_auth;

pub use authenticated_operator::*;
pub use basic_auth::*;
