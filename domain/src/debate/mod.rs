//! Debate subdomain: configuration, roles, arguments, degradations and the
//! phase state machine.

pub mod argument;
pub mod config;
pub mod degradation;
pub mod role;
pub mod state;
pub mod text;
