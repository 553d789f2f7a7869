// handlers/mod.rs - HTTP handlers
//
// public/    reachable without a session (login, auth provider, health)
// protected/ back-office pages mounted behind the session gate

pub mod protected;
pub mod public;
