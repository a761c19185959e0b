// handlers/public/mod.rs - Public procedures (no principal required)
//
// Security Level: None. Handlers must not assume `ctx.principal()` is set.

pub mod auth;   // auth.me, auth.logout
pub mod system; // system.health, system.procedures
