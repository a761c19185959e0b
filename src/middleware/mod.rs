pub mod auth;
pub mod response;

pub use auth::JwtPrincipalResolver;
pub use response::RpcResponse;
