// rpc/mod.rs - typed procedure routing
//
// Context (per call) -> Dispatcher -> Router lookup -> auth gate -> Contract validation -> handler

pub mod context;
pub mod dispatcher;
pub mod envelope;
pub mod procedure;
pub mod router;
pub mod schema;

pub use context::{Context, ContextFactory, CookieOptions, RequestHandle, ResponseHandle};
pub use dispatcher::{Dispatcher, RawInput};
pub use envelope::CallEnvelope;
pub use procedure::Procedure;
pub use router::{ProcedureShape, RegistrationError, Router, RouterNode};
pub use schema::{validate, Contract, FieldKind, ValidationError};
