//! Authentication and authorization: Telegram login verification, session
//! cookies, and the per-request channel membership gate.

pub mod access;
pub mod membership;
pub mod middleware;
pub mod session;
pub mod verify;

pub use access::{AccessError, AccessPipeline};
pub use membership::{GateError, MembershipGate};
pub use middleware::{AdminSession, AppState, SessionUser};
pub use verify::{verify, verify_at, AuthError, BotSecret, LoginAssertion};
