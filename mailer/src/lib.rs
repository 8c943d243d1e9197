pub mod send;
pub mod verify;

pub use send::EmailClient;
pub use verify::EmailVerifier;
