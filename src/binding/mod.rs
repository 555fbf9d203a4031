//! Argument binding against statically declared handler signatures.
//!
//! - **Argument bags**: positional and named call arguments
//! - **Signatures**: ordered parameter declarations with defaults
//! - **Coercion**: one conversion per parameter type
//! - **Binder**: positional-to-named conversion with default elision

pub mod args;
pub mod binder;
pub mod coerce;
pub mod signature;

pub use args::{ArgumentBag, ParamKey};
pub use binder::ParameterBinder;
pub use coerce::{coerce, TypeMismatch};
pub use signature::{HandlerSignature, ParameterSpec};
