//! Link resolution: destinations, handler directories, routers.
//!
//! A destination such as `Admin:Product:show#reviews` is parsed, its presenter
//! looked up in a [`HandlerDirectory`], call arguments bound against the
//! matching member and the result handed to a [`Router`].

pub mod destination;
pub mod directory;
pub mod render;
pub mod resolver;
pub mod router;

pub use destination::Destination;
pub use directory::{
    validate_presenter_name, HandlerDirectory, HandlerKind, PresenterSignatures, SignatureSource,
    StaticDirectory,
};
pub use render::render_params;
pub use resolver::{LinkResolver, PreparedLink};
pub use router::{LinkRequest, RefUrl, Router};
