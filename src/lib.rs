//! Link generation for presenter/action destinations.
//!
//! A destination such as `Admin:Product:show#reviews` names a presenter, an
//! action and an optional fragment. [`LinkResolver`] parses it, binds the
//! call's positional arguments to the action's declared parameters (dropping
//! those equal to their defaults) and asks a [`Router`] for the URL.
//!
//! ```
//! use std::sync::Arc;
//! use linkgen::{
//!     ArgumentBag, HandlerSignature, LinkRequest, LinkResolver, ParameterSpec,
//!     PresenterSignatures, RefUrl, StaticDirectory,
//! };
//!
//! let show = HandlerSignature::new(vec![
//!     ParameterSpec::required("id"),
//!     ParameterSpec::with_default("page", 1),
//! ])
//! .unwrap();
//! let directory = StaticDirectory::new()
//!     .with_presenter("Product", PresenterSignatures::new("Product").action("show", show));
//!
//! let router = |req: &LinkRequest, _: &RefUrl| {
//!     let id = req.params.get("id")?.scalar_string()?;
//!     Some(format!("/product/{id}"))
//! };
//! let resolver = LinkResolver::new(Arc::new(router), RefUrl::default())
//!     .with_directory(Arc::new(directory));
//!
//! let url = resolver
//!     .resolve("Product:show#reviews", ArgumentBag::positional([42, 1]))
//!     .unwrap();
//! assert_eq!(url, "/product/42#reviews");
//! ```

pub mod binding;
pub mod common;
pub mod config;
pub mod errors;
pub mod link;
pub mod value;

pub use crate::binding::{
    ArgumentBag, HandlerSignature, ParamKey, ParameterBinder, ParameterSpec,
};
pub use crate::config::{load_config, Conventions, LinkConfig};
pub use crate::errors::{
    BindingError, DirectoryError, Error, LinkError, ParseError, Result, SignatureError,
};
pub use crate::link::{
    Destination, HandlerDirectory, HandlerKind, LinkRequest, LinkResolver, PreparedLink,
    PresenterSignatures, RefUrl, Router, SignatureSource, StaticDirectory,
};
pub use crate::value::{ParamType, ParamValue};
