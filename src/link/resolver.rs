//! Destination-to-URL resolution.

use std::sync::Arc;
use tracing::{debug, debug_span};

use crate::binding::args::ArgumentBag;
use crate::binding::binder::ParameterBinder;
use crate::common::{action_member, render_member};
use crate::config::{Conventions, LinkConfig};
use crate::errors::LinkError;
use crate::link::destination::Destination;
use crate::link::directory::{HandlerDirectory, HandlerKind, SignatureSource};
use crate::link::render::render_params;
use crate::link::router::{LinkRequest, RefUrl, Router};

/// A destination bound and ready to be handed to the router.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLink {
    pub destination: Destination,
    pub request: LinkRequest,
}

/// Resolves destinations into URLs.
///
/// Holds only its collaborators; every call works on its own argument bag.
#[derive(Clone)]
pub struct LinkResolver {
    router: Arc<dyn Router>,
    ref_url: RefUrl,
    directory: Option<Arc<dyn HandlerDirectory>>,
    conventions: Conventions,
}

impl LinkResolver {
    /// Resolver without a handler directory: arguments are never bound.
    pub fn new(router: Arc<dyn Router>, ref_url: RefUrl) -> Self {
        Self {
            router,
            ref_url,
            directory: None,
            conventions: Conventions::default(),
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn HandlerDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Build a resolver from configuration. Presenters declared in the
    /// configuration become the handler directory.
    pub fn from_config(config: &LinkConfig, router: Arc<dyn Router>) -> crate::Result<Self> {
        let mut resolver = Self::new(router, config.ref_url())
            .with_conventions(config.conventions());
        if !config.presenters.is_empty() {
            resolver = resolver.with_directory(Arc::new(config.build_directory()?));
        }
        Ok(resolver)
    }

    pub fn ref_url(&self) -> &RefUrl {
        &self.ref_url
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Resolve `dest` with `params` into a URL, fragment included.
    pub fn resolve(&self, dest: &str, params: ArgumentBag) -> Result<String, LinkError> {
        let _span = debug_span!("resolve_link", destination = dest).entered();

        let prepared = self.prepare(dest, params)?;
        match self.router.construct_url(&prepared.request, &self.ref_url) {
            Some(url) => {
                debug!(url = %url, "Link resolved");
                Ok(url + prepared.destination.fragment())
            }
            None => {
                let mut params = prepared.request.params;
                params.remove_name(&self.conventions.action_key);
                debug!(presenter = %prepared.request.presenter, "No matching route");
                Err(LinkError::NoRoute {
                    destination: dest.to_string(),
                    params: render_params(&params),
                })
            }
        }
    }

    /// Parse and bind `dest` without consulting the router.
    pub fn prepare(&self, dest: &str, params: ArgumentBag) -> Result<PreparedLink, LinkError> {
        let destination = Destination::parse(dest)?;
        let mut action = destination.action().to_string();
        let mut params = params;

        if let Some(directory) = &self.directory {
            match directory.lookup(destination.presenter())? {
                HandlerKind::Bindable(source) => {
                    if action.is_empty() {
                        action = self.conventions.default_action.clone();
                    }
                    params = bind_member(source.as_ref(), &action, params)?;
                }
                HandlerKind::Opaque => {
                    debug!(
                        presenter = destination.presenter(),
                        "Presenter is not bindable, passing arguments through"
                    );
                }
            }
        }

        if !action.is_empty() {
            params.insert(self.conventions.action_key.as_str(), action);
        }

        let request = LinkRequest::new(destination.presenter(), params);
        Ok(PreparedLink {
            destination,
            request,
        })
    }
}

/// Bind against the action-style member, else the render-style one.
/// Without either member the arguments pass through unchanged.
fn bind_member(
    source: &dyn SignatureSource,
    action: &str,
    params: ArgumentBag,
) -> Result<ArgumentBag, LinkError> {
    for member in [action_member(action), render_member(action)] {
        if let Some(signature) = source.signature(&member) {
            debug!(
                handler = source.handler_name(),
                member = member.as_str(),
                parameters = signature.len(),
                "Binding arguments"
            );
            let binder = ParameterBinder::new(source.handler_name(), &member, signature);
            return Ok(binder.bind(&params)?);
        }
    }
    Ok(params)
}
