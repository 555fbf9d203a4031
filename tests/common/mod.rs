// Test utility module for linkgen integration tests
#![allow(dead_code)]

use linkgen::link::render_params;
use linkgen::{
    ArgumentBag, HandlerSignature, LinkRequest, LinkResolver, ParamValue, ParameterSpec,
    PresenterSignatures, RefUrl, Router, StaticDirectory,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Router building `<base>?presenter=<p>&k=v...`, refusing listed presenters.
#[derive(Debug, Default)]
pub struct QueryRouter {
    unroutable: HashSet<String>,
    seen: Mutex<Vec<LinkRequest>>,
}

impl QueryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(mut self, presenter: &str) -> Self {
        self.unroutable.insert(presenter.to_string());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<LinkRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Router for QueryRouter {
    fn construct_url(&self, request: &LinkRequest, ref_url: &RefUrl) -> Option<String> {
        self.seen.lock().unwrap().push(request.clone());
        if self.unroutable.contains(&request.presenter) {
            return None;
        }
        let mut query = format!("presenter={}", request.presenter);
        let rendered = render_params(&request.params);
        if !rendered.is_empty() {
            query.push('&');
            query.push_str(&rendered.replace(", ", "&"));
        }
        Some(format!("{}?{}", ref_url.base_url(), query))
    }
}

pub fn signature(params: Vec<ParameterSpec>) -> HandlerSignature {
    HandlerSignature::new(params).expect("valid signature")
}

/// Directory used across the integration tests.
///
/// - `Homepage`: `renderDefault()`
/// - `Product`: `actionShow($id)`, `renderList($page = 1, $sort = 'name')`
/// - `Admin:Product`: `actionEdit($id, array $tags = [])`
/// - `Legacy`: opaque
pub fn shop_directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_presenter(
            "Homepage",
            PresenterSignatures::new("Homepage").render("default", HandlerSignature::empty()),
        )
        .with_presenter(
            "Product",
            PresenterSignatures::new("Product")
                .action("show", signature(vec![ParameterSpec::required("id")]))
                .render(
                    "list",
                    signature(vec![
                        ParameterSpec::with_default("page", 1),
                        ParameterSpec::with_default("sort", "name"),
                    ]),
                ),
        )
        .with_presenter(
            "Admin:Product",
            PresenterSignatures::new("Admin:Product").action(
                "edit",
                signature(vec![
                    ParameterSpec::required("id"),
                    ParameterSpec::array("tags", Some(ParamValue::list(Vec::<i64>::new()))),
                ]),
            ),
        )
        .with_opaque("Legacy")
}

pub fn shop_resolver(router: Arc<QueryRouter>) -> LinkResolver {
    LinkResolver::new(router, RefUrl::new("https", "shop.example"))
        .with_directory(Arc::new(shop_directory()))
}

pub fn bag(values: Vec<ParamValue>) -> ArgumentBag {
    ArgumentBag::positional(values)
}
