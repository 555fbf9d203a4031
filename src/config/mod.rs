//! Configuration for link generation.
//!
//! Configuration lives in `.linkgen.toml`, discovered by walking up from the
//! working directory. Every section is optional:
//!
//! ```toml
//! [conventions]
//! default_action = "default"
//! action_key = "action"
//!
//! [ref_url]
//! scheme = "https"
//! host = "example.com"
//! base_path = "/shop/"
//!
//! [[presenters]]
//! name = "Product"
//! [[presenters.members]]
//! name = "actionShow"
//! parameters = [{ name = "id" }, { name = "page", default = 1 }]
//! ```

mod core;
mod loader;

pub use self::core::{
    default_action, default_action_key, Conventions, LinkConfig, MemberConfig, PresenterConfig,
};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::directory::{HandlerDirectory, HandlerKind};
    use indoc::indoc;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config.conventions(), Conventions::default());
        assert_eq!(config.ref_url().base_url(), "http://localhost/");
        assert!(config.presenters.is_empty());
    }

    #[test]
    fn test_presenters_become_directory_entries() {
        let config = parse_and_validate_config(indoc! {r#"
            [ref_url]
            scheme = "https"
            host = "shop.example"
            base_path = "eshop"

            [[presenters]]
            name = "Product"

            [[presenters.members]]
            name = "actionShow"
            parameters = [{ name = "id" }, { name = "page", default = 1 }]

            [[presenters]]
            name = "Legacy"
            opaque = true
        "#})
        .unwrap();

        assert_eq!(config.ref_url().base_url(), "https://shop.example/eshop/");

        let directory = config.build_directory().unwrap();
        let HandlerKind::Bindable(source) = directory.lookup("Product").unwrap() else {
            panic!("Product should be bindable");
        };
        let signature = source.signature("actionShow").unwrap();
        assert_eq!(signature.len(), 2);
        assert!(signature.is_optional(1));
        assert!(!directory.lookup("Legacy").unwrap().is_bindable());
    }

    #[test]
    fn test_duplicate_parameters_fail_directory_build() {
        let config = parse_and_validate_config(indoc! {r#"
            [[presenters]]
            name = "Product"

            [[presenters.members]]
            name = "actionShow"
            parameters = [{ name = "id" }, { name = "id" }]
        "#})
        .unwrap();
        let err = config.build_directory().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product::actionShow: Duplicate parameter 'id' in signature."
        );
    }

    #[test]
    fn test_invalid_presenter_name_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [[presenters]]
            name = "1Product"
        "#})
        .unwrap_err();
        assert!(err.to_string().contains("'1Product' is invalid"));
    }

    #[test]
    fn test_optional_marker_declares_null_default() {
        let config = parse_and_validate_config(indoc! {r#"
            [[presenters]]
            name = "Product"

            [[presenters.members]]
            name = "renderList"
            parameters = [{ name = "page", default = 1 }, { name = "filter", optional = true }]
        "#})
        .unwrap();
        let directory = config.build_directory().unwrap();
        let HandlerKind::Bindable(source) = directory.lookup("Product").unwrap() else {
            panic!("Product should be bindable");
        };
        let signature = source.signature("renderList").unwrap();
        assert!(signature.is_optional(0));
        assert!(signature.is_optional(1));

        let bound = crate::binding::ParameterBinder::new("Product", "renderList", signature)
            .bind(&crate::binding::ArgumentBag::positional([1]))
            .unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_array_typed_parameter() {
        let config = parse_and_validate_config(indoc! {r#"
            [[presenters]]
            name = "Search"

            [[presenters.members]]
            name = "renderDefault"
            parameters = [{ name = "tags", type = "array", default = [] }]
        "#})
        .unwrap();
        let directory = config.build_directory().unwrap();
        let HandlerKind::Bindable(source) = directory.lookup("Search").unwrap() else {
            panic!("Search should be bindable");
        };
        let signature = source.signature("renderDefault").unwrap();
        assert_eq!(
            signature.expected_type(0),
            crate::value::ParamType::Array
        );
    }
}
