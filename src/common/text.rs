//! Text manipulation utilities

/// Capitalizes the first character of a string
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Action-style member name: `show` -> `actionShow`
pub fn action_member(action: &str) -> String {
    format!("action{}", capitalize_first(action))
}

/// Render-style member name: `show` -> `renderShow`
pub fn render_member(action: &str) -> String {
    format!("render{}", capitalize_first(action))
}

/// Conventional class name of a presenter id.
///
/// Module segments gain a `Module` suffix and the last segment a `Presenter`
/// suffix: `Admin:Product` -> `AdminModule\ProductPresenter`.
pub fn presenter_class(presenter: &str) -> String {
    let mut segments: Vec<String> = presenter.split(':').map(str::to_string).collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.push_str(if i == last { "Presenter" } else { "Module" });
    }
    segments.join("\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first_empty_string() {
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_capitalize_first_lowercase_word() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(capitalize_first("_private"), "_private");
    }

    #[test]
    fn test_member_names() {
        assert_eq!(action_member("show"), "actionShow");
        assert_eq!(render_member("default"), "renderDefault");
        assert_eq!(action_member("editItem"), "actionEditItem");
    }

    #[test]
    fn test_presenter_class_for_plain_and_module_ids() {
        assert_eq!(presenter_class("Product"), "ProductPresenter");
        assert_eq!(
            presenter_class("Front:Admin:Product"),
            "FrontModule\\AdminModule\\ProductPresenter"
        );
    }
}
