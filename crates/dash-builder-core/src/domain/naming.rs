//! Identifier case conversion.
//!
//! These converters work on PascalCase / camelCase *identifiers* (class names,
//! artifact names). They insert a separator before every uppercase character
//! that is not the first one, then lowercase the result:
//!
//! | Input        | kebab            | snake            |
//! |--------------|------------------|------------------|
//! | `TestView`   | `test-view`      | `test_view`      |
//! | `homePage`   | `home-page`      | `home_page`      |
//! | `HTTPServer` | `h-t-t-p-server` | `h_t_t_p_server` |
//!
//! Consecutive capitals each get their own separator. Generated projects
//! already depend on the ids this produces, so acronyms are not grouped.

/// Convert a PascalCase / camelCase identifier to kebab-case.
pub fn to_kebab_case(identifier: &str) -> String {
    insert_separator(identifier, '-')
}

/// Convert a PascalCase / camelCase identifier to snake_case.
pub fn to_snake_case(identifier: &str) -> String {
    insert_separator(identifier, '_')
}

/// Build a generated class name from an artifact name and a kind suffix.
///
/// `("analytics", "Page")` → `AnalyticsPage`. A name that already carries the
/// suffix is left alone: `("HomePage", "Page")` → `HomePage`.
pub fn class_name(name: &str, suffix: &str) -> String {
    let mut chars = name.chars();
    let mut out = String::with_capacity(name.len() + suffix.len());
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    if !out.ends_with(suffix) {
        out.push_str(suffix);
    }
    out
}

fn insert_separator(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(separator);
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_to_kebab() {
        assert_eq!(to_kebab_case("TestView"), "test-view");
        assert_eq!(to_kebab_case("NotFound404"), "not-found404");
    }

    #[test]
    fn camel_to_snake() {
        assert_eq!(to_snake_case("homePage"), "home_page");
        assert_eq!(to_snake_case("Analytics"), "analytics");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_kebab_case(""), "");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn lowercase_input_is_unchanged() {
        assert_eq!(to_kebab_case("sidebar"), "sidebar");
        assert_eq!(to_snake_case("sidebar"), "sidebar");
    }

    #[test]
    fn consecutive_capitals_each_get_a_separator() {
        assert_eq!(to_kebab_case("HTTPServer"), "h-t-t-p-server");
        assert_eq!(to_snake_case("IOView"), "i_o_view");
    }

    #[test]
    fn kebab_is_idempotent() {
        for input in ["TestView", "HTTPServer", "already-kebab", "x", "", "aB"] {
            let once = to_kebab_case(input);
            assert_eq!(to_kebab_case(&once), once, "input: {input}");
        }
    }

    #[test]
    fn class_name_appends_suffix_once() {
        assert_eq!(class_name("analytics", "Page"), "AnalyticsPage");
        assert_eq!(class_name("Analytics", "Page"), "AnalyticsPage");
        assert_eq!(class_name("HomePage", "Page"), "HomePage");
        assert_eq!(class_name("Sidebar", "View"), "SidebarView");
    }
}
