//! Page and View contracts.
//!
//! Both are implemented on unit types and used through associated functions,
//! the way generated pages call `HomePage.layout(**kwargs)`:
//!
//! ```rust
//! use std::convert::Infallible;
//! use dash_builder_core::domain::{Node, Page, Props};
//!
//! struct HomePage;
//!
//! impl Page for HomePage {
//!     const NAME: &'static str = "HomePage";
//!     type Output = Node;
//!     type Error = Infallible;
//!
//!     fn valid_layout(_props: &Props) -> Result<Node, Infallible> {
//!         Ok(Node::text("This is the HomePage"))
//!     }
//! }
//!
//! assert_eq!(HomePage::layout(&Props::new()), Node::text("This is the HomePage"));
//! ```
//!
//! `valid_layout` has no default body, so forgetting it is a compile error
//! rather than a runtime "not implemented" failure.

use std::error::Error;

use super::component::{ComponentId, ComponentIndex, Wildcard, identifier_for, type_name_for};
use super::layout::{ErrorContainer, Props, render};

/// A top-level routable unit with an error-contained render entry point.
pub trait Page {
    /// Class name, the source of [`Page::name`].
    const NAME: &'static str;
    type Output: ErrorContainer;
    type Error: Error + 'static;

    /// Build the layout. Failures are contained by [`Page::layout`].
    fn valid_layout(props: &Props) -> Result<Self::Output, Self::Error>;

    fn name(subname: Option<&str>) -> String {
        type_name_for(Self::NAME, subname)
    }

    /// Render the page; never fails.
    fn layout(props: &Props) -> Self::Output {
        render(|| Self::valid_layout(props))
    }
}

/// A reusable component-producing unit addressed by [`ComponentId`]s.
pub trait View {
    /// Class name, the source of the id `type` field.
    const NAME: &'static str;
    type Output: ErrorContainer;
    type Error: Error + 'static;

    /// Build the components for the instance identified by `id`.
    fn valid_layout(id: &str, props: &Props) -> Result<Self::Output, Self::Error>;

    /// View name, used as the `type` field of component ids.
    fn name(subname: Option<&str>) -> String {
        type_name_for(Self::NAME, subname)
    }

    fn id(index: impl Into<ComponentIndex>) -> ComponentId {
        identifier_for(Self::NAME, index, None)
    }

    /// Id of a named sub-component, e.g. the logo inside a header.
    fn sub_id(index: impl Into<ComponentIndex>, subname: &str) -> ComponentId {
        identifier_for(Self::NAME, index, Some(subname))
    }

    fn matched_id() -> ComponentId {
        Self::id(Wildcard::Match)
    }

    fn all_ids() -> ComponentId {
        Self::id(Wildcard::All)
    }

    /// Render one instance of the view; never fails.
    fn layout(id: &str, props: &Props) -> Self::Output {
        render(|| Self::valid_layout(id, props))
    }
}
