//! Error-contained layout rendering.
//!
//! A page or view that fails while building its layout must not take the
//! whole application down with it. [`render`] runs a layout builder and turns
//! any failure, an `Err` return or a panic, into a displayable error node
//! carrying the diagnostic text:
//!
//! ```text
//! Rendering ──ok──────▶ Succeeded (value passed through)
//!     │
//!     └──err / panic──▶ Failed    (Container[Preformatted(diagnostic)])
//! ```
//!
//! Both outcomes are terminal. The host framework calls the layout again on
//! the next request; nothing is retried here.

use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::component::ComponentId;

/// Keyword arguments handed to a layout (query parameters for pages).
pub type Props = BTreeMap<String, String>;

/// Output types that can stand in for a failed layout.
pub trait ErrorContainer: Sized {
    /// Wrap a diagnostic message in a displayable value.
    fn error_container(message: String) -> Self;
}

/// Minimal display tree produced by layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Block container (`html.Div`).
    Container {
        id: Option<ComponentId>,
        children: Vec<Node>,
    },
    /// Verbatim text (`html.Pre`).
    Preformatted(String),
    Text(String),
}

impl Node {
    pub fn container(children: Vec<Node>) -> Self {
        Self::Container { id: None, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Attach an id to a container. Leaves other nodes unchanged.
    pub fn with_id(self, id: ComponentId) -> Self {
        match self {
            Self::Container { children, .. } => Self::Container {
                id: Some(id),
                children,
            },
            other => other,
        }
    }

    pub fn id(&self) -> Option<&ComponentId> {
        match self {
            Self::Container { id, .. } => id.as_ref(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Text of a leaf node.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Preformatted(t) | Self::Text(t) => Some(t),
            Self::Container { .. } => None,
        }
    }
}

impl ErrorContainer for Node {
    fn error_container(message: String) -> Self {
        Self::container(vec![Self::Preformatted(message)])
    }
}

/// What went wrong inside a layout builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    Error {
        type_name: &'static str,
        message: String,
        causes: Vec<String>,
    },
    Panic {
        message: String,
    },
}

impl RenderFailure {
    pub fn from_error<E: Error + 'static>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self::Error {
            type_name: std::any::type_name::<E>(),
            message: err.to_string(),
            causes,
        }
    }

    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        Self::Panic { message }
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error {
                type_name,
                message,
                causes,
            } => {
                write!(f, "{type_name}: {message}")?;
                if !causes.is_empty() {
                    write!(f, "\n\nCaused by:")?;
                    for (i, cause) in causes.iter().enumerate() {
                        write!(f, "\n    {i}: {cause}")?;
                    }
                }
                Ok(())
            }
            Self::Panic { message } => write!(f, "panic: {message}"),
        }
    }
}

/// Run a layout builder inside a failure boundary.
///
/// The builder's error never reaches the caller; it is rendered into
/// `T::error_container`. Panics are contained the same way, which requires
/// the binary to be built with `panic = "unwind"`.
pub fn render<T, E, F>(build: F) -> T
where
    T: ErrorContainer,
    E: Error + 'static,
    F: FnOnce() -> Result<T, E>,
{
    let failure = match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(Ok(layout)) => return layout,
        Ok(Err(err)) => RenderFailure::from_error(&err),
        Err(payload) => RenderFailure::from_panic(payload),
    };

    warn!(failure = %failure, "layout render failed");
    T::error_container(failure.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug)]
    struct ZeroDivisionError;

    impl fmt::Display for ZeroDivisionError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("division by zero")
        }
    }

    impl Error for ZeroDivisionError {}

    #[derive(Debug)]
    struct DataLoadError(std::io::Error);

    impl fmt::Display for DataLoadError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("could not load data")
        }
    }

    impl Error for DataLoadError {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    fn unwrap_error_text(node: &Node) -> &str {
        let [inner] = node.children() else {
            panic!("expected exactly one child, got {node:?}");
        };
        assert!(matches!(inner, Node::Preformatted(_)));
        inner.text_content().unwrap()
    }

    #[test]
    fn ok_passes_through() {
        let expected = Node::container(vec![Node::text("hello")]);
        let out = render(|| Ok::<_, Infallible>(expected.clone()));
        assert_eq!(out, expected);
    }

    #[test]
    fn error_becomes_container_with_preformatted_text() {
        let out: Node = render(|| Err(ZeroDivisionError));
        assert!(unwrap_error_text(&out).contains("ZeroDivisionError: division by zero"));
    }

    #[test]
    fn error_container_has_two_levels() {
        let node = Node::error_container("test message".into());
        assert_eq!(unwrap_error_text(&node), "test message");
    }

    #[test]
    fn cause_chain_is_included() {
        let out: Node = render(|| {
            Err(DataLoadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "sales.csv missing",
            )))
        });
        let text = unwrap_error_text(&out);
        assert!(text.contains("DataLoadError: could not load data"));
        assert!(text.contains("Caused by:"));
        assert!(text.contains("sales.csv missing"));
    }

    #[test]
    fn panic_is_contained() {
        let out: Node = render(|| -> Result<Node, Infallible> {
            let values: Vec<u32> = Vec::new();
            let fourth = values.get(3).copied().unwrap();
            Ok(Node::text(fourth.to_string()))
        });
        assert!(unwrap_error_text(&out).starts_with("panic: "));
    }

    #[test]
    fn panic_with_string_payload_keeps_message() {
        let out: Node = render(|| -> Result<Node, Infallible> { panic!("broken {}", "layout") });
        assert_eq!(unwrap_error_text(&out), "panic: broken layout");
    }
}
