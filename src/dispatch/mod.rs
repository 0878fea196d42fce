pub mod fallback;
pub mod http;

pub use fallback::Dispatcher;

/// Static description of one remote model target. Priority is the position
/// in the configured list and is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
