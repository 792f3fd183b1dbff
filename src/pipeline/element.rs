//! Streaming pipeline capability boundary.

use std::collections::BTreeMap;

/// A configurable node in the streaming pipeline.
pub trait Element {
    fn set_property(&mut self, key: &str, value: &str);
}

/// The streaming engine that owns and instantiates elements.
pub trait StreamApi {
    type Element: Element;

    /// Whether the engine has been initialized and can create elements.
    fn is_initialized(&self) -> bool;

    fn create_element(&self, kind: &str) -> Self::Element;
}

/// Element that records its kind and properties in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyElement {
    kind: String,
    properties: BTreeMap<String, String>,
}

impl PropertyElement {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl Element for PropertyElement {
    fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }
}
