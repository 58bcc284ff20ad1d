//! Mosaic (secondary asset) identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Quantity;

/// Fully qualified mosaic name: `namespace:name`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MosaicId {
    pub namespace: String,
    pub name: String,
}

impl MosaicId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// A quantity of one mosaic, as attached to a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicId,
    pub quantity: Quantity,
}

impl Mosaic {
    pub fn new(id: MosaicId, quantity: Quantity) -> Self {
        Self { id, quantity }
    }
}
