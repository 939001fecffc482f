//! Index configuration module.
//!
//! Selects the layout a numeric index is built with. The choice is made once,
//! when the index is configured by the tree engine, and is then fixed by the
//! layout identifier written to the index header.

use crate::number::NumberIndexLayout;

/// Whether an index admits more than one entry per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uniqueness {
    Unique,
    #[default]
    NonUnique,
}

/// Index configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexConfig {
    pub uniqueness: Uniqueness,
}

impl IndexConfig {
    #[must_use]
    pub const fn unique() -> Self {
        Self {
            uniqueness: Uniqueness::Unique,
        }
    }

    #[must_use]
    pub const fn non_unique() -> Self {
        Self {
            uniqueness: Uniqueness::NonUnique,
        }
    }

    /// The numeric layout this configuration selects.
    #[must_use]
    pub const fn number_layout(&self) -> NumberIndexLayout {
        match self.uniqueness {
            Uniqueness::Unique => NumberIndexLayout::unique(),
            Uniqueness::NonUnique => NumberIndexLayout::non_unique(),
        }
    }
}
