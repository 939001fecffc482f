//! Numeric index keys.
//!
//! Any single number (byte through double) is indexed by its `f64`
//! projection plus the owning entity id. The exact number is kept in the
//! entry value.

mod extract;
mod key;
mod layout;
mod value;

pub use extract::{InvalidKeyInput, single_number, single_number_as_f64};
pub use key::NumberKey;
pub use layout::{
    NonUnique, NonUniqueNumberLayout, NumberIndexLayout, NumberLayout, NumberOrdering, Unique,
    UniqueNumberLayout,
};
pub use value::{NumberType, NumberValue};
