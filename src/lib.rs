//! A key/value map over a growable array of pairs, for keys that are only [`Eq`].
//!
//! ```
//! use assoc_array::{AssociativeArray, KeyNotFound};
//!
//! let mut arr = AssociativeArray::new();
//! arr.set("a", 1);
//! arr.set("b", 2);
//! arr.set("a", 3);
//! assert_eq!(arr.size(), 2);
//! assert_eq!(arr.get(&"a"), Ok(&3));
//! assert_eq!(arr.get(&"c"), Err(KeyNotFound));
//! assert_eq!(arr.to_string(), "{ a: 3, b: 2 }");
//! ```

pub mod array;
pub mod parser;

pub use array::*;
pub use parser::*;
