//! Filter Pipeline Module
//!
//! Conjunctive, lazily evaluated query pipelines over discovered entities.
//!
//! ## Key Components
//!
//! - **Filter**: generic chain node with memoized terminal evaluation
//! - **TypeFilter / MethodFilter / FieldFilter**: per-kind builder predicates
//! - **EntityKind**: how each kind accumulates its raw candidates
//!
//! ## Usage
//!
//! ```ignore
//! use typesift::modifiers::{PUBLIC, STATIC};
//!
//! let constants = typesift::fields_within(["app::config"])
//!     .mods(&[PUBLIC, STATIC])
//!     .of_type("u16");
//! for field in constants.find() {
//!     println!("{}::{}", field.declaring_type(), field.name());
//! }
//! ```

mod field_stage;
mod method_stage;
mod stage;
mod type_stage;

pub use field_stage::{FieldFilter, Fields};
pub use method_stage::{MethodFilter, Methods};
pub use stage::{EntityKind, Filter};
pub use type_stage::{TypeFilter, Types};
