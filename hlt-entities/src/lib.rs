//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # hlt-entities
//!
//! Reusable, agnostic domain entities for HuelvaLate.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod blog;
pub mod category;
pub mod geo;
pub mod id;
pub mod password;
pub mod place;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
