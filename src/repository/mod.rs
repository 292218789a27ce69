//! Store access layer
//!
//! Handlers never see raw driver errors or query text; they work with
//! [`PetRepository`] and the structured [`RepositoryError`] it returns, so
//! "record absent" and "store broke" stay distinguishable without string
//! matching.

mod error;
mod pets;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult};
pub use pets::PetRepository;
