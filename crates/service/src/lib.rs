//! Service layer enforcing company business rules on top of the repository.
//! - Validates candidates before any mutation.
//! - Turns ISIN collisions, id mismatches and missing rows into typed errors.
//! - Performs no caching; read caching is a client concern.

pub mod errors;
pub mod company;
#[cfg(test)]
pub mod test_support;
