//! Company module: domain, validation, repository and service layers.

pub mod domain;
pub mod validator;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Company, CompanyDraft};
pub use repository::CompanyRepository;
pub use service::CompanyService;
