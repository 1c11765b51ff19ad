//! Client for the Nintendo title search service.
//!
//! Build a [`SearchCriteria`], open a [`SearchSession`] from a
//! [`SearchClient`], then pull pages until the session is exhausted.

pub mod client;
pub mod codes;
pub mod criteria;
pub mod decode;
mod detail;
pub mod encode;
pub mod error;
pub mod session;
pub mod types;
mod xml;

pub use client::SearchClient;
pub use codes::{hardware_label, medium_label, Genre, Medium, Platform, Tag};
pub use criteria::SearchCriteria;
pub use error::{SearchError, ValidationError};
pub use nsearch_core::ReleaseWindowScheme;
pub use session::{SearchSession, SessionState};
pub use types::{SearchPage, TitleRecord};
