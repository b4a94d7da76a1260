//! Exploration Charters Backend Module
//!
//! Time-boxed exploratory testing sessions. A tester starts a charter with
//! a goal, jots notes (bugs, ideas, questions, risks) while it is active and
//! stops it when done. One active charter per user.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{CharterError, CharterResult};
pub use infra::postgres::PgCharterRepository;
pub use presentation::router::{charters_router, charters_router_generic};
