//! Domain Layer

pub mod charter;
pub mod note;
pub mod repository;

pub use charter::{Charter, CharterStatus};
pub use note::{CharterNote, NoteLabel};
pub use repository::CharterRepository;
