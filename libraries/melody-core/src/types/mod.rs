//! Domain types shared across Melody Player crates

mod genre;
mod track;
mod user;

pub use genre::Genre;
pub use track::Track;
pub use user::User;
