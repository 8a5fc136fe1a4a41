pub mod media;
pub mod students;

pub mod prelude {
    pub use super::media::Entity as Media;
    pub use super::students::Entity as Students;
}
