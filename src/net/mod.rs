pub mod image;
pub mod media;
