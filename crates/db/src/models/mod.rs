pub mod image;

pub use image::{CreateImage, ImageRecord};
