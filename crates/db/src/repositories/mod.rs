pub mod image_repo;

pub use image_repo::ImageRepo;
