pub mod asset;
pub mod common;
pub mod export;
pub mod image;
pub mod video;

pub use asset::*;
pub use common::*;
pub use export::*;
pub use image::*;
pub use video::*;
