pub mod diagnosis;
pub mod engine;
pub mod error;
pub mod input;
pub mod pillar;
pub mod verdict;

pub use diagnosis::*;
pub use engine::*;
pub use error::InputError;
pub use input::*;
pub use pillar::*;
pub use verdict::*;
