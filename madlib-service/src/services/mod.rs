pub mod generation;
pub mod providers;

pub use generation::GenerationService;
