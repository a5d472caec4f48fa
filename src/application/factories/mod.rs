/// Factories for selecting output adapters
mod output_factory;

pub use output_factory::{OutputFactory, OutputTarget};
