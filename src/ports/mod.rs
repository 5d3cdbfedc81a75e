//! Ports layer: Trait definition for the classifier collaborator.
//!
//! Following Hexagonal Architecture, this trait is the boundary between
//! the encoder/scorer and the externally trained model.

mod classifier;

pub use classifier::{Classifier, ClassifierError};
