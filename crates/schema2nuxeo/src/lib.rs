//! Generate Nuxeo XSD schemas and component contributions from the
//! schema.org vocabulary.
//!
//! The pipeline loads the vocabulary JSON ([`extraction::vocabulary_loader`]),
//! resolves and classifies its terms ([`extraction::terms`]), selects and
//! orders a subtree of types ([`extraction::type_tree`]) and writes the
//! bundle through the emitters in [`emitter`]. [`generator`] ties the stages
//! together.

pub mod emitter;
pub mod extraction;
pub mod generator;
pub mod model;
