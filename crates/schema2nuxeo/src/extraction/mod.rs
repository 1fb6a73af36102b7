pub mod terms;
pub mod type_tree;
pub mod vocabulary_loader;
