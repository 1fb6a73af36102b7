pub mod context;
pub mod nuxeo;
pub mod vocabulary;
