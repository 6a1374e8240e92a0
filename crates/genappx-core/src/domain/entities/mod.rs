pub mod common;
pub mod configuration;
pub mod file_tree;
pub mod project_structure;
pub mod selection;

pub use configuration::Configuration;
pub use file_tree::{Directory, Node, VirtualFileTree};
pub use project_structure::ProjectStructure;
pub use selection::Selection;
