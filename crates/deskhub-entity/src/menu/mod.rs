//! Navigation menu tree.

pub mod defaults;
pub mod node;

pub use defaults::default_menu;
pub use node::{MenuNode, MenuTag, MenuTree, parse_menu};
