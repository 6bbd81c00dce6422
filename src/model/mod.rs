pub mod edge;
pub mod node;
pub mod position;
pub mod validate;

pub use edge::*;
pub use node::*;
pub use position::*;
pub use validate::*;
