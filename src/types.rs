pub mod pokemon;
pub mod resource;

pub use pokemon::*;
pub use resource::*;
