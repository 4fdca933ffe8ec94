pub mod book;
pub mod decor;
pub mod fade_controller;
pub mod letter;
pub mod scene;

pub use book::*;
pub use decor::*;
pub use fade_controller::*;
pub use letter::*;
pub use scene::*;
