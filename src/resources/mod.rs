pub mod cli;
pub mod config;
pub mod music;
pub mod notice;
pub mod phase;
pub mod reveal;
pub mod shelf;

pub use cli::*;
pub use config::*;
pub use music::*;
pub use notice::*;
pub use phase::*;
pub use reveal::*;
pub use shelf::*;
