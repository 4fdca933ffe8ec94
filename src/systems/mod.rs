pub mod bookshelf;
pub mod decor;
pub mod phase;
pub mod scroll;
