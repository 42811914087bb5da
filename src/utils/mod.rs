pub mod image;
pub mod logging;
pub mod scroll;
pub mod url;
