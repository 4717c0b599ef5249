mod content_directory;

pub use content_directory::*;
