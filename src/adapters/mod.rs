pub mod playground_http;
pub mod profile_file;

pub use playground_http::HttpPlaygroundBackend;
pub use profile_file::{FileProfileStore, load_profile};
