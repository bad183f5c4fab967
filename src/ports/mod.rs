mod playground_backend;
mod profile_store;

pub use playground_backend::PlaygroundBackend;
pub use profile_store::ProfileStore;
