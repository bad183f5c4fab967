mod fake_backend;

pub use fake_backend::FakePlaygroundBackend;
