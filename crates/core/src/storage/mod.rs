pub mod cipher;
pub mod envelope;
pub mod manager;
