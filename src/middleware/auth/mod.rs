pub mod access;

pub use access::requires;
