pub mod hash;

pub use hash::{fingerprint, short_fingerprint};
