//! Archive format detection and per-format decoders.

pub mod common;
pub mod detect;
pub mod gzip;
pub mod rar;
pub mod sevenz;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use self::detect::ArchiveFormat;
pub use self::gzip::GzipDecoder;
pub use self::rar::RarDecoder;
pub use self::sevenz::SevenZDecoder;
pub use self::traits::ArchiveDecoder;
pub use self::zip::ZipDecoder;
