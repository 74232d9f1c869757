//! Content hashing

/// Computes the lookup hash for a ROM image
pub trait RomHasher: Send + Sync {
    fn hash(&self, console_id: u32, image: &[u8]) -> String;
}

/// MD5 over the full image, as lowercase hex
///
/// Consoles whose images carry headers or multiple tracks need a dedicated
/// hasher; this one treats every image as a flat buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl RomHasher for Md5Hasher {
    fn hash(&self, _console_id: u32, image: &[u8]) -> String {
        format!("{:x}", md5::compute(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_value() {
        let hash = Md5Hasher.hash(3, b"abc");
        assert_eq!(hash, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_length() {
        let hash = Md5Hasher.hash(7, &[0u8; 1024]);
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
