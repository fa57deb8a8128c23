/// Hash a sequence of fields, length-prefixing each so that
/// `["ab", "c"]` and `["a", "bc"]` produce different digests.
#[must_use]
pub fn blake3_fields<I, B>(fields: I) -> String
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = blake3::Hasher::new();
    for field in fields {
        let bytes = field.as_ref();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    hasher.finalize().to_hex().to_string()
}
