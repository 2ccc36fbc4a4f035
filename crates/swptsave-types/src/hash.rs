//! Type-name hash used to derive kind IDs.
//!
//! This is Paul Hsieh's SuperFastHash run over UTF-16 code units instead of
//! bytes, seeded with the number of code units. The game computes its type
//! IDs this way; any change here breaks every existing save file.

/// Hash a fully qualified type name such as `"System.Int32"`.
pub fn type_hash(name: &str) -> u32 {
    let units: Vec<u16> = name.encode_utf16().collect();
    hash_code_units(&units)
}

/// Hash a sequence of UTF-16 code units.
pub fn hash_code_units(units: &[u16]) -> u32 {
    let mut hash = units.len() as u32;

    let mut pairs = units.chunks_exact(2);
    for pair in &mut pairs {
        hash = hash.wrapping_add(u32::from(pair[0]));
        let tmp = (u32::from(pair[1]) << 11) ^ hash;
        hash = (hash << 16) ^ tmp;
        hash = hash.wrapping_add(hash >> 11);
    }

    if let [tail] = pairs.remainder() {
        hash = hash.wrapping_add(u32::from(*tail));
        hash ^= hash << 11;
        hash = hash.wrapping_add(hash >> 17);
    }

    // Final avalanche.
    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 4;
    hash = hash.wrapping_add(hash >> 17);
    hash ^= hash << 25;
    hash = hash.wrapping_add(hash >> 6);

    hash
}
