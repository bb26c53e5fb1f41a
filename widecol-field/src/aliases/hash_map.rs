//! The hash map keyed by dictionary values.

/// The hash map used throughout Widecol.
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presized_map() {
        let mut map: HashMap<&str, usize> = HashMap::with_capacity(4);
        assert!(map.capacity() >= 4);
        map.insert("west", 0);
        assert_eq!(map.get("west"), Some(&0));
    }
}
