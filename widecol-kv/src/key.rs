use widecol_dtype::RowId;

const ROW_ID_LEN: usize = size_of::<RowId>();

/// The store key of `field` in row `row_id`.
///
/// Layout: `[row_id: u32 big-endian][field name: utf8]`. The fixed-width prefix makes the
/// mapping injective, and big-endian ids keep every row's fields adjacent in key order.
pub fn row_key(row_id: RowId, field: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(ROW_ID_LEN + field.len());
    key.extend_from_slice(&row_id.to_be_bytes());
    key.extend_from_slice(field.as_bytes());
    key
}

/// Split a key produced by [`row_key`] back into its row id and field name.
pub fn split_row_key(key: &[u8]) -> Option<(RowId, &str)> {
    let (id, field) = key.split_first_chunk::<ROW_ID_LEN>()?;
    let field = std::str::from_utf8(field).ok()?;
    Some((RowId::from_be_bytes(*id), field))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "id")]
    #[case(1, "id")]
    #[case(u32::MAX, "region")]
    #[case(12, "")]
    #[case(7, "with:colon")]
    fn split_inverts_key(#[case] row_id: RowId, #[case] field: &str) {
        assert_eq!(split_row_key(&row_key(row_id, field)), Some((row_id, field)));
    }

    #[test]
    fn no_collisions() {
        assert_ne!(row_key(1, "1:x"), row_key(11, ":x"));
        assert_ne!(row_key(1, "score"), row_key(2, "score"));
        assert_ne!(row_key(1, "score"), row_key(1, "id"));
    }

    #[test]
    fn keys_sort_row_major() {
        let mut keys = vec![row_key(2, "a"), row_key(1, "z"), row_key(256, "a"), row_key(1, "a")];
        keys.sort();
        assert_eq!(
            keys,
            vec![row_key(1, "a"), row_key(1, "z"), row_key(2, "a"), row_key(256, "a")]
        );
    }

    #[test]
    fn short_keys_do_not_split() {
        assert_eq!(split_row_key(&[0, 1]), None);
    }
}
