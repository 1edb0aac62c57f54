//! Comma-joined id lists, the stored form of a milestone's requirements.

/// Join ids with commas; an empty slice yields an empty string.
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a comma-joined list. Blank and non-numeric entries are skipped.
pub fn split_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(entry, list = raw, "skipping non-numeric id in id list");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join() {
        assert_eq!(join_ids(&[]), "");
        assert_eq!(join_ids(&[7]), "7");
        assert_eq!(join_ids(&[3, 1, 2]), "3,1,2");
    }

    #[test]
    fn split_trims_and_skips_garbage() {
        assert!(split_ids("").is_empty());
        assert_eq!(split_ids("3,1,2"), vec![3, 1, 2]);
        assert_eq!(split_ids(" 4 , ,x, 5,"), vec![4, 5]);
    }

    #[test]
    fn split_inverts_join() {
        let ids = vec![10, 20, 30];
        assert_eq!(split_ids(&join_ids(&ids)), ids);
    }
}
