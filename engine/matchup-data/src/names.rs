/// Normalize a player name for joining tables from different exports.
///
/// Lowercases, drops periods and the " jr" / " iii" suffixes, and trims.
/// "A.J. Brown" and "aj brown" both become "aj brown"; "Marvin Harrison Jr." becomes
/// "marvin harrison".
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('.', "").replace(" jr", "").replace(" iii", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("A.J. Brown"), "aj brown");
        assert_eq!(normalize_name("  Marvin Harrison Jr. "), "marvin harrison");
        assert_eq!(normalize_name("Michael Pittman Jr"), "michael pittman");
        assert_eq!(normalize_name("Odell Beckham III"), "odell beckham");
        assert_eq!(normalize_name("Ja'Marr Chase"), "ja'marr chase");
    }

    #[test]
    fn test_normalized_names_join() {
        assert_eq!(normalize_name("D.K. Metcalf"), normalize_name("DK Metcalf"));
    }
}
