use rand::seq::SliceRandom;
use rand::Rng;

/// Splits free text on newlines and commas into trimmed, non-empty names.
///
/// Input order is preserved. Never fails; blank input yields an empty list.
pub fn parse_participants(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the names in a uniformly random order.
pub fn shuffle_names<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = names.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

pub fn join_names(names: &[String]) -> String {
    names.join("\n")
}

/// Appends names to existing raw text, one per line.
pub fn append_names(existing: &str, names: &[String]) -> String {
    let addition = join_names(names);
    if existing.is_empty() {
        addition
    } else if addition.is_empty() {
        existing.to_string()
    } else {
        format!("{}\n{}", existing, addition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_splits_on_commas_and_newlines() {
        assert_eq!(
            parse_participants("Alice, Bob\nCarol"),
            vec!["Alice", "Bob", "Carol"]
        );
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(parse_participants("").is_empty());
        assert!(parse_participants("   ").is_empty());
        assert!(parse_participants("  ,, \n ").is_empty());
    }

    #[test]
    fn test_trims_and_handles_crlf() {
        assert_eq!(
            parse_participants("  Dana Scully \r\n\tFox Mulder,\r\n"),
            vec!["Dana Scully", "Fox Mulder"]
        );
    }

    #[test]
    fn test_keeps_duplicates_in_input_order() {
        assert_eq!(parse_participants("Sam,Sam\nAlex"), vec!["Sam", "Sam", "Alex"]);
    }

    #[test]
    fn test_shuffle_names_is_a_permutation() {
        let names = parse_participants("a,b,c,d,e,f,g");
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = shuffle_names(&names, &mut rng);
        shuffled.sort();
        assert_eq!(shuffled, names);
    }

    #[test]
    fn test_append_names() {
        let extra = vec!["Player 1".to_string(), "Player 2".to_string()];
        assert_eq!(append_names("", &extra), "Player 1\nPlayer 2");
        assert_eq!(append_names("Coach", &extra), "Coach\nPlayer 1\nPlayer 2");
        assert_eq!(append_names("Coach", &[]), "Coach");
    }
}
