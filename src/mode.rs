//! Most-frequent-element search built only on the [`StringMap`] operations

use crate::{ChainedMap, MapError, utils::StringMap};

/// The modal values of a sequence and how often each occurs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mode {
    /// Every value that occurs `frequency` times, in the counting map's enumeration order
    pub values: Vec<String>,
    /// Occurrences of each modal value; `0` for an empty sequence
    pub frequency: usize,
}

/// Finds the most frequent items, counting them in a [`ChainedMap`].
///
/// Ties are all reported. An empty sequence yields no values and a frequency of `0`.
///
/// # Errors
///
/// Returns a [`MapError`] if the counting map cannot grow.
pub fn find_mode<I>(items: I) -> Result<Mode, MapError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    find_mode_with(items, ChainedMap::new())
}

/// Finds the most frequent items, counting them in the supplied empty map.
///
/// The order of tied values follows `counts`' enumeration order.
///
/// # Errors
///
/// Returns a [`MapError`] if `counts` cannot grow.
pub fn find_mode_with<I, M>(items: I, mut counts: M) -> Result<Mode, MapError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    M: StringMap<usize>,
{
    let mut frequency: usize = 0;
    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).map_or(1, |count| count.saturating_add(1));
        counts.put(item.to_owned(), count)?;
        frequency = frequency.max(count);
    }

    let values = counts
        .entries()
        .into_iter()
        .filter(|&(_, &count)| count == frequency)
        .map(|(key, _)| key.to_owned())
        .collect();
    Ok(Mode { values, frequency })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OpenAddressingMap, hashing::positional_hash};

    fn sorted(mut mode: Mode) -> Mode {
        mode.values.sort();
        mode
    }

    fn mode_of(values: &[&str], frequency: usize) -> Mode {
        let mut values: Vec<String> = values.iter().map(|value| (*value).to_string()).collect();
        values.sort();
        Mode { values, frequency }
    }

    #[test]
    fn test_single_mode() {
        let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]).unwrap();
        assert_eq!(mode, mode_of(&["apple"], 2));
    }

    #[test]
    fn test_tied_modes() {
        let items = ["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"];
        let mode = sorted(find_mode(items).unwrap());
        assert_eq!(mode, mode_of(&["2", "3", "4"], 3));

        let items =
            ["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu"];
        let mode = sorted(find_mode(items).unwrap());
        assert_eq!(mode, mode_of(&["Mint", "Ubuntu"], 3));
    }

    #[test]
    fn test_all_distinct() {
        let items = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let mode = sorted(find_mode(&items).unwrap());
        assert_eq!(mode, mode_of(&["one", "three", "two"], 1));
    }

    #[test]
    fn test_empty_input() {
        let mode = find_mode(Vec::<String>::new()).unwrap();
        assert_eq!(mode, Mode::default());
        assert!(mode.values.is_empty());
        assert_eq!(mode.frequency, 0);
    }

    #[test]
    fn test_with_open_addressing_counts() {
        let counts = OpenAddressingMap::with_capacity_and_hasher(3, positional_hash).unwrap();
        let items: Vec<String> = (0..200).map(|i| (i % 7).to_string()).collect();
        let mode = sorted(find_mode_with(&items, counts).unwrap());

        // 200 = 7 * 28 + 4, so the first four residues appear once more
        assert_eq!(mode, mode_of(&["0", "1", "2", "3"], 29));
    }
}
