//! Map boundaries in the row stream.
//!
//! Two consecutive names that share any leading characters are the same map: the
//! group is renamed to the shared prefix ("Busan" + "Busan: Downtown" -> "Busan").
//! This is purely lexical and will also merge unrelated maps that happen to start
//! with the same character.

/// Longest common leading run of characters. Never splits a UTF-8 sequence.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len: usize = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum();
    &a[..len]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No map established before this row.
    First,
    Same,
    /// Names share a prefix; the open group is now called `name`.
    Merge { name: String },
    /// A different map starts; the group called `closed` is complete.
    Split { closed: String },
}

#[derive(Debug, Clone, Default)]
pub struct MapSegmenter {
    last_map: String,
}

impl MapSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_established(&self) -> bool {
        !self.last_map.is_empty()
    }

    /// Name of the open group (possibly shortened by merges).
    pub fn last_map(&self) -> &str {
        &self.last_map
    }

    pub fn observe(&mut self, cur_map: &str) -> Transition {
        if !self.is_established() {
            self.last_map = cur_map.to_string();
            return Transition::First;
        }
        if self.last_map == cur_map {
            return Transition::Same;
        }
        let prefix = common_prefix(&self.last_map, cur_map);
        if !prefix.is_empty() {
            let name = prefix.to_string();
            self.last_map.clone_from(&name);
            Transition::Merge { name }
        } else {
            let closed = std::mem::replace(&mut self.last_map, cur_map.to_string());
            Transition::Split { closed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_cases() {
        assert_eq!(common_prefix("King's Row", "King's Row: Dawn"), "King's Row");
        assert_eq!(common_prefix("Busan", "Antarctic"), "");
        assert_eq!(common_prefix("", "Busan"), "");
        assert_eq!(common_prefix("国王大道", "国王大道（夜）"), "国王大道");
        assert_eq!(common_prefix("漓江塔", "漓江塔"), "漓江塔");
        // shared first byte of different characters must not be split
        assert_eq!(common_prefix("é", "è"), "");
    }

    #[test]
    fn first_same_merge_split() {
        let mut seg = MapSegmenter::new();
        assert_eq!(seg.observe("Busan"), Transition::First);
        assert_eq!(seg.observe("Busan"), Transition::Same);
        assert_eq!(
            seg.observe("Busan: Downtown"),
            Transition::Merge { name: "Busan".into() }
        );
        assert_eq!(seg.last_map(), "Busan");
        assert_eq!(
            seg.observe("Antarctic Peninsula"),
            Transition::Split { closed: "Busan".into() }
        );
        assert_eq!(seg.last_map(), "Antarctic Peninsula");
    }

    #[test]
    fn merge_can_shorten_name_retroactively() {
        let mut seg = MapSegmenter::new();
        seg.observe("King's Row: Dawn");
        assert_eq!(
            seg.observe("King's Row"),
            Transition::Merge { name: "King's Row".into() }
        );
    }

    #[test]
    fn coincidental_prefix_still_merges() {
        let mut seg = MapSegmenter::new();
        seg.observe("Hanamura");
        assert_eq!(seg.observe("Havana"), Transition::Merge { name: "Ha".into() });
    }

    #[test]
    fn empty_name_does_not_establish() {
        let mut seg = MapSegmenter::new();
        assert_eq!(seg.observe(""), Transition::First);
        assert!(!seg.is_established());
        assert_eq!(seg.observe("Ilios"), Transition::First);
        assert!(seg.is_established());
    }
}
