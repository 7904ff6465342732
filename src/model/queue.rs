//! Queue Mirror: the local reconstruction of the remote server's live queue.
//!
//! Only ever produced by parsing a fresh `playlist` listing, never mutated by
//! client-side guesses — remote position numbering shifts on every delete, so
//! incremental patching would drift.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    /// 0-based position matching the remote queue order.
    pub position: usize,
    pub title: String,
    pub locator: String,
}

#[derive(Clone, Debug, Default)]
pub struct QueueMirror {
    entries: Vec<QueueEntry>,
}

impl QueueMirror {
    /// Full re-derivation from a `playlist` response. Records look like
    /// `<pos>:<locator>`; a `file: ` tag prefix after the colon is tolerated.
    /// Malformed lines are skipped.
    pub fn from_listing<S: AsRef<str>>(lines: &[S]) -> Self {
        let entries = lines
            .iter()
            .filter_map(|line| parse_record(line.as_ref()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&QueueEntry> {
        self.entries.iter().find(|e| e.position == position)
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    /// First entry whose title matches exactly. Titles are display fields,
    /// not identities, so this is ambiguous under duplicates (first match
    /// wins) and is only used as a search convenience, never for activation.
    pub fn resolve_by_title(&self, title: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.title == title).map(|e| e.position)
    }
}

fn parse_record(line: &str) -> Option<QueueEntry> {
    let (pos, rest) = line.split_once(':')?;
    let position = pos.trim().parse().ok()?;
    let locator = rest.trim().strip_prefix("file: ").unwrap_or(rest.trim());
    if locator.is_empty() {
        return None;
    }
    Some(QueueEntry {
        position,
        title: display_title(locator),
        locator: locator.to_string(),
    })
}

/// The listing carries no metadata, so the display title is derived from the
/// locator's final path segment.
fn display_title(locator: &str) -> String {
    locator
        .rsplit('/')
        .next()
        .filter(|seg| !seg.is_empty())
        .unwrap_or(locator)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_in_order() {
        let mirror = QueueMirror::from_listing(&[
            "0:https://datashat.net/music_for_programming_1.mp3",
            "1:file: https://datashat.net/music_for_programming_2.mp3",
        ]);
        assert_eq!(mirror.len(), 2);
        assert_eq!(mirror.get(0).unwrap().title, "music_for_programming_1.mp3");
        assert_eq!(
            mirror.get(1).unwrap().locator,
            "https://datashat.net/music_for_programming_2.mp3"
        );
    }

    #[test]
    fn skips_malformed_records() {
        let mirror = QueueMirror::from_listing(&["not a record", "2:", "0:ok.mp3"]);
        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror.get(0).unwrap().locator, "ok.mp3");
    }

    #[test]
    fn re_derivation_reflects_a_remote_delete() {
        let before = QueueMirror::from_listing(&["0:a.mp3", "1:b.mp3", "2:c.mp3"]);
        assert_eq!(before.get(2).unwrap().locator, "c.mp3");

        // After `delete 1` the server renumbers; a fresh listing is the only
        // trustworthy source of positions.
        let after = QueueMirror::from_listing(&["0:a.mp3", "1:c.mp3"]);
        assert_eq!(after.len(), 2);
        assert_eq!(after.get(1).unwrap().locator, "c.mp3");
        assert_eq!(after.get(2), None);
    }

    #[test]
    fn duplicate_titles_keep_distinct_positions() {
        let mirror = QueueMirror::from_listing(&["0:x/same.mp3", "1:y/same.mp3"]);
        assert_eq!(mirror.titles(), vec!["same.mp3", "same.mp3"]);
        assert_eq!(mirror.get(1).unwrap().locator, "y/same.mp3");
        // Title lookup is ambiguous under duplicates: first match wins.
        assert_eq!(mirror.resolve_by_title("same.mp3"), Some(0));
        assert_eq!(mirror.resolve_by_title("other.mp3"), None);
    }

    #[test]
    fn empty_listing_is_empty() {
        let mirror = QueueMirror::from_listing::<&str>(&[]);
        assert!(mirror.is_empty());
    }
}
