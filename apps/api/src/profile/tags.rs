use serde::{Deserialize, Serialize};

/// Ordered set of unique, non-blank tags (skills, target companies).
///
/// Tags are trimmed on insert and compared by exact, case-sensitive match.
/// `add` and `remove` return a new set and leave `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag`. Blank or already-present tags are ignored.
    pub fn add(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.push(tag);
        next
    }

    /// Removes the tag at `index`. Out-of-range indices are ignored.
    pub fn remove(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.0.len() {
            next.0.remove(index);
        }
        next
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return;
        }
        self.0.push(tag.to_string());
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = TagSet::new();
        for tag in &tags {
            set.push(tag);
        }
        set
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.0
    }
}
