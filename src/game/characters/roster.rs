// Keyed entity collections

/// Entities keyed by name, kept in insertion order
///
/// Order matters for rendering: entities whose depth ties are drawn in the
/// order they were gathered.
#[derive(Debug, Clone)]
pub struct Roster<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Roster<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entity. Re-using a key replaces the entity in place and
    /// returns the old one.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key.to_string(), value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entity, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_new() {
        let roster: Roster<u32> = Roster::new();
        assert_eq!(roster.len(), 0);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut roster = Roster::new();
        roster.insert("slime", 1);
        roster.insert("bat", 2);
        roster.insert("rat", 3);
        assert_eq!(roster.keys().collect::<Vec<_>>(), vec!["slime", "bat", "rat"]);

        roster.remove("bat");
        assert_eq!(roster.values().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut roster = Roster::new();
        roster.insert("a", 1);
        roster.insert("b", 2);
        assert_eq!(roster.insert("a", 10), Some(1));
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec![("a", &10), ("b", &2)]);
    }

    #[test]
    fn test_get_mut() {
        let mut roster = Roster::new();
        roster.insert("hero", 5);
        if let Some(v) = roster.get_mut("hero") {
            *v += 1;
        }
        assert_eq!(roster.get("hero"), Some(&6));
        assert!(roster.contains_key("hero"));
        assert_eq!(roster.get("ghost"), None);
        assert_eq!(roster.remove("ghost"), None);
    }
}
