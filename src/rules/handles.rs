use super::entities::{Handle, HandleId, RuleId};
use std::path::PathBuf;

/// Output handles of a session, in creation order
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    handles: Vec<Handle>,
    next_id: HandleId,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Handle> {
        self.handles.iter().find(|handle| handle.name == name)
    }

    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Handle> {
        self.handles.iter_mut().find(|handle| handle.name == name)
    }

    pub fn get(&self, id: HandleId) -> Option<&Handle> {
        self.handles.iter().find(|handle| handle.id == id)
    }

    /// Create a handle; `None` when the name is taken
    pub fn add(
        &mut self,
        name: impl Into<String>,
        file: impl Into<PathBuf>,
        rules: Vec<RuleId>,
    ) -> Option<&Handle> {
        let name = name.into();
        if self.get_by_name(&name).is_some() {
            return None;
        }

        let mut handle = Handle {
            id: self.next_id,
            name,
            file: file.into(),
            rules: Vec::new(),
        };
        subscribe(&mut handle, rules);
        self.next_id += 1;
        self.handles.push(handle);
        self.handles.last()
    }

    pub fn remove_by_name(&mut self, name: &str) -> Option<Handle> {
        let index = self.handles.iter().position(|handle| handle.name == name)?;
        Some(self.handles.remove(index))
    }

    /// Add rule ids to a handle, skipping ones it already has
    pub fn subscribe(&mut self, name: &str, rules: Vec<RuleId>) -> bool {
        match self.get_by_name_mut(name) {
            Some(handle) => {
                subscribe(handle, rules);
                true
            }
            None => false,
        }
    }

    pub fn unsubscribe(&mut self, name: &str, rules: &[RuleId]) -> bool {
        match self.get_by_name_mut(name) {
            Some(handle) => {
                handle.rules.retain(|id| !rules.contains(id));
                true
            }
            None => false,
        }
    }

    /// Drop a deleted rule from every handle
    pub fn forget_rule(&mut self, id: &str) {
        for handle in &mut self.handles {
            handle.rules.retain(|rule| rule != id);
        }
    }

    pub fn forget_all_rules(&mut self) {
        for handle in &mut self.handles {
            handle.rules.clear();
        }
    }
}

fn subscribe(handle: &mut Handle, rules: Vec<RuleId>) {
    for rule in rules {
        if !handle.rules.contains(&rule) {
            handle.rules.push(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<RuleId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_rejects_duplicate_names() {
        let mut handles = HandleRegistry::new();
        assert!(handles.add("news", "news.jsonl", vec![]).is_some());
        assert!(handles.add("news", "other.jsonl", vec![]).is_none());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut handles = HandleRegistry::new();
        let first = handles.add("a", "a.jsonl", vec![]).unwrap().id;
        handles.remove_by_name("a");
        let second = handles.add("a", "a.jsonl", vec![]).unwrap().id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_subscribe_deduplicates() {
        let mut handles = HandleRegistry::new();
        handles.add("news", "news.jsonl", ids(&["1", "1", "2"]));
        assert!(handles.subscribe("news", ids(&["2", "3"])));
        assert_eq!(handles.get_by_name("news").unwrap().rules, ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_unsubscribe_and_forget() {
        let mut handles = HandleRegistry::new();
        handles.add("a", "a.jsonl", ids(&["1", "2"]));
        handles.add("b", "b.jsonl", ids(&["2", "3"]));
        assert!(handles.unsubscribe("a", &ids(&["1"])));
        handles.forget_rule("2");
        assert_eq!(handles.get_by_name("a").unwrap().rules, ids(&[]));
        assert!(handles.get_by_name("a").unwrap().receives_all());
        assert_eq!(handles.get_by_name("b").unwrap().rules, ids(&["3"]));
    }

    #[test]
    fn test_unknown_handle() {
        let mut handles = HandleRegistry::new();
        assert!(!handles.subscribe("missing", ids(&["1"])));
        assert!(!handles.unsubscribe("missing", &ids(&["1"])));
    }
}
