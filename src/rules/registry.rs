use super::entities::{RemoteRule, Rule, RuleId};
use tracing::debug;

const COLLISION_SUFFIX: &str = "(1)";

/// Rules known to the console, in insertion order
///
/// Names are unique. Unnamed rules get `<prefix><N>` from a counter that
/// only ever increases, and a colliding name is suffixed with `(1)` until it
/// is free.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    counter: usize,
    name_prefix: String,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new("Rule")
    }
}

/// What a sync changed locally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Names of rules materialized from the listing
    pub pulled: Vec<String>,
    /// Names of local rules whose text or tag changed
    pub updated: Vec<String>,
    /// Names of local rules the store did not list
    pub unknown_remotely: Vec<String>,
}

impl RuleRegistry {
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            counter: 0,
            name_prefix: name_prefix.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rules ordered by name
    pub fn sorted_by_name(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.rules.iter().collect();
        rules.sort_by(|a, b| a.name.cmp(&b.name));
        rules
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.id.as_deref() == Some(id))
    }

    fn generate_name(&mut self) -> String {
        let name = format!("{}{}", self.name_prefix, self.counter);
        self.counter += 1;
        name
    }

    fn unique_name(&self, name: String) -> String {
        let mut name = name;
        while self.get_by_name(&name).is_some() {
            name.push_str(COLLISION_SUFFIX);
        }
        name
    }

    /// Add a rule, resolving its final name
    ///
    /// A rule whose id is already registered updates that entry in place
    /// instead of adding a second one.
    pub fn insert(
        &mut self,
        name: Option<&str>,
        id: Option<RuleId>,
        expression: impl Into<String>,
        tag: impl Into<String>,
    ) -> &Rule {
        let expression = expression.into();
        let tag = tag.into();

        if let Some(index) = id
            .as_deref()
            .and_then(|id| self.rules.iter().position(|r| r.id.as_deref() == Some(id)))
        {
            let existing = &mut self.rules[index];
            existing.expression = expression;
            existing.tag = tag;
            return &self.rules[index];
        }

        let requested = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.generate_name(),
        };
        let name = self.unique_name(requested);
        debug!(%name, id = ?id, "registering rule");

        self.rules.push(Rule {
            id,
            name,
            expression,
            tag,
        });
        &self.rules[self.rules.len() - 1]
    }

    pub fn remove_by_name(&mut self, name: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|rule| rule.name == name)?;
        Some(self.rules.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Rule> {
        let index = self
            .rules
            .iter()
            .position(|rule| rule.id.as_deref() == Some(id))?;
        Some(self.rules.remove(index))
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Merge the store's listing into the local rules
    ///
    /// Known ids take the listed text and tag; unknown ids become new rules
    /// with generated names.
    pub fn merge_listing(&mut self, listing: Vec<RemoteRule>) -> SyncReport {
        let mut report = SyncReport::default();

        for remote in &listing {
            match self.get_by_id(&remote.id) {
                Some(local) if local.expression == remote.text && local.tag == remote.tag => {}
                Some(local) => {
                    report.updated.push(local.name.clone());
                    self.insert(None, Some(remote.id.clone()), remote.text.clone(), remote.tag.clone());
                }
                None => {
                    let rule = self.insert(
                        None,
                        Some(remote.id.clone()),
                        remote.text.clone(),
                        remote.tag.clone(),
                    );
                    report.pulled.push(rule.name.clone());
                }
            }
        }

        report.unknown_remotely = self
            .rules
            .iter()
            .filter(|rule| match &rule.id {
                Some(id) => !listing.iter().any(|remote| &remote.id == id),
                None => true,
            })
            .map(|rule| rule.name.clone())
            .collect();

        report
    }
}
