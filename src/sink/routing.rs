use super::router::{SinkError, SinkRouter};
use crate::rules::{HandleId, HandleRegistry, RuleId, RuleRegistry};
use std::collections::HashMap;

/// Which handles receive the matches of each rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    by_rule: HashMap<RuleId, Vec<HandleId>>,
}

impl RoutingTable {
    /// Handles with an explicit rule list get those rules; handles without
    /// one get every synchronized rule.
    pub fn build(rules: &RuleRegistry, handles: &HandleRegistry) -> Self {
        let mut by_rule: HashMap<RuleId, Vec<HandleId>> = rules
            .iter()
            .filter_map(|rule| rule.id.clone())
            .map(|id| (id, Vec::new()))
            .collect();

        for handle in handles.iter() {
            if handle.receives_all() {
                for targets in by_rule.values_mut() {
                    targets.push(handle.id);
                }
            } else {
                for rule in &handle.rules {
                    by_rule.entry(rule.clone()).or_default().push(handle.id);
                }
            }
        }

        Self { by_rule }
    }

    /// Distinct handles for a set of matched rules, in first-seen order
    pub fn targets<'a, I>(&self, matched: I) -> Vec<HandleId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut targets = Vec::new();
        for rule in matched {
            for &handle in self.by_rule.get(rule).into_iter().flatten() {
                if !targets.contains(&handle) {
                    targets.push(handle);
                }
            }
        }
        targets
    }

    /// Write `record` once to every handle any of the matched rules feeds;
    /// returns how many sinks were written
    pub fn route<'a, I>(
        &self,
        router: &mut dyn SinkRouter,
        record: &str,
        matched: I,
    ) -> Result<usize, SinkError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let targets = self.targets(matched);
        for &sink in &targets {
            router.write(sink, record)?;
        }
        Ok(targets.len())
    }
}
