use crate::command::CommandError;
use crate::config::ConsoleConfig;
use crate::filter::compile;
use crate::rules::{HandleRegistry, Rule, RuleId, RuleRegistry, RuleStore, StoreError, SyncReport};
use tracing::{debug, info, warn};

/// `rules delete` argument that removes every rule
pub const DELETE_ALL: &str = "*";
/// `rules view` flag that looks a rule up by id
pub const ID_FLAG: &str = "-i";

/// Mutable state every console command works on
pub struct Session {
    pub config: ConsoleConfig,
    pub store: Box<dyn RuleStore>,
    pub rules: RuleRegistry,
    pub handles: HandleRegistry,
    running: bool,
}

impl Session {
    pub fn new(config: ConsoleConfig, store: Box<dyn RuleStore>) -> Self {
        let rules = RuleRegistry::new(config.rule_name_prefix.clone());
        Self {
            config,
            store,
            rules,
            handles: HandleRegistry::new(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Pull the store's listing into the local rules
    pub fn sync(&mut self) -> Result<SyncReport, StoreError> {
        let listing = self.store.list()?;
        let report = self.rules.merge_listing(listing);
        info!(
            pulled = report.pulled.len(),
            updated = report.updated.len(),
            unknown = report.unknown_remotely.len(),
            "rules synchronized"
        );
        Ok(report)
    }

    /// Compile operator text, hand it to the store and register the result
    ///
    /// Nothing is registered when compiling or storing fails.
    pub fn add_rule(
        &mut self,
        name: Option<&str>,
        text: &str,
        tag: Option<&str>,
    ) -> Result<&Rule, CommandError> {
        if let Some(reserved) = name.filter(|name| [DELETE_ALL, ID_FLAG].contains(name)) {
            return Err(CommandError::Invalid(format!(
                "'{reserved}' is reserved and can't be used as a rule name"
            )));
        }
        let expression = compile(text)?;
        let tag = tag.unwrap_or(self.config.default_tag.as_str()).to_string();
        debug!(%expression, %tag, "adding rule");

        let id = self.store.add(&expression, &tag)?;
        Ok(self.rules.insert(name, Some(id), expression, tag))
    }

    pub fn delete_rule(&mut self, name: &str) -> Result<Rule, CommandError> {
        let rule = self
            .rules
            .get_by_name(name)
            .ok_or_else(|| CommandError::NotFound(format!("Rule '{name}' doesn't exist")))?;

        if let Some(id) = rule.id.clone() {
            match self.store.delete(&id) {
                Ok(()) => {}
                Err(StoreError::UnknownRule(_)) => {
                    warn!(%id, rule = name, "rule already gone from the store, removing locally");
                }
                Err(e) => return Err(e.into()),
            }
            self.handles.forget_rule(&id);
        }
        self.rules
            .remove_by_name(name)
            .ok_or_else(|| CommandError::NotFound(format!("Rule '{name}' doesn't exist")))
    }

    /// Remove every rule locally and in the store; returns how many were
    /// known locally
    pub fn delete_all_rules(&mut self) -> Result<usize, CommandError> {
        self.store.delete_all()?;
        let count = self.rules.len();
        self.rules.clear();
        self.handles.forget_all_rules();
        Ok(count)
    }

    /// Store ids of the named rules, in the given order
    pub fn rule_ids(&self, names: &[String]) -> Result<Vec<RuleId>, CommandError> {
        names
            .iter()
            .map(|name| {
                let rule = self.rules.get_by_name(name).ok_or_else(|| {
                    CommandError::NotFound(format!(
                        "Couldn't find rule '{name}'. Use 'rules list' to see current rules"
                    ))
                })?;
                rule.id.clone().ok_or_else(|| {
                    CommandError::Invalid(format!("Rule '{name}' has no id yet, run 'rules sync'"))
                })
            })
            .collect()
    }

    /// Display names of rule ids; ids without a local rule show as-is
    pub fn rule_names(&self, ids: &[RuleId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.rules
                    .get_by_id(id)
                    .map_or_else(|| format!("{{{id}}}"), |rule| rule.name.clone())
            })
            .collect()
    }
}
