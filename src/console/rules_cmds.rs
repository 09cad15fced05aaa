use super::display::{EMPTY_LISTING, create_styled_table};
use super::session::{DELETE_ALL, ID_FLAG, Session};
use crate::command::{Args, Command, CommandError, CommandGroup, ParameterSpec, TreeError};
use crate::filter::compile;
use crate::rules::{Rule, SyncReport};
use comfy_table::Cell;
use std::io::Write;

pub fn rules_group() -> Result<CommandGroup<Session>, TreeError> {
    let mut group = CommandGroup::new("rules", "Create, inspect and synchronize filter rules");
    group
        .add_command(Command::new(
            "add",
            "Add a rule written in operator form, e.g. (OR cat dog)",
            vec![
                ParameterSpec::required("name"),
                ParameterSpec::required("rule"),
                ParameterSpec::optional("tag"),
            ],
            add_rule,
        )?)?
        .add_command(Command::new(
            "delete",
            "Delete a rule, '*' deletes every rule",
            vec![ParameterSpec::required("name")],
            delete_rule,
        )?)?
        .add_command(Command::new(
            "view",
            "Show one rule, by name or with '-i <id>'",
            vec![ParameterSpec::required("name"), ParameterSpec::optional("id")],
            view_rule,
        )?)?
        .add_command(Command::new(
            "list",
            "List every rule",
            Vec::new(),
            list_rules,
        )?)?
        .add_command(Command::new(
            "sync",
            "Pull the store's rules into the console",
            Vec::new(),
            sync_rules,
        )?)?
        .add_command(Command::new(
            "compile",
            "Print the filter text a rule would compile to",
            vec![ParameterSpec::required("rule")],
            compile_rule,
        )?)?;
    Ok(group)
}

fn add_rule(session: &mut Session, args: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    let rule = session.add_rule(
        Some(args.require("name")?),
        args.require("rule")?,
        args.get("tag"),
    )?;
    writeln!(
        out,
        "Rule successfully added as '{}'. Look at current rules with 'rules list'",
        rule.name
    )?;
    Ok(())
}

fn delete_rule(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = args.require("name")?;
    if name == DELETE_ALL {
        let count = session.delete_all_rules()?;
        writeln!(out, "All rules deleted ({count})")?;
    } else {
        let rule = session.delete_rule(name)?;
        writeln!(out, "Rule '{}' deleted", rule.name)?;
    }
    Ok(())
}

fn view_rule(session: &mut Session, args: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let rule = match (name, args.get("id")) {
        (ID_FLAG, Some(id)) => session
            .rules
            .get_by_id(id)
            .ok_or_else(|| CommandError::NotFound(format!("No rule with id {id}")))?,
        (ID_FLAG, None) => {
            return Err(CommandError::Invalid("'-i' needs a rule id".to_string()));
        }
        (_, Some(extra)) => {
            return Err(CommandError::Invalid(format!(
                "unexpected '{extra}', use 'rules view -i <id>' to look up by id"
            )));
        }
        (name, None) => session
            .rules
            .get_by_name(name)
            .ok_or_else(|| CommandError::NotFound(format!("Rule '{name}' doesn't exist")))?,
    };
    write_rule(out, rule)?;
    Ok(())
}

fn write_rule(out: &mut dyn Write, rule: &Rule) -> std::io::Result<()> {
    writeln!(out, "Rule '{}':", rule.name)?;
    writeln!(out, "\tID: {}", rule.id.as_deref().unwrap_or("-"))?;
    writeln!(out, "\tfilter: {}", rule.expression)?;
    writeln!(out, "\ttag: {}", rule.tag)
}

fn list_rules(session: &mut Session, _: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    if session.rules.is_empty() {
        writeln!(out, "{EMPTY_LISTING}")?;
        return Ok(());
    }

    let mut table = create_styled_table(&["Name", "Filter", "Tag", "ID"]);
    for rule in session.rules.sorted_by_name() {
        table.add_row(vec![
            Cell::new(&rule.name),
            Cell::new(&rule.expression),
            Cell::new(&rule.tag),
            Cell::new(rule.id.as_deref().unwrap_or("-")),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn sync_rules(session: &mut Session, _: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    let report = session.sync()?;
    write_sync_report(out, &report)?;
    Ok(())
}

/// Summary of a sync, one line per kind of change
pub fn write_sync_report(out: &mut dyn Write, report: &SyncReport) -> std::io::Result<()> {
    if report == &SyncReport::default() {
        return writeln!(out, "Rules are in sync");
    }
    if !report.pulled.is_empty() {
        writeln!(out, "Pulled: {}", report.pulled.join(", "))?;
    }
    if !report.updated.is_empty() {
        writeln!(out, "Updated: {}", report.updated.join(", "))?;
    }
    if !report.unknown_remotely.is_empty() {
        writeln!(out, "Not in store: {}", report.unknown_remotely.join(", "))?;
    }
    Ok(())
}

fn compile_rule(_: &mut Session, args: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "{}", compile(args.require("rule")?)?)?;
    Ok(())
}
