use super::display::{EMPTY_LISTING, create_styled_table, format_rule_list};
use super::session::Session;
use crate::command::{Args, Command, CommandError, CommandGroup, ParameterSpec, TreeError};
use crate::rules::Handle;
use comfy_table::Cell;
use std::io::Write;
use tracing::info;

pub fn handle_group() -> Result<CommandGroup<Session>, TreeError> {
    let mut subscriptions = CommandGroup::new("rules", "Change which rules feed a handle");
    subscriptions
        .add_command(Command::new(
            "add",
            "Subscribe a handle to more rules",
            vec![ParameterSpec::required("name"), ParameterSpec::variadic("rules")],
            subscribe,
        )?)?
        .add_command(Command::new(
            "delete",
            "Unsubscribe a handle from rules; with none left it receives every rule",
            vec![ParameterSpec::required("name"), ParameterSpec::variadic("rules")],
            unsubscribe,
        )?)?;

    let mut group = CommandGroup::new("handle", "Route rule matches into output files");
    group
        .add_command(Command::new(
            "add",
            "Create a handle writing to a file, fed by the listed rules or by all of them",
            vec![
                ParameterSpec::required("name"),
                ParameterSpec::required("file"),
                ParameterSpec::variadic("rules"),
            ],
            add_handle,
        )?)?
        .add_command(Command::new(
            "delete",
            "Delete a handle",
            vec![ParameterSpec::required("name")],
            delete_handle,
        )?)?
        .add_command(Command::new(
            "view",
            "Show one handle",
            vec![ParameterSpec::required("name")],
            view_handle,
        )?)?
        .add_command(Command::new(
            "list",
            "List every handle",
            Vec::new(),
            list_handles,
        )?)?
        .add_command(Command::new(
            "file",
            "Point a handle at another file",
            vec![ParameterSpec::required("name"), ParameterSpec::required("file")],
            set_file,
        )?)?
        .add_group(subscriptions)?;
    Ok(group)
}

fn unknown_handle(name: &str) -> CommandError {
    CommandError::NotFound(format!(
        "Couldn't find handle '{name}'. Use 'handle list' to see current handles"
    ))
}

fn add_handle(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let file = args.require("file")?;
    let rules = session.rule_ids(args.list("rules"))?;

    let handle = session
        .handles
        .add(name, file, rules)
        .ok_or_else(|| CommandError::Invalid(format!("Handle '{name}' already exists")))?;
    info!(handle = %handle.name, file = %handle.file.display(), "handle added");
    writeln!(out, "Handle '{name}' added")?;
    Ok(())
}

fn delete_handle(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = args.require("name")?;
    session
        .handles
        .remove_by_name(name)
        .ok_or_else(|| unknown_handle(name))?;
    writeln!(out, "Handle '{name}' deleted")?;
    Ok(())
}

fn view_handle(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let handle = session
        .handles
        .get_by_name(name)
        .ok_or_else(|| unknown_handle(name))?;
    write_handle(out, session, handle)?;
    Ok(())
}

fn write_handle(out: &mut dyn Write, session: &Session, handle: &Handle) -> std::io::Result<()> {
    writeln!(out, "Handle '{}':", handle.name)?;
    writeln!(out, "\tFILE: '{}'", handle.file.display())?;
    writeln!(
        out,
        "\tRULES: {}",
        format_rule_list(&session.rule_names(&handle.rules))
    )
}

fn list_handles(session: &mut Session, _: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    if session.handles.is_empty() {
        writeln!(out, "{EMPTY_LISTING}")?;
        return Ok(());
    }

    let mut table = create_styled_table(&["Name", "File", "Rules"]);
    for handle in session.handles.iter() {
        table.add_row(vec![
            Cell::new(&handle.name),
            Cell::new(handle.file.display()),
            Cell::new(format_rule_list(&session.rule_names(&handle.rules))),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn set_file(session: &mut Session, args: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let file = args.require("file")?;
    let handle = session
        .handles
        .get_by_name_mut(name)
        .ok_or_else(|| unknown_handle(name))?;
    handle.file = file.into();
    writeln!(out, "Handle '{name}' now writes to '{file}'")?;
    Ok(())
}

fn subscribe(session: &mut Session, args: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let rules = session.rule_ids(args.list("rules"))?;
    if !session.handles.subscribe(name, rules) {
        return Err(unknown_handle(name));
    }
    writeln!(out, "Rules added to handle '{name}'")?;
    Ok(())
}

fn unsubscribe(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = args.require("name")?;
    let rules = session.rule_ids(args.list("rules"))?;
    if !session.handles.unsubscribe(name, &rules) {
        return Err(unknown_handle(name));
    }
    writeln!(out, "Rules removed from handle '{name}'")?;
    Ok(())
}
