use super::session::Session;
use crate::command::{Args, Command, CommandError, CommandGroup, ParameterSpec, TreeError};
use crate::sink::{FileSinkRouter, RoutingTable, SinkError, replay};
use std::fs::File;
use std::io::{BufReader, Write};

pub fn stream_group() -> Result<CommandGroup<Session>, TreeError> {
    let mut group = CommandGroup::new("stream", "Feed recorded stream items to the handles");
    group.add_command(Command::new(
        "replay",
        "Route a JSON-lines capture through the current handles",
        vec![ParameterSpec::required("capture"), ParameterSpec::optional("limit")],
        replay_capture,
    )?)?;
    Ok(group)
}

fn replay_capture(
    session: &mut Session,
    args: &Args,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let capture = args.require("capture")?;
    let limit = args
        .get("limit")
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| CommandError::Invalid(format!("limit must be a number, got '{raw}'")))
        })
        .transpose()?;

    if session.handles.is_empty() {
        writeln!(out, "No handles to write to, add one with 'handle add'")?;
        return Ok(());
    }

    let file = File::open(capture).map_err(|source| SinkError::Capture {
        path: capture.to_string(),
        source,
    })?;

    let table = RoutingTable::build(&session.rules, &session.handles);
    let mut router = FileSinkRouter::from_handles(&session.handles);
    let stats = replay(BufReader::new(file), capture, &table, &mut router, limit)?;
    router.close_all()?;

    writeln!(
        out,
        "Replayed {} record(s): {} write(s), {} skipped",
        stats.records, stats.writes, stats.skipped
    )?;
    Ok(())
}
