use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jiff::{Timestamp, Zoned};
use panel_data::{Frame, QueryResponse};
use panel_time::{RawTimeRange, try_parse};

use crate::config::TimeArgs;

#[derive(Debug, Parser)]
#[command(name = "panel_tool")]
#[command(about = "Inspect panel data frames and evaluate relative time expressions")]
pub struct Cli {
    #[command(flatten)]
    pub time: TimeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a summary of a wire frame (`-` reads stdin)
    Decode { input: String },
    /// Decode and re-encode a wire frame
    Normalize { input: String },
    /// Decode a backend query response
    Response { input: String },
    /// Evaluate a date-math expression
    Time { expr: String },
    /// Resolve a time range
    Range { from: String, to: String },
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let options = cli.time.options();
    match &cli.command {
        Command::Decode { input } => {
            let frame = Frame::from_json_str(&read_input(input)?)
                .with_context(|| format!("decoding {input}"))?;
            write_summary(out, &frame)?;
        }
        Command::Normalize { input } => {
            let frame = Frame::from_json_str(&read_input(input)?)
                .with_context(|| format!("decoding {input}"))?;
            writeln!(out, "{}", frame.to_json_string()?)?;
        }
        Command::Response { input } => {
            let rsp = QueryResponse::from_json_str(&read_input(input)?, None)
                .with_context(|| format!("decoding {input}"))?;
            if let Some(err) = &rsp.error {
                writeln!(out, "error in {}: {}", err.ref_id, err.message)?;
            }
            for frame in &rsp.frames {
                write_summary(out, frame)?;
            }
        }
        Command::Time { expr } => {
            let time = try_parse(expr, &options, Timestamp::now())
                .with_context(|| format!("evaluating {expr:?}"))?;
            writeln!(out, "{}", format_time(&time))?;
        }
        Command::Range { from, to } => {
            let range = RawTimeRange::new(from.as_str(), to.as_str())
                .try_resolve(&options, Timestamp::now())
                .with_context(|| format!("resolving {from:?} to {to:?}"))?;
            writeln!(out, "from {}", format_time(&range.from))?;
            writeln!(out, "to   {}", format_time(&range.to))?;
        }
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("reading stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
}

fn format_time(time: &Zoned) -> String {
    format!("{time} ({} ms)", time.timestamp().as_millisecond())
}

fn write_summary(out: &mut impl Write, frame: &Frame) -> Result<()> {
    writeln!(
        out,
        "frame {} refId={} rows={}",
        frame.name.as_deref().unwrap_or("-"),
        frame.ref_id.as_deref().unwrap_or("-"),
        frame.length
    )?;
    for field in &frame.fields {
        let sentinels = field.entities.iter().count();
        write!(out, "  {} [{}]", field.name, field.field_type)?;
        if let Some(labels) = &field.labels {
            let labels: Vec<String> = labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(out, " {{{}}}", labels.join(", "))?;
        }
        if sentinels > 0 {
            write!(out, " sentinels={sentinels}")?;
        }
        writeln!(out)?;
    }
    tracing::info!(fields = frame.fields.len(), rows = frame.length, "decoded frame");
    Ok(())
}
