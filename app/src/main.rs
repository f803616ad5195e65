use std::io::{
    self,
    Write,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use radio_report_services::{
    DatasetCache,
    Selection,
};
use tracing::{
    debug,
    info,
};
use tracing_subscriber::EnvFilter;

mod args;
mod report;
mod session;

use args::{
    resolve_source,
    weekdays,
    Args,
    Format,
};
use report::Report;


fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse_from(wild::args_os());
    debug!(?args, "Parsed arguments");

    let source = resolve_source(args.source.as_deref())?;
    let selection = Selection::new(weekdays(&args.days), args.hours);
    let mut cache = DatasetCache::new();

    if args.interactive {
        return session::run(cache, source, selection, args.top);
    }

    let data = cache.get_or_load(&source).with_context(|| source.to_string())?;
    let report = Report::build(&source, &data, &selection, args.top);
    info!(plays = report.summary().total_plays, "Selection matched");

    let mut out = io::stdout().lock();
    match args.format {
        Format::Text => report.render_text(&mut out)?,
        Format::Json => {
            report.render_json(&mut out)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
