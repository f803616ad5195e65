use std::{
    io,
    sync::Arc,
};

use anyhow::{
    anyhow,
    bail,
    Context,
    Result,
};
use radio_report_services::{
    Dataset,
    DatasetCache,
    HourRange,
    Selection,
    Source,
};
use rustyline::{
    error::ReadlineError,
    DefaultEditor,
};
use tracing::info;

use crate::{
    args::{
        parse_hours,
        resolve_source,
        weekdays,
    },
    report::Report,
};

const PROMPT: &str = "radio> ";
const HELP: &str = "\
Commands:
  days <mon,tue,..|all|none>  choose which days of the week to include
  hours <START-END>           choose an inclusive range of hours, eg: 14-22
  top <N>                     how many songs and artists to rank
  load [SOURCE]               switch to another log; the station export when omitted
  show                        print the report
  json                        print the report as json
  help                        print this message
  quit                        leave";


#[derive(Debug, PartialEq, Eq)]
enum Command {
    Days(Vec<String>),
    Hours(HourRange),
    Top(usize),
    Load(Option<String>),
    Show,
    Json,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        Ok(Some(match name.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "days" => Command::Days(rest.split(|c: char| c == ',' || c.is_whitespace()).map(str::to_owned).collect()),
            "hours" => Command::Hours(parse_hours(rest)?),
            "top" => Command::Top(rest.parse().with_context(|| format!("`{rest}` is not a count"))?),
            "load" if rest == "-" => bail!("stdin can only be read from the command line"),
            "load" => Command::Load(Some(rest.to_owned()).filter(|r| !r.is_empty())),
            "show" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command `{other}`, try `help`")),
        }))
    }
}


struct Session {
    cache: DatasetCache,
    source: Source,
    data: Arc<Dataset>,
    selection: Selection,
    top: usize,
}

impl Session {
    fn report(&self) -> Report { Report::build(&self.source, &self.data, &self.selection, self.top) }

    fn show(&self) -> Result<()> { Ok(self.report().render_text(io::stdout().lock())?) }

    /// Applies `cmd`, returning `false` once the session should end
    fn execute(&mut self, cmd: Command) -> Result<bool> {
        match cmd {
            Command::Days(names) => self.selection.days = weekdays(&names),
            Command::Hours(hours) => self.selection.hours = hours,
            Command::Top(top) => self.top = top,
            Command::Load(location) => {
                let source = resolve_source(location.as_deref())?;
                self.data = self.cache.get_or_load(&source).with_context(|| source.to_string())?;
                self.source = source;
            },
            Command::Show => {},
            Command::Json => {
                self.report().render_json(io::stdout().lock())?;
                println!();
                return Ok(true);
            },
            Command::Help => {
                println!("{HELP}");
                return Ok(true);
            },
            Command::Quit => return Ok(false),
        }
        self.show()?;
        Ok(true)
    }
}


/// Prompts for filter changes until the user quits, re-rendering after each one
pub(crate) fn run(mut cache: DatasetCache, source: Source, selection: Selection, top: usize) -> Result<()> {
    let data = cache.get_or_load(&source).with_context(|| source.to_string())?;
    let mut session = Session {
        cache,
        source,
        data,
        selection,
        top,
    };

    let mut rl = DefaultEditor::new()?;
    println!("{HELP}\n");
    session.show()?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let keep_going = Command::parse(&line)
                    .and_then(|cmd| cmd.map_or(Ok(true), |cmd| session.execute(cmd)))
                    .unwrap_or_else(|e| {
                        eprintln!("Error: {e:#}");
                        true
                    });
                if !keep_going {
                    break;
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!("Session ended");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command { Command::parse(line).expect("Failed to parse").expect("Expected a command") }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("hours 9-17"), Command::Hours(HourRange::new(9, 17)));
        assert_eq!(parse("  TOP 5 "), Command::Top(5));
        assert_eq!(parse("load"), Command::Load(None));
        assert_eq!(parse("load year.csv"), Command::Load(Some("year.csv".to_owned())));
        assert_eq!(parse("show"), Command::Show);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_days() {
        let Command::Days(names) = parse("days mon, fri sat") else {
            panic!("Expected days");
        };
        assert_eq!(weekdays(&names).len(), 3);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("hours late").is_err());
        assert!(Command::parse("top many").is_err());
        assert!(Command::parse("load -").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_execute_updates_selection() {
        let csv = b"timestamp,artist,song\n2024-03-04 10:15:00,A,x\n".to_vec();
        let source = Source::upload("sample.csv", csv);
        let mut cache = DatasetCache::new();
        let data = cache.get_or_load(&source).unwrap();
        let mut session = Session {
            cache,
            source,
            data,
            selection: Selection::default(),
            top: 30,
        };

        assert_eq!(session.report().summary().total_plays, 0);
        assert!(session.execute(Command::Hours(HourRange::new(9, 11))).unwrap());
        assert_eq!(session.report().summary().total_plays, 1);
        assert!(session.execute(Command::Days(vec!["tue".to_owned()])).unwrap());
        assert_eq!(session.report().summary().total_plays, 0);
        assert!(!session.execute(Command::Quit).unwrap());
    }
}
