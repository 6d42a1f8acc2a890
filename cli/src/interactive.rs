use crate::error_formatter;
use crate::formatter::Formatter;
use anyhow::{Context, Result};
use inquire::{InquireError, Select, Text};
use unitcanon::{serializers, Engine, UnitRecord};

const TABLE_VIEW: &str = "Table";
const TURTLE_VIEW: &str = "Turtle";
const JSON_VIEW: &str = "JSON";

/// Prompt for unit expressions until an empty line or Esc
pub fn run_interactive(engine: &Engine) -> Result<()> {
    let view = Select::new("Output format:", vec![TABLE_VIEW, TURTLE_VIEW, JSON_VIEW])
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt()
        .context("Failed to get output format")?;

    let formatter = Formatter::default();
    loop {
        let input = match Text::new("Unit expression:")
            .with_help_message("e.g. m.s-1, kg/m/s2, /g - empty line to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read unit expression"),
        };

        if input.trim().is_empty() {
            break;
        }

        match engine.canonicalize(&input) {
            Ok(record) => println!("{}", render(&formatter, &record, view)?),
            Err(e) => eprintln!("{}", error_formatter::format_error(&e)),
        }
    }

    Ok(())
}

fn render(formatter: &Formatter, record: &UnitRecord, view: &str) -> Result<String> {
    Ok(match view {
        TURTLE_VIEW => serializers::record_to_turtle(record),
        JSON_VIEW => serializers::to_json(std::slice::from_ref(record))?,
        _ => formatter.format_record(record),
    })
}
