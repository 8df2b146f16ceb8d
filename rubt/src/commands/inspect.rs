//! Inspect command implementation.
//!
//! Prints the symbol literal form of each name without building a registry.

use std::io::Write;

use rubric_sym::escape;
use serde::Serialize;

use crate::commands::common::{write_json, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the inspect command.
#[derive(Debug, Clone, Default)]
pub struct InspectArgs {
    /// Names to print.
    pub names: Vec<String>,
    /// Output format override.
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct Literal<'a> {
    text: &'a str,
    display: String,
    escaped: bool,
}

/// Print the literal form of every name.
pub fn run_inspect<W: Write>(args: &InspectArgs, config: &Config, out: &mut W) -> Result<()> {
    match OutputFormat::resolve(args.format, config) {
        OutputFormat::Text => {
            for name in &args.names {
                writeln!(out, "{}", escape::SymbolLiteral(name))?;
            }
        }
        OutputFormat::Json => {
            let literals: Vec<_> = args
                .names
                .iter()
                .map(|name| Literal {
                    text: name,
                    display: escape::display(name),
                    escaped: escape::needs_escaping(name),
                })
                .collect();
            write_json(out, &literals)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let args = InspectArgs {
            names: vec!["foo".into(), "foo bar".into(), "+".into(), "".into()],
            format: Some(OutputFormat::Text),
        };
        let mut out = Vec::new();
        run_inspect(&args, &Config::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ":foo\n:\"foo bar\"\n:+\n:\"\"\n"
        );
    }

    #[test]
    fn test_json_marks_escaped() {
        let args = InspectArgs {
            names: vec!["ok?".into(), "not ok".into()],
            format: Some(OutputFormat::Json),
        };
        let mut out = Vec::new();
        run_inspect(&args, &Config::default(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["escaped"], false);
        assert_eq!(value[1]["escaped"], true);
        assert_eq!(value[1]["display"], ":\"not ok\"");
    }
}
