// File: services/cliniko_probe_cli/src/prompt.rs
//! Asks for values the configuration left empty.

use cliniko_probe::models::{APPOINTMENT_TYPE_ID, BUSINESS_ID, PRACTITIONER_ID};
use cliniko_probe::suites::{format_date, parse_date};
use cliniko_probe_common::ProbeError;
use cliniko_probe_config::env_vars::{
    config_path_to_env_var, legacy_secret_path_to_env_var, secret_path_to_env_var,
};
use cliniko_probe_config::AppConfig;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints the question and reads one line. `None` on EOF or a blank answer.
    pub fn ask(&mut self, question: &str, hint: &str) -> Result<Option<String>, ProbeError> {
        if !hint.is_empty() {
            writeln!(self.output, "   ({})", hint)?;
        }
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    /// A `YYYY-MM-DD` answer in canonical form. Blank or unparsable answers
    /// skip the bound.
    pub fn ask_date(&mut self, question: &str, hint: &str) -> Result<Option<String>, ProbeError> {
        let Some(answer) = self.ask(question, hint)? else {
            return Ok(None);
        };
        match parse_date(&answer) {
            Ok(date) => Ok(Some(format_date(date))),
            Err(e) => {
                writeln!(self.output, "   {}; skipping this bound", e)?;
                Ok(None)
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn env_hint(path: &str) -> String {
    format!("set {} to skip this prompt", config_path_to_env_var(path))
}

/// Prompts for the API key, for each of `required` that is still unset and,
/// with `ask_window`, for unset date bounds. Unanswered prompts leave the
/// value unset.
pub fn fill_missing<R: BufRead, W: Write>(
    config: &mut AppConfig,
    required: &[&str],
    ask_window: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<(), ProbeError> {
    if config.api.key.is_none() {
        let hint = format!(
            "set {} or {} to skip this prompt",
            secret_path_to_env_var("api.key"),
            legacy_secret_path_to_env_var("api.key")
        );
        config.api.key = prompter.ask("Enter your Cliniko API key", &hint)?;
    }

    for id in required {
        match *id {
            BUSINESS_ID if config.ids.business_id.is_none() => {
                config.ids.business_id =
                    prompter.ask("Business id", &env_hint("ids.business_id"))?;
            }
            PRACTITIONER_ID if config.ids.practitioner_id.is_none() => {
                config.ids.practitioner_id =
                    prompter.ask("Practitioner id", &env_hint("ids.practitioner_id"))?;
            }
            APPOINTMENT_TYPE_ID if config.ids.appointment_type_ids.is_empty() => {
                let answer = prompter.ask(
                    "Appointment type id(s), comma separated",
                    &env_hint("ids.appointment_type_ids"),
                )?;
                config.ids.appointment_type_ids = answer
                    .unwrap_or_default()
                    .split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect();
            }
            _ => {}
        }
    }

    if ask_window {
        if config.window.from.is_none() {
            config.window.from = prompter.ask_date(
                "Enter 'from' date (YYYY-MM-DD, or press Enter to skip)",
                &env_hint("window.from"),
            )?;
        }
        if config.window.to.is_none() {
            config.window.to = prompter.ask_date(
                "Enter 'to' date (YYYY-MM-DD, or press Enter to skip)",
                &env_hint("window.to"),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_and_handles_eof() {
        let mut p = prompter("  abc123  \n\n");
        assert_eq!(p.ask("Key", "").unwrap().as_deref(), Some("abc123"));
        assert_eq!(p.ask("Key", "").unwrap(), None);
        assert_eq!(p.ask("Key", "").unwrap(), None);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown.matches("Key: ").count(), 3);
    }

    #[test]
    fn test_fill_missing_asks_only_for_gaps() {
        let mut config = AppConfig::default();
        config.ids.practitioner_id = Some("222".to_string());
        let mut p = prompter("abc123\n111\n333, 444\n");

        fill_missing(
            &mut config,
            &[BUSINESS_ID, PRACTITIONER_ID, APPOINTMENT_TYPE_ID],
            false,
            &mut p,
        )
        .unwrap();

        assert_eq!(config.api.key.as_deref(), Some("abc123"));
        assert_eq!(config.ids.business_id.as_deref(), Some("111"));
        assert_eq!(config.ids.practitioner_id.as_deref(), Some("222"));
        assert_eq!(config.ids.appointment_type_ids, vec!["333", "444"]);

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("CLINIKO_API_KEY"));
        assert!(shown.contains("__IDS__BUSINESS_ID"));
        assert!(!shown.contains("Practitioner id"));
    }

    #[test]
    fn test_fill_missing_with_everything_set_reads_nothing() {
        let mut config = AppConfig::default();
        config.api.key = Some("k".to_string());
        let mut p = prompter("");
        fill_missing(&mut config, &[], false, &mut p).unwrap();
        assert!(p.into_output().is_empty());
    }

    #[test]
    fn test_fill_missing_asks_for_date_bounds() {
        let mut config = AppConfig::default();
        config.api.key = Some("k".to_string());
        let mut p = prompter(" 2025-08-01 \n\n");

        fill_missing(&mut config, &[], true, &mut p).unwrap();

        assert_eq!(config.window.from.as_deref(), Some("2025-08-01"));
        assert_eq!(config.window.to, None);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("Enter 'from' date"));
        assert!(shown.contains("Enter 'to' date"));
        assert!(shown.contains("__WINDOW__FROM"));
    }

    #[test]
    fn test_fill_missing_keeps_configured_bounds_and_skips_bad_dates() {
        let mut config = AppConfig::default();
        config.api.key = Some("k".to_string());
        config.window.from = Some("2025-08-01".to_string());
        let mut p = prompter("07/08/2025\n");

        fill_missing(&mut config, &[], true, &mut p).unwrap();

        assert_eq!(config.window.from.as_deref(), Some("2025-08-01"));
        assert_eq!(config.window.to, None);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(!shown.contains("Enter 'from' date"));
        assert!(shown.contains("skipping this bound"));
    }

    #[test]
    fn test_fill_missing_without_window_leaves_dates_alone() {
        let mut config = AppConfig::default();
        config.api.key = Some("k".to_string());
        let mut p = prompter("2025-08-01\n");
        fill_missing(&mut config, &[], false, &mut p).unwrap();
        assert_eq!(config.window.from, None);
    }
}
