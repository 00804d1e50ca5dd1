//! Interactive prompt capability.
//! The engine never reads stdin directly: it talks to a `Prompter`, so tests
//! (and non-interactive callers) can supply a scripted responder instead.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::errors::{CarefulRmError, Result};

/// Capability interface for asking the user to pick one of a fixed set of
/// lowercase options. Empty input selects the default when one is offered.
pub trait Prompter {
    fn ask(&mut self, message: &str, options: &[&str], default: Option<&str>) -> Result<String>;
}

/// Ask through `prompter` and verify the answer is one of `options`.
/// A responder that returns anything else violates the input-loop invariant
/// and the error is fatal rather than retried here.
pub fn ask_validated(
    prompter: &mut dyn Prompter,
    message: &str,
    options: &[&str],
    default: Option<&str>,
) -> Result<String> {
    let answer = prompter.ask(message, options, default)?;
    if options.iter().any(|opt| *opt == answer) {
        Ok(answer)
    } else {
        Err(CarefulRmError::InvalidChoice(answer))
    }
}

/// Yes/no question with a default answer.
pub fn yes_no(prompter: &mut dyn Prompter, message: &str, default_yes: bool) -> Result<bool> {
    let default = if default_yes { "y" } else { "n" };
    let answer = ask_validated(prompter, message, &["y", "n"], Some(default))?;
    Ok(answer == "y")
}

/// Render "message [a/B/c]" with the default option uppercased.
fn render_prompt(message: &str, options: &[&str], default: Option<&str>) -> String {
    let rendered: Vec<String> = options
        .iter()
        .map(|opt| {
            if Some(*opt) == default {
                opt.to_uppercase()
            } else {
                opt.to_string()
            }
        })
        .collect();
    format!("{} [{}] ", message, rendered.join("/"))
}

/// Real responder reading answers from stdin, retrying until the input is
/// one of the offered options. End of input falls back to the default; with
/// no default it is reported as an invalid choice.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl StdinPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str, options: &[&str], default: Option<&str>) -> Result<String> {
        let prompt = render_prompt(message, options, default);
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            eprint!("{}", prompt);
            let _ = io::stderr().flush();
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    return Err(CarefulRmError::InvalidChoice(format!(
                        "read failure: {err}"
                    )));
                }
                None => {
                    return match default {
                        Some(def) => Ok(def.to_string()),
                        None => Err(CarefulRmError::InvalidChoice("end of input".to_string())),
                    };
                }
            };
            let answer = line.trim().to_lowercase();
            if answer.is_empty() {
                if let Some(def) = default {
                    return Ok(def.to_string());
                }
            } else if options.contains(&answer.as_str()) {
                return Ok(answer);
            }
            eprintln!("Invalid choice '{}', try again", answer);
        }
    }
}

/// Scripted responder: pops pre-seeded answers in order and records every
/// question asked. Used by tests and by anything that needs unattended runs.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Every message asked, in order.
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(answers: I) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str, options: &[&str], default: Option<&str>) -> Result<String> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) if answer.is_empty() => match default {
                Some(def) => Ok(def.to_string()),
                None => Err(CarefulRmError::InvalidChoice("empty scripted answer".into())),
            },
            Some(answer) => Ok(answer),
            None => {
                let _ = options;
                Err(CarefulRmError::InvalidChoice("script exhausted".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_rendering_uppercases_default() {
        let rendered = render_prompt("Really delete?", &["y", "n"], Some("n"));
        assert_eq!(rendered, "Really delete? [y/N] ");
    }

    #[test]
    fn scripted_answers_pop_in_order() {
        let mut p = ScriptedPrompter::new(["create", "y"]);
        let first = ask_validated(&mut p, "bin?", &["create", "root", "del"], None).unwrap();
        assert_eq!(first, "create");
        assert!(yes_no(&mut p, "sure?", false).unwrap());
        assert_eq!(p.asked.len(), 2);
    }

    #[test]
    fn empty_scripted_answer_takes_default() {
        let mut p = ScriptedPrompter::new([""]);
        assert!(!yes_no(&mut p, "sure?", false).unwrap());
    }

    #[test]
    fn out_of_set_answer_is_fatal() {
        let mut p = ScriptedPrompter::new(["maybe"]);
        let err = yes_no(&mut p, "sure?", false).unwrap_err();
        assert!(matches!(err, CarefulRmError::InvalidChoice(ans) if ans == "maybe"));
    }
}
