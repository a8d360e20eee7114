//! Interactive input
//!
//! The network setup asks its questions through [`Prompter`] so the flow can
//! be driven by scripted answers in tests.

use crate::error::SetupError;
use anyhow::Result;
use dialoguer::Input;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Source of answers to setup questions
pub trait Prompter {
    /// Ask a question; an empty answer yields `default`
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be read.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Terminal prompter backed by `dialoguer`
#[derive(Debug, Clone, Copy, Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_owned());
        }
        let answer = input
            .interact_text()
            .map_err(|e| SetupError::prompt(format!("Failed to read answer: {e}")))?;
        Ok(answer.trim().to_owned())
    }
}

/// Prompter replaying a fixed list of answers
///
/// Empty answers select the default. Running out of answers is an error,
/// so a test cannot loop forever on rejected input.
///
/// ```
/// use linuxmuster_mail::prompt::{Prompter, ScriptedPrompter};
///
/// let prompter = ScriptedPrompter::new(["", "eth1"]);
/// assert_eq!(prompter.input("Interface", "eth0").unwrap(), "eth0");
/// assert_eq!(prompter.input("Interface", "eth0").unwrap(), "eth1");
/// assert!(prompter.input("Interface", "eth0").is_err());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    /// Create a prompter answering with `answers` in order
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far, each with its default in brackets
    #[must_use]
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        self.asked.borrow_mut().push(format!("{prompt} [{default}]"));
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| SetupError::prompt(format!("No answer left for '{prompt}'")))?;
        if answer.is_empty() {
            Ok(default.to_owned())
        } else {
            Ok(answer)
        }
    }
}
