// Scripted prompter for menu flow tests

use std::collections::VecDeque;
use std::sync::Mutex;

use super::Prompter;

/// One canned answer, consumed in order
#[derive(Debug, Clone)]
pub enum Reply {
    Select(Option<usize>),
    MultiSelect(Option<Vec<usize>>),
    Input(Option<String>),
}

/// Answers menus from a script and records what was asked.
/// Running out of script, or a reply of the wrong kind, behaves like Cancel.
#[derive(Default)]
pub struct ScriptedPrompter {
    replies: Mutex<VecDeque<Reply>>,
    asked: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far with the items offered
    pub fn asked(&self) -> Vec<(String, Vec<String>)> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str, items: &[String]) -> Option<Reply> {
        self.asked
            .lock()
            .unwrap()
            .push((prompt.to_string(), items.to_vec()));
        self.replies.lock().unwrap().pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Option<usize> {
        match self.next(prompt, items) {
            Some(Reply::Select(choice)) => choice,
            _ => None,
        }
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Option<Vec<usize>> {
        match self.next(prompt, items) {
            Some(Reply::MultiSelect(choice)) => choice,
            _ => None,
        }
    }

    fn input(&self, prompt: &str) -> Option<String> {
        match self.next(prompt, &[]) {
            Some(Reply::Input(text)) => text,
            _ => None,
        }
    }
}
