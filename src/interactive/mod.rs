// Interactive module - terminal menus and the selection flows built on them

pub mod selector;

#[cfg(test)]
pub mod testing;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use tracing::debug;

pub use selector::{search_and_select, InteractiveStrategy};

/// Menu primitives. `None` means the user backed out (Escape, `q`,
/// end of input or interrupt) and nothing should happen.
pub trait Prompter {
    /// Pick one item; returns its index
    fn select(&self, prompt: &str, items: &[String]) -> Option<usize>;

    /// Pick any number of items; returns their indices in list order
    fn multi_select(&self, prompt: &str, items: &[String]) -> Option<Vec<usize>>;

    /// Free text line
    fn input(&self, prompt: &str) -> Option<String>;
}

/// Menus drawn with dialoguer on the controlling terminal
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Option<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .unwrap_or_else(|e| {
                debug!("[Prompt] select aborted: {}", e);
                None
            })
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Option<Vec<usize>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact_opt()
            .unwrap_or_else(|e| {
                debug!("[Prompt] multi-select aborted: {}", e);
                None
            })
    }

    fn input(&self, prompt: &str) -> Option<String> {
        match Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("[Prompt] input aborted: {}", e);
                None
            }
        }
    }
}
