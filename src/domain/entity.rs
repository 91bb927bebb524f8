use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub pages: u32,
}

impl Job {
    pub fn new(name: impl Into<String>, pages: u32) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pag.)", self.name, self.pages)
    }
}

/// Renders jobs the way `estado` prints them: `[a (1 pag.), b (2 pag.)]`.
pub fn display_list(jobs: &[Job]) -> String {
    let items = jobs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ");

    format!("[{}]", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_form() {
        assert_eq!(Job::new("report", 3).to_string(), "report (3 pag.)");
    }

    #[test]
    fn list_form() {
        assert_eq!(display_list(&[]), "[]");
        assert_eq!(
            display_list(&[Job::new("report", 3), Job::new("invoice", 1)]),
            "[report (3 pag.), invoice (1 pag.)]"
        );
    }
}
