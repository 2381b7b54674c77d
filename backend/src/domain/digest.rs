//! # Digest Formatter
//!
//! Builds the daily chat message listing each child's pending chores.
//! The output is Telegram-flavoured Markdown (`*bold*`).

/// One (child, chore) pair due today
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub child_name: String,
    pub chore: String,
}

impl DigestEntry {
    pub fn new(child_name: impl Into<String>, chore: impl Into<String>) -> Self {
        Self {
            child_name: child_name.into(),
            chore: chore.into(),
        }
    }
}

/// Fixed wording around the chore lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestTemplate {
    pub greeting: String,
    pub header_prefix: String,
    pub call_to_action: String,
}

impl Default for DigestTemplate {
    fn default() -> Self {
        Self {
            greeting: "Bom dia, Crianças! ☀️".to_string(),
            header_prefix: "Tarefas de".to_string(),
            call_to_action: "Lembrem-se de checar o painel para marcar como concluído! 😉".to_string(),
        }
    }
}

/// Group entries by child, keeping the order in which children first appear
pub fn group_by_child(entries: &[DigestEntry]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for entry in entries {
        match groups.iter_mut().find(|(name, _)| *name == entry.child_name) {
            Some((_, chores)) => chores.push(entry.chore.clone()),
            None => groups.push((entry.child_name.clone(), vec![entry.chore.clone()])),
        }
    }

    groups
}

/// Render the digest for `weekday_label`. Returns `None` when there is
/// nothing to report.
pub fn format_digest(weekday_label: &str, entries: &[DigestEntry], template: &DigestTemplate) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let mut message = format!(
        "{}\n\n*{} {}:*\n\n",
        template.greeting,
        template.header_prefix,
        weekday_label.to_uppercase()
    );

    for (child_name, chores) in group_by_child(entries) {
        message.push_str(&format!("*{}:*\n", child_name));
        for chore in chores {
            message.push_str(&format!("- {}\n", chore));
        }
        message.push('\n');
    }

    message.push_str(&template.call_to_action);
    Some(message)
}
