//! Incoming-message clean-up and outgoing reply formatting.

use crate::client::BotIdentity;

/// Turns a raw mention-laden chat message into an interpreter command:
/// HTML tags are dropped, and a leading mention of the bot's own name is
/// removed. With no identity known the mention is left alone, which at
/// worst forwards the bot's name as part of the command.
#[must_use]
pub fn clean_incoming(text: &str, identity: Option<&BotIdentity>) -> String {
    let stripped = strip_html(text);
    let trimmed = stripped.trim();
    if let Some(identity) = identity {
        let name = identity.display_name.as_str();
        if !name.is_empty()
            && let (Some(head), Some(rest)) =
                (trimmed.get(..name.len()), trimmed.get(name.len()..))
            && head.eq_ignore_ascii_case(name)
        {
            return rest.trim().to_owned();
        }
    }
    trimmed.to_owned()
}

/// Formats an interpreter reply as room markdown. The first line of
/// z-machine output is the status bar, rendered as code; the rest keeps its
/// line breaks via `<br/>`.
#[must_use]
pub fn to_markdown(reply: &str) -> String {
    match reply.split_once('\n') {
        Some((status_bar, rest)) => {
            format!("`{status_bar}`\n{}", rest.replace('\n', "<br/>"))
        }
        None => format!("`{reply}`"),
    }
}

/// Removes anything between `<` and `>`. The chat platform's rich text is
/// a small HTML subset; nothing inside tags is ever part of a command.
fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
