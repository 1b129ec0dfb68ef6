//! Parsing of typed answers

use serde_json::Value;

/// Navigation typed in place of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `<` goes back one step
    Back,
    /// `:q` leaves the wizard, keeping drafts
    Quit,
}

/// Recognise a navigation command
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim() {
        "<" => Some(Command::Back),
        ":q" | ":quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Parse a yes/no answer
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a choice by 1-based number or by (case-insensitive) text
pub fn parse_choice(input: &str, options: &[&'static str]) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i).copied());
    }
    options
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(input))
}

/// Parse comma-separated values; `-` clears the list
pub fn parse_list(input: &str) -> Vec<String> {
    if input.trim() == "-" {
        return Vec::new();
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Short rendering of a current value for a prompt
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => match items.len() {
            1 => "1 entry".to_string(),
            n => format!("{} entries", n),
        },
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_commands() {
        assert_eq!(parse_command(" < "), Some(Command::Back));
        assert_eq!(parse_command(":q"), Some(Command::Quit));
        assert_eq!(parse_command("No"), None);
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_choice_by_number_or_text() {
        let options = &["Work", "Study", "Family"];
        assert_eq!(parse_choice("2", options), Some("Study"));
        assert_eq!(parse_choice("family", options), Some("Family"));
        assert_eq!(parse_choice("0", options), None);
        assert_eq!(parse_choice("4", options), None);
        assert_eq!(parse_choice("Travel", options), None);
    }

    #[test]
    fn test_list() {
        assert_eq!(parse_list("FR, DE,,PT "), vec!["FR", "DE", "PT"]);
        assert!(parse_list("-").is_empty());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("No")), "No");
        assert_eq!(display_value(&json!(false)), "no");
        assert_eq!(display_value(&json!(["FR", "DE"])), "FR, DE");
        assert_eq!(display_value(&json!([])), "");
        assert_eq!(display_value(&json!([{"relative": "Father"}])), "1 entry");
    }
}
