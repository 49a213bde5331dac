use terminal_size::{terminal_size, Width};

use crate::constant::SEQUENCE_SUFFIX;
use crate::model::{FieldDescriptor, FieldKind, FlagSetDescription, ValueKind};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_USAGE_WIDTH: usize = 17;
const INDENT: usize = 2;
const PADDING: usize = 2;

/// The help message of one parser: its flags, positionals and commands.
///
/// Rendered via [`std::fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    program: String,
    description: FlagSetDescription,
    commands: Vec<(String, String)>,
    width: Option<usize>,
}

impl Usage {
    pub(crate) fn new(
        program: impl Into<String>,
        description: FlagSetDescription,
        commands: Vec<(String, String)>,
        width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            description,
            commands,
            width,
        }
    }

    /// The program name, as shown in the usage line.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The described fields.
    pub fn description(&self) -> &FlagSetDescription {
        &self.description
    }

    /// The `(name, usage)` of each command.
    pub fn commands(&self) -> &[(String, String)] {
        &self.commands
    }

    fn summary(&self) -> String {
        let mut summary = format!("Usage: {}", self.program);

        match self.description.flags.len() {
            0 => {}
            1 => summary.push_str(" [OPTION]"),
            _ => summary.push_str(" [OPTION]..."),
        }

        for single in &self.description.positional_singles {
            summary.push(' ');
            summary.push_str(&label(single));
        }

        if let Some(multi) = &self.description.positional_multi {
            summary.push(' ');
            summary.push_str(&label(multi));
        }

        if !self.commands.is_empty() {
            summary.push_str(" COMMAND [ARGUMENT]...");
        }

        summary
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary())?;

        if self.description.is_empty() && self.commands.is_empty() {
            return write!(f, "no options.");
        }

        let fields: Vec<&FieldDescriptor> = self
            .description
            .flags
            .iter()
            .chain(self.description.positional_singles.iter())
            .chain(self.description.positional_multi.iter())
            .collect();
        let mut lines = Vec::default();

        if !fields.is_empty() {
            let rows: Vec<(String, String)> = fields
                .iter()
                .map(|field| (label(field), detail(field)))
                .collect();
            let left_width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);
            let usage_width = self.usage_width(INDENT + left_width + PADDING);
            lines.push(String::default());
            lines.push("Options:".to_string());

            for (field, (left, right)) in fields.iter().zip(rows.iter()) {
                lines.push(format!("{:INDENT$}{left:left_width$}{:PADDING$}{right}", "", ""));

                for part in chunk(field.usage(), usage_width) {
                    lines.push(format!("{:width$}{part}", "", width = INDENT + left_width + PADDING));
                }
            }
        }

        if !self.commands.is_empty() {
            let left_width = self.commands.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
            let usage_width = self.usage_width(INDENT + left_width + PADDING);
            lines.push(String::default());
            lines.push("Commands:".to_string());

            for (name, usage) in &self.commands {
                let mut parts = chunk(usage, usage_width).into_iter();

                match parts.next() {
                    Some(first) => lines.push(format!(
                        "{:INDENT$}{name:left_width$}{:PADDING$}{first}",
                        "", ""
                    )),
                    None => lines.push(format!("{:INDENT$}{name}", "")),
                }

                for part in parts {
                    lines.push(format!("{:width$}{part}", "", width = INDENT + left_width + PADDING));
                }
            }
        }

        write!(f, "{}", lines.join("\n"))
    }
}

impl Usage {
    fn usage_width(&self, indent: usize) -> usize {
        match self.width {
            Some(total) if total > indent + MINIMUM_USAGE_WIDTH => total - indent,
            Some(_) => MINIMUM_USAGE_WIDTH,
            None => usize::MAX,
        }
    }
}

/// The width of the attached terminal, if any.
pub(crate) fn terminal_width() -> Option<usize> {
    let width = if let Some((Width(terminal_width), _)) = terminal_size() {
        Some(terminal_width as usize)
    } else {
        None
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Rendering help for terminal width {width:?}.");
    }

    width
}

fn label(field: &FieldDescriptor) -> String {
    match field.kind {
        FieldKind::Flag => field
            .names
            .iter()
            .map(|name| format!("-{name}"))
            .collect::<Vec<String>>()
            .join(", "),
        FieldKind::PositionalMulti => format!("{}{SEQUENCE_SUFFIX}", field.names.join("")),
        _ => field.names.join(""),
    }
}

fn detail(field: &FieldDescriptor) -> String {
    let mut annotations = Vec::default();

    if let Some(default) = &field.default {
        if field.value_kind == ValueKind::String {
            annotations.push(format!("default: {default:?}"));
        } else {
            annotations.push(format!("default: {default}"));
        }
    }

    if let Some(env) = &field.env {
        annotations.push(format!("env: {env}"));
    }

    if annotations.is_empty() {
        field.type_label.to_string()
    } else {
        format!("{} ({})", field.type_label, annotations.join(", "))
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width.saturating_sub(1).max(1);
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(characters[left..].iter());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn flag(names: &[&str], value_kind: ValueKind, type_label: &'static str) -> FieldDescriptor {
        FieldDescriptor {
            ident: names[0].to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
            kind: FieldKind::Flag,
            value_kind,
            type_label,
            env: None,
            default: None,
            usage: String::default(),
        }
    }

    fn positional(label: &str, kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            ident: label.to_lowercase(),
            names: vec![label.to_string()],
            kind,
            value_kind: if kind == FieldKind::PositionalMulti {
                ValueKind::Strings
            } else {
                ValueKind::String
            },
            type_label: "string",
            env: None,
            default: None,
            usage: String::default(),
        }
    }

    #[test]
    fn empty_usage() {
        let usage = Usage::new("program", FlagSetDescription::default(), vec![], None);
        assert_eq!(usage.to_string(), "Usage: program\nno options.");
    }

    #[rstest]
    #[case(0, false, "Usage: program")]
    #[case(1, false, "Usage: program [OPTION]")]
    #[case(2, false, "Usage: program [OPTION]...")]
    #[case(2, true, "Usage: program [OPTION]... COMMAND [ARGUMENT]...")]
    fn summary_options(#[case] flags: usize, #[case] commands: bool, #[case] expected: &str) {
        let description = FlagSetDescription {
            flags: (0..flags)
                .map(|_| flag(&["x"], ValueKind::Bool, "bool"))
                .collect(),
            ..FlagSetDescription::default()
        };
        let commands = if commands {
            vec![("run".to_string(), "Run it.".to_string())]
        } else {
            vec![]
        };
        let usage = Usage::new("program", description, commands, None);

        assert_eq!(usage.summary(), expected);
    }

    #[test]
    fn summary_positionals() {
        let description = FlagSetDescription {
            flags: vec![flag(&["v"], ValueKind::Bool, "bool")],
            positional_singles: vec![
                positional("SOURCE", FieldKind::PositionalSingle),
                positional("DEST", FieldKind::PositionalSingle),
            ],
            positional_multi: Some(positional("REST", FieldKind::PositionalMulti)),
        };
        let usage = Usage::new("cp", description, vec![], None);

        assert_eq!(usage.summary(), "Usage: cp [OPTION] SOURCE DEST REST...");
    }

    #[test]
    fn options_block() {
        // Setup
        let mut verbose = flag(&["v", "verbose"], ValueKind::Bool, "bool");
        verbose.usage = "Print more output.".to_string();
        let mut name = flag(&["name"], ValueKind::String, "string");
        name.default.replace("anonymous".to_string());
        name.env.replace("APP_NAME".to_string());
        let mut port = flag(&["port"], ValueKind::Uint, "u16");
        port.default.replace("80".to_string());
        let mut files = positional("FILES", FieldKind::PositionalMulti);
        files.usage = "The files.".to_string();
        let description = FlagSetDescription {
            flags: vec![verbose, name, port],
            positional_singles: vec![],
            positional_multi: Some(files),
        };
        let usage = Usage::new("program", description, vec![], None);

        // Execute
        let message = usage.to_string();

        // Verify
        assert_eq!(
            message,
            r#"Usage: program [OPTION]... FILES...

Options:
  -v, -verbose  bool
                Print more output.
  -name         string (default: "anonymous", env: APP_NAME)
  -port         u16 (default: 80)
  FILES...      string
                The files."#
        );
    }

    #[test]
    fn commands_block() {
        let usage = Usage::new(
            "git",
            FlagSetDescription::default(),
            vec![
                ("clone".to_string(), "Clone a repository.".to_string()),
                ("status".to_string(), String::default()),
            ],
            None,
        );

        assert_eq!(
            usage.to_string(),
            r#"Usage: git COMMAND [ARGUMENT]...

Commands:
  clone   Clone a repository.
  status"#
        );
    }

    #[test]
    fn commands_block_non_ascii() {
        let usage = Usage::new(
            "tool",
            FlagSetDescription::default(),
            vec![
                ("clone".to_string(), "Clone it.".to_string()),
                ("prüfen".to_string(), "Check it.".to_string()),
            ],
            None,
        );

        assert_eq!(
            usage.to_string(),
            r#"Usage: tool COMMAND [ARGUMENT]...

Commands:
  clone   Clone it.
  prüfen  Check it."#
        );
    }

    #[test]
    fn usage_wraps() {
        let mut verbose = flag(&["v"], ValueKind::Bool, "bool");
        verbose.usage = "one two three four five six seven eight nine ten".to_string();
        let description = FlagSetDescription {
            flags: vec![verbose],
            ..FlagSetDescription::default()
        };
        // Indent of 6 leaves 20 for the usage.
        let usage = Usage::new("program", description, vec![], Some(26));

        let message = usage.to_string();

        assert_contains!(message, "\n      one two three four\n");
        assert_contains!(message, "\n      five six seven eight\n");
        assert_contains!(message, "\n      nine ten");
    }

    #[rstest]
    #[case("", 10, vec![])]
    #[case("abc def", 10, vec!["abc def"])]
    #[case("  abc   def  ", 10, vec!["abc def"])]
    #[case("abc def ghi", 8, vec!["abc def", "ghi"])]
    #[case("abcdefghij", 5, vec!["abcd-", "efgh-", "ij"])]
    #[case("abcde", 5, vec!["abcde"])]
    #[case("über straße", 11, vec!["über straße"])]
    fn chunking(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }
}
