use super::tree::{Command, CommandGroup, CommandNode, qualify};

const INDENT: &str = "\t";

/// How much of a subtree help shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpMode {
    /// One line per immediate child; nested groups are summarized
    Simple,
    /// Every nested group expanded, one indent step per level
    Recursive,
}

/// Usage line of a leaf: `<qualified-name> <params> : <description>`
pub fn leaf_line<C>(parent_path: &str, command: &Command<C>) -> String {
    let name = qualify(parent_path, command.name());
    let usage = command.signature().usage();
    if usage.is_empty() {
        format!("{name} : {}", command.description())
    } else {
        format!("{name} {usage} : {}", command.description())
    }
}

/// Summary line of a group: `<qualified-name> ... : <description>`
pub fn group_line<C>(parent_path: &str, group: &CommandGroup<C>) -> String {
    format!(
        "{} ... : {}",
        qualify(parent_path, group.name()),
        group.description()
    )
}

/// Help text for `group`, whose qualified name is `path`
pub fn render_help<C>(group: &CommandGroup<C>, path: &str, mode: HelpMode) -> String {
    let mut out = if group.is_root() {
        String::from("Here are your commands:\n")
    } else {
        format!("Here are your commands for {path}:\n")
    };

    let depth = if group.is_root() {
        1
    } else {
        push_line(&mut out, 1, &format!("{path} ... : {}", group.description()));
        2
    };
    push_children(&mut out, group, path, mode, depth);
    out
}

fn push_children<C>(
    out: &mut String,
    group: &CommandGroup<C>,
    path: &str,
    mode: HelpMode,
    depth: usize,
) {
    for child in group.children() {
        match child {
            CommandNode::Leaf(command) => push_line(out, depth, &leaf_line(path, command)),
            CommandNode::Group(nested) => {
                push_line(out, depth, &group_line(path, nested));
                if mode == HelpMode::Recursive {
                    let nested_path = qualify(path, nested.name());
                    push_children(out, nested, &nested_path, mode, depth + 1);
                }
            }
        }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}
