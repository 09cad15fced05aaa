use rule_console::console::{Console, Session};
use rule_console::rules::{MemoryStore, RemoteRule};
use rule_console::{CommandError, ConsoleConfig, DispatchError};
use std::fs;
use tempfile::tempdir;

fn console_with(store: MemoryStore) -> Console {
    Console::new(Session::new(ConsoleConfig::default(), Box::new(store))).expect("tree builds")
}

fn console() -> Console {
    console_with(MemoryStore::new())
}

fn run(console: &mut Console, line: &str) -> String {
    let mut out = Vec::new();
    console
        .execute(line, &mut out)
        .unwrap_or_else(|e| panic!("'{line}' failed: {e}"));
    String::from_utf8(out).expect("utf8 output")
}

fn fail(console: &mut Console, line: &str) -> DispatchError {
    console
        .execute(line, &mut Vec::new())
        .expect_err("line should fail")
}

#[test]
fn test_add_then_view_shows_compiled_filter() {
    let mut console = console();
    let out = run(&mut console, "rules add pets '(OR cat (- dog))' animals");
    assert_eq!(
        out,
        "Rule successfully added as 'pets'. Look at current rules with 'rules list'\n"
    );

    assert_eq!(
        run(&mut console, "rules view pets"),
        "Rule 'pets':\n\tID: 1\n\tfilter: cat OR -dog\n\ttag: animals\n"
    );
    assert_eq!(
        run(&mut console, "rules view -i 1"),
        run(&mut console, "rules view pets")
    );
}

#[test]
fn test_rule_without_tag_gets_default() {
    let mut console = console();
    run(&mut console, "rules add news breaking");
    assert!(run(&mut console, "rules view news").contains("\ttag: ...\n"));
}

#[test]
fn test_colliding_names_are_suffixed() {
    let mut console = console();
    run(&mut console, "rules add pets cat");
    let out = run(&mut console, "rules add pets dog");
    assert!(out.contains("'pets(1)'"), "{out}");
    assert_eq!(console.session().rules.len(), 2);
}

#[test]
fn test_list_shows_every_rule() {
    let mut console = console();
    run(&mut console, "rules add b '(cat (OR dog bird))'");
    run(&mut console, "rules add a fish");
    let listing = run(&mut console, "rules list");
    assert!(listing.contains("cat (dog OR bird)"), "{listing}");
    assert!(listing.find("│ a").unwrap() < listing.find("│ b").unwrap());
}

#[test]
fn test_malformed_rule_reports_fragment() {
    let mut console = console();
    let err = fail(&mut console, "rules add bad '(OR cat'");
    assert_eq!(
        err.to_string(),
        "rules add: Malformed expression: group never closed: '(OR cat'"
    );
    assert!(console.session().rules.is_empty());
}

#[test]
fn test_missing_argument_shows_usage() {
    let mut console = console();
    let err = fail(&mut console, "rules add onlyname");
    assert_eq!(
        err.to_string(),
        "Incorrect usage: rules add <name> <rule> [opt: tag] : \
         Add a rule written in operator form, e.g. (OR cat dog) \
         (missing required argument 'rule')"
    );
}

#[test]
fn test_delete_all_rules_resets_handles() {
    let mut console = console();
    run(&mut console, "rules add a cat");
    run(&mut console, "rules add b dog");
    run(&mut console, "handle add out out.jsonl a");

    assert_eq!(run(&mut console, "rules delete *"), "All rules deleted (2)\n");
    assert_eq!(run(&mut console, "rules list"), "EMPTY\n");
    assert!(run(&mut console, "handle view out").contains("\tRULES: ALL\n"));
}

#[test]
fn test_handle_lifecycle() {
    let mut console = console();
    run(&mut console, "rules add a cat");
    run(&mut console, "rules add b dog");

    run(&mut console, "handle add pets pets.jsonl a");
    run(&mut console, "handle rules add pets b a");
    assert_eq!(
        run(&mut console, "handle view pets"),
        "Handle 'pets':\n\tFILE: 'pets.jsonl'\n\tRULES: a, b\n"
    );

    run(&mut console, "handle rules delete pets a b");
    run(&mut console, "handle file pets other.jsonl");
    assert_eq!(
        run(&mut console, "handle view pets"),
        "Handle 'pets':\n\tFILE: 'other.jsonl'\n\tRULES: ALL\n"
    );

    run(&mut console, "handle delete pets");
    assert_eq!(run(&mut console, "handle list"), "EMPTY\n");
}

#[test]
fn test_handle_with_unknown_rule_is_rejected() {
    let mut console = console();
    let err = fail(&mut console, "handle add out out.jsonl ghost");
    assert!(matches!(
        err,
        DispatchError::Command {
            source: CommandError::NotFound(_),
            ..
        }
    ));
    assert!(console.session().handles.is_empty());
}

#[test]
fn test_duplicate_handle_name_is_rejected() {
    let mut console = console();
    run(&mut console, "handle add out a.jsonl");
    let err = fail(&mut console, "handle add out b.jsonl");
    assert_eq!(err.to_string(), "handle add: Handle 'out' already exists");
}

#[test]
fn test_sync_pulls_store_rules_with_generated_names() {
    let store = MemoryStore::from_listing(vec![
        RemoteRule {
            id: "7".into(),
            text: "rust".into(),
            tag: "lang".into(),
        },
        RemoteRule {
            id: "8".into(),
            text: "go".into(),
            tag: "lang".into(),
        },
    ]);
    let mut console = console_with(store);

    assert_eq!(run(&mut console, "rules sync"), "Pulled: Rule0, Rule1\n");
    assert_eq!(run(&mut console, "rules sync"), "Rules are in sync\n");
    assert!(run(&mut console, "rules view Rule1").contains("\tID: 8\n"));
}

#[test]
fn test_compile_does_not_create_rules() {
    let mut console = console();
    assert_eq!(
        run(&mut console, r#"rules compile '(OR "happy birthday" (- cake))'"#),
        "\"happy birthday\" OR -cake\n"
    );
    assert!(console.session().rules.is_empty());
}

#[test]
fn test_help_lists_groups_and_nested_help() {
    let mut console = console();
    let root = run(&mut console, "help");
    assert!(root.starts_with("Here are your commands:\n"));
    assert!(root.contains("\trules ... : Create, inspect and synchronize filter rules\n"));
    assert!(root.contains("\tquit : Leave the console\n"));

    let group = run(&mut console, "handle rules");
    assert!(group.starts_with("Here are your commands for handle rules:\n"));
    assert!(group.contains("\t\thandle rules add <name> [opt: rules...] : "));

    assert_eq!(run(&mut console, "   "), root);

    let recursive = run(&mut console, "help -r");
    assert!(recursive.contains("\t\trules add <name> <rule> [opt: tag] : "));
    assert!(recursive.contains("\t\t\thandle rules delete <name> [opt: rules...] : "));
}

#[test]
fn test_unrecognized_command_leaves_state_alone() {
    let mut console = console();
    let err = fail(&mut console, "rules frobnicate x");
    assert_eq!(
        err.to_string(),
        "sorry, I don't recognize 'frobnicate' as a command"
    );
    assert!(console.is_running());
}

#[test]
fn test_replay_writes_matches_to_handle_files() {
    let dir = tempdir().expect("temp dir");
    let capture = dir.path().join("capture.jsonl");
    let pets = dir.path().join("pets.jsonl");
    let all = dir.path().join("all.jsonl");

    fs::write(
        &capture,
        concat!(
            r#"{"data":{"text":"a cat"},"matching_rules":[{"id":"1"}]}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"data":{"text":"the news"},"matching_rules":[{"id":"2"}]}"#,
            "\n",
        ),
    )
    .expect("write capture");

    let mut console = console();
    run(&mut console, "rules add pets cat");
    run(&mut console, "rules add news news");
    run(
        &mut console,
        &format!("handle add pets '{}' pets", pets.display()),
    );
    run(&mut console, &format!("handle add all '{}'", all.display()));

    let out = run(
        &mut console,
        &format!("stream replay '{}'", capture.display()),
    );
    assert_eq!(out, "Replayed 2 record(s): 3 write(s), 1 skipped\n");

    assert_eq!(
        fs::read_to_string(&pets).expect("pets output"),
        "{\"text\":\"a cat\"}\n"
    );
    assert_eq!(
        fs::read_to_string(&all).expect("catch-all output"),
        "{\"text\":\"a cat\"}\n{\"text\":\"the news\"}\n"
    );
}

#[test]
fn test_replay_limit_must_be_numeric() {
    let mut console = console();
    run(&mut console, "handle add out out.jsonl");
    let err = fail(&mut console, "stream replay capture.jsonl lots");
    assert_eq!(
        err.to_string(),
        "stream replay: limit must be a number, got 'lots'"
    );
}

#[test]
fn test_replay_without_handles_is_a_no_op() {
    let mut console = console();
    assert_eq!(
        run(&mut console, "stream replay missing.jsonl"),
        "No handles to write to, add one with 'handle add'\n"
    );
}

#[test]
fn test_handles_sharing_a_file_keep_every_line() {
    let dir = tempdir().expect("temp dir");
    let capture = dir.path().join("capture.jsonl");
    let shared = dir.path().join("shared.jsonl");

    fs::write(
        &capture,
        concat!(
            r#"{"data":{"text":"a cat"},"matching_rules":[{"id":"1"}]}"#,
            "\n",
            r#"{"data":{"text":"the news"},"matching_rules":[{"id":"2"}]}"#,
            "\n",
        ),
    )
    .expect("write capture");

    let mut console = console();
    run(&mut console, "rules add pets cat");
    run(&mut console, "rules add news news");
    run(
        &mut console,
        &format!("handle add pets '{}' pets", shared.display()),
    );
    run(&mut console, &format!("handle add all '{}'", shared.display()));

    let out = run(
        &mut console,
        &format!("stream replay '{}'", capture.display()),
    );
    assert_eq!(out, "Replayed 2 record(s): 3 write(s), 0 skipped\n");

    assert_eq!(
        fs::read_to_string(&shared).expect("shared output"),
        "{\"text\":\"a cat\"}\n{\"text\":\"a cat\"}\n{\"text\":\"the news\"}\n"
    );
}

#[test]
fn test_reserved_rule_names_are_rejected() {
    let mut console = console();
    run(&mut console, "rules add keep cat");

    for line in ["rules add * dog", "rules add -i dog"] {
        let err = fail(&mut console, line);
        assert!(matches!(
            err,
            DispatchError::Command {
                source: CommandError::Invalid(_),
                ..
            }
        ));
    }

    assert_eq!(console.session().rules.len(), 1);
    assert!(run(&mut console, "rules view keep").contains("\tfilter: cat\n"));
}
