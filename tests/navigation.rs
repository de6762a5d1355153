//! End-to-end sessions through the public API: scripted keys in,
//! rendered frames out.

use std::cell::RefCell;
use std::io::{Cursor, ErrorKind};
use std::rc::Rc;

use keymenu::error::MenuError;
use keymenu::report::describe;
use keymenu::tui::confirm::{Answer, ConfirmSpec, DEFAULT_PROMPT, ask};
use keymenu::tui::text::{strip_ansi, visible_width};
use keymenu::tui::{KeyEvent, Navigator, ScriptedKeys};
use keymenu::types::{Flow, MenuDefinition, OutputFormat};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn recorder(log: &Log, name: &'static str) -> impl Fn() -> Flow + 'static {
    let log = Rc::clone(log);
    move || {
        log.borrow_mut().push(name);
        Flow::Stay
    }
}

fn session(keys: Vec<KeyEvent>) -> Navigator<ScriptedKeys, Vec<u8>> {
    Navigator::new(ScriptedKeys::new(keys), Vec::new())
        .with_node_name("forge-01")
        .with_width(Some(72))
}

fn screen_text(nav: &Navigator<ScriptedKeys, Vec<u8>>) -> String {
    strip_ansi(&String::from_utf8_lossy(nav.output())).into_owned()
}

/// Root {"1": Do A} and a child {"G": Go} reached through "C".
fn tree(log: &Log) -> MenuDefinition {
    let go = Rc::new(recorder(log, "go"));
    MenuDefinition::new("Root")
        .option("1", "Do A", recorder(log, "a"))
        .option("C", "Child", move || {
            let go = Rc::clone(&go);
            Flow::Push(MenuDefinition::new("Child").option("G", "Go", move || go()))
        })
}

#[test]
fn root_scenario_invalid_then_action_then_exit() {
    let log = Log::default();
    let mut nav = session(vec![
        KeyEvent::Digit(2),
        KeyEvent::Enter, // acknowledge
        KeyEvent::Digit(1),
        KeyEvent::Character('X'),
    ]);

    nav.launch(tree(&log), None).unwrap();

    assert_eq!(*log.borrow(), vec!["a"]);
    let text = screen_text(&nav);
    assert!(text.contains("[!] Invalid input '2'. Please choose from: (1, C, X)"));
    assert!(text.contains("forge-01  ::  "));
    assert!(text.trim_end().ends_with("[+] Exiting menu."));
}

#[test]
fn child_scenario_backspace_pops_without_running_go() {
    let log = Log::default();
    let mut nav = session(vec![KeyEvent::Character('C'), KeyEvent::Backspace]);

    // script ends on the root screen: the stream is unusable, not an exit
    let err = nav.launch(tree(&log), None).unwrap_err();
    assert!(matches!(err, MenuError::Io(e) if e.kind() == ErrorKind::UnexpectedEof));

    assert!(log.borrow().is_empty());
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.current().unwrap().name, "Root");
    assert!(screen_text(&nav).contains("G | Go"));
}

#[test]
fn child_resolves_back_and_exit_entries() {
    let log = Log::default();
    let mut nav = session(vec![KeyEvent::Character('C')]);
    let _ = nav.launch(tree(&log), None);

    let child = nav.current().unwrap();
    assert_eq!(child.keys(), vec!["G", "B", "X"]);
    assert_eq!(child.resolved[1].label, "Back to Root");
}

#[test]
fn arrows_and_enter_dispatch_highlighted_entry() {
    let log = Log::default();
    // Down to "C", Down to "X", Up back to "C", Enter: child opens,
    // Up wraps to "X", Enter exits
    let mut nav = session(vec![
        KeyEvent::ArrowDown,
        KeyEvent::ArrowDown,
        KeyEvent::ArrowUp,
        KeyEvent::Enter,
        KeyEvent::ArrowUp,
        KeyEvent::Enter,
    ]);

    nav.launch(tree(&log), None).unwrap();
    assert_eq!(nav.current().unwrap().name, "Child");
    assert!(log.borrow().is_empty());
}

#[test]
fn partial_navigation_word_is_invalid_not_highlight() {
    let log = Log::default();
    // "1" is highlighted; E must not be held until Enter runs it
    let mut nav = session(vec![
        KeyEvent::Character('E'),
        KeyEvent::Enter, // acknowledge
        KeyEvent::Enter, // nothing buffered: runs the highlighted "1"
        KeyEvent::Character('C'),
        KeyEvent::Character('P'),
        KeyEvent::Enter, // acknowledge
        KeyEvent::Character('<'),
        KeyEvent::Interrupt,
    ]);

    nav.launch(tree(&log), None).unwrap();

    assert_eq!(*log.borrow(), vec!["a"]);
    assert_eq!(nav.depth(), 1);
    let text = screen_text(&nav);
    assert!(text.contains("[!] Invalid input 'E'. Please choose from: (1, C, X)"));
    assert!(text.contains("[!] Invalid input 'P'. Please choose from: (G, B, X)"));
    assert!(text.trim_end().ends_with("[+] Exiting menu."));
}

#[test]
fn every_frame_line_fits_the_width() {
    let log = Log::default();
    let mut nav = session(vec![KeyEvent::Character('C'), KeyEvent::Character('Q')]);
    nav.launch(tree(&log), None).unwrap();

    let text = screen_text(&nav);
    let frame_lines: Vec<&str> = text
        .lines()
        .filter(|l| l.contains('│') || l.contains('┌') || l.contains('└'))
        .collect();
    assert!(!frame_lines.is_empty());
    for line in frame_lines {
        assert_eq!(visible_width(line), 72, "{line:?}");
    }
}

#[test]
fn preselect_opens_child_before_first_frame() {
    let log = Log::default();
    let mut nav = session(vec![KeyEvent::Character('G'), KeyEvent::Character('X')]);

    nav.launch(tree(&log), Some("c")).unwrap();
    assert_eq!(*log.borrow(), vec!["go"]);
    assert!(!screen_text(&nav).contains("[!]"));
}

#[test]
fn invalid_preselect_is_reported_then_loop_runs() {
    let log = Log::default();
    let mut nav = session(vec![KeyEvent::Enter, KeyEvent::Digit(1), KeyEvent::Character('X')]);

    nav.launch(tree(&log), Some("zz")).unwrap();
    assert_eq!(*log.borrow(), vec!["a"]);
    assert!(screen_text(&nav).contains("[!] Invalid input 'ZZ'."));
}

#[test]
fn reserved_key_in_pushed_screen_is_recoverable() {
    let root = MenuDefinition::new("Root").option("1", "Broken", || {
        Flow::Push(MenuDefinition::new("Bad").option("Q", "Shadow quit", || Flow::Stay))
    });
    let mut nav = session(vec![KeyEvent::Digit(1), KeyEvent::Enter, KeyEvent::Character('X')]);

    nav.launch(root, None).unwrap();
    assert_eq!(nav.depth(), 1);
    assert!(screen_text(&nav).contains("may not declare reserved key 'Q'"));
}

#[test]
fn describe_matches_engine_resolution() {
    let log = Log::default();
    let json = describe(tree(&log), None, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let keys: Vec<&str> = value["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["1", "C", "X"]);
}

#[test]
fn confirmation_answers_from_a_line_stream() {
    let cases = [
        ("y\n", Answer::Yes),
        ("Y\n", Answer::Yes),
        ("1\n", Answer::Yes),
        ("true\n", Answer::Yes),
        ("\n", Answer::Yes),
        ("n\n", Answer::No),
        ("N\n", Answer::No),
        ("0\n", Answer::No),
        ("false\n", Answer::No),
        ("x\n", Answer::Exit),
        ("maybe\n\ny\n", Answer::Yes),
    ];
    for (input, expected) in cases {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let answer = ask(&mut reader, &mut out, DEFAULT_PROMPT, &ConfirmSpec::default()).unwrap();
        assert_eq!(answer, expected, "{input:?}");
    }
}
