//! Watch mode against the fake compiler.

#![cfg(unix)]

mod common;

use std::fs;
use std::thread;
use std::time::Duration;

use common::*;

#[test]
fn edit_triggers_body_recompile() {
    let env = TestEnv::new();
    env.write("doc.tex", SIMPLE_DOC);

    let mut child = env.spawn_watch("doc.tex");
    let started = wait_for(|| env.calls().len() >= 2 && env.exists("doc.pdf"));
    // let the watcher settle before editing
    thread::sleep(Duration::from_millis(300));

    fs::write(
        env.path("doc.tex"),
        SIMPLE_DOC.replace("Hello", "Hello again"),
    )
    .unwrap();
    let recompiled = wait_for(|| env.calls().len() >= 3);

    let _ = child.kill();
    let _ = child.wait();

    assert!(started, "startup compile did not finish");
    assert!(recompiled, "no recompile after edit: {:?}", env.calls());
    let calls = env.calls();
    assert!(calls[2].ends_with("&doc doc.body.tex"));
    // the format is not rebuilt for a body edit
    assert_eq!(calls.iter().filter(|c| c.contains("-ini")).count(), 1);
}

#[test]
fn errors_while_watching_do_not_end_the_process() {
    let env = TestEnv::new();
    env.write("doc.tex", SIMPLE_DOC);
    let output = env.home.path().join("watch.out");
    let console = || fs::read_to_string(&output).unwrap_or_default();

    let mut child = env.spawn_watch_logged("doc.tex", &output);
    let started = wait_for(|| env.calls().len() >= 2 && env.exists("doc.pdf"));
    thread::sleep(Duration::from_millis(300));

    env.write("doc.tex", "no marker in this file\n");
    let reported = wait_for(|| console().contains("no split marker found"));
    thread::sleep(Duration::from_millis(300));
    let alive = child.try_wait().unwrap().is_none();

    env.write("doc.tex", &SIMPLE_DOC.replace("Hello", "Hello again"));
    let recompiled = wait_for(|| env.calls().len() >= 3);

    let _ = child.kill();
    let _ = child.wait();

    assert!(started, "startup compile did not finish");
    assert!(reported, "split error not reported: {}", console());
    assert!(alive, "process ended after a split error");
    assert!(recompiled, "no recompile after fixing the source: {:?}", env.calls());
    assert!(env.calls()[2].ends_with("&doc doc.body.tex"));
}
