use std::fs;
use std::path::PathBuf;

use holdem_engine::decision::{Decider, Scripted};
use holdem_engine::engine::Engine;
use holdem_engine::logger::{format_hand_id, HandLogger, HandRecord};
use holdem_engine::table::TableConfig;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn played_hand(seed: u64) -> HandRecord {
    let mut eng = Engine::new(&["a", "b", "c"], TableConfig::default(), Some(seed));
    let mut seats: Vec<Box<dyn Decider>> = (0..3)
        .map(|_| Box::new(Scripted::default()) as Box<dyn Decider>)
        .collect();
    eng.play_hand(&mut seats).expect("hand plays")
}

#[test]
fn writes_one_lf_terminated_line_per_hand() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    for seed in [1, 2] {
        let mut rec = played_hand(seed);
        rec.hand_id = logger.next_id();
        logger.write(&rec).expect("write");
    }
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 2);
    let _ = fs::remove_file(&path);
}

#[test]
fn record_survives_the_file_and_gains_a_timestamp() {
    let path = tmp_path("handlog_ts");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let mut rec = played_hand(7);
    rec.hand_id = format_hand_id("20250102", 10);
    logger.write(&rec).expect("write");

    let text = fs::read_to_string(&path).expect("read file");
    let back: HandRecord = serde_json::from_str(text.trim_end()).expect("parse line");
    assert!(back.ts.is_some());
    assert_eq!(back.hand_id, "20250102-000010");
    assert_eq!(HandRecord { ts: None, ..back }, rec);
    let _ = fs::remove_file(&path);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::detached("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}
