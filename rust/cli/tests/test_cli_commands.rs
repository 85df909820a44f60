use holdem_cli::run;
use holdem_engine::logger::HandRecord;

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_goes_to_stdout() {
    let (code, out, err) = run_args(&["holdem", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("sim"));
    assert!(err.is_empty());
}

#[test]
fn unknown_subcommand_lists_commands() {
    let (code, out, err) = run_args(&["holdem", "deal"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    for c in ["play", "sim", "eval", "cfg"] {
        assert!(err.contains(&format!("  {}", c)), "missing {c} in {err}");
    }
}

#[test]
fn eval_prints_category_and_best_five() {
    let (code, out, _) = run_args(&["holdem", "eval", "--cards", "As Ad Ac Kc Qc Jc Tc"]);
    assert_eq!(code, 0);
    assert!(out.contains("Hand:      straight flush (A)"));
    assert!(out.contains("Best five:"));
}

#[test]
fn eval_rejects_bad_cards() {
    let (code, out, err) = run_args(&["holdem", "eval", "--cards", "Ah Kh 1x"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: Invalid input"));
}

#[test]
fn sim_reports_hands_and_standings() {
    let (code, out, err) = run_args(&[
        "holdem", "sim", "--players", "3", "--hands", "5", "--seed", "42", "--ai", "safe,risky",
    ]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("Hands played: 5"));
    assert!(out.contains("Final standings:"));
    assert!(out.contains("safe-0"));
    assert!(out.contains("risky-1"));
    assert!(out.contains("safe-2"));
}

#[test]
fn sim_is_reproducible_from_seed() {
    let args = [
        "holdem", "sim", "--players", "4", "--hands", "8", "--seed", "1234", "--ai", "random",
    ];
    let (_, a, _) = run_args(&args);
    let (_, b, _) = run_args(&args);
    let strip = |s: &str| -> Vec<String> {
        // hand ids carry today's date
        s.lines()
            .map(|l| l.split_once(' ').map_or(l, |(_, rest)| rest).to_string())
            .collect()
    };
    assert_eq!(strip(&a), strip(&b));
}

#[test]
fn sim_writes_jsonl_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hands.jsonl");
    let path_str = path.to_str().unwrap();
    let (code, out, _) = run_args(&[
        "holdem", "sim", "--players", "3", "--hands", "6", "--seed", "5", "--output", path_str,
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("History written to"));

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("one record per line"))
        .collect();
    assert_eq!(records.len(), 6);
    for (i, rec) in records.iter().enumerate() {
        assert!(rec.hand_id.ends_with(&format!("-{:06}", i + 1)));
        assert_eq!(rec.seed, Some(5));
        assert_eq!(rec.deltas.iter().sum::<i64>(), 0);
        assert!(rec.ts.is_some());
    }
}

#[test]
fn sim_output_replaces_an_earlier_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let path_str = path.to_str().unwrap();
    for hands in ["6", "2"] {
        let (code, _, _) = run_args(&[
            "holdem", "sim", "--players", "3", "--hands", hands, "--seed", "5", "--output", path_str,
        ]);
        assert_eq!(code, 0);
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|l| serde_json::from_str::<HandRecord>(l).is_ok()));
}

#[test]
fn sim_rejects_bad_settings() {
    let (code, _, err) = run_args(&["holdem", "sim", "--players", "1", "--hands", "2"]);
    assert_eq!(code, 2);
    assert!(err.contains("players must be 2-10"));

    let (code, _, err) = run_args(&["holdem", "sim", "--ai", "shark", "--hands", "2"]);
    assert_eq!(code, 2);
    assert!(err.contains("shark"));

    let (code, _, err) = run_args(&["holdem", "sim", "--hands", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("hands must be >= 1"));
}
