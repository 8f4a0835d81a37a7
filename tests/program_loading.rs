//! End-to-end: JSON artifact through the loader, the driver, and the
//! verdict writers.

use std::fs;

use puritymap::analysis::Verdict;
use puritymap::config::AnalysisConfig;
use puritymap::ir::loader;
use puritymap::output::JsonWriter;
use puritymap::{AnalysisRunner, SafeMethodRegistry};

const PROGRAM: &str = r#"
{
  "classes": [
    {
      "name": "Sample",
      "methods": [
        {
          "class": "Sample",
          "name": "add",
          "params": ["int", "int"],
          "ret": "int",
          "is_static": true,
          "stmts": [
            { "return": { "value": "constant" } }
          ]
        },
        {
          "class": "Sample",
          "name": "setX",
          "params": [{ "array": "int" }, "int"],
          "ret": "void",
          "is_static": true,
          "stmts": [
            {
              "identity": {
                "local": { "name": "arr", "ty": { "array": "int" } },
                "source": { "parameter": { "index": 0 } }
              }
            },
            {
              "assign": {
                "lhs": { "array_element": { "base": { "name": "arr", "ty": { "array": "int" } } } },
                "rhs": "constant"
              }
            },
            { "return": { "value": null } }
          ]
        }
      ]
    }
  ]
}
"#;

fn run_program(json: &str) -> Vec<puritymap::MethodSummary> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("program.json");
    fs::write(&path, json).unwrap();

    let program = loader::load_program(&path).unwrap();
    let runner = AnalysisRunner::new(AnalysisConfig::default(), SafeMethodRegistry::default());
    runner.run(&program)
}

#[test]
fn verdicts_from_json_artifact() {
    let summaries = run_program(PROGRAM);
    assert_eq!(summaries.len(), 2);

    let add = summaries
        .iter()
        .find(|s| s.signature.contains("add"))
        .unwrap();
    assert_eq!(add.verdict, Verdict::Pure);

    let set_x = summaries
        .iter()
        .find(|s| s.signature.contains("setX"))
        .unwrap();
    assert_eq!(
        set_x.verdict.reason(),
        Some("mutates prestate node P0 via field array element")
    );
}

#[test]
fn json_writer_round_trip() {
    let summaries = run_program(PROGRAM);

    let mut buf = Vec::new();
    JsonWriter::new(&mut buf).write_verdicts(&summaries).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .any(|r| r["result"] == "PURE" && r["method"].as_str().unwrap().contains("add")));
    assert!(records
        .iter()
        .any(|r| r["result"] == "IMPURE" && r["reason"].as_str().is_some()));
}

#[test]
fn signatures_render_full_types() {
    let summaries = run_program(PROGRAM);
    let set_x = summaries
        .iter()
        .find(|s| s.signature.contains("setX"))
        .unwrap();
    assert_eq!(set_x.signature, "Sample.setX(int[], int)");
}
