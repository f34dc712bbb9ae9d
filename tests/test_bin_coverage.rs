use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[allow(dead_code)]
mod attention_lab_bin {
    include!("../attention_lab.rs");

    #[cfg(test)]
    mod coverage_tests {
        use super::*;

        #[test]
        fn test_parse_no_arguments() {
            let options = parse_args(&crate::args(&["attention_lab"])).unwrap();
            assert_eq!(options, CliOptions::default());
        }

        #[test]
        fn test_parse_all_options() {
            let options = parse_args(&crate::args(&[
                "attention_lab",
                "lab.json",
                "--sweep",
                "2",
                "--json",
            ]))
            .unwrap();
            assert_eq!(options.config_path.as_deref(), Some("lab.json"));
            assert_eq!(options.sweep, Some(2));
            assert!(options.json);
        }

        #[test]
        fn test_parse_errors() {
            assert!(parse_args(&crate::args(&["attention_lab", "--sweep"])).is_err());
            assert!(parse_args(&crate::args(&["attention_lab", "--sweep", "x"])).is_err());
            assert!(parse_args(&crate::args(&["attention_lab", "--verbose"])).is_err());
            assert!(parse_args(&crate::args(&["attention_lab", "a.json", "b.json"])).is_err());
        }

        #[test]
        fn test_run_default_panels() {
            let output = run(&CliOptions::default()).unwrap();
            assert!(output.contains("Query (Q): [0.8, 0.2, 0.5]"));
            assert!(output.contains("Word C"));
            assert!(output.contains("Best match: Word C"));
        }

        #[test]
        fn test_run_json_snapshot() {
            let options = CliOptions {
                json: true,
                ..CliOptions::default()
            };
            let output = run(&options).unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();
            assert_eq!(value["weights"].as_array().unwrap().len(), 3);
        }

        #[test]
        fn test_run_sweep_from_config() {
            let temp = crate::write_temp_config(
                r#"{
  "default_query": [0.5, 0.5],
  "memory": [
    { "id": 1, "key": [1, 0], "value": [1, 0], "label": "left" },
    { "id": 2, "key": [0, 1], "value": [0, 1], "label": "right" }
  ],
  "slider_step": 0.5
}"#,
            );
            let options = CliOptions {
                config_path: Some(temp.path().to_str().unwrap().to_string()),
                sweep: Some(0),
                json: false,
            };
            let output = run(&options).unwrap();
            assert_eq!(output.lines().count(), 4);
            assert!(output.starts_with("Sweeping query dim 1"));
        }

        #[test]
        fn test_run_sweep_bad_dimension() {
            let options = CliOptions {
                sweep: Some(9),
                ..CliOptions::default()
            };
            assert!(run(&options).is_err());
        }

        #[test]
        fn test_format_vector() {
            assert_eq!(format_vector(&[0.5, 1.0], 1), "[0.5, 1.0]");
        }
    }
}
