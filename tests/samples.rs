#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::Path;

    use runbook::parsing;

    #[test]
    fn ensure_samples_compile_clean() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("md")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .md files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let parsed = parsing::parse(&content);

            if !parsed.is_clean() {
                failures.push(format!(
                    "{:?}: {:?} {:?}",
                    file, parsed.warnings, parsed.errors
                ));
            }
            if parsed
                .scenario
                .tasks
                .is_empty()
            {
                failures.push(format!("{:?}: no tasks found", file));
            }
        }

        assert!(
            failures.is_empty(),
            "samples failed to compile clean:\n{}",
            failures.join("\n")
        );
    }
}
