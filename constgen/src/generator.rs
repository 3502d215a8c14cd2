use crate::consts::ImageConstants;
use crate::env::EnvSource;
use crate::error::{self, Result};
use crate::render::render;
use models::constants::OUTPUT_FILE;

use snafu::ResultExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{event, instrument, Level};

/// Writes the generated constants file.
#[derive(Clone, Debug)]
pub struct Generator {
    output_path: PathBuf,
}

impl Default for Generator {
    /// A generator targeting `const_generated.go` in the working directory.
    fn default() -> Self {
        Self::new(OUTPUT_FILE)
    }
}

impl Generator {
    pub fn new<P: Into<PathBuf>>(output_path: P) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Reads the image constants from `env` and writes them to the output file, replacing any
    /// previous contents.
    ///
    /// The output file is not touched unless every required variable is present.
    #[instrument(skip(self, env), fields(output_path = %self.output_path.display()))]
    pub fn run<E: EnvSource>(&self, env: &E) -> Result<()> {
        let consts = ImageConstants::from_env(env)?;
        let contents = render(&consts);

        let file = File::create(&self.output_path).context(error::CreateOutputSnafu {
            path: &self.output_path,
        })?;
        self.write_output(file, contents.as_bytes())?;

        event!(
            Level::DEBUG,
            bytes = contents.len(),
            "Generated constants file."
        );
        Ok(())
    }

    /// Writes `contents` to the freshly created output and releases it. If the write fails, the
    /// output file is removed before the error is returned.
    fn write_output<W: Write>(&self, mut out: W, contents: &[u8]) -> Result<()> {
        let written = out.write_all(contents).and_then(|_| out.flush());
        drop(out);

        if let Err(source) = written {
            self.remove_partial_output();
            return Err(source).context(error::WriteOutputSnafu {
                path: &self.output_path,
            });
        }
        Ok(())
    }

    /// A failed write leaves no half-rendered file for a later build step to pick up.
    fn remove_partial_output(&self) {
        if let Err(err) = fs::remove_file(&self.output_path) {
            event!(
                Level::WARN,
                error = %err,
                "Unable to remove partially written output file."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnvSource;
    use crate::error::Error;
    use maplit::hashmap;
    use std::collections::HashMap;
    use std::ffi::OsString;
    use std::io;
    use tempfile::TempDir;

    /// Accepts a few bytes, then fails every write.
    struct FailingWriter {
        accepted: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted >= 8 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left on device"));
            }
            let len = buf.len().min(8 - self.accepted);
            self.accepted += len;
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn example_env() -> HashMap<&'static str, &'static str> {
        hashmap! {
            "APP_NAME" => "cryostat-operator",
            "OPERATOR_VERSION" => "4.0.0",
            "CORE_IMG" => "quay.io/core:latest",
            "DATASOURCE_IMG" => "quay.io/ds:latest",
            "GRAFANA_IMG" => "quay.io/grafana:latest",
            "REPORTS_IMG" => "quay.io/reports:latest",
        }
    }

    fn generator_in(dir: &TempDir) -> Generator {
        Generator::new(dir.path().join(OUTPUT_FILE))
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(Generator::default().output_path(), Path::new("const_generated.go"));
    }

    #[test]
    fn test_run_writes_rendered_file() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);

        generator.run(&example_env()).unwrap();

        let contents = fs::read_to_string(generator.output_path()).unwrap();
        assert!(contents.contains("const AppName = \"cryostat-operator\"\n"));
        assert!(contents.contains("const DefaultCoreImageTag = \"quay.io/core:latest\"\n"));
        let expected = render(&ImageConstants::from_env(&example_env()).unwrap());
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);

        generator.run(&example_env()).unwrap();
        let first = fs::read(generator.output_path()).unwrap();
        generator.run(&example_env()).unwrap();
        let second = fs::read(generator.output_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let stale = "stale line\n".repeat(200);
        fs::write(generator.output_path(), &stale).unwrap();

        generator.run(&example_env()).unwrap();

        let contents = fs::read_to_string(generator.output_path()).unwrap();
        assert!(!contents.contains("stale line"));
        assert_eq!(
            contents,
            render(&ImageConstants::from_env(&example_env()).unwrap())
        );
    }

    #[test]
    fn test_missing_variable_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        fs::write(generator.output_path(), "previous contents").unwrap();
        let mut env = example_env();
        env.remove("GRAFANA_IMG");

        let err = generator.run(&env).unwrap_err();

        assert!(matches!(err, Error::MissingVariable { ref name } if name == "GRAFANA_IMG"));
        assert_eq!(
            fs::read_to_string(generator.output_path()).unwrap(),
            "previous contents"
        );
    }

    #[test]
    fn test_missing_variable_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let mut env = MockEnvSource::new();
        env.expect_lookup().returning(|name| {
            if name == "REPORTS_IMG" {
                None
            } else {
                Some(OsString::new())
            }
        });

        assert!(generator.run(&env).is_err());
        assert!(!generator.output_path().exists());
    }

    #[test]
    fn test_empty_values_are_rendered() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let mut env = example_env();
        env.insert("OPERATOR_VERSION", "");

        generator.run(&env).unwrap();

        let contents = fs::read_to_string(generator.output_path()).unwrap();
        assert!(contents.contains("const OperatorVersion = \"\"\n"));
    }

    #[test]
    fn test_create_failure_reports_path() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(dir.path().join("missing-dir").join(OUTPUT_FILE));

        let err = generator.run(&example_env()).unwrap_err();

        assert!(matches!(err, Error::CreateOutput { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_write_failure_removes_partial_output() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        fs::write(generator.output_path(), "// Code gen").unwrap();

        let err = generator
            .write_output(FailingWriter { accepted: 0 }, b"// Code generated by const_generator")
            .unwrap_err();

        assert!(matches!(err, Error::WriteOutput { .. }));
        assert!(err.to_string().contains("no space left on device"));
        assert!(!generator.output_path().exists());
    }

    #[test]
    fn test_write_output_keeps_complete_file() {
        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let file = File::create(generator.output_path()).unwrap();

        generator.write_output(file, b"package controllers\n").unwrap();

        assert_eq!(
            fs::read_to_string(generator.output_path()).unwrap(),
            "package controllers\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value_is_written_escaped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let generator = generator_in(&dir);
        let mut env: HashMap<&str, &OsStr> = example_env()
            .into_iter()
            .map(|(name, value)| (name, OsStr::new(value)))
            .collect();
        env.insert("APP_NAME", OsStr::from_bytes(b"caf\xe9"));

        generator.run(&env).unwrap();

        let contents = fs::read_to_string(generator.output_path()).unwrap();
        assert!(contents.contains(r#"const AppName = "caf\xe9""#));
    }
}
