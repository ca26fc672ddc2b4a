//! Interpreter discovery and version gate.

use super::state::{BuildState, Toolchain};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use crate::bundler::{
    Settings,
    error::{Context, Error, Result},
    utils::{
        process::{CommandRunner, ToolCommand},
        version,
    },
};

/// Verifies the interpreter exists and is new enough.
///
/// Python 2 and some distribution builds print `--version` to stderr, so
/// both streams are searched.
pub async fn resolve_toolchain<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    let interpreter = resolve_interpreter(settings.interpreter())?;
    let interpreter = interpreter.as_path();
    let minimum = settings.minimum_python();
    let remediation = format!(
        "{} requires Python {}.{} or newer.\n\
         Install a newer interpreter (e.g. `brew install python@3.12`) or point\n\
         PYTHON at one: PYTHON=/path/to/python3 citemigrate_packager",
        settings.product_name(),
        minimum.major,
        minimum.minor
    );

    let command = ToolCommand::new(interpreter).arg("--version");
    let output = runner.run(&command).await.map_err(|e| Error::Toolchain {
        reason: format!("Python interpreter {} could not be run: {}", interpreter.display(), e),
        remediation: remediation.clone(),
    })?;

    if !output.is_success() {
        return Err(Error::Toolchain {
            reason: format!(
                "`{}` exited with {:?}: {}",
                command,
                output.code,
                output.stderr.trim()
            ),
            remediation,
        });
    }

    let banner = format!("{}\n{}", output.stdout, output.stderr);
    let found = version::parse_lenient(&banner).ok_or_else(|| Error::Toolchain {
        reason: format!(
            "could not determine the version of {} from {:?}",
            interpreter.display(),
            banner.trim()
        ),
        remediation: remediation.clone(),
    })?;

    if &found < minimum {
        return Err(Error::Toolchain {
            reason: format!(
                "{} is Python {}, but {}.{}+ is required",
                interpreter.display(),
                found,
                minimum.major,
                minimum.minor
            ),
            remediation,
        });
    }

    log::info!("✓ Using {} (Python {})", interpreter.display(), found);
    state.toolchain = Some(Toolchain {
        interpreter: interpreter.to_path_buf(),
        version: found,
    });
    Ok(state)
}

/// Pins a path-like interpreter (`venv/bin/python`) to the current
/// directory so later stages that run from the project directory invoke the
/// same binary. Bare names stay as they are for `PATH` lookup.
fn resolve_interpreter(interpreter: &Path) -> Result<PathBuf> {
    if interpreter.components().count() < 2 {
        return Ok(interpreter.to_path_buf());
    }
    Ok(interpreter
        .absolutize()
        .with_context(|| format!("resolving {}", interpreter.display()))?
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{SettingsBuilder, builder::testing::FakeHost};

    fn settings() -> Settings {
        SettingsBuilder::new().interpreter("python3").build().unwrap()
    }

    #[tokio::test]
    async fn accepts_supported_interpreter() {
        let runner = FakeHost::default().runner();
        let state = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap();
        let toolchain = state.toolchain.unwrap();
        assert_eq!(toolchain.version, semver::Version::new(3, 12, 1));
        assert_eq!(runner.summary(), vec!["python3 --version"]);
    }

    #[tokio::test]
    async fn rejects_old_interpreter() {
        let runner = FakeHost {
            python_version: "Python 3.8.18".into(),
            ..Default::default()
        }
        .runner();
        let err = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Toolchain { .. }));
        assert!(err.to_string().contains("3.9+ is required"));
        assert!(err.to_string().contains("PYTHON="));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn reads_version_from_stderr() {
        let runner = crate::bundler::builder::testing::FakeRunner::new().with_handler(|_| {
            Ok(crate::bundler::utils::process::CommandOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: "Python 3.10.2".into(),
            })
        });
        let state = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap();
        assert_eq!(state.toolchain.unwrap().version, semver::Version::new(3, 10, 2));
    }

    #[tokio::test]
    async fn missing_interpreter_is_a_toolchain_error() {
        let runner = crate::bundler::builder::testing::FakeRunner::new().with_handler(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"))
        });
        let err = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("could not be run"));
    }

    #[tokio::test]
    async fn garbage_version_output_is_rejected() {
        let runner = FakeHost {
            python_version: "pyenv: python3: command not found".into(),
            ..Default::default()
        }
        .runner();
        let err = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("could not determine"));
    }

    #[tokio::test]
    async fn relative_interpreter_is_pinned_to_the_working_directory() {
        let settings = SettingsBuilder::new()
            .interpreter("venv/bin/python")
            .build()
            .unwrap();
        let runner = FakeHost::default().runner();

        let state = resolve_toolchain(&settings, &runner, BuildState::default())
            .await
            .unwrap();

        let expected = std::env::current_dir().unwrap().join("venv/bin/python");
        assert_eq!(state.toolchain.unwrap().interpreter, expected);
        assert_eq!(runner.calls()[0].program, expected);
    }

    #[tokio::test]
    async fn bare_interpreter_name_is_left_for_path_lookup() {
        let runner = FakeHost::default().runner();
        let state = resolve_toolchain(&settings(), &runner, BuildState::default())
            .await
            .unwrap();
        assert_eq!(state.toolchain.unwrap().interpreter, PathBuf::from("python3"));
    }
}
