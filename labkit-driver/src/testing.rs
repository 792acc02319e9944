//! Test doubles for the driver

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cluster::Invocation;
use crate::runner::{CommandOutput, CommandRunner};

/// A call seen by `ScriptedRunner`
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub invocation: Invocation,
    /// Content of the `--set-file indexHtml=` file at call time, if any
    pub page: Option<String>,
}

/// Answers invocations from a script keyed by command-line prefix
///
/// The first matching entry wins. Unscripted commands fail as if the
/// program were not installed.
#[derive(Default)]
pub struct ScriptedRunner {
    /// Directory relative page paths resolve against
    working_dir: PathBuf,
    script: Vec<(String, CommandOutput)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner whose commands run from `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            working_dir: dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn on(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.script.push((prefix.to_string(), output));
        self
    }

    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    pub fn failed(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(code),
        }
    }

    /// Command lines in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.invocation.to_string())
            .collect()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn page_file_content(working_dir: &Path, invocation: &Invocation) -> Option<String> {
    let position = invocation.args.iter().position(|a| a == "--set-file")?;
    let value = invocation.args.get(position + 1)?;
    let path = value.strip_prefix("indexHtml=")?;
    std::fs::read_to_string(working_dir.join(path)).ok()
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let line = invocation.to_string();

        self.calls.lock().unwrap().push(RecordedCall {
            invocation: invocation.clone(),
            page: page_file_content(&self.working_dir, invocation),
        });

        self.script
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: command not found", invocation.program),
                )
            })
    }
}
