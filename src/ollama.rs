use std::io::ErrorKind;
use std::process::Stdio;

use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

// Outcome of a single `ollama run` turn. Every failure mode of the
// subprocess layer is folded into a variant; the run path never surfaces
// an error to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Reply(String),
    ProcessError(String),
    SpawnFault(String),
}

impl RunOutcome {
    /// The text shown in the transcript for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            RunOutcome::Reply(reply) => reply.clone(),
            RunOutcome::ProcessError(stderr) => format!("Error: {}", stderr),
            RunOutcome::SpawnFault(fault) => format!("An error occurred: {}", fault),
        }
    }
}

/// Handle on the external ollama executable. Both subcommands are used as
/// black boxes: `list` for the installed-model table, `run` for one turn.
#[derive(Debug, Clone)]
pub struct OllamaCli {
    binary: String,
}

impl OllamaCli {
    pub fn new(binary: String) -> Self {
        OllamaCli { binary }
    }

    // Failures are reported on stderr and yield an empty list; the caller
    // decides whether that is fatal.
    pub fn list_models(&self) -> Vec<String> {
        let output = match std::process::Command::new(&self.binary).arg("list").output() {
            Ok(output) => output,
            Err(e) => {
                eprintln!("Error running {} list: {}", self.binary, e);
                return Vec::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eprintln!("Error listing models: {}", stderr.trim());
            return Vec::new();
        }

        parse_listing(&String::from_utf8_lossy(&output.stdout))
    }

    pub async fn run(&self, model: &str, input: &str) -> RunOutcome {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("run").arg(model);

        match capture(cmd, input).await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::SpawnFault(e.to_string()),
        }
    }
}

// First whitespace-delimited token of every data line, in table order. The
// first line is the column header and is skipped; duplicates are kept.
fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

// Spawns `cmd` with `input` piped to its stdin and waits for it to exit,
// capturing both streams with lossy UTF-8 decoding. A child that exits
// without reading its stdin breaks the pipe mid-write; that is not a fault,
// the exit status and stderr still decide the outcome.
async fn capture(mut cmd: Command, input: &str) -> Result<RunOutcome> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()).await {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
        // dropped here so the child sees EOF
    }

    let output = child.wait_with_output().await?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(RunOutcome::Reply(stdout.trim().to_string()))
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(RunOutcome::ProcessError(stderr.trim().to_string()))
    }
}
