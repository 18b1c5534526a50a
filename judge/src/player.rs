use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use othello::Request;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::recording::Recorder;

/// How to start a bot, as read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    /// A short name shown in results.
    pub nick: String,
    /// The program to run, followed by its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        let config: PlayerConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse player config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A line-based connection to a bot.
pub trait Channel {
    /// Sends one request line and waits for one response line.
    fn exchange(&mut self, request: &str) -> anyhow::Result<String>;
}

/// A bot running as a child process, talking over stdin/stdout.
pub struct ProcessChannel {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after exchange().
    buf: String,
}

impl ProcessChannel {
    pub fn spawn(cmd: &[String]) -> anyhow::Result<Self> {
        let (program, args) = cmd.split_first().context("Empty command")?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start '{}'", program))?;

        let stdin = child.stdin.take().context("Could not access stdin")?;
        let stdout = child.stdout.take().context("Could not access stdout")?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }
}

impl Channel for ProcessChannel {
    fn exchange(&mut self, request: &str) -> anyhow::Result<String> {
        self.stdin.write_all(request.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Bot exited without answering");
        }
        let response = String::from(self.buf.trim_end());
        self.buf.clear();
        Ok(response)
    }
}

impl Drop for ProcessChannel {
    fn drop(&mut self) {
        let bye = serde_json::to_string(&Request::Bye).unwrap_or_default();
        if writeln!(self.stdin, "{}", bye).is_err() {
            warn!("Could not say goodbye to bot");
        }
        let _ = self.child.wait();
    }
}

pub struct Player {
    pub name: String,
    channel: Box<dyn Channel>,
}

impl Player {
    pub fn new(name: &str, channel: Box<dyn Channel>) -> Self {
        Self {
            name: String::from(name),
            channel,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let channel = ProcessChannel::spawn(&config.cmd)?;
        Ok(Self::new(&config.nick, Box::new(channel)))
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        let serialized_response = self.channel.exchange(&req_json)?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, &req_json, &serialized_response);
        }
        let response = serde_json::from_str::<T>(&serialized_response).with_context(|| {
            format!(
                "Could not understand response from {}: {}",
                self.name, serialized_response
            )
        })?;
        Ok(response)
    }
}
