use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// Collects the requests and responses of one game and writes them to a
/// numbered JSON file once the game is over.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(&mut self, player: &str, request: &str, response: &str) {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: embed(request),
            response: embed(response),
        });
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(&mut writer, &std::mem::take(&mut self.requests))?;
        writer.flush()?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Serialize)]
struct RequestToPlayer {
    player: String,
    request: Value,
    response: Value,
}

// Keeps valid JSON as a nested value, and anything else as a plain string.
fn embed(line: &str) -> Value {
    serde_json::from_str(line).unwrap_or_else(|_| Value::String(String::from(line)))
}
