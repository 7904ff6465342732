//! Transport Session: the exclusively owned connection to the remote
//! playback server, one method per remote capability.
//!
//! The wire exchange is line-oriented: a command line out, key-value
//! response lines back, terminated by `OK` (or an `ACK ...` error line).
//! Multi-command operations hold the connection lock for the whole chain,
//! so chains dispatched concurrently serialize instead of interleaving —
//! remote queue ordering depends on it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;

use crate::errors::{AppError, AppResult};
use super::status::{NowPlaying, PlayState, TransportStatus};

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Connection {
    /// One request/response round trip. Returns the response lines up to,
    /// excluding, the terminating `OK`.
    async fn exchange(&mut self, cmd: &str) -> AppResult<Vec<String>> {
        tracing::trace!(cmd, "Sending transport command");

        self.writer.write_all(cmd.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                return Err(AppError::transport("connection closed by server"));
            }
            let line = line.trim_end();
            if line == "OK" {
                return Ok(lines);
            }
            if line.starts_with("ACK") {
                tracing::warn!(cmd, response = line, "Transport command rejected");
                return Err(AppError::transport(line));
            }
            lines.push(line.to_string());
        }
    }
}

#[derive(Clone)]
pub struct TransportSession {
    conn: Arc<Mutex<Connection>>,
}

impl TransportSession {
    /// Establishes the connection and consumes the server greeting. A
    /// failure here is fatal to the process; there is no retry loop.
    pub async fn connect(host: &str, port: u16) -> AppResult<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        let (read_half, writer) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        let mut greeting = String::new();
        reader.read_line(&mut greeting).await?;
        if !greeting.starts_with("OK MPD") {
            return Err(AppError::transport(format!(
                "unexpected greeting: {}",
                greeting.trim_end()
            )));
        }
        tracing::info!(host, port, greeting = greeting.trim_end(), "Transport connected");

        Ok(Self {
            conn: Arc::new(Mutex::new(Connection { reader, writer })),
        })
    }

    /// A single standalone command; the lock is held only for its round trip.
    async fn command(&self, cmd: &str) -> AppResult<Vec<String>> {
        self.conn.lock().await.exchange(cmd).await
    }

    pub async fn poll_status(&self) -> AppResult<TransportStatus> {
        let lines = self.command("status").await?;
        Ok(TransportStatus::from_pairs(&parse_pairs(&lines)))
    }

    pub async fn current_song(&self) -> AppResult<NowPlaying> {
        let lines = self.command("currentsong").await?;
        Ok(NowPlaying::from_pairs(&parse_pairs(&lines)))
    }

    /// Start playback at an explicit queue position.
    pub async fn play_at(&self, position: usize) -> AppResult<()> {
        self.command(&format!("play {position}")).await?;
        Ok(())
    }

    /// Append one playable resource to the remote queue. The queue is
    /// position-ordered and append-only per call, so replaying an ordered
    /// range means one call per locator, in order.
    pub async fn enqueue(&self, locator: &str) -> AppResult<()> {
        self.command(&format!("add {}", quote_arg(locator))).await?;
        Ok(())
    }

    pub async fn clear_queue(&self) -> AppResult<()> {
        self.command("clear").await?;
        Ok(())
    }

    /// Remove the entry at its current remote position. All later positions
    /// shift down by one; the caller refreshes the queue mirror right after.
    pub async fn delete_at(&self, position: usize) -> AppResult<()> {
        self.command(&format!("delete {position}")).await?;
        Ok(())
    }

    /// Derives the next action from a fresh status poll rather than a
    /// locally cached flag, so externally driven state changes cannot
    /// desync the toggle. Returns the state the transport was moved to.
    /// The lock spans the poll and the follow-up command.
    pub async fn toggle_pause(&self) -> AppResult<PlayState> {
        let mut conn = self.conn.lock().await;
        let lines = conn.exchange("status").await?;
        let status = TransportStatus::from_pairs(&parse_pairs(&lines));
        if status.playing() {
            conn.exchange("pause 1").await?;
            Ok(PlayState::Pause)
        } else {
            conn.exchange("play").await?;
            Ok(PlayState::Play)
        }
    }

    /// Relative seek is only meaningful while the transport reports playing;
    /// paused or stopped it is a no-op, not an error. Returns whether a seek
    /// was issued. The lock spans the poll and the seek.
    pub async fn seek_relative(&self, delta_seconds: i64) -> AppResult<bool> {
        let mut conn = self.conn.lock().await;
        let lines = conn.exchange("status").await?;
        let status = TransportStatus::from_pairs(&parse_pairs(&lines));
        if !status.playing() {
            return Ok(false);
        }
        let target = (status.elapsed_seconds as i64 + delta_seconds).max(0);
        conn.exchange(&format!("seekcur {target}")).await?;
        Ok(true)
    }

    pub async fn next(&self) -> AppResult<()> {
        self.command("next").await?;
        Ok(())
    }

    pub async fn previous(&self) -> AppResult<()> {
        self.command("previous").await?;
        Ok(())
    }

    /// Raw queue listing lines, `<pos>:<locator>` records.
    pub async fn playlist(&self) -> AppResult<Vec<String>> {
        self.command("playlist").await
    }

    /// Replace the whole remote queue with `locators` and start at the top:
    /// clear, then enqueue each in order, then play position 0. The lock is
    /// held across the whole chain; remote position numbering depends on
    /// strict ordering, and a second activation dispatched mid-chain must
    /// queue behind this one rather than interleave with it.
    pub async fn play_range(&self, locators: &[String]) -> AppResult<()> {
        let mut conn = self.conn.lock().await;
        conn.exchange("clear").await?;
        for locator in locators {
            conn.exchange(&format!("add {}", quote_arg(locator))).await?;
        }
        conn.exchange("play 0").await?;
        Ok(())
    }
}

fn parse_pairs(lines: &[String]) -> HashMap<String, String> {
    lines
        .iter()
        .filter_map(|line| {
            let (key, value) = line.split_once(": ")?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Protocol argument quoting: arguments containing spaces or quotes are
/// wrapped in double quotes with backslash escapes.
fn quote_arg(arg: &str) -> String {
    if arg.contains(' ') || arg.contains('"') || arg.contains('\\') {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
