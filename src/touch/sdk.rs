//! Vendor gesture-server adapter.
//!
//! The gesture server pushes one text message per touch sample, e.g.
//! `id=3;x=0.25;y=0.75;GestureType=GestureUpdate`, from a thread the server
//! library owns. Messages are parsed and normalized on that thread and then
//! handed to the main loop through a [`LoopSender`]; nothing here touches
//! stroke state.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::thread::{self, JoinHandle};
use thiserror::Error;

use super::{ContactId, LoopEvent, LoopSender, TouchAdapter, TouchEvent, TouchPhase, TouchPoint};

/// Endpoint value that selects standard input instead of a socket.
pub const STDIN_ENDPOINT: &str = "-";

/// Reasons a gesture message is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum SdkParseError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a valid number: '{value}'")]
    BadNumber { field: &'static str, value: String },

    #[error("unknown gesture type '{0}'")]
    UnknownGesture(String),
}

/// A parsed gesture-server message, still in the server's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdkMessage {
    pub id: ContactId,
    pub x: f64,
    pub y: f64,
    pub phase: TouchPhase,
}

impl SdkMessage {
    /// Parses a `key=value` message.
    ///
    /// Pairs may be separated by `;`, `,`, `&` or whitespace and written as
    /// `key=value` or `key:value`. Keys are case-sensitive.
    pub fn parse(message: &str) -> Result<Self, SdkParseError> {
        let id = field(message, "id").ok_or(SdkParseError::MissingField("id"))?;
        let id = id.parse::<ContactId>().map_err(|_| SdkParseError::BadNumber {
            field: "id",
            value: id.to_string(),
        })?;
        let x = number(message, "x")?;
        let y = number(message, "y")?;
        let gesture =
            field(message, "GestureType").ok_or(SdkParseError::MissingField("GestureType"))?;
        let phase = match gesture {
            "GestureDown" => TouchPhase::Began,
            "GestureUpdate" => TouchPhase::Moved,
            "GestureUp" => TouchPhase::Ended,
            other => return Err(SdkParseError::UnknownGesture(other.to_string())),
        };

        Ok(Self { id, x, y, phase })
    }
}

fn field<'a>(message: &'a str, key: &str) -> Option<&'a str> {
    message
        .split(|c: char| c == ';' || c == ',' || c == '&' || c.is_whitespace())
        .filter_map(|pair| pair.split_once(['=', ':']))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.trim())
}

fn number(message: &str, key: &'static str) -> Result<f64, SdkParseError> {
    let raw = field(message, key).ok_or(SdkParseError::MissingField(key))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SdkParseError::BadNumber {
            field: key,
            value: raw.to_string(),
        })
}

/// Normalizes gesture-server coordinates into the unit square.
#[derive(Debug, Clone, Copy)]
pub struct SdkAdapter {
    extent_width: f64,
    extent_height: f64,
}

impl SdkAdapter {
    /// `extent` is the server's coordinate range, `[1.0, 1.0]` when it already
    /// sends normalized values.
    pub fn new(extent: [f64; 2]) -> Self {
        Self {
            extent_width: extent[0],
            extent_height: extent[1],
        }
    }

    /// Parses and translates one raw line, dropping it when malformed.
    pub fn translate_line(&mut self, line: &str) -> Option<TouchEvent> {
        match SdkMessage::parse(line) {
            Ok(message) => self.translate(message),
            Err(err) => {
                debug!("Dropping gesture message {:?}: {}", line, err);
                None
            }
        }
    }
}

impl Default for SdkAdapter {
    fn default() -> Self {
        Self::new([1.0, 1.0])
    }
}

impl TouchAdapter for SdkAdapter {
    type Raw = SdkMessage;

    fn translate(&mut self, raw: SdkMessage) -> Option<TouchEvent> {
        let position =
            TouchPoint::new(raw.x / self.extent_width, raw.y / self.extent_height).clamped();
        Some(TouchEvent::new(raw.id, raw.phase, position))
    }
}

/// Listener thread reading newline-delimited gesture messages.
pub struct SdkTouchSource {
    handle: JoinHandle<()>,
}

impl SdkTouchSource {
    /// Opens `endpoint` (a Unix socket path, or `-` for stdin) and starts the
    /// listener thread.
    pub fn connect(endpoint: &str, adapter: SdkAdapter, sender: LoopSender) -> Result<Self> {
        if endpoint == STDIN_ENDPOINT {
            info!("Reading gesture messages from stdin");
            return Self::spawn(BufReader::new(io::stdin()), adapter, sender)
                .context("Failed to start gesture listener thread");
        }

        let stream = UnixStream::connect(endpoint)
            .with_context(|| format!("Failed to connect to gesture server at {endpoint}"))?;
        info!("Connected to gesture server at {}", endpoint);
        Self::spawn(BufReader::new(stream), adapter, sender)
            .context("Failed to start gesture listener thread")
    }

    /// Starts a listener over any line-oriented reader.
    pub fn spawn<R>(reader: R, adapter: SdkAdapter, sender: LoopSender) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("sdk-touch".into())
            .spawn(move || pump(reader, adapter, sender))?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the listener to stop. Only returns once the reader hits EOF.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

fn pump<R: BufRead>(mut reader: R, mut adapter: SdkAdapter, sender: LoopSender) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!("Gesture server read failed: {}", err);
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(event) = adapter.translate_line(line) {
            if !sender.send(LoopEvent::Touch(event)) {
                debug!("Main loop gone; stopping gesture listener");
                return;
            }
        }
    }

    info!("Gesture server stream closed");
    sender.send(LoopEvent::SourceClosed);
}
