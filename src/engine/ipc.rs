//! JSON IPC client for the engine socket.
//!
//! One writer guarded by a mutex, one reader thread. Outbound commands are
//! fire-and-forget single lines; `get_property` requests carry a
//! `request_id` and block the caller until the reader routes the response.
//! Event and property-change lines are normalized into
//! [`EngineNotification`]s and handed to the window thread through
//! [`Dispatch`].
//!
//! While the reader thread is parked in `Dispatch::sync`, it cannot route
//! responses, so notification handlers must never issue a blocking request.
//! Observed property values are cached as they stream in; handlers read
//! through [`Engine::cached_int`] instead.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;

use parking_lot::Mutex;
use serde_json::{Value, json};

use super::{EngineError, EngineNotification, PropertyChange};
use crate::dispatch::Dispatch;

type PendingMap = Arc<Mutex<HashMap<u64, mpsc::Sender<Result<Value, EngineError>>>>>;
type PropertyCache = Arc<Mutex<HashMap<String, Value>>>;

/// Handle to a connected engine process.
pub struct Engine {
    writer: Mutex<UnixStream>,
    pending: PendingMap,
    properties: PropertyCache,
    next_request_id: AtomicU64,
    next_observe_id: AtomicU64,
}

impl Engine {
    /// Connect to the engine's IPC socket (single attempt; the caller owns
    /// the retry policy since it also watches the engine process).
    pub fn connect(socket: &Path, dispatch: Dispatch) -> Result<Self, EngineError> {
        let stream = UnixStream::connect(socket)?;
        let reader = stream.try_clone()?;

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let properties: PropertyCache = Arc::new(Mutex::new(HashMap::new()));
        {
            let pending = Arc::clone(&pending);
            let properties = Arc::clone(&properties);
            thread::Builder::new()
                .name("engine-ipc-reader".into())
                .spawn(move || reader_loop(reader, pending, properties, dispatch))?;
        }

        let engine = Self {
            writer: Mutex::new(stream),
            pending,
            properties,
            next_request_id: AtomicU64::new(0),
            next_observe_id: AtomicU64::new(0),
        };

        // Video geometry is read from the cache at reconfig time; keep it
        // streaming from the start of the session.
        engine.observe_property("dwidth")?;
        engine.observe_property("dheight")?;

        Ok(engine)
    }

    /// Submit a one-way command. The engine's acknowledgement is discarded.
    pub fn command(&self, args: &[&str]) -> Result<(), EngineError> {
        self.send_line(&json!({ "command": args }))
    }

    /// Subscribe to change notifications for a property.
    pub fn observe_property(&self, name: &str) -> Result<(), EngineError> {
        let id = self.next_observe_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.send_line(&json!({ "command": ["observe_property", id, name] }))
    }

    /// Blocking integer property read. Not for use inside notification
    /// handlers; see the module docs.
    pub fn property_i64(&self, name: &str) -> Result<i64, EngineError> {
        self.request(vec![json!("get_property"), json!(name)])?
            .as_i64()
            .ok_or_else(|| EngineError::Protocol(format!("property {name} is not an integer")))
    }

    /// Blocking string property read.
    pub fn property_string(&self, name: &str) -> Result<String, EngineError> {
        Ok(self
            .request(vec![json!("get_property"), json!(name)])?
            .as_str()
            .ok_or_else(|| EngineError::Protocol(format!("property {name} is not a string")))?
            .to_string())
    }

    /// Blocking boolean-flag property read.
    pub fn property_flag(&self, name: &str) -> Result<bool, EngineError> {
        self.request(vec![json!("get_property"), json!(name)])?
            .as_bool()
            .ok_or_else(|| EngineError::Protocol(format!("property {name} is not a flag")))
    }

    /// Last observed integer value of a property, fed by the notification
    /// stream. Safe to call from notification handlers.
    pub fn cached_int(&self, name: &str) -> Option<i64> {
        self.properties.lock().get(name).and_then(Value::as_i64)
    }

    fn request(&self, command: Vec<Value>) -> Result<Value, EngineError> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (tx, rx) = mpsc::channel();
        self.pending.lock().insert(id, tx);

        let payload = json!({ "command": command, "request_id": id });
        if let Err(e) = self.send_line(&payload) {
            self.pending.lock().remove(&id);
            return Err(e);
        }

        match rx.recv() {
            Ok(result) => result,
            // Sender dropped: the reader saw EOF and cleared the map.
            Err(_) => Err(EngineError::Disconnected),
        }
    }

    fn send_line(&self, payload: &Value) -> Result<(), EngineError> {
        let mut line =
            serde_json::to_vec(payload).map_err(|e| EngineError::Protocol(e.to_string()))?;
        line.push(b'\n');
        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        Ok(())
    }
}

fn reader_loop(
    stream: UnixStream,
    pending: PendingMap,
    properties: PropertyCache,
    dispatch: Dispatch,
) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::debug!("engine socket read failed: {e}");
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("discarding malformed engine message: {e}");
                continue;
            }
        };

        if let Some(id) = value.get("request_id").and_then(Value::as_u64) {
            // Replies to fire-and-forget commands carry id 0 and have no
            // waiter; they are dropped here.
            if let Some(sender) = pending.lock().remove(&id) {
                let result = match value.get("error").and_then(Value::as_str) {
                    Some("success") | None => {
                        Ok(value.get("data").cloned().unwrap_or(Value::Null))
                    }
                    Some(err) => Err(EngineError::Rejected(err.to_string())),
                };
                let _ = sender.send(result);
            }
            continue;
        }

        if value.get("event").and_then(Value::as_str) == Some("property-change")
            && let (Some(name), Some(data)) = (
                value.get("name").and_then(Value::as_str),
                value.get("data"),
            )
        {
            properties.lock().insert(name.to_string(), data.clone());
        }

        if let Some(note) = parse_notification(&value) {
            dispatch.sync(note);
        }
    }

    // Socket closed: the engine is gone. Dropping the pending senders wakes
    // blocked readers with `Disconnected`; a final shutdown notification
    // closes the session (the bridge tolerates a duplicate).
    pending.lock().clear();
    dispatch.sync(EngineNotification::Shutdown);
}

/// Normalize one event line. Unknown events and properties are dropped.
fn parse_notification(value: &Value) -> Option<EngineNotification> {
    let event = value.get("event")?.as_str()?;
    let note = match event {
        "shutdown" => EngineNotification::Shutdown,
        "video-reconfig" => EngineNotification::VideoReconfig,
        "start-file" => EngineNotification::StartFile,
        "end-file" => EngineNotification::EndFile,
        "client-message" => {
            let args = value
                .get("args")?
                .as_array()?
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            EngineNotification::ClientMessage(args)
        }
        "property-change" => {
            let name = value.get("name")?.as_str()?;
            let data = value.get("data");
            let flag = data.and_then(Value::as_bool);
            let change = match name {
                "media-title" => PropertyChange::MediaTitle(
                    data.and_then(Value::as_str).unwrap_or_default().to_string(),
                ),
                "border" => PropertyChange::Border(flag?),
                "window-maximized" => PropertyChange::Maximized(flag?),
                "window-minimized" => PropertyChange::Minimized(flag?),
                "fullscreen" => PropertyChange::Fullscreen(flag?),
                "ontop" => PropertyChange::OnTop(flag?),
                _ => return None,
            };
            EngineNotification::Property(change)
        }
        _ => {
            log::trace!("ignoring engine event {event}");
            return None;
        }
    };
    Some(note)
}
