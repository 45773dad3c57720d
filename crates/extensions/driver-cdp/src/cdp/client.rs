//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, NewTarget};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Reply slots for in-flight commands, by request id.
pub(crate) type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;
/// Event channels by flattened session id.
pub(crate) type EventRoutes = Arc<Mutex<HashMap<String, mpsc::UnboundedSender<CdpResponse>>>>;

/// Shared plumbing every session needs to issue commands.
#[derive(Clone)]
pub(crate) struct Transport {
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    pending: Pending,
    next_id: Arc<AtomicU64>,
    command_timeout: Duration,
}

impl Transport {
    /// Send one command and wait for its reply.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };
        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = self.ws_tx.lock().await.send(Message::Text(json.into())).await;
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(self.command_timeout, rx).await {
            Ok(Ok(result)) => result,
            // Sender dropped: the socket went away.
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!(
                    "{} got no reply within {}ms",
                    method,
                    self.command_timeout.as_millis()
                )))
            }
        }
    }
}

/// Deliver one incoming text frame: replies to their waiter, events to the
/// session they belong to. Unknown ids and sessions are dropped.
pub(crate) fn route_frame(text: &str, pending: &Pending, routes: &EventRoutes) {
    let frame = match serde_json::from_str::<CdpResponse>(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Unparseable CDP frame: {}", e);
            return;
        }
    };

    if let Some(id) = frame.id {
        let Some(waiter) = pending.lock().remove(&id) else {
            trace!("Reply {} has no waiter", id);
            return;
        };
        let result = match frame.error {
            Some(err) => Err(CdpError::Protocol {
                code: err.code,
                message: err.message,
            }),
            None => Ok(frame.result.unwrap_or(Value::Null)),
        };
        let _ = waiter.send(result);
    } else if frame.method.is_some() {
        let session_id = frame.session_id.clone().unwrap_or_default();
        if let Some(tx) = routes.lock().get(&session_id) {
            let _ = tx.send(frame);
        }
    }
}

/// Connection to one browser.
///
/// A background task reads the socket and hands frames to [`route_frame`].
pub struct CdpClient {
    http_endpoint: String,
    transport: Transport,
    routes: EventRoutes,
    recv_task: JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(endpoint: &str, command_timeout: Duration) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        let unavailable = |e: reqwest::Error| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e));

        let version: BrowserVersion = reqwest::get(format!("{}/json/version", http_endpoint))
            .await
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        debug!(
            "Browser {} (protocol {}) at {}",
            version.browser, version.protocol_version, http_endpoint
        );

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;
        let (ws_sink, ws_source) = ws_stream.split();

        let transport = Transport {
            ws_tx: Arc::new(tokio::sync::Mutex::new(ws_sink)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            command_timeout,
        };
        let routes: EventRoutes = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = tokio::spawn(Self::receive_loop(
            ws_source,
            transport.pending.clone(),
            routes.clone(),
        ));

        Ok(Self {
            http_endpoint,
            transport,
            routes,
            recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, pending: Pending, routes: EventRoutes) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    route_frame(&text, &pending, &routes);
                }
                Ok(Message::Close(_)) => {
                    debug!("Browser closed the DevTools socket");
                    break;
                }
                Err(e) => {
                    error!("DevTools socket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        // Dropping the senders wakes every waiter with SessionClosed.
        pending.lock().clear();
    }

    /// Send a browser-level command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Open a tab and attach a flattened session to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        // /json/new only accepts PUT on current Chrome
        let create_url = match url {
            Some(u) => format!("{}/json/new?{}", self.http_endpoint, u),
            None => format!("{}/json/new", self.http_endpoint),
        };
        let target: NewTarget = reqwest::Client::new()
            .put(&create_url)
            .send()
            .await?
            .json()
            .await?;
        debug!("Created target {} at {}", target.id, target.url);

        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target.id, "flatten": true })),
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("attachToTarget without sessionId".to_string()))?
            .to_string();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.routes.lock().insert(session_id.clone(), event_tx);

        let session = PageSession::new(target.id, session_id, self.transport.clone(), event_rx);
        session.enable_domains().await?;
        Ok(session)
    }

    /// Close a tab and stop routing its events.
    pub async fn close_page(&self, session: &PageSession) -> Result<(), CdpError> {
        self.routes.lock().remove(session.session_id());
        self.call(
            "Target.closeTarget",
            Some(json!({ "targetId": session.target_id() })),
        )
        .await?;
        Ok(())
    }

    /// Ask the browser to exit.
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        self.call("Browser.close", None).await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
