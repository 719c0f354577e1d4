//! Chat panel
//!
//! The panel and the responder talk over two unbounded channels, the way a
//! webview and its extension host exchange messages. The panel echoes the
//! user's line into its transcript immediately, then waits for the matching
//! `ReceiveMessage`. One request is outstanding at a time, so replies arrive
//! in request order.

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::responder::Responder;

pub const PANEL_TITLE: &str = "Agent Chat";

/// Messages crossing the panel boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMessage {
    SendMessage(String),
    ReceiveMessage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Agent,
}

impl Speaker {
    pub fn prefix(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Agent => "Agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

pub struct ChatPanel {
    id: usize,
    to_host: UnboundedSender<PanelMessage>,
    from_host: UnboundedReceiver<PanelMessage>,
    transcript: Vec<ChatLine>,
    worker: JoinHandle<()>,
}

impl ChatPanel {
    /// Create the panel and spawn its responder task on `runtime`
    pub fn open(runtime: &Handle, responder: Responder, id: usize) -> Self {
        let (to_host, mut host_inbox) = unbounded_channel::<PanelMessage>();
        let (host_outbox, from_host) = unbounded_channel::<PanelMessage>();

        let worker = runtime.spawn(async move {
            while let Some(message) = host_inbox.recv().await {
                if let PanelMessage::SendMessage(text) = message {
                    let reply = responder.respond(&text);
                    if host_outbox.send(PanelMessage::ReceiveMessage(reply)).is_err() {
                        break;
                    }
                }
            }
            log::debug!("Chat panel worker stopped");
        });

        Self {
            id,
            to_host,
            from_host,
            transcript: Vec::new(),
            worker,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn title(&self) -> &'static str {
        PANEL_TITLE
    }

    pub fn reveal(&self) {
        log::debug!("Revealing chat panel #{}", self.id);
    }

    pub fn transcript(&self) -> &[ChatLine] {
        &self.transcript
    }

    /// Echo the user's line and forward it; blank input is ignored.
    ///
    /// Returns whether a request was sent.
    pub fn send(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        self.transcript.push(ChatLine {
            speaker: Speaker::User,
            text: text.to_string(),
        });

        if self.to_host.send(PanelMessage::SendMessage(text.to_string())).is_err() {
            log::warn!("Chat panel #{} lost its responder", self.id);
            return false;
        }
        true
    }

    /// Block until the reply to the last request arrives.
    ///
    /// Must not be called from inside the runtime's own tasks.
    pub fn next_reply(&mut self) -> Option<String> {
        match self.from_host.blocking_recv()? {
            PanelMessage::ReceiveMessage(reply) => {
                self.transcript.push(ChatLine {
                    speaker: Speaker::Agent,
                    text: reply.clone(),
                });
                Some(reply)
            }
            PanelMessage::SendMessage(_) => None,
        }
    }

    /// Send a line and wait for its reply
    pub fn exchange(&mut self, text: &str) -> Option<String> {
        if !self.send(text) {
            return None;
        }
        self.next_reply()
    }
}

impl Drop for ChatPanel {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
