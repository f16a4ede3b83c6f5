use std::cell::RefCell;
use std::rc::Rc;

/// Destination for a monitor's diagnostics.
///
/// Production code forwards to the `log` facade via [`LogSink`]; tests use
/// [`RecordingSink`] to assert on what was emitted.
pub trait DiagnosticsSink {
    /// Emits a warning line.
    fn warn(&self, message: &str);

    /// Emits an informational line with an ordered key/value detail list.
    fn info(&self, message: &str, fields: &[(&str, String)]);
}

/// Sink forwarding to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }

    fn info(&self, message: &str, fields: &[(&str, String)]) {
        if fields.is_empty() {
            log::info!("{message}");
        } else {
            let detail = fields
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            log::info!("{message} {{ {detail} }}");
        }
    }
}

/// One diagnostic captured by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkMessage {
    /// Payload of a `warn` call.
    Warn(String),
    /// Payload of an `info` call.
    Info {
        /// The message line.
        message: String,
        /// The key/value details, in emission order.
        fields:  Vec<(String, String)>,
    },
}

/// Sink that records every message, for asserting on diagnostics in tests.
///
/// Clones share the same buffer, mirroring [`ManualClock`](crate::ManualClock).
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    messages: Rc<RefCell<Vec<SinkMessage>>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn messages(&self) -> Vec<SinkMessage> {
        self.messages.borrow().clone()
    }

    /// Recorded warnings only, oldest first.
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter_map(|msg| match msg {
                SinkMessage::Warn(text) => Some(text.clone()),
                SinkMessage::Info { .. } => None,
            })
            .collect()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(SinkMessage::Warn(message.to_owned()));
    }

    fn info(&self, message: &str, fields: &[(&str, String)]) {
        let owned = fields.iter().map(|(key, value)| ((*key).to_owned(), value.clone())).collect();
        self.messages
            .borrow_mut()
            .push(SinkMessage::Info { message: message.to_owned(), fields: owned });
    }
}
