use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Actor identifier (person or agent login).
pub type ActorId = String;

/// Thread identifier (issue/PR number, conversation key).
pub type ThreadId = String;

/// Kind of interaction recorded by an event.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Open,
    Comment,
    Review,
    Merge,
    Close,
    Assign,
    Label,
}

impl EventType {
    /// Close and merge end a thread's active life.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Close | Self::Merge)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Comment => write!(f, "comment"),
            Self::Review => write!(f, "review"),
            Self::Merge => write!(f, "merge"),
            Self::Close => write!(f, "close"),
            Self::Assign => write!(f, "assign"),
            Self::Label => write!(f, "label"),
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "comment" => Ok(Self::Comment),
            "review" => Ok(Self::Review),
            "merge" => Ok(Self::Merge),
            "close" => Ok(Self::Close),
            "assign" => Ok(Self::Assign),
            "label" => Ok(Self::Label),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

/// Kind of conversation a thread represents.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThreadType {
    #[default]
    Issue,
    Pr,
}

impl fmt::Display for ThreadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::Pr => write!(f, "pr"),
        }
    }
}

impl std::str::FromStr for ThreadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue" => Ok(Self::Issue),
            "pr" => Ok(Self::Pr),
            other => Err(format!("unknown thread type: {other}")),
        }
    }
}

/// A single discrete interaction (one JSONL line in an event log).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionEvent {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub from: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ActorId>,
    pub thread_id: ThreadId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub thread_type: ThreadType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl InteractionEvent {
    pub fn new(
        timestamp: OffsetDateTime,
        from: impl Into<ActorId>,
        thread_id: impl Into<ThreadId>,
        event_type: EventType,
    ) -> Self {
        Self {
            timestamp,
            from: from.into(),
            to: None,
            thread_id: thread_id.into(),
            event_type,
            thread_type: ThreadType::default(),
            labels: Vec::new(),
        }
    }

    pub fn with_to(mut self, to: impl Into<ActorId>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_thread_type(mut self, thread_type: ThreadType) -> Self {
        self.thread_type = thread_type;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Inclusive time range `[start, end]`.
///
/// Fan-out's rolling windows reuse this shape with a half-open reading; see
/// `rolling_windows` in the metrics crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

impl TimeWindow {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    /// Smallest window covering every event, or `None` for an empty log.
    pub fn spanning(events: &[InteractionEvent]) -> Option<Self> {
        let start = events.iter().map(|e| e.timestamp).min()?;
        let end = events.iter().map(|e| e.timestamp).max()?;
        Some(Self { start, end })
    }

    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}
