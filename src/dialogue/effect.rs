//! Effects produced by state transitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presentation timing for one action
///
/// The presenter shows a typing indicator for `typing`, removes it, waits
/// `settle`, then renders the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    #[serde(with = "millis")]
    pub typing: Duration,
    #[serde(with = "millis")]
    pub settle: Duration,
}

impl Pacing {
    pub const fn ms(typing: u64, settle: u64) -> Self {
        Self {
            typing: Duration::from_millis(typing),
            settle: Duration::from_millis(settle),
        }
    }

    /// No typing indicator, rendered right away
    pub const fn immediate() -> Self {
        Self::ms(0, 0)
    }

    pub fn is_immediate(&self) -> bool {
        self.typing.is_zero() && self.settle.is_zero()
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::ms(1000, 500)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::trivially_copy_pass_by_ref)] // serde's `with` signature
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Something to show the visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputAction {
    ShowText {
        text: String,
        pacing: Pacing,
    },
    ShowLink {
        label: String,
        url: String,
        pacing: Pacing,
    },
    /// Clickable choices; clicking one submits its label as input
    ShowOptions {
        options: Vec<String>,
        pacing: Pacing,
    },
}

impl OutputAction {
    pub fn text(text: impl Into<String>, pacing: Pacing) -> Self {
        OutputAction::ShowText {
            text: text.into(),
            pacing,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        OutputAction::ShowLink {
            label: label.into(),
            url: url.into(),
            pacing: Pacing::immediate(),
        }
    }

    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OutputAction::ShowOptions {
            options: options.into_iter().map(Into::into).collect(),
            pacing: Pacing::immediate(),
        }
    }

    pub fn pacing(&self) -> Pacing {
        match self {
            OutputAction::ShowText { pacing, .. }
            | OutputAction::ShowLink { pacing, .. }
            | OutputAction::ShowOptions { pacing, .. } => *pacing,
        }
    }
}

/// Accepted visitor feedback, handed to the feedback sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub visitor_name: String,
    pub text: String,
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Present an action to the visitor
    Display(OutputAction),
    /// Hand feedback to the sink
    RecordFeedback(Feedback),
}

impl Effect {
    pub fn text(text: impl Into<String>, pacing: Pacing) -> Self {
        Effect::Display(OutputAction::text(text, pacing))
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Effect::Display(OutputAction::link(label, url))
    }

    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Effect::Display(OutputAction::options(options))
    }

    pub fn as_action(&self) -> Option<&OutputAction> {
        match self {
            Effect::Display(action) => Some(action),
            Effect::RecordFeedback(_) => None,
        }
    }
}
