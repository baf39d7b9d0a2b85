//! Touch sources and the canonical event they produce.
//!
//! Two very different back-ends feed the painting core:
//! - the compositor's own multi-touch protocol (`wl_touch`), see [`native`]
//! - a vendor gesture server that pushes key/value text messages from its own
//!   thread, see [`sdk`]
//!
//! Both translate their raw samples into a [`TouchEvent`] through the
//! [`TouchAdapter`] trait so the stroke and render code exists only once.

pub mod event;
pub mod native;
pub mod queue;
pub mod sdk;

pub use event::{ContactId, TouchEvent, TouchPhase, TouchPoint};
pub use native::{NativeAdapter, NativeTouch, NativeTouchKind, SurfaceSize};
pub use queue::{LoopEvent, LoopQueue, LoopSender};
pub use sdk::{SdkAdapter, SdkMessage, SdkParseError, SdkTouchSource};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Converts one back-end specific sample into a canonical [`TouchEvent`].
///
/// Returning `None` drops the sample. Touch streams are dense and
/// self-correcting, so a garbled sample is never worth more than that.
pub trait TouchAdapter {
    /// Raw sample type delivered by the back-end.
    type Raw;

    fn translate(&mut self, raw: Self::Raw) -> Option<TouchEvent>;
}

/// Which touch source feeds the session, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TouchBackend {
    /// `wl_touch` events from the compositor
    #[default]
    Native,
    /// Vendor gesture server messages
    Sdk,
}

impl FromStr for TouchBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" | "wayland" => Ok(Self::Native),
            "sdk" | "gesture-server" => Ok(Self::Sdk),
            other => Err(format!("Unknown touch backend '{other}' (expected native or sdk)")),
        }
    }
}

impl fmt::Display for TouchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Sdk => f.write_str("sdk"),
        }
    }
}
