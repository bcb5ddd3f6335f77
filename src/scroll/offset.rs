use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position along one axis of either the container or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Start edge (`start`, `top`).
    Start,
    /// Midpoint (`center`).
    Center,
    /// End edge (`end`, `bottom`).
    End,
    /// Fraction of the extent (`0.25` or `25%`).
    Fraction(f64),
    /// Absolute pixels from the start edge (`120px`).
    Pixels(f64),
}

impl Anchor {
    /// Distance from the start edge for an extent of `extent` pixels.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => extent * 0.5,
            Self::End => extent,
            Self::Fraction(f) => extent * f,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollyteError;

    fn from_str(s: &str) -> ScrollyteResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        let num = |raw: &str| -> ScrollyteResult<f64> {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ScrollyteError::validation(format!("invalid offset anchor '{s}'")))
        };

        match s.as_str() {
            "start" | "top" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" | "bottom" => Ok(Self::End),
            other => {
                if let Some(px) = other.strip_suffix("px") {
                    Ok(Self::Pixels(num(px)?))
                } else if let Some(pct) = other.strip_suffix('%') {
                    Ok(Self::Fraction(num(pct)? / 100.0))
                } else {
                    Ok(Self::Fraction(num(other)?))
                }
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
            Self::Pixels(v) => write!(f, "{v}px"),
        }
    }
}

/// Pairing of a container anchor with a viewport anchor, written `"<container> <viewport>"`.
///
/// `"start end"` means "the container's top meets the viewport's bottom".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollOffset {
    /// Point on the container.
    pub container: Anchor,
    /// Point on the viewport.
    pub viewport: Anchor,
}

impl ScrollOffset {
    /// Pair `container` with `viewport`.
    pub const fn new(container: Anchor, viewport: Anchor) -> Self {
        Self {
            container,
            viewport,
        }
    }

    /// Container top enters at the viewport bottom.
    pub const fn enter() -> Self {
        Self::new(Anchor::Start, Anchor::End)
    }

    /// Container bottom leaves at the viewport top.
    pub const fn exit() -> Self {
        Self::new(Anchor::End, Anchor::Start)
    }

    /// Viewport-relative `top` the container must have for this offset to be met.
    pub fn container_top_at(self, container_height: f64, viewport_height: f64) -> f64 {
        self.viewport.resolve(viewport_height) - self.container.resolve(container_height)
    }
}

impl FromStr for ScrollOffset {
    type Err = ScrollyteError;

    fn from_str(s: &str) -> ScrollyteResult<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [c, v] => Ok(Self::new(c.parse()?, v.parse()?)),
            [single] => {
                let a: Anchor = single.parse()?;
                Ok(Self::new(a, a))
            }
            _ => Err(ScrollyteError::validation(format!(
                "scroll offset must be '<container> <viewport>', got '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for ScrollOffset {
    type Error = ScrollyteError;

    fn try_from(s: String) -> ScrollyteResult<Self> {
        s.parse()
    }
}

impl From<ScrollOffset> for String {
    fn from(o: ScrollOffset) -> Self {
        o.to_string()
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.container, self.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/offset.rs"]
mod tests;
