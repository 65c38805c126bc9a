use std::fmt;
use std::str::FromStr;

/// One scripted host interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Next,
    Prev,
    GoTo(i64),
    Key(String),
    /// Press, move by `delta` px along the strip axis over `duration_ms`,
    /// release.
    Drag { delta: f64, duration_ms: f64 },
    Wait(usize),
    Fullscreen,
    Play,
    Pause,
}

impl Step {
    pub fn is_drag(&self) -> bool {
        matches!(self, Self::Drag { .. })
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let number = |idx: usize, what: &str| -> Result<f64, String> {
            args.get(idx)
                .ok_or_else(|| format!("`{s}`: missing {what}"))?
                .parse::<f64>()
                .map_err(|_| format!("`{s}`: {what} is not a number"))
        };

        let step = match (head.as_str(), args.len()) {
            ("next", 0) => Self::Next,
            ("prev", 0) => Self::Prev,
            ("fullscreen", 0) => Self::Fullscreen,
            ("play", 0) => Self::Play,
            ("pause", 0) => Self::Pause,
            ("goto", 1) => Self::GoTo(
                args[0]
                    .parse()
                    .map_err(|_| format!("`{s}`: index is not an integer"))?,
            ),
            ("key", 1) => Self::Key(args[0].to_string()),
            ("wait", 1) => Self::Wait(
                args[0]
                    .parse()
                    .map_err(|_| format!("`{s}`: frame count is not a number"))?,
            ),
            ("drag", 2) => {
                let delta = number(0, "distance")?;
                let duration_ms = number(1, "duration")?;
                if duration_ms <= 0.0 {
                    return Err(format!("`{s}`: duration must be positive"));
                }
                Self::Drag { delta, duration_ms }
            }
            _ => return Err(format!("unrecognised step `{s}`")),
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Prev => f.write_str("prev"),
            Self::GoTo(index) => write!(f, "goto:{index}"),
            Self::Key(name) => write!(f, "key:{name}"),
            Self::Drag { delta, duration_ms } => {
                write!(f, "drag:{delta}:{duration_ms}")
            }
            Self::Wait(frames) => write!(f, "wait:{frames}"),
            Self::Fullscreen => f.write_str("fullscreen"),
            Self::Play => f.write_str("play"),
            Self::Pause => f.write_str("pause"),
        }
    }
}
