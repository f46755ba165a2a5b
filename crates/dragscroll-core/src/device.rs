//! Decides whether pointer dragging is attached at all
//!
//! On touch devices the container is left to native scrolling, so the engine
//! asks a `DragPolicy` before registering its pointer-down handler.

use regex::{Regex, RegexBuilder};

/// Signatures of user agents that get native touch scrolling instead of drag
pub const MOBILE_USER_AGENTS: &str =
    "Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini";

pub trait DragPolicy {
    fn allows_pointer_drag(&self) -> bool;
}

/// Always allow dragging
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDrag;

impl DragPolicy for AlwaysDrag {
    fn allows_pointer_drag(&self) -> bool {
        true
    }
}

/// User-agent sniffing
#[derive(Debug, Clone)]
pub struct UserAgentPolicy {
    user_agent: String,
    pattern: Regex,
}

impl UserAgentPolicy {
    /// Match against the built-in list of mobile signatures
    pub fn new(user_agent: impl Into<String>) -> crate::Result<Self> {
        Self::with_pattern(user_agent, MOBILE_USER_AGENTS)
    }

    /// Match against a custom pattern (case-insensitive)
    pub fn with_pattern(user_agent: impl Into<String>, pattern: &str) -> crate::Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            user_agent: user_agent.into(),
            pattern,
        })
    }

    pub fn is_mobile(&self) -> bool {
        self.pattern.is_match(&self.user_agent)
    }
}

impl DragPolicy for UserAgentPolicy {
    fn allows_pointer_drag(&self) -> bool {
        !self.is_mobile()
    }
}

impl<F> DragPolicy for F
where
    F: Fn() -> bool,
{
    fn allows_pointer_drag(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_agents_disable_drag() {
        for ua in [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
            "mozilla/5.0 (ipad; cpu os 16_0)",
        ] {
            let policy = UserAgentPolicy::new(ua).unwrap();
            assert!(policy.is_mobile(), "{}", ua);
            assert!(!policy.allows_pointer_drag());
        }
    }

    #[test]
    fn test_desktop_agent_allows_drag() {
        let policy =
            UserAgentPolicy::new("Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0")
                .unwrap();
        assert!(policy.allows_pointer_drag());
    }

    #[test]
    fn test_custom_pattern_and_closure() {
        let policy = UserAgentPolicy::with_pattern("KaiOS/3.0", "kaios").unwrap();
        assert!(!policy.allows_pointer_drag());
        assert!(UserAgentPolicy::with_pattern("x", "(").is_err());

        let never = || false;
        assert!(!never.allows_pointer_drag());
    }
}
