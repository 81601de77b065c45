/// What `t:each` does with a zero-length list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyEachPolicy {
    /// Fail the render with `EmptyCollection`.
    #[default]
    Error,
    /// Render nothing for the element.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape `&`, `<`, `>` in `t:text` substitutions.
    pub escape: bool,
    pub empty_each: EmptyEachPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape: true,
            empty_each: EmptyEachPolicy::Error,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escape(mut self, on: bool) -> Self {
        self.escape = on;
        self
    }

    pub fn empty_each(mut self, policy: EmptyEachPolicy) -> Self {
        self.empty_each = policy;
        self
    }
}
