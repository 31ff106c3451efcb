//! Evaluator configuration.

/// Cap on the number of elements a rest slot collects.
pub const DEFAULT_REST_LIMIT: usize = 1 << 20;

/// Whether a pattern introduces new names or overwrites existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingForm {
    /// `let [a, b] = ...`: each name is declared once per scope.
    #[default]
    Declaration,
    /// `[a, b] = ...`: names are overwritten, member targets are allowed.
    Assignment,
}

/// Evaluator configuration.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Declaration or assignment semantics.
    pub form: BindingForm,
    /// An empty positional pattern succeeds against any source, including
    /// `null` and `undefined`. When off, it needs an iterable like any other
    /// positional pattern.
    pub vacuous_empty_positional: bool,
    /// Maximum elements collected by a rest slot. `None` means unbounded,
    /// which never terminates on an infinite source.
    pub rest_limit: Option<usize>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            form: BindingForm::Declaration,
            vacuous_empty_positional: true,
            rest_limit: Some(DEFAULT_REST_LIMIT),
        }
    }
}

impl EvalOptions {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binding form.
    pub fn form(mut self, form: BindingForm) -> Self {
        self.form = form;
        self
    }

    /// Shorthand for assignment form.
    pub fn assignment(self) -> Self {
        self.form(BindingForm::Assignment)
    }

    pub fn vacuous_empty_positional(mut self, on: bool) -> Self {
        self.vacuous_empty_positional = on;
        self
    }

    pub fn rest_limit(mut self, limit: Option<usize>) -> Self {
        self.rest_limit = limit;
        self
    }
}
