//! Subprocess invocations.

use super::DispatchError;

/// Program plus arguments for one subprocess exchange.
///
/// No shell is involved: arguments are passed to the program as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    program: String,
    args: Vec<String>,
}

impl ProcessInvocation {
    /// Creates an invocation.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Splits a command line on whitespace.
    ///
    /// Quotes and escapes are not interpreted, so arguments cannot contain
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::EmptyCommandLine`] when the line holds no
    /// words.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchyard::dispatch::domain::ProcessInvocation;
    ///
    /// let invocation = ProcessInvocation::from_command_line("llama --json  -q")?;
    /// assert_eq!(invocation.program(), "llama");
    /// assert_eq!(invocation.args(), ["--json", "-q"]);
    /// # Ok::<(), switchyard::dispatch::domain::DispatchError>(())
    /// ```
    pub fn from_command_line(command_line: &str) -> Result<Self, DispatchError> {
        let mut words = command_line.split_whitespace().map(str::to_owned);
        let program = words.next().ok_or(DispatchError::EmptyCommandLine)?;
        Ok(Self::new(program, words))
    }

    /// Runs `script` with `interpreter`.
    #[must_use]
    pub fn for_script(interpreter: &str, script: &str) -> Self {
        Self::new(interpreter, [script.to_owned()])
    }

    /// Returns the program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the program arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
