//! Command handler registry

use std::collections::HashMap;

/// Result of running a command handler
pub type HandlerResult = anyhow::Result<()>;

type HandlerFn = Box<dyn FnMut() -> HandlerResult>;

/// Anything that can run commands by name
///
/// The dispatcher only needs to know whether a name is registered and how to
/// run it.
pub trait HandlerRegistry {
    fn has(&self, name: &str) -> bool;

    /// Run the named command. Only called for names where `has` returned true.
    ///
    /// Failures must come back as `Err`; the dispatcher does not catch panics.
    fn invoke(&mut self, name: &str) -> HandlerResult;
}

/// Name → closure registry
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, HandlerFn>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named command, replacing any existing handler for that name
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut() -> HandlerResult + 'static,
    {
        if self
            .handlers
            .insert(name.to_string(), Box::new(handler))
            .is_some()
        {
            tracing::debug!("Replaced handler for command {}", name);
        }
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Returns all registered command names in unspecified order
    pub fn command_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerRegistry for CommandRegistry {
    fn has(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    fn invoke(&mut self, name: &str) -> HandlerResult {
        match self.handlers.get_mut(name) {
            Some(handler) => handler(),
            None => anyhow::bail!("no handler registered for {}", name),
        }
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.command_names())
            .finish()
    }
}
