//! Session configuration
//!
//! The active model is explicit session state, passed into the orchestrator
//! and changed only through [`SessionConfig::set_model`], never a
//! process-wide global.

use devmate_domain::Model;

/// Configuration for one interactive session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    model: Model,
}

impl SessionConfig {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Switch the active model. Affects subsequent turns only; the
    /// conversation history already accumulated is untouched.
    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
        }
    }
}
