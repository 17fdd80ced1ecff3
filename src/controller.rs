//! Controller registry
//!
//! Groups named actions and the behaviors they share. Shared behaviors are
//! captured when an action is defined and run before its handler, in the
//! order they were shared.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Behavior run against the request context
pub type Behavior<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// A handler composed with the behaviors shared before it was defined
pub struct ActionHandler<C> {
    behaviors: Vec<Behavior<C>>,
    handler: Behavior<C>,
}

impl<C> ActionHandler<C> {
    pub fn call(&self, context: &mut C) {
        for behavior in &self.behaviors {
            behavior(context);
        }
        (self.handler)(context);
    }
}

impl<C> Clone for ActionHandler<C> {
    fn clone(&self) -> Self {
        Self {
            behaviors: self.behaviors.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Named actions over a context type `C`
pub struct Controller<C> {
    shares: Vec<Behavior<C>>,
    actions: BTreeMap<String, ActionHandler<C>>,
}

impl<C> Default for Controller<C> {
    fn default() -> Self {
        Self {
            shares: Vec::new(),
            actions: BTreeMap::new(),
        }
    }
}

impl<C> Controller<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a behavior with every action defined from now on
    pub fn share(&mut self, behavior: impl Fn(&mut C) + Send + Sync + 'static) -> &mut Self {
        self.shares.push(Arc::new(behavior));
        self
    }

    /// Define an action
    ///
    /// Names follow type naming (`Index`, `ShowAll`); anything else is
    /// rejected with [`Error::InvalidActionName`].
    pub fn action(
        &mut self,
        name: &str,
        handler: impl Fn(&mut C) + Send + Sync + 'static,
    ) -> Result<&ActionHandler<C>> {
        if !is_action_name(name) {
            return Err(Error::InvalidActionName(name.to_string()));
        }

        let action = ActionHandler {
            behaviors: self.shares.clone(),
            handler: Arc::new(handler),
        };
        tracing::debug!(name, shared = action.behaviors.len(), "defined action");
        self.actions.insert(name.to_string(), action);
        Ok(&self.actions[name])
    }

    pub fn get(&self, name: &str) -> Option<&ActionHandler<C>> {
        self.actions.get(name)
    }

    /// Run the named action; returns false when it does not exist
    pub fn call(&self, name: &str, context: &mut C) -> bool {
        match self.actions.get(name) {
            Some(action) => {
                action.call(context);
                true
            }
            None => false,
        }
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

fn is_action_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
