//! Declarative parameter-type validation.
//!
//! A [`Validator`] carries an ordered list of (parameter name, expected type)
//! rules, statically declared at construction. Before a handler runs, the
//! bound-argument map is flattened (forwarded `kwargs`/`args` aggregates are
//! promoted) and each rule is checked in declaration order. The first failure
//! short-circuits with a `Bad Request` payload carrying exactly one reason,
//! and the handler is never invoked.
//!
//! Decimal rules coerce: a value that is not yet a decimal but converts
//! cleanly is written back into the map, so the handler observes the
//! canonical decimal form.
//!
//! # Example
//!
//! ```
//! use dbcompanion_core::ArgMap;
//! use dbcompanion_validate::Validator;
//!
//! let validator = Validator::new().int("user_id").string("name");
//!
//! let reply = validator.run(
//!     ArgMap::new().with("user_id", 7).with("name", "Alice"),
//!     |args| args.get("user_id").and_then(|v| v.as_int()),
//! );
//! assert_eq!(reply, Ok(Some(7)));
//! ```

use dbcompanion_core::{ArgMap, Reject, Reply, Value};

/// Expected runtime type of a validated parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Ordered container of values.
    List,
    /// Exactly an integer; numeric text and whole floats do not satisfy it.
    Int,
    /// Exactly text.
    Str,
    /// Exactly a float.
    Float,
    /// A decimal, or a value convertible to one (coerced in place).
    Decimal,
}

/// Policy for a rule whose parameter is absent from the bound-argument map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingParams {
    /// Absent parameters pass vacuously.
    #[default]
    Skip,
    /// Absent parameters are a bad request.
    Reject,
}

/// An ordered set of parameter-type rules applied before handler invocation.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: Vec<(String, Expected)>,
    missing: MissingParams,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule with an explicit expected type.
    pub fn rule(mut self, name: impl Into<String>, expected: Expected) -> Self {
        self.rules.push((name.into(), expected));
        self
    }

    /// Require the named parameter to be a list.
    pub fn list(self, name: impl Into<String>) -> Self {
        self.rule(name, Expected::List)
    }

    /// Require the named parameter to be an integer.
    pub fn int(self, name: impl Into<String>) -> Self {
        self.rule(name, Expected::Int)
    }

    /// Require the named parameter to be text.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.rule(name, Expected::Str)
    }

    /// Require the named parameter to be a float.
    pub fn float(self, name: impl Into<String>) -> Self {
        self.rule(name, Expected::Float)
    }

    /// Require the named parameter to be a decimal, coercing if convertible.
    pub fn decimal(self, name: impl Into<String>) -> Self {
        self.rule(name, Expected::Decimal)
    }

    /// Set the policy for rules whose parameter is absent.
    pub fn missing_params(mut self, policy: MissingParams) -> Self {
        self.missing = policy;
        self
    }

    /// The declared rules, in evaluation order.
    pub fn rules(&self) -> &[(String, Expected)] {
        &self.rules
    }

    /// Flatten aggregates and evaluate every rule against the map.
    ///
    /// Stops at the first failing rule. Decimal coercions are written back
    /// into `args` so later consumers see the converted value.
    pub fn check(&self, args: &mut ArgMap) -> Result<(), Reject> {
        args.flatten_aggregates();

        for (name, expected) in &self.rules {
            let Some(value) = args.get(name).cloned() else {
                match self.missing {
                    MissingParams::Skip => continue,
                    MissingParams::Reject => {
                        return Err(reject(format!("{name} is required")));
                    }
                }
            };

            match expected {
                Expected::List => {
                    if !value.is_list() {
                        return Err(reject(format!("{name} must be a list")));
                    }
                }
                Expected::Int => {
                    if value.as_int().is_none() {
                        return Err(reject(format!("{name} must be an integer")));
                    }
                }
                Expected::Str => {
                    if !matches!(value, Value::Text(_)) {
                        return Err(reject(format!("{name} must be a string")));
                    }
                }
                Expected::Float => {
                    if value.as_float().is_none() {
                        return Err(reject(format!("{name} must be float")));
                    }
                }
                Expected::Decimal => {
                    if !matches!(value, Value::Decimal(_)) {
                        match value.to_decimal() {
                            Ok(converted) => args.set(name.clone(), converted),
                            Err(_) => {
                                return Err(reject(format!("'{name}' must be a valid decimal.")));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Check the map, then invoke the handler with the flattened (and
    /// possibly coerced) arguments.
    pub fn run<T>(&self, mut args: ArgMap, op: impl FnOnce(&ArgMap) -> T) -> Reply<T> {
        self.check(&mut args)?;
        Ok(op(&args))
    }

    /// Like [`Validator::run`] for handlers that already return a [`Reply`],
    /// so a validated handler can sit inside a session guard without nesting
    /// payloads.
    pub fn run_reply<T>(&self, mut args: ArgMap, op: impl FnOnce(&ArgMap) -> Reply<T>) -> Reply<T> {
        self.check(&mut args)?;
        op(&args)
    }
}

fn reject(reason: String) -> Reject {
    tracing::error!(target: "relational_store", reason = %reason, "argument validation rejected");
    Reject::bad_request(reason)
}
