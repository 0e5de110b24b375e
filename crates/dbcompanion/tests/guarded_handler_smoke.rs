//! End-to-end smoke test: a validated handler running inside a session guard
//! against an in-memory store, plus the time-series guard payloads.

use std::cell::RefCell;
use std::rc::Rc;

use dbcompanion::prelude::*;

#[derive(Debug, Default)]
struct Store {
    committed: Vec<String>,
    staged: Vec<String>,
    closes: usize,
}

struct MemorySession {
    store: Rc<RefCell<Store>>,
}

impl MemorySession {
    fn insert(&mut self, name: &str) -> Result<()> {
        self.store.borrow_mut().staged.push(name.to_string());
        Ok(())
    }
}

impl Session for MemorySession {
    fn commit(&mut self) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let staged = std::mem::take(&mut store.staged);
        store.committed.extend(staged);
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.store.borrow_mut().staged.clear();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.store.borrow_mut().closes += 1;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryFactory {
    store: Rc<RefCell<Store>>,
}

impl SessionFactory for MemoryFactory {
    type Session = MemorySession;

    fn create(&self) -> Result<MemorySession> {
        Ok(MemorySession {
            store: Rc::clone(&self.store),
        })
    }
}

fn harness() -> (SessionGuard<MemoryFactory>, Rc<RefCell<Store>>) {
    let factory = MemoryFactory::default();
    let store = Rc::clone(&factory.store);
    (SessionGuard::new(factory), store)
}

/// A service handler: validate arguments, then insert inside a write scope.
fn add_user(guard: &SessionGuard<MemoryFactory>, args: ArgMap) -> Reply<String> {
    let validator = Validator::new().int("user_id").string("name");
    validator.run_reply(args, |args| {
        let name = args
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        guard.write("add_user", None, move |db| {
            db.insert(&name)?;
            Ok(name)
        })
    })
}

#[test]
fn test_valid_arguments_commit_and_close() {
    let (guard, store) = harness();

    let args = ArgMap::new().with("user_id", 7).with("name", "alice");
    let reply = add_user(&guard, args);

    assert_eq!(reply, Ok("alice".to_string()));
    let s = store.borrow();
    assert_eq!(s.committed, ["alice"]);
    assert!(s.staged.is_empty());
    assert_eq!(s.closes, 1);
}

#[test]
fn test_invalid_user_id_never_touches_store() {
    let (guard, store) = harness();

    let args = ArgMap::new().with("user_id", "7").with("name", "alice");
    let reply = add_user(&guard, args);

    let json = serde_json::to_value(reply.unwrap_err()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "message": "Bad Request",
            "errors": ["user_id must be an integer"]
        })
    );
    let s = store.borrow();
    assert!(s.committed.is_empty());
    assert_eq!(s.closes, 0);
}

#[test]
fn test_handler_failure_rolls_back_with_generic_payload() {
    let (guard, store) = harness();

    let reply: Reply<()> = guard.write("add_user", None, |db| {
        db.insert("ghost")?;
        Err(Error::Query("unique constraint violated".to_string()))
    });

    let json = serde_json::to_value(reply.unwrap_err()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "message": "An unexpected error occurred. Please try again later."
        })
    );
    let s = store.borrow();
    assert!(s.committed.is_empty());
    assert!(s.staged.is_empty());
    assert_eq!(s.closes, 1);
}

#[test]
fn test_read_scope_closes_without_commit() {
    let (guard, store) = harness();

    let reply = guard.read("list_users", None, |db| {
        Ok(db.store.borrow().committed.len())
    });

    assert_eq!(reply, Ok(0));
    assert_eq!(store.borrow().closes, 1);
}

#[test]
fn test_decimal_argument_forwarded_through_aggregate() {
    let validator = Validator::new().decimal("price");
    let args = ArgMap::new().with(
        "kwargs",
        Value::Map(std::collections::BTreeMap::from([(
            "price".to_string(),
            Value::Text("12.50".to_string()),
        )])),
    );

    let reply = validator.run(args, |args| args.get("price").cloned());

    assert_eq!(reply, Ok(Some(Value::Decimal("12.50".to_string()))));
}

#[test]
fn test_timeseries_guard_payload() {
    let reply: Reply<()> = timeseries::guard("query_range", || Err("bucket not found"));

    let json = serde_json::to_value(reply.unwrap_err()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "message": "Error in query_range: bucket not found",
            "status": "error"
        })
    );
}
