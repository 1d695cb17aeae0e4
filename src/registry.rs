//! Process-global, mutex-guarded cache deduplicating [`FieldTable`]s and
//! [`Code`]s by parameter tuple.
//!
//! The C original (`librs`) keeps two singly-linked lists under one mutex,
//! with a hand-rolled `users` refcount on each node; `rs_init`/`rs_free`
//! bump and drop that count explicitly. In Rust, `Arc`/`Weak` already *is*
//! a refcounted, lazily-freed cache entry, so the registry stores `Weak`
//! pointers and hands callers back `Arc`s: `init` upgrades a live entry or
//! builds a new one, and the table is pruned lazily — either the next time
//! a dead key is looked up, or immediately when the owning [`Drop`] impl
//! removes it.
//!
//! A hash map keyed by the parameter tuple replaces the linked list, per the
//! original design notes' own suggestion that the list was only ever chosen
//! because expected populations are tiny.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use once_cell::sync::Lazy;

use crate::code::Code;
use crate::error::CodecError;
use crate::field::FieldTable;

type FieldKey = (u32, u32);
type CodeKey = (u32, u32, u32, u32, u32);

static FIELD_TABLES: Lazy<Mutex<HashMap<FieldKey, Weak<FieldTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static CODES: Lazy<Mutex<HashMap<CodeKey, Weak<Code>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Return the shared `FieldTable` for `(m, gfpoly)`, constructing and
/// caching it on first use.
pub(crate) fn field_table(m: u32, gfpoly: u32) -> Result<Arc<FieldTable>, CodecError> {
    let key: FieldKey = (m, gfpoly);
    let mut tables = FIELD_TABLES.lock().unwrap();

    if let Some(weak) = tables.get(&key) {
        if let Some(table) = weak.upgrade() {
            return Ok(table);
        }
    }

    let table = Arc::new(FieldTable::new(m, gfpoly)?);
    tables.insert(key, Arc::downgrade(&table));
    Ok(table)
}

pub(crate) fn evict_field_table(m: u32, gfpoly: u32) {
    let key: FieldKey = (m, gfpoly);
    let mut tables = FIELD_TABLES.lock().unwrap();
    if let Some(weak) = tables.get(&key) {
        if weak.upgrade().is_none() {
            tables.remove(&key);
        }
    }
}

/// Return the shared `Code` for the given parameter tuple, calling `build`
/// to construct it on first use.
pub(crate) fn code(
    m: u32,
    gfpoly: u32,
    fcr: u32,
    prim: u32,
    nroots: u32,
    build: impl FnOnce() -> Result<Code, CodecError>,
) -> Result<Arc<Code>, CodecError> {
    let key: CodeKey = (m, gfpoly, fcr, prim, nroots);
    let mut codes = CODES.lock().unwrap();

    if let Some(weak) = codes.get(&key) {
        if let Some(code) = weak.upgrade() {
            return Ok(code);
        }
    }

    let code = Arc::new(build()?);
    codes.insert(key, Arc::downgrade(&code));
    Ok(code)
}

pub(crate) fn evict_code(key: CodeKey) {
    let mut codes = CODES.lock().unwrap();
    if let Some(weak) = codes.get(&key) {
        if weak.upgrade().is_none() {
            codes.remove(&key);
        }
    }
}
