//! `protobuf_enum` eponymous virtual table.
//!
//! Schema: `number INTEGER, name TEXT, enum TEXT HIDDEN`. The hidden `enum`
//! column is the table-function argument and must be constrained by
//! equality; `number` and `name` equalities are pushed down as lookups but
//! left for SQLite to re-check.

use std::marker::PhantomData;
use std::os::raw::c_int;
use std::sync::Arc;

use protosql_core::schema::EnumValue;
use protosql_core::{list_enum_values, DescriptorRegistry, EnumFilter};
use rusqlite::types::Value;
use rusqlite::vtab::{
    Context, IndexConstraintOp, IndexFlags, IndexInfo, VTab, VTabConnection, VTabCursor, Values,
};
use rusqlite::{ffi, Error, Result};

const COL_NUMBER: c_int = 0;
const COL_NAME: c_int = 1;
const COL_ENUM: c_int = 2;

/// Query plans, passed from `best_index` to `filter` as `idxNum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    FullScan = 0,
    ByNumber = 1,
    ByName = 2,
}

impl Plan {
    fn from_idx_num(idx_num: c_int) -> Self {
        match idx_num {
            1 => Plan::ByNumber,
            2 => Plan::ByName,
            _ => Plan::FullScan,
        }
    }

    fn estimated_cost(self) -> f64 {
        match self {
            Plan::ByNumber => 1.0,
            Plan::ByName => 5.0,
            Plan::FullScan => 100.0,
        }
    }

    /// Names are unique within an enum; numbers may repeat through aliases.
    fn is_unique(self) -> bool {
        self == Plan::ByName
    }
}

#[repr(C)]
pub struct EnumTable {
    /// Must be first
    base: ffi::sqlite3_vtab,
    registry: Arc<DescriptorRegistry>,
}

unsafe impl<'vtab> VTab<'vtab> for EnumTable {
    type Aux = Arc<DescriptorRegistry>;
    type Cursor = EnumCursor<'vtab>;

    fn connect(
        _db: &mut VTabConnection,
        aux: Option<&Self::Aux>,
        _args: &[&[u8]],
    ) -> Result<(String, Self)> {
        let registry = aux
            .cloned()
            .ok_or_else(|| Error::ModuleError("protobuf_enum: no descriptor registry".to_string()))?;

        Ok((
            "CREATE TABLE x(number INTEGER, name TEXT, enum TEXT HIDDEN)".to_string(),
            EnumTable {
                base: ffi::sqlite3_vtab::default(),
                registry,
            },
        ))
    }

    fn best_index(&self, info: &mut IndexInfo) -> Result<()> {
        let mut enum_idx = None;
        let mut name_idx = None;
        let mut number_idx = None;

        for (i, constraint) in info.constraints().enumerate() {
            if !constraint.is_usable()
                || !matches!(constraint.operator(), IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_EQ)
            {
                continue;
            }
            match constraint.column() {
                COL_ENUM => enum_idx = Some(i),
                COL_NAME => name_idx = Some(i),
                COL_NUMBER => number_idx = Some(i),
                _ => {}
            }
        }

        // Without the enum argument there is nothing to list
        let Some(enum_idx) = enum_idx else {
            return Err(Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_CONSTRAINT), None));
        };

        let mut usage = info.constraint_usage(enum_idx);
        usage.set_argv_index(1);
        usage.set_omit(true);

        let (plan, lookup) = match (name_idx, number_idx) {
            (Some(i), _) => (Plan::ByName, Some(i)),
            (None, Some(i)) => (Plan::ByNumber, Some(i)),
            (None, None) => (Plan::FullScan, None),
        };

        if let Some(i) = lookup {
            info.constraint_usage(i).set_argv_index(2);
        }
        info.set_idx_num(plan as c_int);
        info.set_estimated_cost(plan.estimated_cost());
        if plan.is_unique() {
            info.set_estimated_rows(1);
            info.set_idx_flags(IndexFlags::SQLITE_INDEX_SCAN_UNIQUE);
        }

        Ok(())
    }

    fn open(&'vtab mut self) -> Result<EnumCursor<'vtab>> {
        Ok(EnumCursor::new(Arc::clone(&self.registry)))
    }
}

#[repr(C)]
pub struct EnumCursor<'vtab> {
    /// Must be first
    base: ffi::sqlite3_vtab_cursor,
    registry: Arc<DescriptorRegistry>,
    enum_name: String,
    rows: Vec<EnumValue>,
    pos: usize,
    phantom: PhantomData<&'vtab EnumTable>,
}

impl EnumCursor<'_> {
    fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            base: ffi::sqlite3_vtab_cursor::default(),
            registry,
            enum_name: String::new(),
            rows: Vec::new(),
            pos: 0,
            phantom: PhantomData,
        }
    }
}

/// Turn the pushed-down lookup value into a filter.
///
/// Values of the wrong type fall back to a full scan; SQLite's own
/// comparison then decides. A number outside the `i32` range can match
/// nothing.
fn lookup_filter(plan: Plan, value: Option<Value>) -> Option<EnumFilter> {
    match (plan, value) {
        (Plan::ByNumber, Some(Value::Integer(n))) => i32::try_from(n).ok().map(EnumFilter::Number),
        (Plan::ByName, Some(Value::Text(name))) => Some(EnumFilter::Name(name)),
        _ => Some(EnumFilter::All),
    }
}

unsafe impl VTabCursor for EnumCursor<'_> {
    fn filter(&mut self, idx_num: c_int, _idx_str: Option<&str>, args: &Values<'_>) -> Result<()> {
        self.rows.clear();
        self.pos = 0;

        let enum_name = match args.get::<Value>(0)? {
            Value::Text(name) => name,
            Value::Null => return Ok(()),
            other => {
                return Err(Error::ModuleError(format!(
                    "protobuf_enum: enum type name must be TEXT, got {:?}",
                    other.data_type()
                )))
            }
        };

        let plan = Plan::from_idx_num(idx_num);
        let lookup = if plan == Plan::FullScan {
            None
        } else {
            Some(args.get::<Value>(1)?)
        };

        if let Some(filter) = lookup_filter(plan, lookup) {
            self.rows = list_enum_values(&self.registry, &enum_name, &filter)
                .map_err(|e| Error::ModuleError(e.to_string()))?;
        } else {
            // Still report unknown enum types
            self.registry
                .resolve_enum(&enum_name)
                .map_err(|e| Error::ModuleError(e.to_string()))?;
        }

        self.enum_name = enum_name;
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        self.pos += 1;
        Ok(())
    }

    fn eof(&self) -> bool {
        self.pos >= self.rows.len()
    }

    fn column(&self, ctx: &mut Context, i: c_int) -> Result<()> {
        let row = self
            .rows
            .get(self.pos)
            .ok_or_else(|| Error::ModuleError("protobuf_enum: cursor past end".to_string()))?;

        match i {
            COL_NUMBER => ctx.set_result(&row.number),
            COL_NAME => ctx.set_result(&row.name),
            COL_ENUM => ctx.set_result(&self.enum_name),
            _ => Err(Error::ModuleError(format!("protobuf_enum: no column {i}"))),
        }
    }

    fn rowid(&self) -> Result<i64> {
        Ok(self.pos as i64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_round_trip() {
        for plan in [Plan::FullScan, Plan::ByNumber, Plan::ByName] {
            assert_eq!(Plan::from_idx_num(plan as c_int), plan);
        }
    }

    #[test]
    fn test_plan_costs() {
        assert!(Plan::ByNumber.estimated_cost() < Plan::ByName.estimated_cost());
        assert!(Plan::ByName.estimated_cost() < Plan::FullScan.estimated_cost());
        assert!(Plan::ByName.is_unique());
        assert!(!Plan::ByNumber.is_unique());
        assert!(!Plan::FullScan.is_unique());
    }

    #[test]
    fn test_lookup_filter() {
        assert_eq!(
            lookup_filter(Plan::ByNumber, Some(Value::Integer(2))),
            Some(EnumFilter::Number(2))
        );
        assert_eq!(lookup_filter(Plan::ByNumber, Some(Value::Integer(i64::MAX))), None);
        assert_eq!(
            lookup_filter(Plan::ByNumber, Some(Value::Text("2".to_string()))),
            Some(EnumFilter::All)
        );
        assert_eq!(
            lookup_filter(Plan::ByName, Some(Value::Text("B".to_string()))),
            Some(EnumFilter::Name("B".to_string()))
        );
        assert_eq!(lookup_filter(Plan::FullScan, None), Some(EnumFilter::All));
    }
}
