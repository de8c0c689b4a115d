use vellum_core::{err, stmt::Statement, Error};

/// A statement failure to inject into the memory driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    table: String,
    kind: Kind,

    /// Matching statements to let through before failing
    skip: usize,

    /// Failures left; `None` fails forever
    remaining: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Select,
    Insert,
    Update,
    Delete,
}

impl Fault {
    pub fn select(table: impl Into<String>) -> Fault {
        Fault::new(table, Kind::Select)
    }

    pub fn insert(table: impl Into<String>) -> Fault {
        Fault::new(table, Kind::Insert)
    }

    pub fn update(table: impl Into<String>) -> Fault {
        Fault::new(table, Kind::Update)
    }

    pub fn delete(table: impl Into<String>) -> Fault {
        Fault::new(table, Kind::Delete)
    }

    fn new(table: impl Into<String>, kind: Kind) -> Fault {
        Fault {
            table: table.into(),
            kind,
            skip: 0,
            remaining: None,
        }
    }

    /// Lets the first `n` matching statements succeed.
    pub fn after(mut self, n: usize) -> Fault {
        self.skip = n;
        self
    }

    /// Fails only once.
    pub fn once(mut self) -> Fault {
        self.remaining = Some(1);
        self
    }

    fn matches(&self, stmt: &Statement) -> bool {
        Kind::of(stmt) == Some(self.kind) && self.table == stmt.table()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Faults {
    faults: Vec<Fault>,
}

impl Faults {
    pub(crate) fn push(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    pub(crate) fn clear(&mut self) {
        self.faults.clear();
    }

    /// Returns the injected error if `stmt` trips a fault.
    pub(crate) fn check(&mut self, stmt: &Statement) -> Option<Error> {
        let index = self.faults.iter().position(|fault| fault.matches(stmt))?;
        let fault = &mut self.faults[index];
        let fault_kind = fault.kind;

        if fault.skip > 0 {
            fault.skip -= 1;
            return None;
        }

        if let Some(remaining) = &mut fault.remaining {
            *remaining -= 1;
            if *remaining == 0 {
                self.faults.remove(index);
            }
        }

        Some(err!(
            "injected fault; table={}; kind={:?}",
            stmt.table(),
            fault_kind
        ))
    }
}

impl Kind {
    fn of(stmt: &Statement) -> Option<Kind> {
        match stmt {
            Statement::Select(_) => Some(Kind::Select),
            Statement::Insert(_) => Some(Kind::Insert),
            Statement::Update(_) => Some(Kind::Update),
            Statement::Delete(_) => Some(Kind::Delete),
            _ => None,
        }
    }
}
