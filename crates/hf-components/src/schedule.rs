//! Named schedules.

/// How a schedule's values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleKind {
    /// The same value all year.
    Constant(f64),
    /// Values live in an external table looked up by name at simulation time.
    Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub name: String,
    pub kind: ScheduleKind,
}

impl Schedule {
    pub fn constant(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            kind: ScheduleKind::Constant(value),
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScheduleKind::Table,
        }
    }

    /// Value of a constant schedule.
    pub fn constant_value(&self) -> Option<f64> {
        match self.kind {
            ScheduleKind::Constant(v) => Some(v),
            ScheduleKind::Table => None,
        }
    }
}
