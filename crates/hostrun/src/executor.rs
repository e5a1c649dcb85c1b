//! # Command Executors
//!
//! An executor owns one record layout. It decodes the fixed fields of its
//! record and, when permitted, applies the effect to host objects.
//!
//! ## Invariants
//! - `execute` returns `start + record_len()` whether or not the effect ran.
//! - `print` has no side effects and is only used for tracing and tests.

use std::fmt;
use std::sync::Arc;

use xfer::NavigationPolicy;
use xfer::StringTable;

use crate::backchannel::Backchannel;
use crate::config::ExecutorConfig;
use crate::host::HostWindow;

/// Decoder and applier for one mutation tag.
pub trait CommandExecutor: Send + Sync {
    /// Words per record, tag included. A constant of the tag.
    fn record_len(&self) -> usize;

    /// Decodes the record at `start` and applies it if `allowed`.
    ///
    /// Returns the offset of the next record.
    fn execute(
        &self,
        words: &[u16],
        start: usize,
        strings: &StringTable,
        allowed: bool,
    ) -> xfer::Result<usize>;

    /// Decodes the record at `start` into a diagnostic projection.
    fn print(&self, words: &[u16], start: usize, strings: &StringTable) -> xfer::Result<Descriptor>;
}

/// What an executor factory gets to capture at registration time.
#[derive(Clone)]
pub struct ExecutorContext {
    pub window: Arc<dyn HostWindow>,
    pub backchannel: Backchannel,
    pub config: Arc<ExecutorConfig>,
}

/// Builds an executor from the host's context.
pub type ExecutorFactory =
    Box<dyn FnOnce(&ExecutorContext) -> Box<dyn CommandExecutor> + Send>;

/// A decoded field inside a `Descriptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Word(u16),
    Flag(bool),
    Policy(NavigationPolicy),
    /// A string table reference; `None` when the index was not received.
    Str(Option<String>),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "{}", w),
            Self::Flag(b) => write!(f, "{}", b),
            Self::Policy(p) => write!(f, "{:?}", p),
            Self::Str(Some(s)) => write!(f, "{:?}", s),
            Self::Str(None) => write!(f, "<absent>"),
        }
    }
}

/// Side-effect-free projection of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub kind: &'static str,
    pub fields: Vec<(&'static str, Field)>,
    pub allowed: bool,
}

impl Descriptor {
    pub fn new(kind: &'static str, allowed: bool) -> Self {
        Self { kind, fields: Vec::new(), allowed }
    }

    pub fn field(mut self, name: &'static str, value: Field) -> Self {
        self.fields.push((name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.kind)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}: {}", sep, name, value)?;
        }
        let gate = if self.allowed { "allowed" } else { "denied" };
        write!(f, " }} ({})", gate)
    }
}
