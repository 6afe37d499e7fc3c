//! Cell transforms.

use std::fmt;
use std::sync::Arc;

use caredesk_model::Record;
use serde_json::Value;

use crate::actions::ActionSet;
use crate::node::Node;

static NO_ACTIONS: ActionSet = ActionSet::empty();

/// What a transform can see besides the row itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub actions: &'a ActionSet,
}

impl<'a> RenderContext<'a> {
    pub fn new(actions: &'a ActionSet) -> Self {
        Self { actions }
    }
}

impl Default for RenderContext<'_> {
    fn default() -> Self {
        Self {
            actions: &NO_ACTIONS,
        }
    }
}

type RenderFn = dyn Fn(Option<&Value>, &Record, usize, &RenderContext<'_>) -> Node + Send + Sync;

/// How two renderers are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identity {
    /// The name fully determines the behavior.
    Named,
    /// Only clones of the same closure are equal.
    Instance,
}

/// A named transform `(cellValue, row, rowIndex) -> node`.
///
/// Renderers made with [`CellRenderer::named`] compare by name, so tables
/// rebuilt from the same configuration compare equal even though their
/// closures differ. Renderers made with [`CellRenderer::new`] are equal only
/// to clones of themselves.
#[derive(Clone)]
pub struct CellRenderer {
    name: Arc<str>,
    func: Arc<RenderFn>,
    identity: Identity,
    volatile: bool,
}

impl CellRenderer {
    pub fn new<F>(name: impl AsRef<str>, func: F) -> Self
    where
        F: Fn(Option<&Value>, &Record, usize, &RenderContext<'_>) -> Node + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.as_ref()),
            func: Arc::new(func),
            identity: Identity::Instance,
            volatile: false,
        }
    }

    /// A renderer whose output depends only on its name and inputs.
    pub fn named<F>(name: impl AsRef<str>, func: F) -> Self
    where
        F: Fn(Option<&Value>, &Record, usize, &RenderContext<'_>) -> Node + Send + Sync + 'static,
    {
        Self {
            identity: Identity::Named,
            ..Self::new(name, func)
        }
    }

    /// Mark the output as depending on something outside its inputs, such
    /// as the current date. Tables holding a volatile renderer are never
    /// replayed from a cache.
    #[must_use]
    pub fn volatile(mut self) -> Self {
        self.volatile = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_volatile(&self) -> bool {
        self.volatile
    }

    pub fn apply(
        &self,
        value: Option<&Value>,
        record: &Record,
        row_index: usize,
        ctx: &RenderContext<'_>,
    ) -> Node {
        (self.func)(value, record, row_index, ctx)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellRenderer").field(&self.name).finish()
    }
}

impl PartialEq for CellRenderer {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name || self.volatile != other.volatile {
            return false;
        }
        match (self.identity, other.identity) {
            (Identity::Named, Identity::Named) => true,
            _ => Arc::ptr_eq(&self.func, &other.func),
        }
    }
}

impl Eq for CellRenderer {}
