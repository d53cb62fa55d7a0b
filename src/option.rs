//! The declarative option tree.
//!
//! An [`Opt`] describes one expected key. Leaves carry a setter that coerces a
//! [`Value`] and writes it into a caller-owned config struct `C`; parents
//! carry child options and expect a nested mapping. A [`Schema`] is the root
//! level of the tree.

use std::collections::HashSet;
use std::fmt;

use crate::coerce::{CoerceError, FromValue};
use crate::error::{Error, WalkError};
use crate::value::Value;

type Setter<C> = Box<dyn Fn(&mut C, &Value) -> Result<(), CoerceError> + Send + Sync>;

enum Kind<C> {
    Leaf(Setter<C>),
    Parent(Vec<Opt<C>>),
}

/// One node of the option tree.
pub struct Opt<C> {
    id: String,
    full_id: String,
    kind: Kind<C>,
}

impl<C> Opt<C> {
    /// A leaf option stored through `field`.
    ///
    /// ```ignore
    /// Opt::leaf("port", |c: &mut Server| &mut c.port)
    /// ```
    pub fn leaf<T, F>(id: &str, field: F) -> Self
    where
        T: FromValue,
        F: Fn(&mut C) -> &mut T + Send + Sync + 'static,
    {
        Self::leaf_with(id, move |config, value| {
            *field(config) = T::from_value(value)?;
            Ok(())
        })
    }

    /// A leaf option with a custom setter.
    pub fn leaf_with<F>(id: &str, setter: F) -> Self
    where
        F: Fn(&mut C, &Value) -> Result<(), CoerceError> + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            full_id: id.to_string(),
            kind: Kind::Leaf(Box::new(setter)),
        }
    }

    /// A parent option whose value must be a nested mapping.
    pub fn parent(id: &str, children: Vec<Opt<C>>) -> Self {
        let mut opt = Self {
            id: id.to_string(),
            full_id: id.to_string(),
            kind: Kind::Parent(children),
        };
        opt.reroot(None);
        opt
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Dotted path from the root, e.g. `server.port`.
    pub fn full_id(&self) -> &str {
        &self.full_id
    }

    pub fn is_parent(&self) -> bool {
        matches!(self.kind, Kind::Parent(_))
    }

    /// Child options. Empty for leaves.
    pub fn sub_opts(&self) -> &[Opt<C>] {
        match &self.kind {
            Kind::Parent(children) => children,
            Kind::Leaf(_) => &[],
        }
    }

    /// Coerce `value` and write it into `config`.
    ///
    /// Parents have nothing to assign; calling this on one is a no-op.
    pub fn assign(&self, config: &mut C, value: &Value) -> Result<(), WalkError> {
        match &self.kind {
            Kind::Leaf(setter) => setter(config, value).map_err(|source| WalkError::Coerce {
                option: self.full_id.clone(),
                source,
            }),
            Kind::Parent(_) => Ok(()),
        }
    }

    /// Recompute `full_id` for this node and everything below it.
    fn reroot(&mut self, prefix: Option<&str>) {
        self.full_id = match prefix {
            Some(p) => format!("{p}.{}", self.id),
            None => self.id.clone(),
        };
        if let Kind::Parent(children) = &mut self.kind {
            for child in children {
                child.reroot(Some(&self.full_id));
            }
        }
    }
}

impl<C> fmt::Debug for Opt<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Leaf(_) => f.debug_struct("Leaf").field("id", &self.full_id).finish(),
            Kind::Parent(children) => f
                .debug_struct("Parent")
                .field("id", &self.full_id)
                .field("sub_opts", children)
                .finish(),
        }
    }
}

/// The root level of an option tree.
pub struct Schema<C> {
    opts: Vec<Opt<C>>,
}

impl<C> Schema<C> {
    /// Build a schema, rejecting duplicate sibling ids at any level.
    ///
    /// A parent with no children is accepted and simply matches nothing.
    pub fn new(opts: Vec<Opt<C>>) -> Result<Self, Error> {
        check_unique(&opts)?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &[Opt<C>] {
        &self.opts
    }
}

impl<C> fmt::Debug for Schema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.opts).finish()
    }
}

fn check_unique<C>(opts: &[Opt<C>]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for opt in opts {
        if !seen.insert(opt.id.as_str()) {
            return Err(Error::DuplicateOption {
                option: opt.full_id.clone(),
            });
        }
        check_unique(opt.sub_opts())?;
    }
    Ok(())
}
