//! Whitelist-bounded closure over the class graph.
//!
//! The resolver drains a [`WorkQueue`] one class at a time: a popped name is
//! pruned if the whitelist rejects it, otherwise its entry is built and every
//! class it newly references is queued. Fetches never overlap.

pub mod queue;

pub use queue::{Origin, WorkQueue};

use crate::bridge::ReflectionBridge;
use crate::builder::ClassEntryBuilder;
use crate::error::{JavaMapError, Result};
use crate::model::{ClassEntry, ClassMap, ClassName};
use crate::types::{JavaType, TsType};
use crate::whitelist::Whitelist;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Idle,
    Draining,
    Drained,
}

pub struct ClosureResolver<'w> {
    whitelist: &'w Whitelist,
    queue: WorkQueue,
    state: ResolverState,
    seeds: Vec<ClassName>,
    classes: IndexMap<ClassName, ClassEntry>,
    missing: Vec<ClassName>,
}

impl<'w> ClosureResolver<'w> {
    pub fn new(whitelist: &'w Whitelist) -> Self {
        Self {
            whitelist,
            queue: WorkQueue::new(),
            state: ResolverState::Idle,
            seeds: Vec::new(),
            classes: IndexMap::new(),
            missing: Vec::new(),
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    /// Requests `name` explicitly. A seed that does not exist fails the run,
    /// even when an earlier drain already skipped it as a missing reference.
    pub fn add_seed(&mut self, name: impl Into<ClassName>) {
        let name = name.into();
        if !self.seeds.contains(&name) {
            self.seeds.push(name.clone());
        }
        if self.missing.contains(&name) {
            self.state = ResolverState::Idle;
        }
        self.add_todo(name, Origin::Seed);
    }

    /// Queues `name`; a no-op once it has been processed.
    pub fn add_todo(&mut self, name: impl Into<ClassName>, origin: Origin) {
        if self.queue.add_todo(name.into(), origin) && self.state == ResolverState::Drained {
            self.state = ResolverState::Idle;
        }
    }

    /// Seeds every class the bridge lists in each whitelisted package.
    pub fn seed_packages<B: ReflectionBridge + ?Sized>(&mut self, bridge: &mut B) -> Result<usize> {
        let mut listed = Vec::new();
        for package in self.whitelist.packages() {
            listed.extend(bridge.list_package(package)?);
        }
        let count = listed.len();
        for name in listed {
            self.add_seed(name);
        }
        debug!(count, "seeded classes from whitelisted packages");
        Ok(count)
    }

    /// Resolves pending names until none are left.
    ///
    /// Any failure other than a missing referenced class aborts the run and
    /// discards everything resolved so far.
    pub fn drain<B: ReflectionBridge + ?Sized>(&mut self, bridge: &mut B) -> Result<()> {
        self.state = ResolverState::Draining;
        if let Some(seed) = self.seeds.iter().find(|s| self.missing.contains(s)).cloned() {
            self.abort();
            return Err(JavaMapError::resolving(&seed, JavaMapError::ClassNotFound(seed.clone())));
        }
        let builder = ClassEntryBuilder::new(self.whitelist);

        while let Some((name, origin)) = self.queue.pop() {
            if self.queue.is_done(name.as_str()) {
                continue;
            }
            if !self.whitelist.in_white_list(name.as_str()) {
                debug!(class = %name, "pruned: not whitelisted");
                continue;
            }

            match builder.build(&name, bridge, self.queue.done()) {
                Ok((entry, referenced)) => {
                    self.classes.insert(name.clone(), entry);
                    self.queue.mark_done(name);
                    for next in referenced {
                        self.queue.add_todo(next, Origin::Reference);
                    }
                }
                Err(JavaMapError::ClassNotFound(_)) if origin == Origin::Reference => {
                    warn!(class = %name, "referenced class not found, skipping");
                    self.missing.push(name.clone());
                    self.queue.mark_done(name);
                }
                Err(err) => {
                    self.abort();
                    return Err(JavaMapError::resolving(&name, err));
                }
            }
        }

        self.erase_missing();
        self.assign_aliases();
        self.state = ResolverState::Drained;
        info!(
            classes = self.classes.len(),
            missing = self.missing.len(),
            "class closure resolved"
        );
        Ok(())
    }

    /// The finished map, or `None` while work is pending.
    pub fn into_class_map(self) -> Option<ClassMap> {
        (self.state == ResolverState::Drained).then(|| ClassMap {
            seeds: self.seeds,
            classes: self.classes,
            missing: self.missing,
        })
    }

    /// Drains and hands back the map in one step.
    pub fn resolve<B: ReflectionBridge + ?Sized>(mut self, bridge: &mut B) -> Result<ClassMap> {
        self.drain(bridge)?;
        Ok(ClassMap {
            seeds: self.seeds,
            classes: self.classes,
            missing: self.missing,
        })
    }

    fn abort(&mut self) {
        self.queue.clear();
        self.classes.clear();
        self.missing.clear();
        self.state = ResolverState::Idle;
    }

    /// Missing classes will never be generated: member types naming them fall
    /// back to `object_t` and they are dropped from the mapped supertypes.
    fn erase_missing(&mut self) {
        if self.missing.is_empty() {
            return;
        }
        let missing: HashSet<&ClassName> = self.missing.iter().collect();
        let keep = |name: &ClassName| !missing.contains(name);
        for entry in self.classes.values_mut() {
            entry
                .ts_interfaces
                .retain(|ty| !matches!(ty, TsType::Class(class) if missing.contains(&class.name)));
            for ty in entry.ts_types_mut() {
                ty.retain_classes(&keep);
            }
        }
        debug!(count = missing.len(), "erased references to missing classes");
    }

    /// Classes sharing a short name are spelled by their full path instead.
    fn assign_aliases(&mut self) {
        let mut by_short: HashMap<&str, usize> = HashMap::new();
        for entry in self.classes.values().filter(|e| !e.is_primitive) {
            *by_short.entry(entry.short_name.as_str()).or_default() += 1;
        }
        let aliased: HashMap<ClassName, String> = self
            .classes
            .values()
            .filter(|e| {
                !e.is_primitive
                    && by_short
                        .get(e.short_name.as_str())
                        .is_some_and(|&count| count > 1)
            })
            .map(|e| (e.full_name.clone(), e.full_name.alias()))
            .collect();
        if aliased.is_empty() {
            return;
        }

        for entry in self.classes.values_mut() {
            if let Some(alias) = aliased.get(&entry.full_name) {
                entry.use_alias = true;
                entry.alias = alias.clone();
                entry.ts_type = alias.clone();
            }
            for ty in entry.ts_types_mut() {
                ty.for_each_class_mut(&mut |class| {
                    if let Some(alias) = aliased.get(&class.name) {
                        class.spelling = alias.clone();
                    }
                });
            }
        }
        debug!(count = aliased.len(), "aliased colliding short names");
    }
}

/// Resolves the closure of `seeds` in one call.
pub fn resolve_class_map<B: ReflectionBridge + ?Sized>(
    whitelist: &Whitelist,
    seeds: &[ClassName],
    bridge: &mut B,
) -> Result<ClassMap> {
    let mut resolver = ClosureResolver::new(whitelist);
    for seed in seeds {
        resolver.add_seed(seed.clone());
    }
    resolver.resolve(bridge)
}

/// Names referenced from resolved entries that are neither keys nor pruned.
pub fn unresolved_references(map: &ClassMap, whitelist: &Whitelist) -> Result<HashSet<ClassName>> {
    let mut dangling = HashSet::new();
    for entry in map.classes.values() {
        let supers = entry.superclass.iter().chain(&entry.interfaces).cloned();
        let mut names: Vec<ClassName> = supers.collect();
        let raw_types = entry
            .fields
            .iter()
            .map(|f| &f.field_type)
            .chain(
                entry
                    .constructors
                    .iter()
                    .chain(&entry.methods)
                    .flat_map(|m| m.param_types.iter().chain(std::iter::once(&m.returns))),
            );
        for raw in raw_types {
            if let Some(class) = JavaType::parse(raw)?.referenced_class() {
                names.push(class.clone());
            }
        }
        for name in names {
            if whitelist.in_white_list(name.as_str())
                && !map.contains(name.as_str())
                && !map.missing.contains(&name)
            {
                dangling.insert(name);
            }
        }
    }
    Ok(dangling)
}
