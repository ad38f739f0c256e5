//! Transition tables and the machine registry.
//!
//! The registry is the composition root: it is built once from the typed
//! successor sets in [`crate::states`], is never mutated afterwards, and a
//! process-wide instance is shared behind a `OnceLock`. Because the tables
//! are read-only, the registry is safe to use from any number of threads
//! without coordination.

use crate::errors::{unknown_machine, Result};
use crate::machines::MachineName;
use crate::states::{
    DisputeStatus, EscrowStatus, MachineStatus, NegotiationStatus, OrderStatus, ProductStatus,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Adjacency map for one machine: every status of the enumeration appears
/// as a key, terminal statuses mapping to an empty successor set.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    machine: MachineName,
    edges: HashMap<&'static str, Vec<&'static str>>,
}

impl TransitionTable {
    /// Build the table for a status enumeration from its typed edges.
    fn from_states<S: MachineStatus>(machine: MachineName) -> Self {
        let edges = S::ALL
            .iter()
            .map(|status| {
                let successors: Vec<&'static str> =
                    status.successors().iter().map(S::as_str).collect();
                (status.as_str(), successors)
            })
            .collect();

        Self { machine, edges }
    }

    /// The machine this table governs.
    pub fn machine(&self) -> MachineName {
        self.machine
    }

    /// Whether `status` belongs to this machine's enumeration.
    pub fn contains(&self, status: &str) -> bool {
        self.edges.contains_key(status)
    }

    /// Legal successor statuses, or `None` for an unrecognized status.
    pub fn successors(&self, status: &str) -> Option<&[&'static str]> {
        self.edges.get(status).map(Vec::as_slice)
    }

    /// A terminal status admits no further transitions. An unrecognized
    /// status is reported terminal as well: unknown states cannot be
    /// transitioned out of.
    pub fn is_terminal(&self, status: &str) -> bool {
        self.successors(status).map_or(true, <[_]>::is_empty)
    }

    /// Every status in the enumeration.
    pub fn statuses(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.edges.keys().copied()
    }

    /// Number of statuses in the enumeration.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Immutable name-keyed lookup of all five transition tables.
#[derive(Debug, Clone)]
pub struct MachineRegistry {
    tables: HashMap<MachineName, TransitionTable>,
}

impl MachineRegistry {
    /// Construct the registry with every machine's table. Pure composition;
    /// all edge knowledge lives in the status enumerations.
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            MachineName::Order,
            TransitionTable::from_states::<OrderStatus>(MachineName::Order),
        );
        tables.insert(
            MachineName::Escrow,
            TransitionTable::from_states::<EscrowStatus>(MachineName::Escrow),
        );
        tables.insert(
            MachineName::Negotiation,
            TransitionTable::from_states::<NegotiationStatus>(MachineName::Negotiation),
        );
        tables.insert(
            MachineName::Dispute,
            TransitionTable::from_states::<DisputeStatus>(MachineName::Dispute),
        );
        tables.insert(
            MachineName::Product,
            TransitionTable::from_states::<ProductStatus>(MachineName::Product),
        );

        Self { tables }
    }

    /// Table for a known machine. Every `MachineName` is always registered.
    pub fn table(&self, machine: MachineName) -> &TransitionTable {
        &self.tables[&machine]
    }

    /// Resolve a raw machine name from the string boundary.
    pub fn resolve(&self, machine: &str) -> Result<&TransitionTable> {
        let name: MachineName = machine
            .parse()
            .map_err(|_| unknown_machine(machine))?;
        Ok(self.table(name))
    }

    /// Read-only export of all five tables keyed by machine name, ordered
    /// for stable serialization. Intended for introspection and UI
    /// (rendering "allowed next actions").
    pub fn view(&self) -> BTreeMap<&'static str, BTreeMap<&'static str, Vec<&'static str>>> {
        self.tables
            .iter()
            .map(|(machine, table)| {
                let edges = table
                    .edges
                    .iter()
                    .map(|(status, successors)| (*status, successors.clone()))
                    .collect();
                (machine.as_str(), edges)
            })
            .collect()
    }
}

impl Default for MachineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: OnceLock<MachineRegistry> = OnceLock::new();

/// Process-wide registry instance, built on first use and immutable after.
pub fn machine_registry() -> &'static MachineRegistry {
    REGISTRY.get_or_init(MachineRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_machine_is_registered() {
        let registry = MachineRegistry::new();
        for machine in MachineName::ALL {
            assert_eq!(registry.table(*machine).machine(), *machine);
        }
    }

    #[test]
    fn test_every_status_is_a_table_key() {
        let registry = MachineRegistry::new();
        assert_eq!(registry.table(MachineName::Order).len(), 11);
        assert_eq!(registry.table(MachineName::Escrow).len(), 4);
        assert_eq!(registry.table(MachineName::Negotiation).len(), 7);
        assert_eq!(registry.table(MachineName::Dispute).len(), 6);
        assert_eq!(registry.table(MachineName::Product).len(), 5);
    }

    #[test]
    fn test_terminal_statuses_map_to_empty_sets() {
        let registry = MachineRegistry::new();
        let order = registry.table(MachineName::Order);
        assert_eq!(order.successors("SETTLED"), Some(&[][..]));
        assert!(order.is_terminal("CANCELLED"));
        assert!(!order.is_terminal("CREATED"));
    }

    #[test]
    fn test_unknown_status_is_terminal() {
        let registry = MachineRegistry::new();
        assert!(registry.table(MachineName::Escrow).is_terminal("LIMBO"));
    }

    #[test]
    fn test_resolve_rejects_unknown_machine() {
        let registry = MachineRegistry::new();
        let err = registry.resolve("PAYMENT").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_MACHINE");
    }

    #[test]
    fn test_view_serializes_all_machines() {
        let registry = MachineRegistry::new();
        let view = registry.view();
        assert_eq!(view.len(), 5);
        assert!(view["ORDER"]["PAID"].contains(&"DISPUTED"));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["ESCROW"]["HOLD"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s == "FROZEN"));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let first = machine_registry() as *const MachineRegistry;
        let second = machine_registry() as *const MachineRegistry;
        assert_eq!(first, second);
    }
}
