//! Module and Global Storage
//!
//! The whole-program container: functions (built-in and user), the string
//! pool, global variable slots in declaration order, and the block record
//! of every `for` statement.
//!
//! Built-ins occupy the first ids, one per `Builtin` in catalogue order,
//! and are not in the name table. Names resolve to user functions only,
//! so a user `printInt` or `malloc` never aliases the runtime entry.

use log::debug;
use mxc_common::{index_of, next_id, FunctionId, LabelId, LoopId, StaticId, StringId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use crate::ir::{Builtin, Function, StaticData, StaticString};

/// The four blocks of a lowered `for` statement. Absent parts collapse:
/// a missing condition makes `cond == body`, a missing update makes
/// `incr == cond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopRecord {
    pub function: FunctionId,
    pub cond: LabelId,
    pub incr: LabelId,
    pub body: LabelId,
    pub after: LabelId,
    /// Set by later passes once they have rewritten the loop
    pub processed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
    /// User functions and methods by symbol
    function_ids: BTreeMap<String, FunctionId>,
    pub static_strings: Vec<StaticString>,
    string_ids: BTreeMap<String, StringId>,
    /// Global slots in declaration order
    pub static_data: Vec<StaticData>,
    static_ids: BTreeMap<String, StaticId>,
    pub loop_records: BTreeMap<LoopId, LoopRecord>,
    /// Some non-constant division, modulo or shift was emitted
    pub has_div_shift: bool,
}

impl Module {
    pub fn new(name: String) -> Self {
        let mut module = Self {
            name,
            functions: Vec::new(),
            function_ids: BTreeMap::new(),
            static_strings: Vec::new(),
            string_ids: BTreeMap::new(),
            static_data: Vec::new(),
            static_ids: BTreeMap::new(),
            loop_records: BTreeMap::new(),
            has_div_shift: false,
        };
        for builtin in Builtin::ALL {
            let id = next_id(module.functions.len());
            module.functions.push(Function::builtin(id, builtin.name(), builtin.symbol(), builtin.has_return_value()));
        }
        module
    }

    /// Registers a user function, returning the existing id if a user
    /// function of that name is already declared
    pub fn declare_function(&mut self, name: &str, has_return_value: bool) -> FunctionId {
        if let Some(&id) = self.function_ids.get(name) {
            return id;
        }
        let id = next_id(self.functions.len());
        self.functions.push(Function::new(id, name.to_string(), has_return_value));
        self.function_ids.insert(name.to_string(), id);
        id
    }

    /// User function by symbol; built-ins are reached through `builtin`
    pub fn function_id(&self, name: &str) -> Option<FunctionId> {
        self.function_ids.get(name).copied()
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.function_id(name).map(|id| self.function(id))
    }

    /// # Panics
    /// If `id` was not handed out by this module.
    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[index_of(id)]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[index_of(id)]
    }

    /// Moves a function out for lowering, leaving an empty stand-in with
    /// the same id and signature until `put_function`.
    pub fn take_function(&mut self, id: FunctionId) -> Function {
        let slot = &mut self.functions[index_of(id)];
        let placeholder = Function::new(id, slot.name.clone(), slot.has_return_value);
        std::mem::replace(slot, placeholder)
    }

    pub fn put_function(&mut self, function: Function) {
        let id = function.id;
        self.functions[index_of(id)] = function;
    }

    pub fn builtin(&self, builtin: Builtin) -> FunctionId {
        builtin as FunctionId
    }

    /// Built-in by catalogue name (`print`, `string.concat`, ...)
    pub fn builtin_named(&self, name: &str) -> Option<FunctionId> {
        Builtin::ALL
            .iter()
            .find(|builtin| builtin.name() == name)
            .map(|&builtin| self.builtin(builtin))
    }

    /// Built-in name to linkage symbol
    pub fn builtin_table(&self) -> Vec<(&str, &str)> {
        self.functions
            .iter()
            .filter(|f| f.is_builtin())
            .map(|f| (f.name.as_str(), f.linkage_name()))
            .collect()
    }

    pub fn user_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| !f.is_builtin())
    }

    /// Interns `value`; equal text always yields the same id
    pub fn put_static_string(&mut self, value: &str) -> StringId {
        if let Some(&id) = self.string_ids.get(value) {
            return id;
        }
        let id = next_id(self.static_strings.len());
        self.static_strings.push(StaticString { id, value: value.to_string() });
        self.string_ids.insert(value.to_string(), id);
        id
    }

    pub fn static_string(&self, id: StringId) -> Option<&str> {
        self.static_strings.get(index_of(id)).map(|s| s.value.as_str())
    }

    /// Appends a global slot; emission order is call order
    pub fn put_static_data(&mut self, name: &str, size: i64) -> StaticId {
        let id = next_id(self.static_data.len());
        self.static_data.push(StaticData { id, name: name.to_string(), size });
        self.static_ids.insert(name.to_string(), id);
        id
    }

    pub fn static_data_id(&self, name: &str) -> Option<StaticId> {
        self.static_ids.get(name).copied()
    }

    pub fn record_loop(&mut self, id: LoopId, record: LoopRecord) {
        self.loop_records.insert(id, record);
    }

    pub fn loop_record(&self, id: LoopId) -> Option<&LoopRecord> {
        self.loop_records.get(&id)
    }

    /// Recomputes every function's direct callees from its `Call`s, then
    /// iterates `recursive = callees ∪ recursive(callee)` over all
    /// functions until no set grows.
    pub fn update_callee_set(&mut self) {
        for function in &mut self.functions {
            function.collect_callees();
            function.recursive_callees = function.callees.clone();
        }

        let mut rounds = 0;
        let mut changed = true;
        while changed {
            changed = false;
            rounds += 1;
            for i in 0..self.functions.len() {
                let mut closure: BTreeSet<FunctionId> = self.functions[i].recursive_callees.clone();
                for callee in &self.functions[i].callees {
                    closure.extend(self.functions[index_of(*callee)].recursive_callees.iter().copied());
                }
                if closure.len() != self.functions[i].recursive_callees.len() {
                    self.functions[i].recursive_callees = closure;
                    changed = true;
                }
            }
        }
        debug!("callee sets converged after {} round(s)", rounds);
    }
}
