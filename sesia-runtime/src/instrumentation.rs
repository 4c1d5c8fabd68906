use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use sesia_bytecode::MethodId;

use crate::frame::Value;
use crate::object::ObjRef;

/// What happened, as observed by an attached tool. Events are recorded
/// in execution order.
#[derive(Clone, Debug, PartialEq)]
pub enum InstrumentationEvent {
    MethodEntry {
        method: MethodId,
    },
    MethodExit {
        method: MethodId,
        pc: u32,
        return_value: Value,
    },
    PcMoved {
        method: MethodId,
        pc: u32,
    },
    ExceptionCaught {
        method: MethodId,
        pc: u32,
        handler_pc: u32,
        exception: ObjRef,
    },
    MethodUnwind {
        method: MethodId,
        pc: u32,
    },
}

/// Listener flags plus an event sink. The dispatch loop checks the
/// flags before paying for an event; with everything disabled the
/// preamble stays a handful of relaxed loads.
pub struct Instrumentation {
    method_entry_listeners: AtomicBool,
    method_exit_listeners: AtomicBool,
    pc_listeners: AtomicBool,
    exception_listeners: AtomicBool,
    events: Mutex<Vec<InstrumentationEvent>>,
}

impl Instrumentation {
    pub fn new() -> Instrumentation {
        Instrumentation {
            method_entry_listeners: AtomicBool::new(false),
            method_exit_listeners: AtomicBool::new(false),
            pc_listeners: AtomicBool::new(false),
            exception_listeners: AtomicBool::new(false),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn enable_method_listeners(&self) {
        self.method_entry_listeners.store(true, Ordering::Relaxed);
        self.method_exit_listeners.store(true, Ordering::Relaxed);
        self.exception_listeners.store(true, Ordering::Relaxed);
    }

    pub fn enable_pc_listeners(&self) {
        self.pc_listeners.store(true, Ordering::Relaxed);
    }

    pub fn has_method_entry_listeners(&self) -> bool {
        self.method_entry_listeners.load(Ordering::Relaxed)
    }

    pub fn has_method_exit_listeners(&self) -> bool {
        self.method_exit_listeners.load(Ordering::Relaxed)
    }

    pub fn has_pc_listeners(&self) -> bool {
        self.pc_listeners.load(Ordering::Relaxed)
    }

    pub fn has_exception_listeners(&self) -> bool {
        self.exception_listeners.load(Ordering::Relaxed)
    }

    pub fn method_entry_event(&self, method: MethodId) {
        self.events
            .lock()
            .push(InstrumentationEvent::MethodEntry { method });
    }

    pub fn method_exit_event(&self, method: MethodId, pc: u32, return_value: Value) {
        self.events.lock().push(InstrumentationEvent::MethodExit {
            method,
            pc,
            return_value,
        });
    }

    pub fn pc_moved_event(&self, method: MethodId, pc: u32) {
        self.events
            .lock()
            .push(InstrumentationEvent::PcMoved { method, pc });
    }

    pub fn exception_caught_event(
        &self,
        method: MethodId,
        pc: u32,
        handler_pc: u32,
        exception: ObjRef,
    ) {
        self.events
            .lock()
            .push(InstrumentationEvent::ExceptionCaught {
                method,
                pc,
                handler_pc,
                exception,
            });
    }

    pub fn method_unwind_event(&self, method: MethodId, pc: u32) {
        self.events
            .lock()
            .push(InstrumentationEvent::MethodUnwind { method, pc });
    }

    pub fn take_events(&self) -> Vec<InstrumentationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}
