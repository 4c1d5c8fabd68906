use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::{Condvar, Mutex};

use crate::object::ObjRef;
use crate::threads::SesiaThread;
use crate::vm::VM;

struct MonitorState {
    owner: usize,
    recursion: u32,
}

/// Per-object recursive locks, keyed by reference. The heap never moves
/// objects, so references are stable keys.
pub struct MonitorTable {
    data: Mutex<HashMap<u32, MonitorState>>,
    cv: Condvar,
}

impl MonitorTable {
    pub fn new() -> MonitorTable {
        MonitorTable {
            data: Mutex::new(HashMap::new()),
            cv: Condvar::new(),
        }
    }

    /// Acquires the monitor of `obj`, blocking while another thread owns
    /// it. The caller has null-checked the reference. Implies acquire
    /// ordering through the table lock.
    pub fn enter(&self, vm: &VM, thread: &SesiaThread, obj: ObjRef) {
        debug_assert!(!obj.is_null());
        let tid = thread.id();
        let mut data = self.data.lock();

        loop {
            match data.entry(obj.to_bits()) {
                Entry::Vacant(entry) => {
                    entry.insert(MonitorState {
                        owner: tid,
                        recursion: 1,
                    });
                    return;
                }
                Entry::Occupied(mut entry) => {
                    if entry.get().owner == tid {
                        entry.get_mut().recursion += 1;
                        return;
                    }
                }
            }

            // The owner is another thread; park so a stop-the-world
            // pause does not wait on us, then sleep on the table.
            thread.park(vm);
            self.cv.wait(&mut data);
            thread.unpark(vm);
        }
    }

    /// Releases the monitor of `obj`. False means the calling thread
    /// does not own it, which the interpreter turns into an
    /// illegal-monitor-state exception.
    pub fn exit(&self, thread: &SesiaThread, obj: ObjRef) -> bool {
        debug_assert!(!obj.is_null());
        let tid = thread.id();
        let mut data = self.data.lock();

        match data.get_mut(&obj.to_bits()) {
            Some(state) if state.owner == tid => {
                state.recursion -= 1;
                if state.recursion == 0 {
                    data.remove(&obj.to_bits());
                    self.cv.notify_all();
                }
                true
            }
            _ => false,
        }
    }

    pub fn is_locked(&self, obj: ObjRef) -> bool {
        self.data.lock().contains_key(&obj.to_bits())
    }
}
