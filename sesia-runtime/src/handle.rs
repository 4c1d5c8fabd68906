use parking_lot::Mutex;

use crate::object::ObjRef;
use crate::threads::SesiaThread;

/// Per-thread storage for references held in native temporaries. Any
/// reference that lives across a call into the runtime must sit in a
/// handle so it stays enumerable while the world is stopped.
///
/// Slots are boxed so their addresses survive growth of the backing
/// vector; a mark/reset pair scopes the handles of one interpreter
/// activation.
pub struct HandleMemory {
    slots: Mutex<Vec<Box<ObjRef>>>,
}

impl HandleMemory {
    pub fn new() -> HandleMemory {
        HandleMemory {
            slots: Mutex::new(Vec::new()),
        }
    }

    pub fn create(&self, obj: ObjRef) -> Handle {
        let mut slots = self.slots.lock();
        slots.push(Box::new(obj));
        let location: *mut ObjRef = &mut **slots.last_mut().expect("empty handle memory");
        Handle(location)
    }

    pub fn mark(&self) -> usize {
        self.slots.lock().len()
    }

    /// Drops every handle created since `mark`. Handles handed out past
    /// the mark must not be used afterwards.
    pub fn reset(&self, mark: usize) {
        self.slots.lock().truncate(mark);
    }

    pub fn iterate_for_gc(&self, mut callback: impl FnMut(ObjRef)) {
        for slot in self.slots.lock().iter() {
            if !slot.is_null() {
                callback(**slot);
            }
        }
    }
}

/// A stable location holding one rooted reference.
#[derive(Copy, Clone)]
pub struct Handle(*mut ObjRef);

impl Handle {
    pub fn get(self) -> ObjRef {
        unsafe { *self.0 }
    }

    pub fn set(self, obj: ObjRef) {
        unsafe {
            *self.0 = obj;
        }
    }
}

pub fn create_handle(thread: &SesiaThread, obj: ObjRef) -> Handle {
    thread.handles.create(obj)
}
