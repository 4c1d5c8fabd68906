use std::collections::HashMap;
use std::ptr;
use std::sync::atomic::{AtomicU8, Ordering};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use parking_lot::{Mutex, RwLock};

use sesia_bytecode::{
    ClassId, ClassKind, CodeItem, ConstPoolEntry, ConstPoolIdx, ElementType, FieldId, MethodId,
    Program,
};

use crate::instrumentation::Instrumentation;
use crate::monitor::MonitorTable;
use crate::object::{Heap, ObjData, ObjRef};
use crate::threads::{SesiaThread, Threads};

pub const UNINITIALIZED: u8 = 0;
pub const INITIALIZED: u8 = 1;

const DEFAULT_HEAP_OBJECT_LIMIT: usize = 1024 * 1024;
const DEFAULT_INTERPRETER_DEPTH_LIMIT: usize = 1024;

static mut VM_GLOBAL: *const u8 = ptr::null();

pub fn get_vm() -> &'static VM {
    unsafe {
        debug_assert!(!VM_GLOBAL.is_null());
        &*(VM_GLOBAL as *const VM)
    }
}

pub fn set_vm(vm: &VM) {
    unsafe {
        debug_assert!(VM_GLOBAL.is_null());
        VM_GLOBAL = vm as *const _ as *const u8;
    }
}

pub fn clear_vm() {
    unsafe {
        debug_assert!(!VM_GLOBAL.is_null());
        VM_GLOBAL = ptr::null();
    }
}

#[derive(TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u8)]
pub enum VmState {
    Running,
    Safepoint,
}

impl VmState {
    pub fn in_running(&self) -> bool {
        match self {
            VmState::Running => true,
            _ => false,
        }
    }

    pub fn in_safepoint(&self) -> bool {
        match self {
            VmState::Safepoint => true,
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Flags {
    pub trace_interpreter: bool,
    pub access_checks: bool,
    pub max_heap_objects: Option<usize>,
    pub max_interpreter_depth: Option<usize>,
}

impl Flags {
    pub fn max_heap_objects(&self) -> usize {
        self.max_heap_objects.unwrap_or(DEFAULT_HEAP_OBJECT_LIMIT)
    }

    pub fn max_interpreter_depth(&self) -> usize {
        self.max_interpreter_depth
            .unwrap_or(DEFAULT_INTERPRETER_DEPTH_LIMIT)
    }
}

/// Classes the runtime itself needs to raise errors and to back
/// strings, class mirrors and thrown values. Looked up by name once at
/// setup.
pub struct KnownClasses {
    pub object_class: ClassId,
    pub class_class: ClassId,
    pub string_class: ClassId,
    pub throwable_class: ClassId,
    pub null_pointer_exception_class: ClassId,
    pub arithmetic_exception_class: ClassId,
    pub class_cast_exception_class: ClassId,
    pub array_index_out_of_bounds_exception_class: ClassId,
    pub array_store_exception_class: ClassId,
    pub negative_array_size_exception_class: ClassId,
    pub illegal_monitor_state_exception_class: ClassId,
    pub illegal_access_error_class: ClassId,
    pub no_such_method_error_class: ClassId,
    pub out_of_memory_error_class: ClassId,
    pub stack_overflow_error_class: ClassId,
    pub internal_error_class: ClassId,
}

impl KnownClasses {
    pub fn lookup(program: &Program) -> KnownClasses {
        let find = |name: &str| -> ClassId {
            program
                .classes
                .iter()
                .position(|cls| cls.name == name)
                .map(ClassId::from)
                .unwrap_or_else(|| panic!("missing runtime class {}", name))
        };

        KnownClasses {
            object_class: find("Object"),
            class_class: find("Class"),
            string_class: find("String"),
            throwable_class: find("Throwable"),
            null_pointer_exception_class: find("NullPointerException"),
            arithmetic_exception_class: find("ArithmeticException"),
            class_cast_exception_class: find("ClassCastException"),
            array_index_out_of_bounds_exception_class: find("ArrayIndexOutOfBoundsException"),
            array_store_exception_class: find("ArrayStoreException"),
            negative_array_size_exception_class: find("NegativeArraySizeException"),
            illegal_monitor_state_exception_class: find("IllegalMonitorStateException"),
            illegal_access_error_class: find("IllegalAccessError"),
            no_such_method_error_class: find("NoSuchMethodError"),
            out_of_memory_error_class: find("OutOfMemoryError"),
            stack_overflow_error_class: find("StackOverflowError"),
            internal_error_class: find("InternalError"),
        }
    }
}

pub struct VM {
    pub flags: Flags,
    pub program: Program,
    pub known: KnownClasses,
    pub heap: Heap,
    pub threads: Threads,
    pub instrumentation: Instrumentation,
    pub monitors: MonitorTable,
    state: AtomicU8,
    class_states: Vec<AtomicU8>,
    statics: Vec<RwLock<Vec<u64>>>,
    string_literals: Mutex<HashMap<String, ObjRef>>,
    class_mirrors: Mutex<HashMap<ClassId, ObjRef>>,
    preallocated_oom: ObjRef,
}

impl VM {
    pub fn new(program: Program, flags: Flags) -> VM {
        let known = KnownClasses::lookup(&program);
        let heap = Heap::new(flags.max_heap_objects());

        // An out-of-memory error cannot be allocated once the heap is
        // exhausted, so one is set aside up front.
        let preallocated_oom = heap
            .alloc_throwable(
                known.out_of_memory_error_class,
                "out of memory".to_string(),
            )
            .expect("heap budget too small for runtime setup");

        let class_states = program
            .classes
            .iter()
            .map(|_| AtomicU8::new(UNINITIALIZED))
            .collect();

        let statics = program
            .classes
            .iter()
            .map(|cls| RwLock::new(vec![0; cls.static_fields.len()]))
            .collect();

        VM {
            flags,
            known,
            heap,
            program,
            threads: Threads::new(),
            instrumentation: Instrumentation::new(),
            monitors: MonitorTable::new(),
            state: AtomicU8::new(VmState::Running as u8),
            class_states,
            statics,
            string_literals: Mutex::new(HashMap::new()),
            class_mirrors: Mutex::new(HashMap::new()),
            preallocated_oom,
        }
    }

    pub fn state(&self) -> VmState {
        self.state.load(Ordering::Relaxed).try_into().unwrap()
    }

    pub fn set_state(&self, new_state: VmState) -> VmState {
        self.state
            .swap(new_state as u8, Ordering::SeqCst)
            .try_into()
            .unwrap()
    }

    pub fn display_method(&self, method_id: MethodId) -> String {
        let method = self.program.method(method_id);
        let class = self.program.class(method.class_id);
        format!("{}.{}", class.name, method.name)
    }

    pub fn class_is_initialized(&self, class_id: ClassId) -> bool {
        self.class_states[class_id.index()].load(Ordering::Acquire) == INITIALIZED
    }

    /// Class initializers run under the loader before execution starts;
    /// resolution only flips the state so instrumentation and statics
    /// observe an initialized class.
    pub fn ensure_initialized(&self, class_id: ClassId) {
        self.class_states[class_id.index()].store(INITIALIZED, Ordering::Release);
    }

    /// Resolves a string pool entry to its interned heap object. A null
    /// return means allocation failed and a pending exception is set.
    pub fn resolve_string(&self, thread: &SesiaThread, code: &CodeItem, idx: ConstPoolIdx) -> ObjRef {
        let value = match code.const_pool(idx) {
            ConstPoolEntry::String(value) => value.clone(),
            entry => panic!("string pool entry expected, found {:?}", entry),
        };

        let mut literals = self.string_literals.lock();
        if let Some(&obj) = literals.get(&value) {
            return obj;
        }

        match self.heap.alloc_string(self.known.string_class, value.clone()) {
            Some(obj) => {
                literals.insert(value, obj);
                obj
            }
            None => {
                self.throw_out_of_memory_error(thread);
                ObjRef::null()
            }
        }
    }

    /// Resolves a class pool entry and initializes the class. With
    /// access checks enabled, resolving a private class from a foreign
    /// class raises an illegal-access error and returns `None`.
    pub fn resolve_class(
        &self,
        thread: &SesiaThread,
        caller_method: MethodId,
        code: &CodeItem,
        idx: ConstPoolIdx,
        access_check: bool,
    ) -> Option<ClassId> {
        let class_id = match code.const_pool(idx) {
            ConstPoolEntry::Class(id) => *id,
            entry => panic!("class pool entry expected, found {:?}", entry),
        };

        if access_check {
            let class = self.program.class(class_id);
            let caller_class = self.program.method(caller_method).class_id;
            if class.is_private && class_id != caller_class {
                self.throw_named(
                    thread,
                    self.known.illegal_access_error_class,
                    format!("illegal access to class {}", class.name),
                );
                return None;
            }
        }

        self.ensure_initialized(class_id);
        Some(class_id)
    }

    pub fn resolve_field(&self, code: &CodeItem, idx: ConstPoolIdx) -> FieldId {
        match code.const_pool(idx) {
            ConstPoolEntry::Field(id) => *id,
            entry => panic!("field pool entry expected, found {:?}", entry),
        }
    }

    pub fn resolve_method(&self, code: &CodeItem, idx: ConstPoolIdx) -> MethodId {
        match code.const_pool(idx) {
            ConstPoolEntry::Method(id) => *id,
            entry => panic!("method pool entry expected, found {:?}", entry),
        }
    }

    /// The class mirror object for const-class; one stable object per
    /// class.
    pub fn class_mirror(&self, thread: &SesiaThread, class_id: ClassId) -> ObjRef {
        let mut mirrors = self.class_mirrors.lock();
        if let Some(&obj) = mirrors.get(&class_id) {
            return obj;
        }

        match self.heap.alloc_class_mirror(self.known.class_class, class_id) {
            Some(obj) => {
                mirrors.insert(class_id, obj);
                obj
            }
            None => {
                self.throw_out_of_memory_error(thread);
                ObjRef::null()
            }
        }
    }

    /// Allocates a zeroed instance of `class_id`. Null plus a pending
    /// exception on heap exhaustion.
    pub fn alloc_instance(&self, thread: &SesiaThread, class_id: ClassId) -> ObjRef {
        self.ensure_initialized(class_id);
        let field_count = self.program.class(class_id).instance_fields.len();

        match self.heap.alloc_instance(class_id, field_count) {
            Some(obj) => obj,
            None => {
                self.throw_out_of_memory_error(thread);
                ObjRef::null()
            }
        }
    }

    /// Allocates an array of the given array class. Negative lengths
    /// raise the negative-array-size exception.
    pub fn alloc_array(&self, thread: &SesiaThread, class_id: ClassId, length: i32) -> ObjRef {
        if length < 0 {
            self.throw_named(
                thread,
                self.known.negative_array_size_exception_class,
                format!("negative array size {}", length),
            );
            return ObjRef::null();
        }

        let element = match self.program.class(class_id).kind {
            ClassKind::Array(element) => element,
            ClassKind::Object => panic!("array class expected"),
        };

        let len = length as usize;
        let data = match element {
            ElementType::Boolean => ObjData::BooleanArray(vec![0; len]),
            ElementType::Byte => ObjData::ByteArray(vec![0; len]),
            ElementType::Char => ObjData::CharArray(vec![0; len]),
            ElementType::Short => ObjData::ShortArray(vec![0; len]),
            ElementType::Int | ElementType::Float => ObjData::IntArray(vec![0; len]),
            ElementType::Long | ElementType::Double => ObjData::LongArray(vec![0; len]),
            ElementType::Class(_) => ObjData::ObjectArray(vec![ObjRef::null(); len]),
        };

        match self.heap.alloc(class_id, data) {
            Some(obj) => obj,
            None => {
                self.throw_out_of_memory_error(thread);
                ObjRef::null()
            }
        }
    }

    /// Allocates a throwable of a known class and makes it the thread's
    /// pending exception.
    pub fn throw_named(&self, thread: &SesiaThread, class_id: ClassId, message: String) {
        match self.heap.alloc_throwable(class_id, message) {
            Some(exception) => thread.set_pending_exception(exception),
            None => thread.set_pending_exception(self.preallocated_oom),
        }
    }

    pub fn throw_out_of_memory_error(&self, thread: &SesiaThread) {
        thread.set_pending_exception(self.preallocated_oom);
    }

    pub fn throw_null_pointer_exception_from_pc(
        &self,
        thread: &SesiaThread,
        method_id: MethodId,
        code: &CodeItem,
        pc: u32,
    ) {
        self.throw_named(
            thread,
            self.known.null_pointer_exception_class,
            format!(
                "null pointer dereference in {} at {}",
                self.display_method(method_id),
                code.offset_location(pc)
            ),
        );
    }

    pub fn static_field_get(&self, class_id: ClassId, slot: u32) -> u64 {
        self.statics[class_id.index()].read()[slot as usize]
    }

    pub fn static_field_put(&self, class_id: ClassId, slot: u32, raw: u64) {
        self.statics[class_id.index()].write()[slot as usize] = raw;
    }

    /// Interned objects the collector must keep alive: string literals
    /// and class mirrors.
    pub fn iterate_string_literals(&self, mut callback: impl FnMut(ObjRef)) {
        for &obj in self.string_literals.lock().values() {
            callback(obj);
        }
        for &obj in self.class_mirrors.lock().values() {
            callback(obj);
        }
        callback(self.preallocated_oom);
    }
}
