use std::cell::RefCell;
use std::ptr;
use std::sync::atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::frame::ShadowFrame;
use crate::handle::HandleMemory;
use crate::object::ObjRef;
use crate::vm::{get_vm, VM};

thread_local! {
    static THREAD: RefCell<*const SesiaThread> = RefCell::new(ptr::null());
}

pub fn current_thread() -> &'static SesiaThread {
    let thread = THREAD.with(|thread| *thread.borrow());
    debug_assert!(!thread.is_null());
    unsafe { &*thread }
}

pub fn init_current_thread(thread: Arc<SesiaThread>) -> &'static SesiaThread {
    let thread = Arc::into_raw(thread);

    THREAD.with(|thread_local| {
        *thread_local.borrow_mut() = thread;
    });

    unsafe { &*thread }
}

pub fn deinit_current_thread() {
    THREAD.with(|thread| {
        let mut threadptr = thread.borrow_mut();

        {
            let thread = unsafe { Arc::from_raw(*threadptr) };
            std::mem::drop(thread);
        }

        *threadptr = ptr::null();
    });
}

pub struct Threads {
    pub threads: Mutex<Vec<Arc<SesiaThread>>>,
    pub cv_join: Condvar,

    pub next_thread_id: AtomicUsize,

    pub barrier: Barrier,
}

impl Threads {
    pub fn new() -> Threads {
        Threads {
            threads: Mutex::new(Vec::new()),
            cv_join: Condvar::new(),
            next_thread_id: AtomicUsize::new(1),
            barrier: Barrier::new(),
        }
    }

    pub fn add_thread(&self, thread: Arc<SesiaThread>) {
        assert!(thread.is_parked());
        parked_scope(|| {
            let mut threads = self.threads.lock();
            let idx = threads.len();
            thread.set_index_in_thread_list(idx);
            threads.push(thread);
        });
    }

    pub fn add_main_thread(&self, thread: Arc<SesiaThread>) {
        assert!(thread.is_running());
        let mut threads = self.threads.lock();
        assert!(threads.is_empty());
        thread.set_index_in_thread_list(0);
        threads.push(thread);
    }

    pub fn next_thread_id(&self) -> usize {
        self.next_thread_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn remove_current_thread(&self) {
        let vm = get_vm();
        let thread = current_thread();

        thread.park(vm);

        let mut threads = self.threads.lock();
        let idx = thread.index_in_thread_list.load(Ordering::Relaxed);
        assert!(Arc::as_ptr(&threads[idx]) == thread as *const _);
        let last = threads.pop().expect("missing thread");
        if idx != threads.len() {
            last.set_index_in_thread_list(idx);
            threads[idx] = last;
        }
        self.cv_join.notify_all();
    }

    pub fn join_all(&self) {
        let mut threads = self.threads.lock();

        while threads.len() > 0 {
            self.cv_join.wait(&mut threads);
        }
    }
}

/// Per-host-thread runtime state: the cooperative-suspend state machine,
/// the pending-exception slot, handle memory for native roots, and the
/// chain of shadow frames currently executing on this thread.
pub struct SesiaThread {
    id: AtomicUsize,
    pub handles: HandleMemory,
    pub state: AtomicU8,
    pending_exception: AtomicU32,
    top_frame: AtomicUsize,
    frame_depth: AtomicUsize,
    index_in_thread_list: AtomicUsize,
}

unsafe impl Sync for SesiaThread {}
unsafe impl Send for SesiaThread {}

impl SesiaThread {
    pub fn new(vm: &VM, initial_state: ThreadState) -> Arc<SesiaThread> {
        SesiaThread::with_id(vm.threads.next_thread_id(), initial_state)
    }

    fn with_id(id: usize, initial_state: ThreadState) -> Arc<SesiaThread> {
        Arc::new(SesiaThread {
            id: AtomicUsize::new(id),
            handles: HandleMemory::new(),
            state: AtomicU8::new(initial_state as u8),
            pending_exception: AtomicU32::new(0),
            top_frame: AtomicUsize::new(0),
            frame_depth: AtomicUsize::new(0),
            index_in_thread_list: AtomicUsize::new(usize::MAX),
        })
    }

    pub fn id(&self) -> usize {
        self.id.load(Ordering::Relaxed)
    }

    pub fn set_index_in_thread_list(&self, idx: usize) {
        self.index_in_thread_list.store(idx, Ordering::Relaxed);
    }

    pub fn state_relaxed(&self) -> ThreadState {
        self.state.load(Ordering::Relaxed).into()
    }

    pub fn is_running(&self) -> bool {
        self.state_relaxed().is_running()
    }

    pub fn is_parked(&self) -> bool {
        self.state_relaxed().is_parked()
    }

    /// True when any asynchronous flag is raised for this thread and the
    /// per-instruction preamble has to call into the suspend path.
    pub fn test_all_flags(&self) -> bool {
        self.state_relaxed() == ThreadState::SafepointRequested
    }

    pub fn park(&self, vm: &VM) {
        if self
            .state
            .compare_exchange(
                ThreadState::Running as u8,
                ThreadState::Parked as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            self.park_slow(vm);
        }
    }

    fn park_slow(&self, vm: &VM) {
        assert!(self
            .state
            .compare_exchange(
                ThreadState::SafepointRequested as u8,
                ThreadState::ParkedSafepointRequested as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok());
        vm.threads.barrier.notify_park();
    }

    pub fn unpark(&self, vm: &VM) {
        if self
            .state
            .compare_exchange(
                ThreadState::Parked as u8,
                ThreadState::Running as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            self.unpark_slow(vm);
        }
    }

    fn unpark_slow(&self, vm: &VM) {
        loop {
            match self.state.compare_exchange(
                ThreadState::Parked as u8,
                ThreadState::Running as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(state) => {
                    assert_eq!(state, ThreadState::ParkedSafepointRequested as u8);
                    vm.threads.barrier.wait_in_unpark();
                }
            }
        }
    }

    pub fn pending_exception(&self) -> ObjRef {
        ObjRef::from_bits(self.pending_exception.load(Ordering::Relaxed))
    }

    pub fn is_exception_pending(&self) -> bool {
        !self.pending_exception().is_null()
    }

    pub fn set_pending_exception(&self, exception: ObjRef) {
        debug_assert!(!exception.is_null());
        self.pending_exception
            .store(exception.to_bits(), Ordering::Relaxed);
    }

    /// Reads and clears the pending exception, as consumed by the
    /// move-exception instruction.
    pub fn clear_pending_exception(&self) -> ObjRef {
        ObjRef::from_bits(self.pending_exception.swap(0, Ordering::Relaxed))
    }

    pub fn push_frame(&self, frame: &mut ShadowFrame) {
        frame.set_caller(self.top_frame.load(Ordering::Relaxed) as *const ShadowFrame);
        self.top_frame
            .store(frame as *const ShadowFrame as usize, Ordering::Relaxed);
        self.frame_depth.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pop_frame(&self, frame: &ShadowFrame) {
        assert_eq!(
            self.top_frame.load(Ordering::Relaxed),
            frame as *const ShadowFrame as usize
        );
        self.top_frame
            .store(frame.caller() as usize, Ordering::Relaxed);
        self.frame_depth.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn top_frame(&self) -> *const ShadowFrame {
        self.top_frame.load(Ordering::Relaxed) as *const ShadowFrame
    }

    pub fn frame_depth(&self) -> usize {
        self.frame_depth.load(Ordering::Relaxed)
    }

    /// Entry-time sanity check of the frame chain: every link must be an
    /// interpreter frame with a reference bitmap, and the chain length
    /// must match the recorded depth.
    pub fn verify_stack(&self) {
        let mut current = self.top_frame();
        let mut count = 0;

        while !current.is_null() {
            let frame = unsafe { &*current };
            assert!(frame.has_reference_map());
            count += 1;
            current = frame.caller();
        }

        assert_eq!(count, self.frame_depth());
    }

    /// Roots of this thread: every reference-tagged register of every
    /// frame on the chain, each frame's receiver, handle slots and the
    /// pending exception. Only valid while the thread is stopped.
    pub fn iterate_roots(&self, mut callback: impl FnMut(ObjRef)) {
        let mut current = self.top_frame();

        while !current.is_null() {
            let frame = unsafe { &*current };
            frame.iterate_references(&mut callback);
            current = frame.caller();
        }

        self.handles.iterate_for_gc(&mut callback);

        let pending = self.pending_exception();
        if !pending.is_null() {
            callback(pending);
        }
    }
}

pub fn parked_scope<F, R>(callback: F) -> R
where
    F: FnOnce() -> R,
{
    let vm = get_vm();
    let thread = current_thread();

    assert!(thread.is_running());

    thread.park(vm);
    let result = callback();
    thread.unpark(vm);

    assert!(thread.is_running());

    result
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ThreadState {
    Running = 0,
    Parked = 1,
    SafepointRequested = 2,
    ParkedSafepointRequested = 3,
    Safepoint = 4,
}

impl From<u8> for ThreadState {
    fn from(value: u8) -> ThreadState {
        match value {
            0 => ThreadState::Running,
            1 => ThreadState::Parked,
            2 => ThreadState::SafepointRequested,
            3 => ThreadState::ParkedSafepointRequested,
            4 => ThreadState::Safepoint,
            _ => unreachable!(),
        }
    }
}

impl ThreadState {
    pub fn is_running(&self) -> bool {
        match *self {
            ThreadState::Running | ThreadState::SafepointRequested => true,
            _ => false,
        }
    }

    pub fn is_parked(&self) -> bool {
        match *self {
            ThreadState::Parked | ThreadState::ParkedSafepointRequested => true,
            _ => false,
        }
    }
}

impl Default for ThreadState {
    fn default() -> ThreadState {
        ThreadState::Running
    }
}

pub struct Barrier {
    data: Mutex<BarrierData>,
    cv_wakeup: Condvar,
    cv_notify: Condvar,
}

impl Barrier {
    pub fn new() -> Barrier {
        Barrier {
            data: Mutex::new(BarrierData::new()),
            cv_wakeup: Condvar::new(),
            cv_notify: Condvar::new(),
        }
    }

    pub fn arm(&self) {
        let mut data = self.data.lock();
        assert!(!data.is_armed());
        data.arm();
    }

    pub fn disarm(&self) {
        let mut data = self.data.lock();
        assert!(data.is_armed());
        data.disarm();
        self.cv_wakeup.notify_all();
    }

    pub fn notify_park(&self) {
        let mut data = self.data.lock();
        assert!(data.is_armed());
        data.stopped += 1;
        self.cv_notify.notify_one();
    }

    pub fn wait_in_safepoint(&self) {
        let mut data = self.data.lock();
        assert!(data.is_armed());
        data.stopped += 1;
        self.cv_notify.notify_one();

        while data.is_armed() {
            self.cv_wakeup.wait(&mut data);
        }
    }

    pub fn wait_in_unpark(&self) {
        let mut data = self.data.lock();

        while data.is_armed() {
            self.cv_wakeup.wait(&mut data);
        }
    }

    pub fn wait_until_threads_stopped(&self, threads: usize) {
        let mut data = self.data.lock();
        assert!(data.is_armed());
        while data.stopped < threads {
            self.cv_notify.wait(&mut data);
        }
        assert_eq!(data.stopped, threads);
    }
}

struct BarrierData {
    armed: bool,
    stopped: usize,
}

impl BarrierData {
    pub fn new() -> BarrierData {
        BarrierData {
            armed: false,
            stopped: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.stopped = 0;
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}
