use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::threads::{current_thread, parked_scope, SesiaThread, ThreadState};
use crate::vm::{VmState, VM};

/// Stops every registered thread at a safepoint, runs `operation` over
/// the stopped thread list, and resumes the world. The calling thread
/// parks itself for the duration.
pub fn stop_the_world<F, R>(vm: &VM, operation: F) -> R
where
    F: FnOnce(&[Arc<SesiaThread>]) -> R,
{
    parked_scope(|| {
        let threads = vm.threads.threads.lock();

        if threads.len() == 1 {
            assert_eq!(
                current_thread() as *const _,
                threads.first().expect("missing thread").as_ref() as *const _
            );
            let ret = invoke_safepoint_operation(vm, &*threads, operation);
            return ret;
        }

        debug_assert!(threads
            .iter()
            .any(|t| t.as_ref() as *const _ == current_thread() as *const _));

        stop_threads(vm, &*threads);
        let ret = invoke_safepoint_operation(vm, &*threads, operation);
        resume_threads(vm, &*threads);

        ret
    })
}

fn invoke_safepoint_operation<F, R>(vm: &VM, threads: &[Arc<SesiaThread>], operation: F) -> R
where
    F: FnOnce(&[Arc<SesiaThread>]) -> R,
{
    let old_state = vm.set_state(VmState::Safepoint);
    assert!(old_state.in_running());

    let result = operation(threads);

    let old_state = vm.set_state(VmState::Running);
    assert!(old_state.in_safepoint());

    result
}

fn stop_threads(vm: &VM, threads: &[Arc<SesiaThread>]) {
    vm.threads.barrier.arm();

    let mut running = 0;

    for thread in threads.iter() {
        let current_state = thread
            .state
            .fetch_or(ThreadState::SafepointRequested as u8, Ordering::SeqCst);

        if current_state == ThreadState::Running as u8 {
            running += 1;
        } else {
            assert_eq!(current_state, ThreadState::Parked as u8);
        }
    }

    vm.threads.barrier.wait_until_threads_stopped(running);
}

fn resume_threads(vm: &VM, threads: &[Arc<SesiaThread>]) {
    for thread in threads.iter() {
        let old_state: ThreadState = thread
            .state
            .swap(ThreadState::Parked as u8, Ordering::SeqCst)
            .into();

        assert!(
            old_state == ThreadState::Safepoint
                || old_state == ThreadState::ParkedSafepointRequested
        );
    }

    vm.threads.barrier.disarm();
}

/// The cooperative-suspend collaborator invoked from the dispatch loop's
/// preamble whenever the thread's flags are raised. Blocks in the
/// safepoint until the world resumes.
pub fn check_suspend(vm: &VM, thread: &SesiaThread) {
    let state: ThreadState = thread
        .state
        .swap(ThreadState::Safepoint as u8, Ordering::SeqCst)
        .into();
    assert_eq!(state, ThreadState::SafepointRequested);
    vm.threads.barrier.wait_in_safepoint();
    thread.unpark(vm);
}
