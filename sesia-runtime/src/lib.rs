#![allow(dead_code)]

pub mod frame;
pub mod gc;
pub mod handle;
pub mod instrumentation;
pub mod interpreter;
pub mod monitor;
pub mod object;
pub mod safepoint;
pub mod threads;
pub mod vm;

pub use frame::{ShadowFrame, Value};
pub use interpreter::execute;
pub use object::{Heap, ObjRef};
pub use vm::{clear_vm, get_vm, set_vm, Flags, VM};
