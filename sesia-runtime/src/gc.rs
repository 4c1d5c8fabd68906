use std::sync::Arc;

use sesia_bytecode::FieldKind;

use crate::object::ObjRef;
use crate::threads::SesiaThread;
use crate::vm::VM;

/// Enumerates every strong root the collector must treat as live:
/// reference-tagged registers and receiver roots of all frames on every
/// stopped thread, handle memory, pending exceptions, reference-kind
/// static fields and the interned string literals. Only meaningful
/// inside a stop-the-world pause.
pub fn iterate_strong_roots<F: FnMut(ObjRef)>(
    vm: &VM,
    threads: &[Arc<SesiaThread>],
    mut callback: F,
) {
    for thread in threads {
        thread.iterate_roots(&mut callback);
    }

    iterate_roots_from_statics(vm, &mut callback);
    iterate_roots_from_string_literals(vm, &mut callback);
}

pub fn determine_strong_roots(vm: &VM, threads: &[Arc<SesiaThread>]) -> Vec<ObjRef> {
    let mut rootset = Vec::new();

    iterate_strong_roots(vm, threads, |obj| {
        rootset.push(obj);
    });

    rootset
}

fn iterate_roots_from_statics<F: FnMut(ObjRef)>(vm: &VM, callback: &mut F) {
    for (class_idx, class) in vm.program.classes.iter().enumerate() {
        for &field_id in &class.static_fields {
            let field = vm.program.field(field_id);
            if field.kind != FieldKind::Object {
                continue;
            }

            let raw = vm.static_field_get(class_idx.into(), field.slot);
            let obj = ObjRef::from_bits(raw as u32);
            if !obj.is_null() {
                callback(obj);
            }
        }
    }
}

fn iterate_roots_from_string_literals<F: FnMut(ObjRef)>(vm: &VM, callback: &mut F) {
    vm.iterate_string_literals(|obj| {
        callback(obj);
    });
}
