use sesia_bytecode::{
    display_instruction, BytecodeCursor, ClassKind, CodeItem, ConstPoolIdx, ElementType,
    FieldKind, MethodId,
};

use crate::frame::{ShadowFrame, Value};
use crate::handle::create_handle;
use crate::object::ObjRef;
use crate::threads::SesiaThread;
use crate::vm::VM;

mod switch;


/// Runs `frame` through the dispatch loop until the method returns or
/// an uncaught thrown value unwinds past it. On unwind the returned
/// value is empty and the exception stays pending on `thread`.
///
/// The frame must carry a reference bitmap; handing over a compiled
/// frame is a programmer error and aborts.
pub fn execute(
    vm: &VM,
    thread: &SesiaThread,
    method_id: MethodId,
    code: &CodeItem,
    frame: &mut ShadowFrame,
    result_register: Value,
) -> Value {
    if !frame.has_reference_map() {
        panic!(
            "invalid shadow frame for interpreter use in {}",
            vm.display_method(method_id)
        );
    }
    thread.verify_stack();

    thread.push_frame(frame);
    let handle_mark = thread.handles.mark();

    let value = switch::execute_switch_impl(vm, thread, method_id, code, frame, result_register);

    thread.handles.reset(handle_mark);
    thread.pop_frame(frame);

    value
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum InvokeKind {
    Virtual,
    Super,
    Direct,
    Static,
    Interface,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum FieldScope {
    Instance,
    Static,
}

/// Searches the method's try table for the innermost range covering
/// `pc` whose handler class is assignable from the pending exception's
/// class. Returns the handler's code-unit offset, or `None` when the
/// exception unwinds past this frame. The exception itself stays
/// pending either way.
fn find_exception_handler(
    vm: &VM,
    thread: &SesiaThread,
    frame: &ShadowFrame,
    code: &CodeItem,
    pc: u32,
) -> Option<u32> {
    let exception = thread.pending_exception();
    assert!(!exception.is_null());

    // Root the exception while we look at class data.
    let exception_handle = create_handle(thread, exception);
    let exception_class = vm.heap.class_of(exception_handle.get());

    for try_item in code.tries() {
        if !try_item.covers(pc) {
            continue;
        }

        for handler in &try_item.handlers {
            let caught = match handler.class_idx {
                None => true,
                Some(idx) => {
                    let handler_class = code
                        .const_pool(idx)
                        .to_class()
                        .expect("class pool entry expected");
                    vm.program.is_assignable(handler_class, exception_class)
                }
            };

            if caught {
                if vm.instrumentation.has_exception_listeners() {
                    vm.instrumentation.exception_caught_event(
                        frame.method_id(),
                        pc,
                        handler.handler_pc,
                        exception,
                    );
                }
                return Some(handler.handler_pc);
            }
        }
    }

    if vm.instrumentation.has_method_exit_listeners() {
        vm.instrumentation.method_unwind_event(frame.method_id(), pc);
    }
    None
}

/// Divide and remainder guard zero divisors and `MIN / -1` before any
/// hardware divide; the wrapping forms keep the overflow case silent.
fn do_int_divide(vm: &VM, thread: &SesiaThread, frame: &mut ShadowFrame, dest: usize, dividend: i32, divisor: i32) -> bool {
    if divisor == 0 {
        vm.throw_named(
            thread,
            vm.known.arithmetic_exception_class,
            "divide by zero".to_string(),
        );
        return false;
    }
    frame.set_vreg(dest, dividend.wrapping_div(divisor));
    true
}

fn do_int_remainder(vm: &VM, thread: &SesiaThread, frame: &mut ShadowFrame, dest: usize, dividend: i32, divisor: i32) -> bool {
    if divisor == 0 {
        vm.throw_named(
            thread,
            vm.known.arithmetic_exception_class,
            "divide by zero".to_string(),
        );
        return false;
    }
    frame.set_vreg(dest, dividend.wrapping_rem(divisor));
    true
}

fn do_long_divide(vm: &VM, thread: &SesiaThread, frame: &mut ShadowFrame, dest: usize, dividend: i64, divisor: i64) {
    if divisor == 0 {
        vm.throw_named(
            thread,
            vm.known.arithmetic_exception_class,
            "divide by zero".to_string(),
        );
        return;
    }
    frame.set_vreg_long(dest, dividend.wrapping_div(divisor));
}

fn do_long_remainder(vm: &VM, thread: &SesiaThread, frame: &mut ShadowFrame, dest: usize, dividend: i64, divisor: i64) {
    if divisor == 0 {
        vm.throw_named(
            thread,
            vm.known.arithmetic_exception_class,
            "divide by zero".to_string(),
        );
        return;
    }
    frame.set_vreg_long(dest, dividend.wrapping_rem(divisor));
}

/// Returns the branch displacement of a packed-switch: the matching
/// target, or the switch instruction's own width on a miss.
fn do_packed_switch(inst: &BytecodeCursor, frame: &ShadowFrame) -> i32 {
    let test = frame.get_vreg(inst.a_31t() as usize);
    let payload_pc = inst.pc().wrapping_add_signed(inst.b_31t());
    let payload = inst.packed_switch_payload(payload_pc);

    let index = test as i64 - payload.first_key as i64;
    if index >= 0 && index < payload.targets.len() as i64 {
        payload.targets[index as usize]
    } else {
        3
    }
}

fn do_sparse_switch(inst: &BytecodeCursor, frame: &ShadowFrame) -> i32 {
    let test = frame.get_vreg(inst.a_31t() as usize);
    let payload_pc = inst.pc().wrapping_add_signed(inst.b_31t());
    let payload = inst.sparse_switch_payload(payload_pc);

    match payload.keys.binary_search(&test) {
        Ok(index) => payload.targets[index],
        Err(_) => 3,
    }
}

fn instance_of(vm: &VM, obj: ObjRef, target: sesia_bytecode::ClassId) -> bool {
    vm.program.is_assignable(target, vm.heap.class_of(obj))
}

/// Target selection, callee-frame construction and recursive dispatch
/// for the ten invoke forms. Deposits the callee's return value in the
/// caller's result register.
fn do_invoke(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    kind: InvokeKind,
    is_range: bool,
    access_check: bool,
    result: &mut Value,
) -> bool {
    let method_idx = if is_range { inst.b_3rc() } else { inst.b_35c() };
    let resolved_id = vm.resolve_method(code, ConstPoolIdx(method_idx));
    let resolved = vm.program.method(resolved_id);

    let arg_count = if is_range {
        inst.a_3rc() as usize
    } else {
        inst.a_35c() as usize
    };
    let arg_regs = inst.args_35c();
    let arg_reg = |i: usize| -> usize {
        if is_range {
            inst.c_3rc() as usize + i
        } else {
            arg_regs[i] as usize
        }
    };

    let receiver = if kind == InvokeKind::Static {
        ObjRef::null()
    } else {
        let receiver = frame.get_vreg_reference(arg_reg(0));
        if receiver.is_null() {
            vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
            return false;
        }
        receiver
    };

    let target_id = match kind {
        InvokeKind::Static | InvokeKind::Direct => resolved_id,
        InvokeKind::Virtual => {
            let vtable_index = resolved
                .vtable_index
                .expect("virtual method without vtable index") as usize;
            let receiver_class = vm.heap.class_of(receiver);
            vm.program.class(receiver_class).vtable[vtable_index]
        }
        InvokeKind::Super => {
            let vtable_index = resolved
                .vtable_index
                .expect("virtual method without vtable index") as usize;
            let caller_class = vm.program.method(frame.method_id()).class_id;
            let superclass = vm
                .program
                .class(caller_class)
                .superclass
                .expect("super call without superclass");
            vm.program.class(superclass).vtable[vtable_index]
        }
        InvokeKind::Interface => {
            match find_interface_target(vm, vm.heap.class_of(receiver), &resolved.name) {
                Some(target) => target,
                None => {
                    vm.throw_named(
                        thread,
                        vm.known.no_such_method_error_class,
                        format!("no implementation of {}", vm.display_method(resolved_id)),
                    );
                    return false;
                }
            }
        }
    };

    invoke_target(vm, thread, frame, target_id, arg_count, &arg_reg, access_check, result)
}

/// The quick invoke forms index the receiver's vtable directly instead
/// of going through the pool.
fn do_invoke_virtual_quick(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    is_range: bool,
    result: &mut Value,
) -> bool {
    let vtable_index = if is_range { inst.b_3rc() } else { inst.b_35c() } as usize;

    let arg_count = if is_range {
        inst.a_3rc() as usize
    } else {
        inst.a_35c() as usize
    };
    let arg_regs = inst.args_35c();
    let arg_reg = |i: usize| -> usize {
        if is_range {
            inst.c_3rc() as usize + i
        } else {
            arg_regs[i] as usize
        }
    };

    let receiver = frame.get_vreg_reference(arg_reg(0));
    if receiver.is_null() {
        vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
        return false;
    }

    let receiver_class = vm.heap.class_of(receiver);
    let target_id = vm.program.class(receiver_class).vtable[vtable_index];

    invoke_target(vm, thread, frame, target_id, arg_count, &arg_reg, false, result)
}

fn find_interface_target(vm: &VM, class_id: sesia_bytecode::ClassId, name: &str) -> Option<MethodId> {
    let mut current = Some(class_id);

    while let Some(cls_id) = current {
        let cls = vm.program.class(cls_id);
        for &method_id in &cls.vtable {
            if vm.program.method(method_id).name == name {
                return Some(method_id);
            }
        }
        current = cls.superclass;
    }

    None
}

fn invoke_target(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    target_id: MethodId,
    arg_count: usize,
    arg_reg: &dyn Fn(usize) -> usize,
    access_check: bool,
    result: &mut Value,
) -> bool {
    let target = vm.program.method(target_id);

    if access_check
        && target.is_private
        && target.class_id != vm.program.method(frame.method_id()).class_id
    {
        vm.throw_named(
            thread,
            vm.known.illegal_access_error_class,
            format!("illegal access to {}", vm.display_method(target_id)),
        );
        return false;
    }

    if target.is_static {
        vm.ensure_initialized(target.class_id);
    }

    let callee_code = match &target.code {
        Some(callee_code) => callee_code,
        None => {
            vm.throw_named(
                thread,
                vm.known.no_such_method_error_class,
                format!("method {} has no code", vm.display_method(target_id)),
            );
            return false;
        }
    };

    // The host stack carries the recursion; convert runaway managed
    // call depth into a thrown error before it becomes a native crash.
    if thread.frame_depth() >= vm.flags.max_interpreter_depth() {
        vm.throw_named(
            thread,
            vm.known.stack_overflow_error_class,
            format!("call depth exceeded invoking {}", vm.display_method(target_id)),
        );
        return false;
    }

    let registers_size = callee_code.registers_size();
    let ins_size = callee_code.ins_size() as usize;
    assert_eq!(arg_count, ins_size, "argument count mismatch");

    let mut callee_frame = ShadowFrame::new(target_id, registers_size);
    let first_dest = registers_size as usize - ins_size;
    for i in 0..ins_size {
        callee_frame.copy_register_from(frame, arg_reg(i), first_dest + i);
    }

    let value = execute(vm, thread, target_id, callee_code, &mut callee_frame, Value::default());

    if thread.is_exception_pending() {
        return false;
    }

    *result = value;
    true
}

/// Generic field access, parameterized over scope, access kind and
/// access checking. Float and double reads and writes travel through
/// the int and long kinds, the declared field type keeps them apart.
fn do_field_get(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    scope: FieldScope,
    kind: FieldKind,
    access_check: bool,
) -> bool {
    let (dest, raw) = match scope {
        FieldScope::Instance => {
            let obj = frame.get_vreg_reference(inst.b_22c() as usize);
            if obj.is_null() {
                vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
                return false;
            }
            let field_id = vm.resolve_field(code, ConstPoolIdx(inst.c_22c()));
            let field = vm.program.field(field_id);
            debug_assert!(!field.is_static);
            if access_check && !field_accessible(vm, thread, frame, field_id) {
                return false;
            }
            (inst.a_22c() as usize, vm.heap.instance_field_get(obj, field.slot))
        }
        FieldScope::Static => {
            let field_id = vm.resolve_field(code, ConstPoolIdx(inst.b_21c()));
            let field = vm.program.field(field_id);
            debug_assert!(field.is_static);
            if access_check && !field_accessible(vm, thread, frame, field_id) {
                return false;
            }
            vm.ensure_initialized(field.class_id);
            (inst.a_21c() as usize, vm.static_field_get(field.class_id, field.slot))
        }
    };

    store_field_value(frame, dest, kind, raw);
    true
}

fn do_field_put(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    scope: FieldScope,
    kind: FieldKind,
    access_check: bool,
) -> bool {
    match scope {
        FieldScope::Instance => {
            let obj = frame.get_vreg_reference(inst.b_22c() as usize);
            if obj.is_null() {
                vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
                return false;
            }
            let field_id = vm.resolve_field(code, ConstPoolIdx(inst.c_22c()));
            let field = vm.program.field(field_id);
            debug_assert!(!field.is_static);
            if access_check && !field_accessible(vm, thread, frame, field_id) {
                return false;
            }
            let raw = load_field_value(frame, inst.a_22c() as usize, kind);
            vm.heap.instance_field_put(obj, field.slot, raw);
            if kind == FieldKind::Object {
                vm.heap.record_write(obj);
            }
        }
        FieldScope::Static => {
            let field_id = vm.resolve_field(code, ConstPoolIdx(inst.b_21c()));
            let field = vm.program.field(field_id);
            debug_assert!(field.is_static);
            if access_check && !field_accessible(vm, thread, frame, field_id) {
                return false;
            }
            vm.ensure_initialized(field.class_id);
            let raw = load_field_value(frame, inst.a_21c() as usize, kind);
            vm.static_field_put(field.class_id, field.slot, raw);
        }
    }
    true
}

fn field_accessible(
    vm: &VM,
    thread: &SesiaThread,
    frame: &ShadowFrame,
    field_id: sesia_bytecode::FieldId,
) -> bool {
    let field = vm.program.field(field_id);
    let caller_class = vm.program.method(frame.method_id()).class_id;
    if field.is_private && field.class_id != caller_class {
        vm.throw_named(
            thread,
            vm.known.illegal_access_error_class,
            format!("illegal access to field {}", field.name),
        );
        return false;
    }
    true
}

fn store_field_value(frame: &mut ShadowFrame, dest: usize, kind: FieldKind, raw: u64) {
    match kind {
        FieldKind::Boolean
        | FieldKind::Byte
        | FieldKind::Char
        | FieldKind::Short
        | FieldKind::Int
        | FieldKind::Float => frame.set_vreg(dest, raw as u32 as i32),
        FieldKind::Long | FieldKind::Double => frame.set_vreg_long(dest, raw as i64),
        FieldKind::Object => frame.set_vreg_reference(dest, ObjRef::from_bits(raw as u32)),
    }
}

fn load_field_value(frame: &ShadowFrame, src: usize, kind: FieldKind) -> u64 {
    match kind {
        FieldKind::Boolean => frame.get_vreg(src) as u8 as u64,
        FieldKind::Byte => frame.get_vreg(src) as i8 as i32 as u32 as u64,
        FieldKind::Char => frame.get_vreg(src) as u16 as u64,
        FieldKind::Short => frame.get_vreg(src) as i16 as i32 as u32 as u64,
        FieldKind::Int | FieldKind::Float => frame.get_vreg(src) as u32 as u64,
        FieldKind::Long | FieldKind::Double => frame.get_vreg_long(src) as u64,
        FieldKind::Object => frame.get_vreg_reference(src).to_bits() as u64,
    }
}

/// Quick field forms carry the field slot in the instruction, skipping
/// resolution; the receiver null check stays.
fn do_iget_quick(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    kind: FieldKind,
) -> bool {
    let obj = frame.get_vreg_reference(inst.b_22c() as usize);
    if obj.is_null() {
        vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
        return false;
    }
    let raw = vm.heap.instance_field_get(obj, inst.c_22c());
    store_field_value(frame, inst.a_22c() as usize, kind, raw);
    true
}

fn do_iput_quick(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    kind: FieldKind,
) -> bool {
    let obj = frame.get_vreg_reference(inst.b_22c() as usize);
    if obj.is_null() {
        vm.throw_null_pointer_exception_from_pc(thread, frame.method_id(), code, inst.pc());
        return false;
    }
    let raw = load_field_value(frame, inst.a_22c() as usize, kind);
    vm.heap.instance_field_put(obj, inst.c_22c(), raw);
    if kind == FieldKind::Object {
        vm.heap.record_write(obj);
    }
    true
}

/// Allocates an array of `arg_count` elements filled from the operand
/// registers and deposits it in the result register. Only int and
/// reference element types reach this instruction.
fn do_filled_new_array(
    vm: &VM,
    thread: &SesiaThread,
    frame: &mut ShadowFrame,
    code: &CodeItem,
    inst: &BytecodeCursor,
    is_range: bool,
    access_check: bool,
    result: &mut Value,
) -> bool {
    let type_idx = if is_range { inst.b_3rc() } else { inst.b_35c() };
    let arg_count = if is_range {
        inst.a_3rc() as usize
    } else {
        inst.a_35c() as usize
    };
    let arg_regs = inst.args_35c();
    let arg_reg = |i: usize| -> usize {
        if is_range {
            inst.c_3rc() as usize + i
        } else {
            arg_regs[i] as usize
        }
    };

    let class_id = match vm.resolve_class(
        thread,
        frame.method_id(),
        code,
        ConstPoolIdx(type_idx),
        access_check,
    ) {
        Some(class_id) => class_id,
        None => return false,
    };

    let element = match vm.program.class(class_id).kind {
        ClassKind::Array(element) => element,
        ClassKind::Object => panic!("array class expected"),
    };

    match element {
        ElementType::Int | ElementType::Class(_) => {}
        _ => {
            vm.throw_named(
                thread,
                vm.known.internal_error_class,
                "filled-new-array only supports int and reference elements".to_string(),
            );
            return false;
        }
    }

    let array = vm.alloc_array(thread, class_id, arg_count as i32);
    if array.is_null() {
        return false;
    }

    for i in 0..arg_count {
        match element {
            ElementType::Int => {
                vm.heap
                    .array_put_int(array, i as i32, frame.get_vreg(arg_reg(i)));
            }
            ElementType::Class(_) => {
                vm.heap.array_put_object(
                    array,
                    i as i32,
                    frame.get_vreg_reference(arg_reg(i)),
                );
            }
            _ => unreachable!(),
        }
    }

    result.set_obj(array);
    true
}

fn throw_array_index_exception(vm: &VM, thread: &SesiaThread, length: i32, index: i32) {
    vm.throw_named(
        thread,
        vm.known.array_index_out_of_bounds_exception_class,
        format!("length={}; index={}", length, index),
    );
}

fn trace_execution(vm: &VM, method_id: MethodId, insns: &[u16], pc: u32) {
    println!(
        "{}@{}: {}",
        vm.display_method(method_id),
        pc,
        display_instruction(insns, pc)
    );
}

fn unexpected_opcode(vm: &VM, method_id: MethodId, pc: u32, byte: u8) -> ! {
    panic!(
        "unexpected opcode 0x{:02x} at {}:{}",
        byte,
        vm.display_method(method_id),
        pc
    );
}
