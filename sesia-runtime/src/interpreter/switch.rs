use std::sync::atomic::{fence, Ordering};

use sesia_bytecode::{BytecodeCursor, ConstPoolIdx, ElementType, FieldKind, Opcode};

use super::*;
use crate::safepoint::check_suspend;

/// The dispatch loop. Decodes the opcode at the cursor and executes its
/// handler; every handler either advances the cursor by the instruction
/// width, relocates it by a signed code-unit displacement, or raises a
/// pending exception and routes through the unwind helper.
pub(super) fn execute_switch_impl(
    vm: &VM,
    thread: &SesiaThread,
    method_id: MethodId,
    code: &CodeItem,
    frame: &mut ShadowFrame,
    mut result_register: Value,
) -> Value {
    let instrumentation = &vm.instrumentation;
    let do_access_check = vm.flags.access_checks;

    // Cache the receiver outside the register file so it stays a root
    // even after its register is overwritten.
    frame.set_this_object(frame.arg_object(code.ins_size()));

    let start_pc = frame.pc();
    if start_pc == 0 {
        // Entering the method, as opposed to resuming at a saved offset.
        if instrumentation.has_method_entry_listeners() {
            instrumentation.method_entry_event(method_id);
        }
    }

    let insns = code.insns();
    let mut inst = BytecodeCursor::new(insns, start_pc);

    macro_rules! handle_pending_exception {
        () => {{
            assert!(thread.is_exception_pending());
            match find_exception_handler(vm, thread, frame, code, inst.pc()) {
                Some(handler_pc) => {
                    let displacement = handler_pc as i32 - inst.pc() as i32;
                    inst.branch(displacement);
                }
                // Handled in caller.
                None => return Value::default(),
            }
        }};
    }

    macro_rules! possibly_handle_pending_exception {
        ($is_pending:expr, $width:expr) => {{
            if $is_pending {
                handle_pending_exception!();
            } else {
                inst.advance($width);
            }
        }};
    }

    loop {
        let pc = inst.pc();
        frame.set_pc(pc);

        if thread.test_all_flags() {
            let had_pending = thread.is_exception_pending();
            check_suspend(vm, thread);
            // The suspend path may have injected a cancellation
            // exception; route it before decoding.
            if !had_pending && thread.is_exception_pending() {
                handle_pending_exception!();
                continue;
            }
        }

        if instrumentation.has_pc_listeners() {
            instrumentation.pc_moved_event(method_id, pc);
        }

        if vm.flags.trace_interpreter {
            trace_execution(vm, method_id, insns, pc);
        }

        let opcode = match inst.opcode() {
            Ok(opcode) => opcode,
            Err(byte) => unexpected_opcode(vm, method_id, pc, byte),
        };

        match opcode {
            Opcode::Nop => {
                // Payload tables read as nop; step over the whole table.
                inst.advance(inst.size_in_code_units());
            }

            Opcode::Move => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::MoveFrom16 => {
                frame.set_vreg(
                    inst.a_22x() as usize,
                    frame.get_vreg(inst.b_22x() as usize),
                );
                inst.advance(2);
            }
            Opcode::Move16 => {
                frame.set_vreg(
                    inst.a_32x() as usize,
                    frame.get_vreg(inst.b_32x() as usize),
                );
                inst.advance(3);
            }
            Opcode::MoveWide => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    frame.get_vreg_long(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::MoveWideFrom16 => {
                frame.set_vreg_long(
                    inst.a_22x() as usize,
                    frame.get_vreg_long(inst.b_22x() as usize),
                );
                inst.advance(2);
            }
            Opcode::MoveWide16 => {
                frame.set_vreg_long(
                    inst.a_32x() as usize,
                    frame.get_vreg_long(inst.b_32x() as usize),
                );
                inst.advance(3);
            }
            Opcode::MoveObject => {
                frame.set_vreg_reference(
                    inst.a_12x() as usize,
                    frame.get_vreg_reference(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::MoveObjectFrom16 => {
                frame.set_vreg_reference(
                    inst.a_22x() as usize,
                    frame.get_vreg_reference(inst.b_22x() as usize),
                );
                inst.advance(2);
            }
            Opcode::MoveObject16 => {
                frame.set_vreg_reference(
                    inst.a_32x() as usize,
                    frame.get_vreg_reference(inst.b_32x() as usize),
                );
                inst.advance(3);
            }

            Opcode::MoveResult => {
                frame.set_vreg(inst.a_11x() as usize, result_register.int());
                inst.advance(1);
            }
            Opcode::MoveResultWide => {
                frame.set_vreg_long(inst.a_11x() as usize, result_register.long());
                inst.advance(1);
            }
            Opcode::MoveResultObject => {
                frame.set_vreg_reference(inst.a_11x() as usize, result_register.obj());
                inst.advance(1);
            }
            Opcode::MoveException => {
                let exception = thread.clear_pending_exception();
                frame.set_vreg_reference(inst.a_11x() as usize, exception);
                inst.advance(1);
            }

            Opcode::ReturnVoid => {
                let result = Value::default();
                if instrumentation.has_method_exit_listeners() {
                    instrumentation.method_exit_event(method_id, inst.pc(), result);
                }
                return result;
            }
            Opcode::ReturnVoidBarrier => {
                // Order prior stores for the caller before returning.
                fence(Ordering::Release);
                let result = Value::default();
                if instrumentation.has_method_exit_listeners() {
                    instrumentation.method_exit_event(method_id, inst.pc(), result);
                }
                return result;
            }
            Opcode::Return => {
                let mut result = Value::default();
                result.set_int(frame.get_vreg(inst.a_11x() as usize));
                if instrumentation.has_method_exit_listeners() {
                    instrumentation.method_exit_event(method_id, inst.pc(), result);
                }
                return result;
            }
            Opcode::ReturnWide => {
                let mut result = Value::default();
                result.set_long(frame.get_vreg_long(inst.a_11x() as usize));
                if instrumentation.has_method_exit_listeners() {
                    instrumentation.method_exit_event(method_id, inst.pc(), result);
                }
                return result;
            }
            Opcode::ReturnObject => {
                let mut result = Value::default();
                result.set_obj(frame.get_vreg_reference(inst.a_11x() as usize));
                if instrumentation.has_method_exit_listeners() {
                    instrumentation.method_exit_event(method_id, inst.pc(), result);
                }
                return result;
            }

            Opcode::Const4 => {
                let dst = inst.a_11n() as usize;
                let val = inst.b_11n();
                frame.set_vreg(dst, val);
                if val == 0 {
                    frame.tag_null(dst);
                }
                inst.advance(1);
            }
            Opcode::Const16 => {
                let dst = inst.a_21s() as usize;
                let val = inst.b_21s();
                frame.set_vreg(dst, val);
                if val == 0 {
                    frame.tag_null(dst);
                }
                inst.advance(2);
            }
            Opcode::Const => {
                let dst = inst.a_31i() as usize;
                let val = inst.b_31i();
                frame.set_vreg(dst, val);
                if val == 0 {
                    frame.tag_null(dst);
                }
                inst.advance(3);
            }
            Opcode::ConstHigh16 => {
                let dst = inst.a_21h() as usize;
                let val = (inst.b_21h() as i32) << 16;
                frame.set_vreg(dst, val);
                if val == 0 {
                    frame.tag_null(dst);
                }
                inst.advance(2);
            }
            Opcode::ConstWide16 => {
                frame.set_vreg_long(inst.a_21s() as usize, inst.b_21s() as i64);
                inst.advance(2);
            }
            Opcode::ConstWide32 => {
                frame.set_vreg_long(inst.a_31i() as usize, inst.b_31i() as i64);
                inst.advance(3);
            }
            Opcode::ConstWide => {
                frame.set_vreg_long(inst.a_51l() as usize, inst.b_51l());
                inst.advance(5);
            }
            Opcode::ConstWideHigh16 => {
                frame.set_vreg_long(
                    inst.a_21h() as usize,
                    ((inst.b_21h() as u64) << 48) as i64,
                );
                inst.advance(2);
            }

            Opcode::ConstString => {
                let s = vm.resolve_string(thread, code, ConstPoolIdx(inst.b_21c()));
                if s.is_null() {
                    handle_pending_exception!();
                } else {
                    frame.set_vreg_reference(inst.a_21c() as usize, s);
                    inst.advance(2);
                }
            }
            Opcode::ConstStringJumbo => {
                let s = vm.resolve_string(thread, code, ConstPoolIdx(inst.b_31c()));
                if s.is_null() {
                    handle_pending_exception!();
                } else {
                    frame.set_vreg_reference(inst.a_31c() as usize, s);
                    inst.advance(3);
                }
            }
            Opcode::ConstClass => {
                match vm.resolve_class(thread, method_id, code, ConstPoolIdx(inst.b_21c()), do_access_check) {
                    None => handle_pending_exception!(),
                    Some(class_id) => {
                        let mirror = vm.class_mirror(thread, class_id);
                        if mirror.is_null() {
                            handle_pending_exception!();
                        } else {
                            frame.set_vreg_reference(inst.a_21c() as usize, mirror);
                            inst.advance(2);
                        }
                    }
                }
            }

            Opcode::MonitorEnter => {
                let obj = frame.get_vreg_reference(inst.a_11x() as usize);
                if obj.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    vm.monitors.enter(vm, thread, obj);
                    possibly_handle_pending_exception!(thread.is_exception_pending(), 1);
                }
            }
            Opcode::MonitorExit => {
                let obj = frame.get_vreg_reference(inst.a_11x() as usize);
                if obj.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    if !vm.monitors.exit(thread, obj) {
                        vm.throw_named(
                            thread,
                            vm.known.illegal_monitor_state_exception_class,
                            "monitor release of unowned object".to_string(),
                        );
                    }
                    possibly_handle_pending_exception!(thread.is_exception_pending(), 1);
                }
            }

            Opcode::CheckCast => {
                match vm.resolve_class(thread, method_id, code, ConstPoolIdx(inst.b_21c()), do_access_check) {
                    None => handle_pending_exception!(),
                    Some(class_id) => {
                        let obj = frame.get_vreg_reference(inst.a_21c() as usize);
                        if !obj.is_null() && !instance_of(vm, obj, class_id) {
                            let source = vm.program.class(vm.heap.class_of(obj)).name.clone();
                            let target = vm.program.class(class_id).name.clone();
                            vm.throw_named(
                                thread,
                                vm.known.class_cast_exception_class,
                                format!("{} cannot be cast to {}", source, target),
                            );
                            handle_pending_exception!();
                        } else {
                            inst.advance(2);
                        }
                    }
                }
            }
            Opcode::InstanceOf => {
                match vm.resolve_class(thread, method_id, code, ConstPoolIdx(inst.c_22c()), do_access_check) {
                    None => handle_pending_exception!(),
                    Some(class_id) => {
                        let obj = frame.get_vreg_reference(inst.b_22c() as usize);
                        let is_instance = !obj.is_null() && instance_of(vm, obj, class_id);
                        frame.set_vreg(inst.a_22c() as usize, is_instance as i32);
                        inst.advance(2);
                    }
                }
            }
            Opcode::ArrayLength => {
                let array = frame.get_vreg_reference(inst.b_12x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    frame.set_vreg(inst.a_12x() as usize, vm.heap.array_length(array));
                    inst.advance(1);
                }
            }

            Opcode::NewInstance => {
                match vm.resolve_class(thread, method_id, code, ConstPoolIdx(inst.b_21c()), do_access_check) {
                    None => handle_pending_exception!(),
                    Some(class_id) => {
                        let obj = vm.alloc_instance(thread, class_id);
                        if obj.is_null() {
                            handle_pending_exception!();
                        } else {
                            frame.set_vreg_reference(inst.a_21c() as usize, obj);
                            inst.advance(2);
                        }
                    }
                }
            }
            Opcode::NewArray => {
                let length = frame.get_vreg(inst.b_22c() as usize);
                match vm.resolve_class(thread, method_id, code, ConstPoolIdx(inst.c_22c()), do_access_check) {
                    None => handle_pending_exception!(),
                    Some(class_id) => {
                        let obj = vm.alloc_array(thread, class_id, length);
                        if obj.is_null() {
                            handle_pending_exception!();
                        } else {
                            frame.set_vreg_reference(inst.a_22c() as usize, obj);
                            inst.advance(2);
                        }
                    }
                }
            }
            Opcode::FilledNewArray => {
                let success = do_filled_new_array(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::FilledNewArrayRange => {
                let success = do_filled_new_array(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::FillArrayData => {
                let array = frame.get_vreg_reference(inst.a_31t() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let payload_pc = inst.pc().wrapping_add_signed(inst.b_31t());
                    let payload = inst.array_data_payload(payload_pc);
                    let length = vm.heap.array_length(array);
                    if payload.element_count as i32 > length {
                        throw_array_index_exception(vm, thread, length, payload.element_count as i32);
                        handle_pending_exception!();
                    } else {
                        vm.heap.fill_array(array, &payload);
                        inst.advance(3);
                    }
                }
            }

            Opcode::Throw => {
                let exception = frame.get_vreg_reference(inst.a_11x() as usize);
                if exception.is_null() {
                    vm.throw_named(
                        thread,
                        vm.known.null_pointer_exception_class,
                        "throw with null exception".to_string(),
                    );
                } else {
                    thread.set_pending_exception(exception);
                }
                handle_pending_exception!();
            }

            Opcode::Goto => {
                inst.branch(inst.a_10t());
            }
            Opcode::Goto16 => {
                inst.branch(inst.a_20t());
            }
            Opcode::Goto32 => {
                inst.branch(inst.a_30t());
            }
            Opcode::PackedSwitch => {
                let displacement = do_packed_switch(&inst, frame);
                inst.branch(displacement);
            }
            Opcode::SparseSwitch => {
                let displacement = do_sparse_switch(&inst, frame);
                inst.branch(displacement);
            }

            Opcode::CmplFloat => {
                let val1 = frame.get_vreg_float(inst.b_23x() as usize);
                let val2 = frame.get_vreg_float(inst.c_23x() as usize);
                let result = if val1 > val2 {
                    1
                } else if val1 == val2 {
                    0
                } else {
                    -1
                };
                frame.set_vreg(inst.a_23x() as usize, result);
                inst.advance(2);
            }
            Opcode::CmpgFloat => {
                let val1 = frame.get_vreg_float(inst.b_23x() as usize);
                let val2 = frame.get_vreg_float(inst.c_23x() as usize);
                let result = if val1 < val2 {
                    -1
                } else if val1 == val2 {
                    0
                } else {
                    1
                };
                frame.set_vreg(inst.a_23x() as usize, result);
                inst.advance(2);
            }
            Opcode::CmplDouble => {
                let val1 = frame.get_vreg_double(inst.b_23x() as usize);
                let val2 = frame.get_vreg_double(inst.c_23x() as usize);
                let result = if val1 > val2 {
                    1
                } else if val1 == val2 {
                    0
                } else {
                    -1
                };
                frame.set_vreg(inst.a_23x() as usize, result);
                inst.advance(2);
            }
            Opcode::CmpgDouble => {
                let val1 = frame.get_vreg_double(inst.b_23x() as usize);
                let val2 = frame.get_vreg_double(inst.c_23x() as usize);
                let result = if val1 < val2 {
                    -1
                } else if val1 == val2 {
                    0
                } else {
                    1
                };
                frame.set_vreg(inst.a_23x() as usize, result);
                inst.advance(2);
            }
            Opcode::CmpLong => {
                let val1 = frame.get_vreg_long(inst.b_23x() as usize);
                let val2 = frame.get_vreg_long(inst.c_23x() as usize);
                let result = if val1 > val2 {
                    1
                } else if val1 == val2 {
                    0
                } else {
                    -1
                };
                frame.set_vreg(inst.a_23x() as usize, result);
                inst.advance(2);
            }

            Opcode::IfEq => {
                if frame.get_vreg(inst.a_22t() as usize) == frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfNe => {
                if frame.get_vreg(inst.a_22t() as usize) != frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfLt => {
                if frame.get_vreg(inst.a_22t() as usize) < frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfGe => {
                if frame.get_vreg(inst.a_22t() as usize) >= frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfGt => {
                if frame.get_vreg(inst.a_22t() as usize) > frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfLe => {
                if frame.get_vreg(inst.a_22t() as usize) <= frame.get_vreg(inst.b_22t() as usize) {
                    inst.branch(inst.c_22t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfEqz => {
                if frame.get_vreg(inst.a_21t() as usize) == 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfNez => {
                if frame.get_vreg(inst.a_21t() as usize) != 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfLtz => {
                if frame.get_vreg(inst.a_21t() as usize) < 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfGez => {
                if frame.get_vreg(inst.a_21t() as usize) >= 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfGtz => {
                if frame.get_vreg(inst.a_21t() as usize) > 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }
            Opcode::IfLez => {
                if frame.get_vreg(inst.a_21t() as usize) <= 0 {
                    inst.branch(inst.b_21t());
                } else {
                    inst.advance(2);
                }
            }

            Opcode::AgetBoolean => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg(
                            inst.a_23x() as usize,
                            vm.heap.array_get_boolean(array, index) as i32,
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AgetByte => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg(
                            inst.a_23x() as usize,
                            vm.heap.array_get_byte(array, index) as i32,
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AgetChar => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg(
                            inst.a_23x() as usize,
                            vm.heap.array_get_char(array, index) as i32,
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AgetShort => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg(
                            inst.a_23x() as usize,
                            vm.heap.array_get_short(array, index) as i32,
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::Aget => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg(inst.a_23x() as usize, vm.heap.array_get_int(array, index));
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AgetWide => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg_long(
                            inst.a_23x() as usize,
                            vm.heap.array_get_long(array, index),
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AgetObject => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        frame.set_vreg_reference(
                            inst.a_23x() as usize,
                            vm.heap.array_get_object(array, index),
                        );
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }

            Opcode::AputBoolean => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg(inst.a_23x() as usize) as u8;
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_boolean(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AputByte => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg(inst.a_23x() as usize) as i8;
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_byte(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AputChar => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg(inst.a_23x() as usize) as u16;
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_char(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AputShort => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg(inst.a_23x() as usize) as i16;
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_short(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::Aput => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg(inst.a_23x() as usize);
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_int(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AputWide => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let value = frame.get_vreg_long(inst.a_23x() as usize);
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    if vm.heap.is_valid_index(array, index) {
                        vm.heap.array_put_long(array, index, value);
                        inst.advance(2);
                    } else {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    }
                }
            }
            Opcode::AputObject => {
                let array = frame.get_vreg_reference(inst.b_23x() as usize);
                if array.is_null() {
                    vm.throw_null_pointer_exception_from_pc(thread, method_id, code, inst.pc());
                    handle_pending_exception!();
                } else {
                    let index = frame.get_vreg(inst.c_23x() as usize);
                    let value = frame.get_vreg_reference(inst.a_23x() as usize);
                    if !vm.heap.is_valid_index(array, index) {
                        throw_array_index_exception(vm, thread, vm.heap.array_length(array), index);
                        handle_pending_exception!();
                    } else if !array_store_allowed(vm, array, value) {
                        let value_class = vm.program.class(vm.heap.class_of(value)).name.clone();
                        let array_class =
                            vm.program.class(vm.heap.class_of(array)).name.clone();
                        vm.throw_named(
                            thread,
                            vm.known.array_store_exception_class,
                            format!("{} cannot be stored in {}", value_class, array_class),
                        );
                        handle_pending_exception!();
                    } else {
                        vm.heap.array_put_object(array, index, value);
                        inst.advance(2);
                    }
                }
            }

            Opcode::IgetBoolean => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Boolean,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetByte => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Byte,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetChar => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Char,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetShort => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Short,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::Iget => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Int,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetWide => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Long,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetObject => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Object,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetQuick => {
                let success = do_iget_quick(vm, thread, frame, code, &inst, FieldKind::Int);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetWideQuick => {
                let success = do_iget_quick(vm, thread, frame, code, &inst, FieldKind::Long);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IgetObjectQuick => {
                let success = do_iget_quick(vm, thread, frame, code, &inst, FieldKind::Object);
                possibly_handle_pending_exception!(!success, 2);
            }

            Opcode::SgetBoolean => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Boolean,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SgetByte => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Byte,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SgetChar => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Char,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SgetShort => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Short,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::Sget => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Int,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SgetWide => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Long,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SgetObject => {
                let success = do_field_get(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Object,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }

            Opcode::IputBoolean => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Boolean,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputByte => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Byte,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputChar => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Char,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputShort => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Short,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::Iput => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Int,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputWide => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Long,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputObject => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Instance,
                    FieldKind::Object,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputQuick => {
                let success = do_iput_quick(vm, thread, frame, code, &inst, FieldKind::Int);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputWideQuick => {
                let success = do_iput_quick(vm, thread, frame, code, &inst, FieldKind::Long);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::IputObjectQuick => {
                let success = do_iput_quick(vm, thread, frame, code, &inst, FieldKind::Object);
                possibly_handle_pending_exception!(!success, 2);
            }

            Opcode::SputBoolean => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Boolean,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SputByte => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Byte,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SputChar => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Char,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SputShort => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Short,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::Sput => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Int,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SputWide => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Long,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::SputObject => {
                let success = do_field_put(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    FieldScope::Static,
                    FieldKind::Object,
                    do_access_check,
                );
                possibly_handle_pending_exception!(!success, 2);
            }

            Opcode::InvokeVirtual => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Virtual,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeVirtualRange => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Virtual,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeSuper => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Super,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeSuperRange => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Super,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeDirect => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Direct,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeDirectRange => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Direct,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeInterface => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Interface,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeInterfaceRange => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Interface,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeStatic => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Static,
                    false,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeStaticRange => {
                let success = do_invoke(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    InvokeKind::Static,
                    true,
                    do_access_check,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeVirtualQuick => {
                let success = do_invoke_virtual_quick(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    false,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }
            Opcode::InvokeVirtualRangeQuick => {
                let success = do_invoke_virtual_quick(
                    vm,
                    thread,
                    frame,
                    code,
                    &inst,
                    true,
                    &mut result_register,
                );
                possibly_handle_pending_exception!(!success, 3);
            }

            Opcode::NegInt => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize).wrapping_neg(),
                );
                inst.advance(1);
            }
            Opcode::NotInt => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    !frame.get_vreg(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::NegLong => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    frame.get_vreg_long(inst.b_12x() as usize).wrapping_neg(),
                );
                inst.advance(1);
            }
            Opcode::NotLong => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    !frame.get_vreg_long(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::NegFloat => {
                frame.set_vreg_float(
                    inst.a_12x() as usize,
                    -frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::NegDouble => {
                frame.set_vreg_double(
                    inst.a_12x() as usize,
                    -frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }

            Opcode::IntToLong => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as i64,
                );
                inst.advance(1);
            }
            Opcode::IntToFloat => {
                frame.set_vreg_float(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as f32,
                );
                inst.advance(1);
            }
            Opcode::IntToDouble => {
                frame.set_vreg_double(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as f64,
                );
                inst.advance(1);
            }
            Opcode::LongToInt => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg_long(inst.b_12x() as usize) as i32,
                );
                inst.advance(1);
            }
            Opcode::LongToFloat => {
                frame.set_vreg_float(
                    inst.a_12x() as usize,
                    frame.get_vreg_long(inst.b_12x() as usize) as f32,
                );
                inst.advance(1);
            }
            Opcode::LongToDouble => {
                frame.set_vreg_double(
                    inst.a_12x() as usize,
                    frame.get_vreg_long(inst.b_12x() as usize) as f64,
                );
                inst.advance(1);
            }
            Opcode::FloatToInt => {
                // NaN becomes zero, out-of-range values saturate.
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg_float(inst.b_12x() as usize) as i32,
                );
                inst.advance(1);
            }
            Opcode::FloatToLong => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    frame.get_vreg_float(inst.b_12x() as usize) as i64,
                );
                inst.advance(1);
            }
            Opcode::FloatToDouble => {
                frame.set_vreg_double(
                    inst.a_12x() as usize,
                    frame.get_vreg_float(inst.b_12x() as usize) as f64,
                );
                inst.advance(1);
            }
            Opcode::DoubleToInt => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg_double(inst.b_12x() as usize) as i32,
                );
                inst.advance(1);
            }
            Opcode::DoubleToLong => {
                frame.set_vreg_long(
                    inst.a_12x() as usize,
                    frame.get_vreg_double(inst.b_12x() as usize) as i64,
                );
                inst.advance(1);
            }
            Opcode::DoubleToFloat => {
                frame.set_vreg_float(
                    inst.a_12x() as usize,
                    frame.get_vreg_double(inst.b_12x() as usize) as f32,
                );
                inst.advance(1);
            }
            Opcode::IntToByte => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as i8 as i32,
                );
                inst.advance(1);
            }
            Opcode::IntToChar => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as u16 as i32,
                );
                inst.advance(1);
            }
            Opcode::IntToShort => {
                frame.set_vreg(
                    inst.a_12x() as usize,
                    frame.get_vreg(inst.b_12x() as usize) as i16 as i32,
                );
                inst.advance(1);
            }

            Opcode::AddInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg(inst.b_23x() as usize)
                        .wrapping_add(frame.get_vreg(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::SubInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg(inst.b_23x() as usize)
                        .wrapping_sub(frame.get_vreg(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::MulInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg(inst.b_23x() as usize)
                        .wrapping_mul(frame.get_vreg(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::DivInt => {
                let dividend = frame.get_vreg(inst.b_23x() as usize);
                let divisor = frame.get_vreg(inst.c_23x() as usize);
                let success =
                    do_int_divide(vm, thread, frame, inst.a_23x() as usize, dividend, divisor);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::RemInt => {
                let dividend = frame.get_vreg(inst.b_23x() as usize);
                let divisor = frame.get_vreg(inst.c_23x() as usize);
                let success =
                    do_int_remainder(vm, thread, frame, inst.a_23x() as usize, dividend, divisor);
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::AndInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame.get_vreg(inst.b_23x() as usize) & frame.get_vreg(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::OrInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame.get_vreg(inst.b_23x() as usize) | frame.get_vreg(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::XorInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame.get_vreg(inst.b_23x() as usize) ^ frame.get_vreg(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::ShlInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame.get_vreg(inst.b_23x() as usize)
                        << (frame.get_vreg(inst.c_23x() as usize) & 0x1f),
                );
                inst.advance(2);
            }
            Opcode::ShrInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    frame.get_vreg(inst.b_23x() as usize)
                        >> (frame.get_vreg(inst.c_23x() as usize) & 0x1f),
                );
                inst.advance(2);
            }
            Opcode::UshrInt => {
                frame.set_vreg(
                    inst.a_23x() as usize,
                    ((frame.get_vreg(inst.b_23x() as usize) as u32)
                        >> (frame.get_vreg(inst.c_23x() as usize) & 0x1f))
                        as i32,
                );
                inst.advance(2);
            }

            Opcode::AddLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg_long(inst.b_23x() as usize)
                        .wrapping_add(frame.get_vreg_long(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::SubLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg_long(inst.b_23x() as usize)
                        .wrapping_sub(frame.get_vreg_long(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::MulLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame
                        .get_vreg_long(inst.b_23x() as usize)
                        .wrapping_mul(frame.get_vreg_long(inst.c_23x() as usize)),
                );
                inst.advance(2);
            }
            Opcode::DivLong => {
                let dividend = frame.get_vreg_long(inst.b_23x() as usize);
                let divisor = frame.get_vreg_long(inst.c_23x() as usize);
                do_long_divide(vm, thread, frame, inst.a_23x() as usize, dividend, divisor);
                possibly_handle_pending_exception!(thread.is_exception_pending(), 2);
            }
            Opcode::RemLong => {
                let dividend = frame.get_vreg_long(inst.b_23x() as usize);
                let divisor = frame.get_vreg_long(inst.c_23x() as usize);
                do_long_remainder(vm, thread, frame, inst.a_23x() as usize, dividend, divisor);
                possibly_handle_pending_exception!(thread.is_exception_pending(), 2);
            }
            Opcode::AndLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame.get_vreg_long(inst.b_23x() as usize)
                        & frame.get_vreg_long(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::OrLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame.get_vreg_long(inst.b_23x() as usize)
                        | frame.get_vreg_long(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::XorLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame.get_vreg_long(inst.b_23x() as usize)
                        ^ frame.get_vreg_long(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::ShlLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame.get_vreg_long(inst.b_23x() as usize)
                        << (frame.get_vreg(inst.c_23x() as usize) & 0x3f),
                );
                inst.advance(2);
            }
            Opcode::ShrLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    frame.get_vreg_long(inst.b_23x() as usize)
                        >> (frame.get_vreg(inst.c_23x() as usize) & 0x3f),
                );
                inst.advance(2);
            }
            Opcode::UshrLong => {
                frame.set_vreg_long(
                    inst.a_23x() as usize,
                    ((frame.get_vreg_long(inst.b_23x() as usize) as u64)
                        >> (frame.get_vreg(inst.c_23x() as usize) & 0x3f))
                        as i64,
                );
                inst.advance(2);
            }

            Opcode::AddFloat => {
                frame.set_vreg_float(
                    inst.a_23x() as usize,
                    frame.get_vreg_float(inst.b_23x() as usize)
                        + frame.get_vreg_float(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::SubFloat => {
                frame.set_vreg_float(
                    inst.a_23x() as usize,
                    frame.get_vreg_float(inst.b_23x() as usize)
                        - frame.get_vreg_float(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::MulFloat => {
                frame.set_vreg_float(
                    inst.a_23x() as usize,
                    frame.get_vreg_float(inst.b_23x() as usize)
                        * frame.get_vreg_float(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::DivFloat => {
                frame.set_vreg_float(
                    inst.a_23x() as usize,
                    frame.get_vreg_float(inst.b_23x() as usize)
                        / frame.get_vreg_float(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::RemFloat => {
                frame.set_vreg_float(
                    inst.a_23x() as usize,
                    frame.get_vreg_float(inst.b_23x() as usize)
                        % frame.get_vreg_float(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::AddDouble => {
                frame.set_vreg_double(
                    inst.a_23x() as usize,
                    frame.get_vreg_double(inst.b_23x() as usize)
                        + frame.get_vreg_double(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::SubDouble => {
                frame.set_vreg_double(
                    inst.a_23x() as usize,
                    frame.get_vreg_double(inst.b_23x() as usize)
                        - frame.get_vreg_double(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::MulDouble => {
                frame.set_vreg_double(
                    inst.a_23x() as usize,
                    frame.get_vreg_double(inst.b_23x() as usize)
                        * frame.get_vreg_double(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::DivDouble => {
                frame.set_vreg_double(
                    inst.a_23x() as usize,
                    frame.get_vreg_double(inst.b_23x() as usize)
                        / frame.get_vreg_double(inst.c_23x() as usize),
                );
                inst.advance(2);
            }
            Opcode::RemDouble => {
                frame.set_vreg_double(
                    inst.a_23x() as usize,
                    frame.get_vreg_double(inst.b_23x() as usize)
                        % frame.get_vreg_double(inst.c_23x() as usize),
                );
                inst.advance(2);
            }

            Opcode::AddInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame
                        .get_vreg(vreg_a)
                        .wrapping_add(frame.get_vreg(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::SubInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame
                        .get_vreg(vreg_a)
                        .wrapping_sub(frame.get_vreg(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::MulInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame
                        .get_vreg(vreg_a)
                        .wrapping_mul(frame.get_vreg(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::DivInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                let dividend = frame.get_vreg(vreg_a);
                let divisor = frame.get_vreg(inst.b_12x() as usize);
                let success = do_int_divide(vm, thread, frame, vreg_a, dividend, divisor);
                possibly_handle_pending_exception!(!success, 1);
            }
            Opcode::RemInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                let dividend = frame.get_vreg(vreg_a);
                let divisor = frame.get_vreg(inst.b_12x() as usize);
                let success = do_int_remainder(vm, thread, frame, vreg_a, dividend, divisor);
                possibly_handle_pending_exception!(!success, 1);
            }
            Opcode::AndInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame.get_vreg(vreg_a) & frame.get_vreg(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::OrInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame.get_vreg(vreg_a) | frame.get_vreg(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::XorInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame.get_vreg(vreg_a) ^ frame.get_vreg(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::ShlInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame.get_vreg(vreg_a) << (frame.get_vreg(inst.b_12x() as usize) & 0x1f),
                );
                inst.advance(1);
            }
            Opcode::ShrInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    frame.get_vreg(vreg_a) >> (frame.get_vreg(inst.b_12x() as usize) & 0x1f),
                );
                inst.advance(1);
            }
            Opcode::UshrInt2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg(
                    vreg_a,
                    ((frame.get_vreg(vreg_a) as u32)
                        >> (frame.get_vreg(inst.b_12x() as usize) & 0x1f))
                        as i32,
                );
                inst.advance(1);
            }

            Opcode::AddLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame
                        .get_vreg_long(vreg_a)
                        .wrapping_add(frame.get_vreg_long(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::SubLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame
                        .get_vreg_long(vreg_a)
                        .wrapping_sub(frame.get_vreg_long(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::MulLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame
                        .get_vreg_long(vreg_a)
                        .wrapping_mul(frame.get_vreg_long(inst.b_12x() as usize)),
                );
                inst.advance(1);
            }
            Opcode::DivLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                let dividend = frame.get_vreg_long(vreg_a);
                let divisor = frame.get_vreg_long(inst.b_12x() as usize);
                do_long_divide(vm, thread, frame, vreg_a, dividend, divisor);
                possibly_handle_pending_exception!(thread.is_exception_pending(), 1);
            }
            Opcode::RemLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                let dividend = frame.get_vreg_long(vreg_a);
                let divisor = frame.get_vreg_long(inst.b_12x() as usize);
                do_long_remainder(vm, thread, frame, vreg_a, dividend, divisor);
                possibly_handle_pending_exception!(thread.is_exception_pending(), 1);
            }
            Opcode::AndLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame.get_vreg_long(vreg_a) & frame.get_vreg_long(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::OrLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame.get_vreg_long(vreg_a) | frame.get_vreg_long(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::XorLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame.get_vreg_long(vreg_a) ^ frame.get_vreg_long(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::ShlLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame.get_vreg_long(vreg_a)
                        << (frame.get_vreg(inst.b_12x() as usize) & 0x3f),
                );
                inst.advance(1);
            }
            Opcode::ShrLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    frame.get_vreg_long(vreg_a)
                        >> (frame.get_vreg(inst.b_12x() as usize) & 0x3f),
                );
                inst.advance(1);
            }
            Opcode::UshrLong2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_long(
                    vreg_a,
                    ((frame.get_vreg_long(vreg_a) as u64)
                        >> (frame.get_vreg(inst.b_12x() as usize) & 0x3f))
                        as i64,
                );
                inst.advance(1);
            }

            Opcode::AddFloat2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_float(
                    vreg_a,
                    frame.get_vreg_float(vreg_a) + frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::SubFloat2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_float(
                    vreg_a,
                    frame.get_vreg_float(vreg_a) - frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::MulFloat2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_float(
                    vreg_a,
                    frame.get_vreg_float(vreg_a) * frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::DivFloat2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_float(
                    vreg_a,
                    frame.get_vreg_float(vreg_a) / frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::RemFloat2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_float(
                    vreg_a,
                    frame.get_vreg_float(vreg_a) % frame.get_vreg_float(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::AddDouble2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_double(
                    vreg_a,
                    frame.get_vreg_double(vreg_a) + frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::SubDouble2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_double(
                    vreg_a,
                    frame.get_vreg_double(vreg_a) - frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::MulDouble2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_double(
                    vreg_a,
                    frame.get_vreg_double(vreg_a) * frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::DivDouble2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_double(
                    vreg_a,
                    frame.get_vreg_double(vreg_a) / frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }
            Opcode::RemDouble2Addr => {
                let vreg_a = inst.a_12x() as usize;
                frame.set_vreg_double(
                    vreg_a,
                    frame.get_vreg_double(vreg_a) % frame.get_vreg_double(inst.b_12x() as usize),
                );
                inst.advance(1);
            }

            Opcode::AddIntLit16 => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    frame
                        .get_vreg(inst.b_22s() as usize)
                        .wrapping_add(inst.c_22s()),
                );
                inst.advance(2);
            }
            Opcode::RsubInt => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    inst.c_22s()
                        .wrapping_sub(frame.get_vreg(inst.b_22s() as usize)),
                );
                inst.advance(2);
            }
            Opcode::MulIntLit16 => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    frame
                        .get_vreg(inst.b_22s() as usize)
                        .wrapping_mul(inst.c_22s()),
                );
                inst.advance(2);
            }
            Opcode::DivIntLit16 => {
                let dividend = frame.get_vreg(inst.b_22s() as usize);
                let success = do_int_divide(
                    vm,
                    thread,
                    frame,
                    inst.a_22s() as usize,
                    dividend,
                    inst.c_22s(),
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::RemIntLit16 => {
                let dividend = frame.get_vreg(inst.b_22s() as usize);
                let success = do_int_remainder(
                    vm,
                    thread,
                    frame,
                    inst.a_22s() as usize,
                    dividend,
                    inst.c_22s(),
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::AndIntLit16 => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    frame.get_vreg(inst.b_22s() as usize) & inst.c_22s(),
                );
                inst.advance(2);
            }
            Opcode::OrIntLit16 => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    frame.get_vreg(inst.b_22s() as usize) | inst.c_22s(),
                );
                inst.advance(2);
            }
            Opcode::XorIntLit16 => {
                frame.set_vreg(
                    inst.a_22s() as usize,
                    frame.get_vreg(inst.b_22s() as usize) ^ inst.c_22s(),
                );
                inst.advance(2);
            }

            Opcode::AddIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame
                        .get_vreg(inst.b_22b() as usize)
                        .wrapping_add(inst.c_22b()),
                );
                inst.advance(2);
            }
            Opcode::RsubIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    inst.c_22b()
                        .wrapping_sub(frame.get_vreg(inst.b_22b() as usize)),
                );
                inst.advance(2);
            }
            Opcode::MulIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame
                        .get_vreg(inst.b_22b() as usize)
                        .wrapping_mul(inst.c_22b()),
                );
                inst.advance(2);
            }
            Opcode::DivIntLit8 => {
                let dividend = frame.get_vreg(inst.b_22b() as usize);
                let success = do_int_divide(
                    vm,
                    thread,
                    frame,
                    inst.a_22b() as usize,
                    dividend,
                    inst.c_22b(),
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::RemIntLit8 => {
                let dividend = frame.get_vreg(inst.b_22b() as usize);
                let success = do_int_remainder(
                    vm,
                    thread,
                    frame,
                    inst.a_22b() as usize,
                    dividend,
                    inst.c_22b(),
                );
                possibly_handle_pending_exception!(!success, 2);
            }
            Opcode::AndIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame.get_vreg(inst.b_22b() as usize) & inst.c_22b(),
                );
                inst.advance(2);
            }
            Opcode::OrIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame.get_vreg(inst.b_22b() as usize) | inst.c_22b(),
                );
                inst.advance(2);
            }
            Opcode::XorIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame.get_vreg(inst.b_22b() as usize) ^ inst.c_22b(),
                );
                inst.advance(2);
            }
            Opcode::ShlIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame.get_vreg(inst.b_22b() as usize) << (inst.c_22b() & 0x1f),
                );
                inst.advance(2);
            }
            Opcode::ShrIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    frame.get_vreg(inst.b_22b() as usize) >> (inst.c_22b() & 0x1f),
                );
                inst.advance(2);
            }
            Opcode::UshrIntLit8 => {
                frame.set_vreg(
                    inst.a_22b() as usize,
                    ((frame.get_vreg(inst.b_22b() as usize) as u32) >> (inst.c_22b() & 0x1f))
                        as i32,
                );
                inst.advance(2);
            }
        }
    }
}

/// Assignability check for reference stores into an array: null always
/// stores, otherwise the value's class must be assignable to the
/// array's element class.
fn array_store_allowed(vm: &VM, array: ObjRef, value: ObjRef) -> bool {
    if value.is_null() {
        return true;
    }

    let array_class = vm.program.class(vm.heap.class_of(array));
    match array_class.element_type() {
        Some(ElementType::Class(element_class)) => vm
            .program
            .is_assignable(element_class, vm.heap.class_of(value)),
        _ => false,
    }
}
